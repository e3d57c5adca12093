//! Cross-profile rankings.
//!
//! Rankings are rebuilt from every profile's records on each call. Sorting
//! is stable, so profiles with equal values keep registration order.

use crate::db::RunDb;
use crate::error::Result;
use crate::models::{Profile, RankMode, RankPosition, RankingEntry};
use crate::services::records::RecordStore;
use crate::time_utils::{format_clock, format_km};

/// A profile together with its records.
#[derive(Debug, Clone)]
pub struct ProfileRecords {
    pub profile: Profile,
    pub records: RecordStore,
}

/// Ranking view over all profiles.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    profiles: Vec<ProfileRecords>,
}

impl RankingEngine {
    /// Profiles must be given in registration order.
    pub fn new(profiles: Vec<ProfileRecords>) -> Self {
        Self { profiles }
    }

    /// Load every profile and its records from storage.
    pub fn load(db: &RunDb) -> Result<Self> {
        let profiles = db
            .profiles()?
            .into_iter()
            .map(|profile| {
                let records = RecordStore::from_records(db.records(profile.id)?);
                Ok(ProfileRecords { profile, records })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(profiles))
    }

    pub fn profiles(&self) -> &[ProfileRecords] {
        &self.profiles
    }

    /// Ordered ranking.
    ///
    /// - `Time`: best time ascending; profiles without runs are left out.
    /// - `Distance`: total distance descending; profiles at zero are left out.
    pub fn rank(&self, mode: RankMode) -> Vec<RankingEntry> {
        let mut entries: Vec<RankingEntry> = self
            .profiles
            .iter()
            .filter_map(|p| {
                let value = match mode {
                    RankMode::Time => p.records.best_time()?,
                    RankMode::Distance => {
                        let total = p.records.total_distance(None);
                        if total <= 0.0 {
                            return None;
                        }
                        total
                    }
                };
                let display_value = match mode {
                    RankMode::Time => format_clock(value),
                    RankMode::Distance => format_km(value),
                };
                Some(RankingEntry {
                    profile_id: p.profile.id,
                    name: p.profile.name.clone(),
                    value,
                    display_value,
                })
            })
            .collect();

        match mode {
            RankMode::Time => entries.sort_by(|a, b| a.value.total_cmp(&b.value)),
            RankMode::Distance => entries.sort_by(|a, b| b.value.total_cmp(&a.value)),
        }
        entries
    }

    /// 1-based position of a profile, or `Unranked` if it is not in the ranking.
    pub fn rank_of(&self, profile_id: i64, mode: RankMode) -> RankPosition {
        self.rank(mode)
            .iter()
            .position(|e| e.profile_id == profile_id)
            .map_or(RankPosition::Unranked, |idx| RankPosition::Ranked(idx + 1))
    }

    /// Distance run by all profiles together (km).
    pub fn team_total_distance(&self) -> f64 {
        self.profiles
            .iter()
            .map(|p| p.records.total_distance(None))
            .sum()
    }
}
