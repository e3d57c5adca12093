//! Database layer (key-value store).

pub mod kv;
pub mod run_db;

pub use kv::{FileStore, KvStore, MemoryStore};
pub use run_db::RunDb;

/// Storage keys as constants.
pub mod keys {
    /// Ordered list of all local profiles
    pub const PROFILES: &str = "running_users";
    /// Announcement voice settings (shared by all profiles)
    pub const VOICE_SETTINGS: &str = "running_voice_settings";

    /// Run records of one profile, most recent first
    pub fn records(profile_id: i64) -> String {
        format!("records_{}", profile_id)
    }

    /// Monthly goal state of one profile
    pub fn goal(profile_id: i64) -> String {
        format!("goal_{}", profile_id)
    }
}
