//! Spoken announcements.
//!
//! The core only decides *what* to say; speech output is a fire-and-forget
//! sink supplied by the host. With no sink, or with voice turned off,
//! announcements are skipped.

use crate::models::CoreEvent;
use serde::{Deserialize, Serialize};

/// Speech parameters, persisted for all profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub enabled: bool,
    pub pitch: f32,
    pub rate: f32,
    /// Preferred platform voice; `None` uses the platform default
    pub voice_name: Option<String>,
    pub lang: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            pitch: 1.0,
            rate: 1.0,
            voice_name: None,
            lang: "en-US".to_string(),
        }
    }
}

impl VoiceSettings {
    /// Pitch is limited to 0.0-2.0 and rate to 0.1-10.0.
    pub fn clamped(mut self) -> Self {
        self.pitch = self.pitch.clamp(0.0, 2.0);
        self.rate = self.rate.clamp(0.1, 10.0);
        self
    }
}

/// Platform text-to-speech output.
pub trait VoiceSink {
    fn speak(&mut self, text: &str, settings: &VoiceSettings);
}

/// Turns session events into speech.
pub struct Announcer {
    sink: Option<Box<dyn VoiceSink>>,
    settings: VoiceSettings,
}

impl Announcer {
    pub fn new(sink: Option<Box<dyn VoiceSink>>, settings: VoiceSettings) -> Self {
        Self { sink, settings }
    }

    pub fn silent() -> Self {
        Self::new(None, VoiceSettings::default())
    }

    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: VoiceSettings) {
        self.settings = settings.clamped();
    }

    /// Speak `text` if voice is enabled and a sink exists. Returns whether it was sent.
    pub fn say(&mut self, text: &str) -> bool {
        if !self.settings.enabled {
            return false;
        }
        match self.sink.as_mut() {
            Some(sink) => {
                sink.speak(text, &self.settings);
                true
            }
            None => {
                tracing::debug!(text, "No voice output available; skipping announcement");
                false
            }
        }
    }

    pub fn announce_start(&mut self) -> bool {
        self.say("Start")
    }

    pub fn announce_stop(&mut self) -> bool {
        self.say("Stop")
    }

    /// Speak a milestone event; other events are ignored.
    pub fn announce(&mut self, event: &CoreEvent) -> bool {
        match event {
            CoreEvent::DistanceMilestoneReached {
                km,
                elapsed_display,
            } => self.say(&milestone_text(*km, elapsed_display)),
            CoreEvent::GoalAchieved { .. } => false,
        }
    }
}

pub fn milestone_text(km: u32, elapsed_display: &str) -> String {
    format!("{} km passed. Current time {}.", km, elapsed_display)
}
