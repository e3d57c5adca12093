//! Local runner profile model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Icon shown next to a profile: an emoji or a captured photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum ProfileIcon {
    Emoji(String),
    /// Image data URL (e.g. `data:image/jpeg;base64,...`)
    Image(String),
}

impl Default for ProfileIcon {
    fn default() -> Self {
        ProfileIcon::Emoji("🏃".to_string())
    }
}

/// A local user identity. Stored in the shared profile list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    /// Creation time in milliseconds, bumped on collision
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub name: String,
    pub icon: ProfileIcon,
}

/// Registration input.
#[derive(Debug, Clone, Validate)]
pub struct NewProfile {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub icon: ProfileIcon,
}

impl NewProfile {
    /// Build registration input, trimming surrounding whitespace from the name.
    pub fn new(name: &str, icon: ProfileIcon) -> Self {
        Self {
            name: name.trim().to_string(),
            icon,
        }
    }
}
