use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::AlarmId;

/// Message used when an alarm is created without one.
pub const DEFAULT_MESSAGE: &str = "Wake up!";

/// A single alarm record, as stored by the service and exchanged over
/// `/api/alarms`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Alarm {
    pub id: AlarmId,
    /// Time of day as zero-padded 24-hour `"HH:MM"`, no date component.
    pub time: String,
    pub message: String,
    pub sound: SoundProfile,
    /// A non-repeating alarm is removed after it fires and is dismissed.
    pub repeat: bool,
    /// Snooze offset in minutes; 0 disables snoozing.
    pub snooze: u32,
    /// Inactive alarms are never evaluated by the tick loop.
    pub active: bool,
}

/// Create payload: an [`Alarm`] minus the id, which the store assigns.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewAlarm {
    pub time: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sound: SoundProfile,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub snooze: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewAlarm {
    pub fn into_alarm(self, id: AlarmId) -> Alarm {
        Alarm {
            id,
            time: self.time,
            message: self.message,
            sound: self.sound,
            repeat: self.repeat,
            snooze: self.snooze,
            active: self.active,
        }
    }
}

/// The fixed set of alarm tones. Serialized with the display names the
/// original page used in its sound selector; the lowercase one-word aliases
/// are accepted on input.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SoundProfile {
    #[default]
    #[serde(rename = "Standard", alias = "standard")]
    Standard,
    #[serde(rename = "High Pitch", alias = "high")]
    HighPitch,
    #[serde(rename = "Low Pitch", alias = "low")]
    LowPitch,
    #[serde(rename = "Pulse", alias = "pulse")]
    Pulse,
}

impl SoundProfile {
    pub fn label(self) -> &'static str {
        match self {
            SoundProfile::Standard => "Standard",
            SoundProfile::HighPitch => "High Pitch",
            SoundProfile::LowPitch => "Low Pitch",
            SoundProfile::Pulse => "Pulse",
        }
    }

    /// Tone frequency for this profile.
    pub fn frequency_hz(self) -> f32 {
        match self {
            SoundProfile::Standard => 440.0,
            SoundProfile::HighPitch => 1000.0,
            SoundProfile::LowPitch => 200.0,
            SoundProfile::Pulse => 500.0,
        }
    }

    /// Parse the one-word form used by terminal commands.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "standard" => Some(SoundProfile::Standard),
            "high" => Some(SoundProfile::HighPitch),
            "low" => Some(SoundProfile::LowPitch),
            "pulse" => Some(SoundProfile::Pulse),
            _ => None,
        }
    }
}

impl fmt::Display for SoundProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
