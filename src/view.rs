use std::fmt;

use crate::models::{Alarm, SoundProfile};
use crate::types::AlarmId;

pub const EMPTY_MESSAGE: &str = "No alarms set.";

/// Pure projection of the alarm list into something a front end can draw.
/// Rebuilt from scratch after every mutation, so the display and the
/// controller's state never diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmListView {
    pub rows: Vec<AlarmRow>,
}

/// One displayed alarm. The id is what the snooze and delete affordances
/// are wired to.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRow {
    pub id: AlarmId,
    pub time: String,
    pub message: String,
    pub sound: SoundProfile,
    pub repeat: bool,
    pub snooze: u32,
    pub active: bool,
}

impl AlarmListView {
    pub fn new(alarms: &[Alarm]) -> Self {
        AlarmListView {
            rows: alarms
                .iter()
                .map(|a| AlarmRow {
                    id: a.id,
                    time: a.time.clone(),
                    message: a.message.clone(),
                    sound: a.sound,
                    repeat: a.repeat,
                    snooze: a.snooze,
                    active: a.active,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for AlarmListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "{EMPTY_MESSAGE}");
        }
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "[{}] {} - {} ({}, {}, {}{})",
                row.id,
                row.time,
                row.message,
                row.sound,
                if row.repeat { "daily" } else { "once" },
                if row.snooze > 0 {
                    format!("snooze {}m", row.snooze)
                } else {
                    "no snooze".to_string()
                },
                if row.active { "" } else { ", off" },
            )?;
        }
        Ok(())
    }
}
