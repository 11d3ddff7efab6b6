use async_trait::async_trait;
use chrono::{Duration, NaiveTime, Utc};
use log::{error, info, warn};
use std::collections::HashMap;
use thiserror::Error;

use crate::client::StoreBackend;
use crate::models::{Alarm, NewAlarm, SoundProfile, DEFAULT_MESSAGE};
use crate::types::AlarmId;
use crate::view::AlarmListView;

pub const TIME_FORMAT: &str = "%H:%M";

/// Input rejected before any state change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("an alarm time is required")]
    MissingTime,
    #[error("alarm time must be HH:MM, got {0:?}")]
    BadTime(String),
}

/// Where a successful add landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The store accepted the alarm and assigned its id.
    Saved,
    /// The store was unreachable; the alarm lives in local state only, under
    /// a timestamp-derived id.
    SavedLocally,
}

/// The user's answer to the firing prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeChoice {
    Snooze,
    Dismiss,
}

/// Front-end seam the controller drives while an alarm fires. The prompt is
/// deliberately blocking: no further ticks are processed until it resolves.
#[async_trait]
pub trait AlertOutput: Send {
    /// Transient "triggered" state on.
    fn alarm_triggered(&mut self, alarm: &Alarm);
    fn play_sound(&mut self, profile: SoundProfile);
    /// System notification carrying the alarm message; the front end decides
    /// whether notifications are enabled.
    fn notify(&mut self, message: &str);
    async fn prompt_snooze(&mut self, alarm: &Alarm) -> SnoozeChoice;
    /// Transient "triggered" state off.
    fn alarm_cleared(&mut self, alarm: &Alarm);
}

/// Owns the in-session alarm list and every operation on it. All mutations
/// go through the store backend first and fall back to the local copy on
/// failure, so the clock keeps working when the store is down.
pub struct AlarmController<S> {
    store: S,
    alarms: Vec<Alarm>,
    /// Minute each alarm last fired at, so a repeating alarm cannot re-fire
    /// within the same matching minute.
    last_fired: HashMap<AlarmId, String>,
}

impl<S: StoreBackend> AlarmController<S> {
    pub fn new(store: S) -> Self {
        AlarmController {
            store,
            alarms: Vec::new(),
            last_fired: HashMap::new(),
        }
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn view(&self) -> AlarmListView {
        AlarmListView::new(&self.alarms)
    }

    /// Fetch the full list from the store. On failure the session starts
    /// with an empty list; there is no retry.
    pub async fn load(&mut self) {
        match self.store.list().await {
            Ok(alarms) => {
                info!("loaded {} alarm(s) from the store", alarms.len());
                self.alarms = alarms;
            }
            Err(e) => {
                error!("error loading alarms: {e}");
                self.alarms = Vec::new();
            }
        }
    }

    /// Validate and create an alarm. The input is never lost: if the store
    /// call fails the alarm is kept locally under a timestamp-derived id.
    pub async fn add(&mut self, mut draft: NewAlarm) -> Result<AddOutcome, ValidationError> {
        let time = draft.time.trim();
        if time.is_empty() {
            return Err(ValidationError::MissingTime);
        }
        let parsed = NaiveTime::parse_from_str(time, TIME_FORMAT)
            .map_err(|_| ValidationError::BadTime(draft.time.clone()))?;
        // keep the zero-padded invariant even for input like "7:05"
        draft.time = parsed.format(TIME_FORMAT).to_string();
        if draft.message.trim().is_empty() {
            draft.message = DEFAULT_MESSAGE.to_string();
        }

        match self.store.create(&draft).await {
            Ok(alarm) => {
                info!("alarm {} set for {}", alarm.id, alarm.time);
                self.alarms.push(alarm);
                Ok(AddOutcome::Saved)
            }
            Err(e) => {
                warn!("error adding alarm, keeping it locally: {e}");
                let id = self.next_local_id();
                self.alarms.push(draft.into_alarm(id));
                Ok(AddOutcome::SavedLocally)
            }
        }
    }

    /// Delete an alarm. The local record goes away regardless of the remote
    /// outcome; removing an absent id is a no-op.
    pub async fn remove(&mut self, id: AlarmId) {
        if let Err(e) = self.store.delete(id).await {
            warn!("error deleting alarm {id}, removing locally: {e}");
        }
        self.alarms.retain(|a| a.id != id);
        self.last_fired.remove(&id);
    }

    /// Push the alarm's time forward by its snooze offset. No-op when the
    /// alarm is unknown or snoozing is disabled. Snoozes relative to the
    /// alarm's nominal fire time, not the wall clock.
    pub async fn snooze(&mut self, id: AlarmId) {
        let Some(index) = self.alarms.iter().position(|a| a.id == id) else {
            return;
        };
        let alarm = &self.alarms[index];
        if alarm.snooze == 0 {
            return;
        }
        let Some(new_time) = shift_time(&alarm.time, alarm.snooze) else {
            warn!("alarm {id} has an unparseable time {:?}", alarm.time);
            return;
        };

        let mut updated = alarm.clone();
        updated.time = new_time.clone();
        match self.store.update(id, &updated).await {
            Ok(server_copy) => self.alarms[index] = server_copy,
            Err(e) => {
                warn!("error snoozing alarm {id}, updating locally: {e}");
                self.alarms[index].time = new_time;
            }
        }
        info!("alarm {id} snoozed to {}", self.alarms[index].time);
    }

    /// One evaluation of the clock against the alarm list. Triggers every
    /// active alarm whose stored time matches `now`'s `HH:MM`, in list
    /// order, at most once per matching minute. Returns how many fired so
    /// the caller knows to re-render.
    pub async fn tick(&mut self, now: NaiveTime, alert: &mut dyn AlertOutput) -> usize {
        let current = now.format(TIME_FORMAT).to_string();
        self.last_fired.retain(|_, minute| *minute == current);

        let due: Vec<AlarmId> = self
            .alarms
            .iter()
            .filter(|a| a.active && a.time == current && !self.last_fired.contains_key(&a.id))
            .map(|a| a.id)
            .collect();

        for id in &due {
            // the alarm can be gone by now if an earlier trigger removed it
            let Some(alarm) = self.alarms.iter().find(|a| a.id == *id).cloned() else {
                continue;
            };
            self.last_fired.insert(*id, current.clone());
            self.trigger(alarm, alert).await;
        }
        due.len()
    }

    /// The firing sequence: visual state on, tone, notification, blocking
    /// snooze/dismiss prompt, then the chosen follow-up.
    async fn trigger(&mut self, alarm: Alarm, alert: &mut dyn AlertOutput) {
        info!("triggering alarm {}: {}", alarm.id, alarm.message);
        alert.alarm_triggered(&alarm);
        alert.play_sound(alarm.sound);
        alert.notify(&alarm.message);

        let choice = alert.prompt_snooze(&alarm).await;
        match choice {
            SnoozeChoice::Snooze if alarm.snooze > 0 => self.snooze(alarm.id).await,
            _ => {
                if !alarm.repeat {
                    self.remove(alarm.id).await;
                }
            }
        }
        alert.alarm_cleared(&alarm);
    }

    /// Offline ids mimic the store's: unique within the list. Millisecond
    /// timestamps can collide under rapid creation, so bump past any taken id.
    fn next_local_id(&self) -> AlarmId {
        let mut id = Utc::now().timestamp_millis();
        while self.alarms.iter().any(|a| a.id == id) {
            id += 1;
        }
        id
    }
}

/// `"HH:MM"` plus minutes, with wall-clock carry: minute overflow rolls into
/// the hour and the hour wraps across midnight.
fn shift_time(time: &str, minutes: u32) -> Option<String> {
    let parsed = NaiveTime::parse_from_str(time, TIME_FORMAT).ok()?;
    let shifted = parsed + Duration::minutes(i64::from(minutes));
    Some(shifted.format(TIME_FORMAT).to_string())
}
