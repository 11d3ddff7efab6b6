use log::{error, info};
use std::fs;
use std::path::PathBuf;

use crate::models::{Alarm, NewAlarm, DEFAULT_MESSAGE};
use crate::types::AlarmId;

/// Server-side alarm repository: an ordered in-memory list backed by a JSON
/// file. Alarms keep their insertion order; ids are assigned sequentially and
/// resume past the largest persisted id after a reload.
pub struct AlarmStore {
    alarms: Vec<Alarm>,
    next_id: AlarmId,
    path: Option<PathBuf>,
}

impl AlarmStore {
    /// Store without a backing file; used by tests and ephemeral setups.
    pub fn in_memory() -> Self {
        AlarmStore {
            alarms: Vec::new(),
            next_id: 1,
            path: None,
        }
    }

    /// Load the store from `path`. A missing file starts an empty store; an
    /// unreadable or corrupt file is logged and also degrades to empty.
    pub fn load(path: PathBuf) -> Self {
        let alarms = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<Alarm>>(&contents) {
                Ok(alarms) => {
                    info!("loaded {} alarm(s) from {}", alarms.len(), path.display());
                    alarms
                }
                Err(e) => {
                    error!("error parsing {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                error!("error reading {}: {e}", path.display());
                Vec::new()
            }
        };
        let next_id = alarms.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        AlarmStore {
            alarms,
            next_id,
            path: Some(path),
        }
    }

    pub fn list(&self) -> Vec<Alarm> {
        self.alarms.clone()
    }

    pub fn get(&self, id: AlarmId) -> Option<Alarm> {
        self.alarms.iter().find(|a| a.id == id).cloned()
    }

    pub fn create(&mut self, mut new: NewAlarm) -> Alarm {
        if new.message.trim().is_empty() {
            new.message = DEFAULT_MESSAGE.to_string();
        }
        let alarm = new.into_alarm(self.next_id);
        self.next_id += 1;
        self.alarms.push(alarm.clone());
        self.persist();
        alarm
    }

    /// Full-field replace onto an existing record; the id stays the one in
    /// the path. Returns `None` when the id is unknown.
    pub fn update(&mut self, id: AlarmId, body: Alarm) -> Option<Alarm> {
        let slot = self.alarms.iter_mut().find(|a| a.id == id)?;
        *slot = Alarm { id, ..body };
        let updated = slot.clone();
        self.persist();
        Some(updated)
    }

    /// Removes the alarm if present; removing an absent id is a no-op.
    pub fn delete(&mut self, id: AlarmId) -> bool {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id != id);
        let removed = self.alarms.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Write the list back to the data file. Failures are logged and never
    /// fatal; the in-memory list stays authoritative for the session.
    fn persist(&self) {
        let Some(path) = &self.path else { return };
        match serde_json::to_string_pretty(&self.alarms) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    error!("error saving alarms to {}: {e}", path.display());
                }
            }
            Err(e) => error!("error serializing alarms: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SoundProfile;

    fn draft(time: &str) -> NewAlarm {
        NewAlarm {
            time: time.into(),
            message: "Gym".into(),
            sound: SoundProfile::Standard,
            repeat: false,
            snooze: 5,
            active: true,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut store = AlarmStore::in_memory();
        let a = store.create(draft("07:00"));
        let b = store.create(draft("08:00"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn create_defaults_empty_message() {
        let mut store = AlarmStore::in_memory();
        let mut new = draft("07:00");
        new.message = "  ".into();
        let alarm = store.create(new);
        assert_eq!(alarm.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn update_replaces_fields_and_keeps_path_id() {
        let mut store = AlarmStore::in_memory();
        let alarm = store.create(draft("07:00"));
        let mut body = alarm.clone();
        body.id = 999;
        body.time = "07:05".into();
        let updated = store.update(alarm.id, body).unwrap();
        assert_eq!(updated.id, alarm.id);
        assert_eq!(updated.time, "07:05");
        assert_eq!(store.get(alarm.id).unwrap().time, "07:05");
    }

    #[test]
    fn update_unknown_id_is_none() {
        let mut store = AlarmStore::in_memory();
        let alarm = store.create(draft("07:00"));
        assert!(store.update(alarm.id + 1, alarm).is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = AlarmStore::in_memory();
        let alarm = store.create(draft("07:00"));
        assert!(store.delete(alarm.id));
        assert!(!store.delete(alarm.id));
        assert!(store.list().is_empty());
    }

    #[test]
    fn reload_keeps_alarms_and_resumes_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");

        let mut store = AlarmStore::load(path.clone());
        store.create(draft("07:00"));
        store.create(draft("08:00"));

        let mut reloaded = AlarmStore::load(path);
        assert_eq!(reloaded.list().len(), 2);
        let next = reloaded.create(draft("09:00"));
        assert_eq!(next.id, 3);
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");
        fs::write(&path, "not json").unwrap();

        let store = AlarmStore::load(path);
        assert!(store.list().is_empty());
    }
}
