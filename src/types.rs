use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::AlarmStore;

/// Alarm identifier. Store-assigned when persisted; timestamp-derived for
/// alarms created while the store is unreachable.
pub type AlarmId = i64;

/// Shared handle to the alarm store used by the HTTP handlers.
pub type SharedStore = Arc<RwLock<AlarmStore>>;
