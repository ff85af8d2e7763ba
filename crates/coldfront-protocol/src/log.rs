use serde::{Deserialize, Serialize};

/// Category tag attached to every message-log entry, used by the rendering
/// collaborator to style the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogCategory {
    Action,
    Turn,
    Event,
    Important,
    VictoryPoint,
    Error,
}

/// One entry of the append-only game narrative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub category: LogCategory,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, category: LogCategory) -> Self {
        Self {
            message: message.into(),
            category,
        }
    }
}
