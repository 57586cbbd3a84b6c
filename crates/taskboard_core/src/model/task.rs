//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered by the board columns.
//! - Define the persisted wire shape of tasks (camelCase field names).
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Every task has exactly one `status` at any instant.
//! - Optional fields are omitted from the wire shape when absent.
//! - Timestamps are epoch milliseconds in memory and ISO-8601 text on the wire.

use crate::model::attachment::TaskFile;
use crate::model::user::User;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of one task.
pub type TaskId = Uuid;

/// Task urgency shown as a badge on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Stable lowercase key (`low|medium|high`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a key produced by [`Priority::key`], ignoring case and whitespace.
    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Board column a task currently lives in.
///
/// The declaration order is the column display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// All statuses in column display order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Stable key, also used as the droppable id of the column.
    pub fn key(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    /// Human-readable column title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Parses an exact status key. Task ids never collide with these keys.
    pub fn from_key(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Canonical task record owned by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    /// Opaque date text as entered in the form (e.g. `2026-10-31`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: Status,
    /// Denormalized snapshot taken at assignment time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<TaskFile>,
    /// Unix epoch milliseconds; ISO-8601 text on the wire.
    #[serde(with = "iso_timestamp")]
    pub created_at: i64,
    /// Unix epoch milliseconds; ISO-8601 text on the wire.
    #[serde(with = "iso_timestamp")]
    pub updated_at: i64,
}

impl Task {
    /// Creates a `todo` task with a generated id and both timestamps set to now.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, now_epoch_ms())
    }

    /// Creates a `todo` task with caller-provided identity and timestamp.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: TaskId, title: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            status: Status::Todo,
            assignee: None,
            file: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Builder-style status override.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Marks the task as modified at `now_ms`.
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.created_at);
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` when the system clock is before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Wire codec for epoch-millisecond timestamps.
///
/// Writes UTC ISO-8601 text with millisecond precision
/// (`2026-10-17T09:30:00.000Z`). Reads that text or a bare epoch-ms number.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        match DateTime::<Utc>::from_timestamp_millis(*value) {
            Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_i64(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(millis) => Ok(millis),
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|at| at.timestamp_millis())
                .map_err(|err| D::Error::custom(format!("invalid timestamp `{text}`: {err}"))),
        }
    }
}
