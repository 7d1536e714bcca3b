use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which entity collection is being ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Worker,
    Workplace,
}

impl Role {
    /// Plural label used in log lines and error context
    pub fn plural(&self) -> &'static str {
        match self {
            Role::Worker => "workers",
            Role::Workplace => "workplaces",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A worker or a workplace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub name: String,
    pub status: i64,
    /// Only present on workplaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Entity {
    pub const ACTIVE_STATUS: i64 = 0;

    pub fn is_active(&self) -> bool {
        self.status == Self::ACTIVE_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: DateTime<Utc>,
    pub workplace_id: i64,
    #[serde(default)]
    pub worker_id: Option<i64>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Shift {
    pub fn is_claimed(&self) -> bool {
        self.worker_id.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }
}

/// One page of a cursor-paginated resource.
///
/// On the wire a page looks like `{"data": [...], "links": {"next": "<url>"}}`.
/// A missing, null or empty `next` marks the final page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct WirePage<T> {
    data: Vec<T>,
    #[serde(default)]
    links: WireLinks,
}

#[derive(Deserialize, Default)]
struct WireLinks {
    #[serde(default)]
    next: Option<String>,
}

impl<T: DeserializeOwned> PagedResult<T> {
    /// Decode a page from an already-parsed JSON body
    pub fn from_value(body: serde_json::Value) -> serde_json::Result<Self> {
        let page: WirePage<T> = serde_json::from_value(body)?;
        Ok(Self {
            items: page.data,
            next_cursor: page.links.next.filter(|next| !next.trim().is_empty()),
        })
    }
}

impl<T> PagedResult<T> {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Output unit of a ranking run. Field order is significant for the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub name: String,
    pub count: u64,
}

impl RankedResult {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}
