use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handler::Handler;

/// Rule identifier, assigned by the persistence layer on first save.
pub type RuleId = i64;

/// A conversational rule: an inbound trigger, the response payload to
/// deliver, and an optional follow-up handler.
///
/// This is the in-memory form. `response` is always decoded structured
/// data here; the encoded text lives only in [`RuleRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// None until the repository has persisted the rule once.
    pub id: Option<RuleId>,

    /// Trigger key matched against inbound requests.
    pub request: String,

    /// Response payload (arbitrary nested data).
    pub response: serde_json::Value,

    /// Follow-up action. Held encoded in the manager's collection and
    /// decoded per lookup.
    pub then_handler: Option<HandlerSlot>,

    /// When the rule was registered.
    pub created_at: DateTime<Utc>,
}

impl Rule {
    pub fn new(request: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            id: None,
            request: request.into(),
            response,
            then_handler: None,
            created_at: Utc::now(),
        }
    }
}

/// In-memory state of a rule's handler field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HandlerSlot {
    /// Storable text form, as persisted.
    Encoded(String),

    /// Materialized descriptor, produced on lookup.
    Decoded(Handler),
}

/// Durable form of a rule as exchanged with the repository.
///
/// `response` and `then_handler` are encoded text here; the manager is
/// the only place translation to and from [`Rule`] happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: Option<RuleId>,
    pub request: String,
    pub response: String,
    pub then_handler: Option<String>,
    pub created_at: DateTime<Utc>,
}
