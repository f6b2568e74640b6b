use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{RuleId, RuleRecord};

/// Persistence collaborator for rules.
///
/// Implementations own failure behavior (store unavailable, constraint
/// violations); the manager does not catch or translate their errors.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Fetch every persisted rule in stable retrieval order, ids
    /// populated, `response` and `then_handler` in encoded text form.
    async fn get_all(&self) -> Result<Vec<RuleRecord>>;

    /// Persist a rule.
    ///
    /// Must assign and populate `record.id` when it is absent (insert);
    /// otherwise persists the current field values (update).
    async fn save(&self, record: &mut RuleRecord) -> Result<()>;
}

/// In-memory repository with sequential ids. Used by tests and demos;
/// a real deployment backs this trait with a database. Clones share the
/// same underlying store.
#[derive(Clone)]
pub struct MemoryRuleRepository {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    records: Vec<RuleRecord>,
    next_id: RuleId,
}

impl MemoryRuleRepository {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for MemoryRuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleRepository for MemoryRuleRepository {
    async fn get_all(&self) -> Result<Vec<RuleRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.clone())
    }

    async fn save(&self, record: &mut RuleRecord) -> Result<()> {
        let mut inner = self.inner.write().await;
        match record.id {
            None => {
                record.id = Some(inner.next_id);
                inner.next_id += 1;
                inner.records.push(record.clone());
            }
            Some(id) => {
                match inner.records.iter().position(|r| r.id == Some(id)) {
                    Some(pos) => inner.records[pos] = record.clone(),
                    None => inner.records.push(record.clone()),
                }
            }
        }
        Ok(())
    }
}
