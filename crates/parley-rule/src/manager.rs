use tracing::{debug, info, warn};

use crate::error::{Result, RuleError};
use crate::handler::{Handler, HandlerCodec, JsonHandlerCodec};
use crate::model::{HandlerSlot, Rule, RuleId, RuleRecord};
use crate::repository::RuleRepository;

/// Single authority over the in-process view of all rules.
///
/// Keeps the ordered in-memory collection consistent with durable
/// storage on every mutation and is the only place response and handler
/// encoding happens. Reads are served from memory.
///
/// `add_rule` returns the assigned [`RuleId`]; pass it to
/// [`add_then_handler`](Self::add_then_handler) to attach a follow-up
/// action to that rule.
pub struct RuleManager<R: RuleRepository, C: HandlerCodec = JsonHandlerCodec> {
    repository: R,
    codec: C,
    rules: Vec<Rule>,
}

impl<R: RuleRepository> RuleManager<R> {
    pub fn new(repository: R) -> Self {
        Self::with_codec(repository, JsonHandlerCodec)
    }
}

impl<R: RuleRepository, C: HandlerCodec> RuleManager<R, C> {
    pub fn with_codec(repository: R, codec: C) -> Self {
        Self {
            repository,
            codec,
            rules: Vec::new(),
        }
    }

    /// Load all persisted rules into memory, preserving retrieval order.
    ///
    /// Returns true if any rule was loaded. An empty store is a valid
    /// state, not an error. Call exactly once before other operations;
    /// calling again appends the same rules a second time.
    pub async fn initialize(&mut self) -> Result<bool> {
        let records = self.repository.get_all().await?;

        for record in records {
            self.rules.push(Self::from_record(record)?);
        }

        info!(count = self.rules.len(), "rules loaded");
        Ok(!self.rules.is_empty())
    }

    /// Register a rule mapping `request` to `response`.
    ///
    /// The response is persisted in encoded text form and kept decoded
    /// in memory. Returns the id assigned by the repository; use it to
    /// attach a handler.
    pub async fn add_rule(
        &mut self,
        request: impl Into<String>,
        response: serde_json::Value,
    ) -> Result<RuleId> {
        let mut rule = Rule::new(request, response);

        let mut record = self.to_record(&rule)?;
        self.repository.save(&mut record).await?;

        let id = record.id.ok_or_else(|| {
            RuleError::Repository("save did not assign an id".to_string())
        })?;
        rule.id = Some(id);

        info!(rule_id = %id, request = %rule.request, "rule added");

        self.rules.push(rule);
        Ok(id)
    }

    /// Attach a follow-up handler to the rule identified by `rule_id`.
    ///
    /// The handler is encoded to text, set on the in-memory rule, and
    /// the updated rule is persisted. An unknown id is a silent no-op:
    /// nothing is mutated and no write occurs.
    pub async fn add_then_handler(
        &mut self,
        rule_id: RuleId,
        handler: Handler,
    ) -> Result<()> {
        let Some(idx) = self.rules.iter().position(|r| r.id == Some(rule_id))
        else {
            warn!(rule_id = %rule_id, "no rule to attach handler to");
            return Ok(());
        };

        let encoded = self.codec.encode(&handler)?;
        self.rules[idx].then_handler = Some(HandlerSlot::Encoded(encoded));

        let mut record = self.to_record(&self.rules[idx])?;
        self.repository.save(&mut record).await?;

        info!(rule_id = %rule_id, "handler attached");
        Ok(())
    }

    /// Return the first rule whose id equals `rule_id`, or `None`.
    ///
    /// The returned value is a copy; if the rule carries an encoded
    /// handler it is decoded into the copy. Decoding is not memoized:
    /// the collection keeps the encoded text and repeated lookups
    /// decode again.
    pub fn get_by_id(&self, rule_id: RuleId) -> Result<Option<Rule>> {
        let Some(rule) = self.rules.iter().find(|r| r.id == Some(rule_id))
        else {
            return Ok(None);
        };

        let mut found = rule.clone();
        if let Some(HandlerSlot::Encoded(text)) = &found.then_handler {
            let handler = self.codec.decode(text)?;
            debug!(rule_id = %rule_id, "handler decoded");
            found.then_handler = Some(HandlerSlot::Decoded(handler));
        }

        Ok(Some(found))
    }

    /// Return all rules in insertion order, handlers left encoded.
    /// Empty if nothing was loaded or added.
    pub fn get_all(&self) -> &[Rule] {
        &self.rules
    }

    fn from_record(record: RuleRecord) -> Result<Rule> {
        Ok(Rule {
            id: record.id,
            request: record.request,
            response: serde_json::from_str(&record.response)?,
            then_handler: record.then_handler.map(HandlerSlot::Encoded),
            created_at: record.created_at,
        })
    }

    fn to_record(&self, rule: &Rule) -> Result<RuleRecord> {
        let then_handler = match &rule.then_handler {
            Some(HandlerSlot::Encoded(text)) => Some(text.clone()),
            Some(HandlerSlot::Decoded(handler)) => {
                Some(self.codec.encode(handler)?)
            }
            None => None,
        };

        Ok(RuleRecord {
            id: rule.id,
            request: rule.request.clone(),
            response: serde_json::to_string(&rule.response)?,
            then_handler,
            created_at: rule.created_at,
        })
    }
}
