pub mod error;
pub mod handler;
pub mod manager;
pub mod model;
pub mod repository;

pub use error::{Result, RuleError};
pub use handler::{Handler, HandlerCodec, JsonHandlerCodec};
pub use manager::RuleManager;
pub use model::{HandlerSlot, Rule, RuleId, RuleRecord};
pub use repository::{MemoryRuleRepository, RuleRepository};
