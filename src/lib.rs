pub mod config;
pub mod error;
pub mod models;
pub mod threading;

pub use config::FoldConfig;
pub use error::FoldError;
pub use models::{ConversationSummary, MessageRecord};
pub use threading::{Conversation, FoldStrategy, ThreadableMessage, fold, fold_in_place, fold_with};
