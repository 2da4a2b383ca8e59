//! Message records and conversation summaries.
//!
//! `MessageRecord` is the JSON shape the retrieval layer hands over: one entry
//! per message with its raw Message-ID, References and In-Reply-To values.
//! Identifiers are normalized here so the fold engine only ever sees clean
//! strings.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FoldError;
use crate::threading::{Conversation, ThreadableMessage};

/// Clean a message identifier by removing angle brackets and whitespace
fn normalize_message_id(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_matches(&['<', '>'][..]).trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// One parsed message as delivered by the retrieval layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMessageRecord")]
pub struct MessageRecord {
    /// Mailbox-local id, empty when the retrieval layer had none
    pub mail_id: String,

    /// Message-ID header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// References header values, oldest first
    pub references: Vec<String>,

    /// In-Reply-To header value, used when References is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
}

/// Wire form before normalization
#[derive(Deserialize)]
struct RawMessageRecord {
    mail_id: String,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    references: Vec<String>,
    #[serde(default)]
    in_reply_to: Option<String>,
}

impl From<RawMessageRecord> for MessageRecord {
    fn from(raw: RawMessageRecord) -> Self {
        MessageRecord::new(raw.mail_id, raw.message_id, raw.references, raw.in_reply_to)
    }
}

impl MessageRecord {
    pub fn new(
        mail_id: impl Into<String>,
        message_id: Option<String>,
        references: Vec<String>,
        in_reply_to: Option<String>,
    ) -> Self {
        let mail_id: String = mail_id.into();
        MessageRecord {
            mail_id: normalize_message_id(&mail_id).unwrap_or_default(),
            message_id: message_id.as_deref().and_then(normalize_message_id),
            references: references
                .iter()
                .filter_map(|reference| normalize_message_id(reference))
                .collect(),
            in_reply_to: in_reply_to.as_deref().and_then(normalize_message_id),
        }
    }

    /// Shorthand for a message with a Message-ID and References chain
    pub fn with_references<S: Into<String>>(
        mail_id: impl Into<String>,
        message_id: impl Into<String>,
        references: impl IntoIterator<Item = S>,
    ) -> Self {
        MessageRecord::new(
            mail_id,
            Some(message_id.into()),
            references.into_iter().map(Into::into).collect(),
            None,
        )
    }
}

impl ThreadableMessage for MessageRecord {
    fn mail_id(&self) -> &str {
        &self.mail_id
    }

    fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    fn references(&self) -> Vec<&str> {
        if self.references.is_empty() {
            self.in_reply_to.as_deref().into_iter().collect()
        } else {
            self.references.iter().map(String::as_str).collect()
        }
    }
}

/// Serializable view of a folded conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Message identifiers, sorted
    pub message_ids: Vec<String>,
    /// Mail ids of the messages in this conversation, in input order
    pub mail_ids: Vec<String>,
    pub size: usize,
}

impl From<&Conversation> for ConversationSummary {
    fn from(conversation: &Conversation) -> Self {
        let mut message_ids: Vec<String> = conversation.message_ids().iter().cloned().collect();
        message_ids.sort_unstable();

        ConversationSummary {
            size: message_ids.len(),
            message_ids,
            mail_ids: conversation.mail_ids().to_vec(),
        }
    }
}

/// Parse a JSON array of message records
pub fn load_records<R: Read>(reader: R) -> Result<Vec<MessageRecord>, FoldError> {
    let records: Vec<MessageRecord> = serde_json::from_reader(reader)?;
    log::debug!("loaded {} message records", records.len());
    Ok(records)
}

pub fn load_records_from_path(path: &Path) -> Result<Vec<MessageRecord>, FoldError> {
    let file = File::open(path)?;
    load_records(BufReader::new(file))
}

/// One conversation per record, in record order
pub fn conversations_from_records(records: &[MessageRecord]) -> Vec<Conversation> {
    records.iter().map(Conversation::new).collect()
}
