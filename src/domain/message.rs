use serde::{Deserialize, Serialize};

use crate::domain::status::MessageState;
use crate::domain::value::MessageId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A message handed over by the outbound queue.
pub struct OutgoingMessage {
    pub id: MessageId,
    pub to: String,
    pub content: String,
}

impl OutgoingMessage {
    pub fn new(id: impl Into<MessageId>, to: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            to: to.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Terminal state reached by one message.
pub struct StateChange {
    pub message_id: MessageId,
    pub gateway_ref: Option<String>,
    pub state: MessageState,
    pub details: String,
}
