use crate::domain::{
    OutgoingMessage, Recipient, SendSmsResponse, StateChange, StatusCode, StatusEntry,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// What happened to one submitted message.
pub enum SubmissionOutcome {
    /// The gateway reported a terminal state.
    StateChange(StateChange),
    /// Transient gateway status; the message stays pending for an outer retry.
    Retryable {
        status_code: StatusCode,
        detail: &'static str,
        gateway_ref: Option<String>,
    },
    /// Status code missing from the taxonomy.
    Unmapped {
        status_code: StatusCode,
        gateway_ref: Option<String>,
    },
    /// The response carried no recipient record.
    NoRecipient,
    /// The request failed without a usable response, or was never sent.
    Failed { reason: String },
}

impl SubmissionOutcome {
    pub fn state_change(&self) -> Option<&StateChange> {
        match self {
            Self::StateChange(change) => Some(change),
            _ => None,
        }
    }

    pub fn into_state_change(self) -> Option<StateChange> {
        match self {
            Self::StateChange(change) => Some(change),
            _ => None,
        }
    }
}

/// Recipient record of a send response; only the first one is considered.
pub fn recipient_of(response: Option<&SendSmsResponse>) -> Option<&Recipient> {
    response.and_then(SendSmsResponse::first_recipient)
}

/// Look up the taxonomy entry for a recipient's status code.
pub fn map_status(recipient: Option<&Recipient>) -> Option<StatusEntry> {
    recipient.and_then(|recipient| recipient.status_code.entry())
}

/// Classify a response (from either the success or the failure path) for `message`.
pub fn classify(message: &OutgoingMessage, response: Option<&SendSmsResponse>) -> SubmissionOutcome {
    let Some(recipient) = recipient_of(response) else {
        return SubmissionOutcome::NoRecipient;
    };
    let gateway_ref = recipient.message_id.clone();

    match map_status(Some(recipient)) {
        None => SubmissionOutcome::Unmapped {
            status_code: recipient.status_code,
            gateway_ref,
        },
        Some(entry) if entry.retry => SubmissionOutcome::Retryable {
            status_code: recipient.status_code,
            detail: entry.detail,
            gateway_ref,
        },
        Some(entry) => SubmissionOutcome::StateChange(StateChange {
            message_id: message.id.clone(),
            gateway_ref,
            state: entry.state,
            details: entry.detail.to_owned(),
        }),
    }
}

/// The terminal state change for `message`, if the response carries one.
pub fn generate_state_change(
    message: &OutgoingMessage,
    response: Option<&SendSmsResponse>,
) -> Option<StateChange> {
    classify(message, response).into_state_change()
}
