use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RawPhoneNumber, SenderId};

#[derive(Debug, Clone)]
/// Bulk send request for `version1/messaging`.
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    message: MessageText,
    from: Option<SenderId>,
}

impl SendSms {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        message: MessageText,
        from: Option<SenderId>,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
            from,
        })
    }

    /// Single-recipient request, the shape used by the adapter.
    pub fn one(to: RawPhoneNumber, message: MessageText, from: Option<SenderId>) -> Self {
        Self {
            recipients: vec![to],
            message,
            from,
        }
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }
}
