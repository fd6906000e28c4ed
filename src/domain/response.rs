use crate::domain::status::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendSmsResponse {
    /// Summary line such as `Sent to 1/1 Total Cost: KES 0.8000`.
    pub message: Option<String>,
    pub recipients: Vec<Recipient>,
}

impl SendSmsResponse {
    /// The first recipient record, if the gateway reported any.
    pub fn first_recipient(&self) -> Option<&Recipient> {
        self.recipients.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub status_code: StatusCode,
    pub number: Option<String>,
    pub status: Option<String>,
    pub cost: Option<String>,
    /// Gateway-assigned message id (`messageId`).
    pub message_id: Option<String>,
}
