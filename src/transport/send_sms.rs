use serde::Deserialize;

use crate::domain::{
    MessageText, RawPhoneNumber, Recipient, SendSms, SendSmsResponse, SenderId, StatusCode,
    Username,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct SendSmsJsonResponse {
    #[serde(rename = "SMSMessageData")]
    sms_message_data: SmsMessageDataJson,
}

#[derive(Debug, Clone, Deserialize)]
struct SmsMessageDataJson {
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Recipients", default)]
    recipients: Option<Vec<RecipientJson>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipientJson {
    status_code: i32,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    cost: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
}

impl From<RecipientJson> for Recipient {
    fn from(value: RecipientJson) -> Self {
        Recipient {
            status_code: StatusCode::new(value.status_code),
            number: value.number,
            status: value.status,
            cost: value.cost,
            message_id: value.message_id,
        }
    }
}

pub fn encode_send_sms_form(username: &Username, request: &SendSms) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    params.push((Username::FIELD.to_owned(), username.as_str().to_owned()));
    let to = request
        .recipients()
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    params.push((RawPhoneNumber::FIELD.to_owned(), to));
    params.push((
        MessageText::FIELD.to_owned(),
        request.message().as_str().to_owned(),
    ));
    if let Some(from) = request.from() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }

    params
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsResponse, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;
    let data = parsed.sms_message_data;

    Ok(SendSmsResponse {
        message: data.message,
        recipients: data
            .recipients
            .unwrap_or_default()
            .into_iter()
            .map(Recipient::from)
            .collect(),
    })
}
