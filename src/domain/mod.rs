//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod request;
mod response;
mod status;
mod validation;
mod value;

pub use message::{OutgoingMessage, StateChange};
pub use request::SendSms;
pub use response::{Recipient, SendSmsResponse};
pub use status::{KnownStatusCode, MessageState, StatusCode, StatusEntry};
pub use validation::ValidationError;
pub use value::{
    ApiKey, MessageId, MessageText, PhoneNumber, RawPhoneNumber, SenderId, Username, parse_region,
};
