//! Africa's Talking SMS gateway adapter.
//!
//! The crate is layered like a typed API client: a domain layer of strong types and the
//! gateway's status taxonomy, a transport layer for the wire format, a small HTTP client,
//! and an adapter that sends a batch of queued messages one at a time and reports the
//! normalized state each message reached.
//!
//! ```rust,no_run
//! use africastalking_sms::{
//!     AfricasTalkingAdapter, EnvSecretStore, OutgoingMessage, SmsSettings,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = SmsSettings::from_json(
//!         r#"{"reply_to":"MEDIC","africas_talking":{"username":"sandbox"}}"#,
//!     )?;
//!     let adapter = AfricasTalkingAdapter::new(settings, EnvSecretStore::new());
//!     let batch = vec![OutgoingMessage::new("msg-1", "+254711082000", "hello")];
//!     for change in adapter.send(&batch).await? {
//!         println!("{} -> {} ({})", change.message_id, change.state, change.details);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod adapter;
pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use adapter::{
    AdapterError, AfricasTalkingAdapter, AfricasTalkingClientFactory, ClientFactory,
    ClientOptions, Credentials, EnvSecretStore, InMemorySecretStore, PROVIDER_ID, SecretStore,
    SmsGateway, SubmissionOutcome, SubmissionReport, generate_state_change, map_status, submit,
};
pub use client::{AfricasTalkingClient, AfricasTalkingClientBuilder, BoxFuture, GatewayError};
pub use config::{AfricasTalkingSettings, SettingsSource, SmsSettings};
pub use domain::{
    ApiKey, KnownStatusCode, MessageId, MessageState, MessageText, OutgoingMessage, PhoneNumber,
    RawPhoneNumber, Recipient, SendSms, SendSmsResponse, SenderId, StateChange, StatusCode,
    StatusEntry, Username, ValidationError,
};
