use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Per-recipient status code returned by Africa's Talking.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Africa's Talking.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// Look up the taxonomy entry for this code.
    pub fn entry(self) -> Option<StatusEntry> {
        self.known().map(KnownStatusCode::entry)
    }

    /// Returns `true` if the gateway documents this code as a transient failure.
    pub fn is_retryable(self) -> bool {
        matches!(self.entry(), Some(entry) if entry.retry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Normalized message state reported to the caller.
pub enum MessageState {
    ForwardedByGateway,
    Sent,
    ReceivedByGateway,
    Failed,
    Denied,
}

impl MessageState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ForwardedByGateway => "forwarded-by-gateway",
            Self::Sent => "sent",
            Self::ReceivedByGateway => "received-by-gateway",
            Self::Failed => "failed",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One row of the sending status taxonomy.
pub struct StatusEntry {
    pub success: bool,
    pub state: MessageState,
    pub detail: &'static str,
    /// Transient failure: no terminal state is reported so an outer layer can retry.
    pub retry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Sending status codes documented by Africa's Talking.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    Processed,
    Sent,
    Queued,
    RiskHold,
    InvalidSenderId,
    InvalidPhoneNumber,
    UnsupportedNumberType,
    InsufficientBalance,
    UserInBlacklist,
    CouldNotRoute,
    InternalServerError,
    GatewayError,
    RejectedByGateway,
}

impl KnownStatusCode {
    /// Every documented code, in ascending numeric order.
    pub const ALL: [Self; 13] = [
        Self::Processed,
        Self::Sent,
        Self::Queued,
        Self::RiskHold,
        Self::InvalidSenderId,
        Self::InvalidPhoneNumber,
        Self::UnsupportedNumberType,
        Self::InsufficientBalance,
        Self::UserInBlacklist,
        Self::CouldNotRoute,
        Self::InternalServerError,
        Self::GatewayError,
        Self::RejectedByGateway,
    ];

    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            100 => Self::Processed,
            101 => Self::Sent,
            102 => Self::Queued,
            401 => Self::RiskHold,
            402 => Self::InvalidSenderId,
            403 => Self::InvalidPhoneNumber,
            404 => Self::UnsupportedNumberType,
            405 => Self::InsufficientBalance,
            406 => Self::UserInBlacklist,
            407 => Self::CouldNotRoute,
            500 => Self::InternalServerError,
            501 => Self::GatewayError,
            502 => Self::RejectedByGateway,
            _ => return None,
        })
    }

    pub fn code(self) -> StatusCode {
        StatusCode::new(match self {
            Self::Processed => 100,
            Self::Sent => 101,
            Self::Queued => 102,
            Self::RiskHold => 401,
            Self::InvalidSenderId => 402,
            Self::InvalidPhoneNumber => 403,
            Self::UnsupportedNumberType => 404,
            Self::InsufficientBalance => 405,
            Self::UserInBlacklist => 406,
            Self::CouldNotRoute => 407,
            Self::InternalServerError => 500,
            Self::GatewayError => 501,
            Self::RejectedByGateway => 502,
        })
    }

    /// The taxonomy row for this code.
    pub fn entry(self) -> StatusEntry {
        use MessageState::*;

        let (success, state, detail, retry) = match self {
            Self::Processed => (true, ForwardedByGateway, "Processed", false),
            Self::Sent => (true, Sent, "Sent", false),
            Self::Queued => (true, ReceivedByGateway, "Queued", false),
            Self::RiskHold => (false, Failed, "RiskHold", false),
            Self::InvalidSenderId => (false, Failed, "InvalidSenderId", true),
            Self::InvalidPhoneNumber => (false, Failed, "InvalidPhoneNumber", false),
            Self::UnsupportedNumberType => (false, Failed, "UnsupportedNumberType", false),
            Self::InsufficientBalance => (false, Failed, "InsufficientBalance", true),
            Self::UserInBlacklist => (false, Denied, "UserInBlacklist", false),
            Self::CouldNotRoute => (false, Failed, "CouldNotRoute", false),
            Self::InternalServerError => (false, Failed, "InternalServerError", true),
            Self::GatewayError => (false, Failed, "GatewayError", true),
            Self::RejectedByGateway => (false, Failed, "RejectedByGateway", true),
        };

        StatusEntry {
            success,
            state,
            detail,
            retry,
        }
    }
}
