//! Host configuration: the `sms` settings section and the sources it is read from.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// The `sms` section of the host configuration.
pub struct SmsSettings {
    /// Sender id or short code used as `from`.
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub africas_talking: Option<AfricasTalkingSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfricasTalkingSettings {
    #[serde(default)]
    pub username: Option<String>,
    /// Two-letter region used to normalize local numbers into E.164 (`KE`, `UG`, ...).
    #[serde(default)]
    pub default_region: Option<String>,
    /// Messaging endpoint override.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// HTTP timeout for one gateway request, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl SmsSettings {
    /// Parse the `sms` section from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn username(&self) -> Option<&str> {
        self.africas_talking
            .as_ref()
            .and_then(|at| at.username.as_deref())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.africas_talking
            .as_ref()
            .and_then(|at| at.timeout_secs)
            .map(Duration::from_secs)
    }
}

/// Read access to the current `sms` settings.
///
/// Implementations are queried on every batch so that edits take effect without a restart.
pub trait SettingsSource: Send + Sync {
    fn sms_settings(&self) -> Option<SmsSettings>;
}

impl SettingsSource for SmsSettings {
    fn sms_settings(&self) -> Option<SmsSettings> {
        Some(self.clone())
    }
}

impl SettingsSource for Option<SmsSettings> {
    fn sms_settings(&self) -> Option<SmsSettings> {
        self.clone()
    }
}

impl SettingsSource for RwLock<SmsSettings> {
    fn sms_settings(&self) -> Option<SmsSettings> {
        // A poisoned lock still holds the last complete write.
        let guard = self.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(guard.clone())
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for Arc<T> {
    fn sms_settings(&self) -> Option<SmsSettings> {
        (**self).sms_settings()
    }
}
