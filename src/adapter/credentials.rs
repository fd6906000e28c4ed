use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::RwLock;
use std::time::Duration;

use phonenumber::country;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::adapter::AdapterError;
use crate::client::BoxFuture;
use crate::config::SettingsSource;
use crate::domain::{ApiKey, SenderId, Username, parse_region};

/// Secret store key under which the Africa's Talking API key is kept.
pub const PROVIDER_ID: &str = "africastalking.com";

pub type SecretStoreError = Box<dyn StdError + Send + Sync>;

/// External store holding provider credentials.
pub trait SecretStore: Send + Sync {
    fn get_credentials<'a>(
        &'a self,
        provider_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<SecretString>, SecretStoreError>>;
}

impl<T: SecretStore + ?Sized> SecretStore for std::sync::Arc<T> {
    fn get_credentials<'a>(
        &'a self,
        provider_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<SecretString>, SecretStoreError>> {
        (**self).get_credentials(provider_id)
    }
}

#[derive(Debug, Default)]
/// Process-local secret store, mostly useful for tests and embedding.
pub struct InMemorySecretStore {
    secrets: RwLock<HashMap<String, SecretString>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(self, provider_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.insert(provider_id, secret);
        self
    }

    pub fn insert(&self, provider_id: impl Into<String>, secret: impl Into<String>) {
        let mut secrets = self
            .secrets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        secrets.insert(provider_id.into(), SecretString::new(secret.into()));
    }

    pub fn remove(&self, provider_id: &str) {
        let mut secrets = self
            .secrets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        secrets.remove(provider_id);
    }
}

impl SecretStore for InMemorySecretStore {
    fn get_credentials<'a>(
        &'a self,
        provider_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<SecretString>, SecretStoreError>> {
        Box::pin(async move {
            let secrets = self
                .secrets
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Ok(secrets.get(provider_id).cloned())
        })
    }
}

#[derive(Debug, Clone, Default)]
/// Reads secrets from environment variables.
///
/// `africastalking.com` is looked up as `AFRICASTALKING_COM_API_KEY` unless an explicit
/// variable was registered with [`EnvSecretStore::with_var`].
pub struct EnvSecretStore {
    overrides: HashMap<String, String>,
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, provider_id: impl Into<String>, var: impl Into<String>) -> Self {
        self.overrides.insert(provider_id.into(), var.into());
        self
    }

    pub fn var_name(&self, provider_id: &str) -> String {
        if let Some(var) = self.overrides.get(provider_id) {
            return var.clone();
        }
        let stem = provider_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect::<String>();
        format!("{stem}_API_KEY")
    }
}

impl SecretStore for EnvSecretStore {
    fn get_credentials<'a>(
        &'a self,
        provider_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<SecretString>, SecretStoreError>> {
        Box::pin(async move {
            match std::env::var(self.var_name(provider_id)) {
                Ok(value) => Ok(Some(SecretString::new(value))),
                Err(std::env::VarError::NotPresent) => Ok(None),
                Err(err) => Err(Box::new(err) as SecretStoreError),
            }
        })
    }
}

#[derive(Debug, Clone)]
/// Credentials for one batch.
pub struct Credentials {
    pub api_key: ApiKey,
    pub username: Username,
    pub from: Option<SenderId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Transport settings handed to the client factory.
pub struct ClientOptions {
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
/// Everything a batch needs from configuration, read once per batch.
pub struct ResolvedSettings {
    pub credentials: Credentials,
    pub client: ClientOptions,
    pub default_region: Option<country::Id>,
}

/// Read the `sms` settings and the API key.
///
/// Nothing is cached: every call reads the settings and queries the secret store.
pub async fn resolve(
    settings: &dyn SettingsSource,
    secrets: &dyn SecretStore,
) -> Result<ResolvedSettings, AdapterError> {
    let settings = settings.sms_settings().unwrap_or_default();
    let username = settings
        .username()
        .map(Username::new)
        .and_then(Result::ok)
        .ok_or(AdapterError::MissingUsername)?;

    let api_key = secrets
        .get_credentials(PROVIDER_ID)
        .await
        .map_err(AdapterError::SecretStore)?
        .and_then(|secret| ApiKey::new(secret.expose_secret().as_str()).ok())
        .ok_or(AdapterError::MissingApiKey)?;

    // Blank sender ids are treated as unset so the gateway applies its default.
    let from = settings
        .reply_to
        .as_deref()
        .and_then(|reply_to| SenderId::new(reply_to).ok());

    let gateway = settings.africas_talking.clone().unwrap_or_default();
    let default_region = gateway
        .default_region
        .as_deref()
        .map(parse_region)
        .transpose()
        .map_err(AdapterError::InvalidSettings)?;

    debug!(
        username = username.as_str(),
        sender_id = from.as_ref().map(SenderId::as_str),
        "resolved Africa's Talking credentials"
    );

    Ok(ResolvedSettings {
        credentials: Credentials {
            api_key,
            username,
            from,
        },
        client: ClientOptions {
            endpoint: gateway.endpoint,
            timeout: settings.timeout(),
            user_agent: gateway.user_agent,
        },
        default_region,
    })
}
