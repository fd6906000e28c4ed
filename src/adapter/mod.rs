//! Adapter layer: turns a batch of outgoing messages into normalized state changes.
//!
//! Messages are submitted one at a time. A message whose submission fails is logged and
//! left without a state change; it never aborts the rest of the batch.

mod credentials;
mod mapping;

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use phonenumber::country;
use tracing::{debug, error, warn};

use crate::client::{AfricasTalkingClient, BoxFuture, GatewayError};
use crate::config::SettingsSource;
use crate::domain::{
    MessageId, MessageText, OutgoingMessage, PhoneNumber, RawPhoneNumber, SendSms,
    SendSmsResponse, SenderId, StateChange, ValidationError,
};

pub use credentials::{
    ClientOptions, Credentials, EnvSecretStore, InMemorySecretStore, PROVIDER_ID,
    ResolvedSettings, SecretStore, SecretStoreError, resolve,
};
pub use mapping::{SubmissionOutcome, classify, generate_state_change, map_status, recipient_of};

#[derive(Debug, thiserror::Error)]
/// Errors that abort a whole batch before any message is submitted.
pub enum AdapterError {
    #[error("No username configured. Refer to the Africa's Talking configuration documentation.")]
    MissingUsername,

    #[error("No api configured. Refer to the Africa's Talking configuration documentation.")]
    MissingApiKey,

    #[error("secret store lookup failed: {0}")]
    SecretStore(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid sms settings: {0}")]
    InvalidSettings(#[source] ValidationError),

    #[error("could not create gateway client: {0}")]
    Client(#[source] GatewayError),
}

/// Anything able to submit a send request to the gateway.
pub trait SmsGateway: Send + Sync {
    fn send_sms<'a>(
        &'a self,
        request: &'a SendSms,
    ) -> BoxFuture<'a, Result<SendSmsResponse, GatewayError>>;
}

impl SmsGateway for AfricasTalkingClient {
    fn send_sms<'a>(
        &'a self,
        request: &'a SendSms,
    ) -> BoxFuture<'a, Result<SendSmsResponse, GatewayError>> {
        Box::pin(AfricasTalkingClient::send_sms(self, request))
    }
}

/// Builds the gateway client used for one batch.
pub trait ClientFactory: Send + Sync {
    fn create(
        &self,
        credentials: &Credentials,
        options: &ClientOptions,
    ) -> Result<Arc<dyn SmsGateway>, GatewayError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Default factory producing [`AfricasTalkingClient`]s.
pub struct AfricasTalkingClientFactory;

impl ClientFactory for AfricasTalkingClientFactory {
    fn create(
        &self,
        credentials: &Credentials,
        options: &ClientOptions,
    ) -> Result<Arc<dyn SmsGateway>, GatewayError> {
        let mut builder = AfricasTalkingClient::builder(
            credentials.username.clone(),
            credentials.api_key.clone(),
        );
        if let Some(endpoint) = options.endpoint.as_ref() {
            builder = builder.endpoint(endpoint.clone());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = options.user_agent.as_ref() {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(Arc::new(builder.build()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one message within a batch.
pub struct SubmissionReport {
    pub message_id: MessageId,
    pub outcome: SubmissionOutcome,
}

#[derive(Debug, Clone, Default)]
struct SubmitContext<'a> {
    from: Option<&'a SenderId>,
    default_region: Option<country::Id>,
    timeout: Option<Duration>,
}

/// Submit one message and map the gateway answer to a state change.
///
/// Never fails: errors without a recognizable status are logged and yield `None`.
pub async fn submit(
    gateway: &dyn SmsGateway,
    from: Option<&SenderId>,
    message: &OutgoingMessage,
) -> Option<StateChange> {
    let ctx = SubmitContext {
        from,
        ..Default::default()
    };
    submit_message(gateway, &ctx, message)
        .await
        .into_state_change()
}

async fn submit_message(
    gateway: &dyn SmsGateway,
    ctx: &SubmitContext<'_>,
    message: &OutgoingMessage,
) -> SubmissionOutcome {
    let request = build_request(ctx, message);

    let result = match ctx.timeout {
        Some(limit) => match tokio::time::timeout(limit, gateway.send_sms(&request)).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    message_id = %message.id,
                    timeout = ?limit,
                    "gateway did not answer in time"
                );
                return SubmissionOutcome::Failed {
                    reason: format!("timed out after {limit:?}"),
                };
            }
        },
        None => gateway.send_sms(&request).await,
    };

    let outcome = match result {
        Ok(response) => classify(message, Some(&response)),
        // Some failures still carry a regular payload with a documented status.
        Err(err) if map_status(recipient_of(err.response())).is_some() => {
            classify(message, err.response())
        }
        Err(err) => {
            error!(
                message_id = %message.id,
                error = %err,
                details = ?err,
                "error thrown trying to send message"
            );
            return SubmissionOutcome::Failed {
                reason: err.to_string(),
            };
        }
    };

    log_outcome(message, &outcome);
    outcome
}

// Queue content is sent as given; the gateway's status decides what is acceptable.
fn build_request(ctx: &SubmitContext<'_>, message: &OutgoingMessage) -> SendSms {
    let to = ctx
        .default_region
        .and_then(|region| PhoneNumber::parse(Some(region), message.to.as_str()).ok())
        .map(RawPhoneNumber::from)
        .unwrap_or_else(|| RawPhoneNumber::unvalidated(message.to.as_str()));
    let text = MessageText::unvalidated(message.content.as_str());
    SendSms::one(to, text, ctx.from.cloned())
}

fn log_outcome(message: &OutgoingMessage, outcome: &SubmissionOutcome) {
    match outcome {
        SubmissionOutcome::StateChange(change) => debug!(
            message_id = %message.id,
            gateway_ref = change.gateway_ref.as_deref(),
            state = %change.state,
            details = change.details.as_str(),
            "message reached a terminal state"
        ),
        SubmissionOutcome::Retryable {
            status_code,
            detail,
            gateway_ref,
        } => warn!(
            message_id = %message.id,
            status_code = status_code.as_i32(),
            detail = *detail,
            gateway_ref = gateway_ref.as_deref(),
            "retryable gateway status, leaving message pending"
        ),
        SubmissionOutcome::Unmapped {
            status_code,
            gateway_ref,
        } => warn!(
            message_id = %message.id,
            status_code = status_code.as_i32(),
            gateway_ref = gateway_ref.as_deref(),
            "unknown gateway status, leaving message pending"
        ),
        SubmissionOutcome::NoRecipient => warn!(
            message_id = %message.id,
            "gateway response has no recipient record"
        ),
        SubmissionOutcome::Failed { .. } => {}
    }
}

#[derive(Clone)]
/// Batch sender for the Africa's Talking SMS gateway.
///
/// Settings and the API key are read again on every batch, so configuration edits and key
/// rotation apply without rebuilding the adapter.
pub struct AfricasTalkingAdapter {
    settings: Arc<dyn SettingsSource>,
    secrets: Arc<dyn SecretStore>,
    factory: Arc<dyn ClientFactory>,
    submission_timeout: Option<Duration>,
}

impl AfricasTalkingAdapter {
    pub fn new(
        settings: impl SettingsSource + 'static,
        secrets: impl SecretStore + 'static,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            secrets: Arc::new(secrets),
            factory: Arc::new(AfricasTalkingClientFactory),
            submission_timeout: None,
        }
    }

    /// Replace the factory producing the per-batch gateway client.
    pub fn with_client_factory(mut self, factory: impl ClientFactory + 'static) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    /// Give up on a single submission after `timeout`; the message gets no state change.
    pub fn submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = Some(timeout);
        self
    }

    /// Send `messages` in order and return the state changes of those that reached a
    /// terminal state.
    ///
    /// Fails only when credentials cannot be resolved or the client cannot be built; in
    /// that case nothing is submitted.
    pub async fn send(
        &self,
        messages: &[OutgoingMessage],
    ) -> Result<Vec<StateChange>, AdapterError> {
        let reports = self.send_with_report(messages).await?;
        Ok(reports
            .into_iter()
            .filter_map(|report| report.outcome.into_state_change())
            .collect())
    }

    /// Like [`AfricasTalkingAdapter::send`], but reports the outcome of every message.
    pub async fn send_with_report(
        &self,
        messages: &[OutgoingMessage],
    ) -> Result<Vec<SubmissionReport>, AdapterError> {
        let resolved = resolve(self.settings.as_ref(), self.secrets.as_ref()).await?;
        let gateway = self
            .factory
            .create(&resolved.credentials, &resolved.client)
            .map_err(AdapterError::Client)?;

        let ctx = SubmitContext {
            from: resolved.credentials.from.as_ref(),
            default_region: resolved.default_region,
            timeout: self.submission_timeout,
        };

        debug!(messages = messages.len(), "submitting batch to Africa's Talking");

        let mut reports = Vec::with_capacity(messages.len());
        for message in messages {
            let outcome = submit_message(gateway.as_ref(), &ctx, message).await;
            reports.push(SubmissionReport {
                message_id: message.id.clone(),
                outcome,
            });
        }

        debug!(
            messages = messages.len(),
            state_changes = reports
                .iter()
                .filter(|report| report.outcome.state_change().is_some())
                .count(),
            "batch finished"
        );

        Ok(reports)
    }
}

impl std::fmt::Debug for AfricasTalkingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AfricasTalkingAdapter")
            .field("submission_timeout", &self.submission_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::config::{AfricasTalkingSettings, SmsSettings};
    use crate::domain::{MessageState, Recipient, StatusCode};

    use super::*;

    type Scripted = Result<SendSmsResponse, GatewayError>;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SentRequest {
        to: Vec<String>,
        from: Option<String>,
        message: String,
    }

    #[derive(Default)]
    struct FakeGateway {
        script: Mutex<VecDeque<Scripted>>,
        requests: Mutex<Vec<SentRequest>>,
        events: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl FakeGateway {
        fn scripted(responses: Vec<Scripted>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(responses.into()),
                ..Default::default()
            })
        }

        fn requests(&self) -> Vec<SentRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SmsGateway for FakeGateway {
        fn send_sms<'a>(
            &'a self,
            request: &'a SendSms,
        ) -> BoxFuture<'a, Result<SendSmsResponse, GatewayError>> {
            Box::pin(async move {
                let call = {
                    let mut requests = self.requests.lock().unwrap();
                    requests.push(SentRequest {
                        to: request
                            .recipients()
                            .iter()
                            .map(|to| to.raw().to_owned())
                            .collect(),
                        from: request.from().map(|from| from.as_str().to_owned()),
                        message: request.message().as_str().to_owned(),
                    });
                    requests.len()
                };
                self.events.lock().unwrap().push(format!("start {call}"));

                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                for _ in 0..3 {
                    tokio::task::yield_now().await;
                }

                self.events.lock().unwrap().push(format!("end {call}"));
                let next = self.script.lock().unwrap().pop_front();
                next.unwrap_or_else(|| Err(opaque("no scripted response")))
            })
        }
    }

    struct FakeFactory {
        gateway: Arc<FakeGateway>,
        created: Arc<AtomicUsize>,
        keys: Arc<Mutex<Vec<String>>>,
    }

    impl FakeFactory {
        fn new(gateway: Arc<FakeGateway>) -> Self {
            Self {
                gateway,
                created: Arc::new(AtomicUsize::new(0)),
                keys: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ClientFactory for FakeFactory {
        fn create(
            &self,
            credentials: &Credentials,
            _options: &ClientOptions,
        ) -> Result<Arc<dyn SmsGateway>, GatewayError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            self.keys
                .lock()
                .unwrap()
                .push(credentials.api_key.expose().to_owned());
            Ok(self.gateway.clone())
        }
    }

    fn opaque(message: &str) -> GatewayError {
        GatewayError::Transport(message.into())
    }

    fn ok(code: i32, message_id: &str) -> Scripted {
        Ok(payload(code, message_id))
    }

    fn payload(code: i32, message_id: &str) -> SendSmsResponse {
        SendSmsResponse {
            message: None,
            recipients: vec![Recipient {
                status_code: StatusCode::new(code),
                number: None,
                status: None,
                cost: None,
                message_id: Some(message_id.to_owned()),
            }],
        }
    }

    fn settings(username: Option<&str>, reply_to: Option<&str>) -> SmsSettings {
        SmsSettings {
            reply_to: reply_to.map(str::to_owned),
            africas_talking: Some(AfricasTalkingSettings {
                username: username.map(str::to_owned),
                ..Default::default()
            }),
        }
    }

    fn store() -> InMemorySecretStore {
        InMemorySecretStore::new().with_secret(PROVIDER_ID, "api-key")
    }

    fn adapter(settings: SmsSettings, factory: FakeFactory) -> AfricasTalkingAdapter {
        AfricasTalkingAdapter::new(settings, store()).with_client_factory(factory)
    }

    fn messages(ids: &[&str]) -> Vec<OutgoingMessage> {
        ids.iter()
            .enumerate()
            .map(|(idx, id)| OutgoingMessage::new(*id, format!("+25471108200{idx}"), "hello"))
            .collect()
    }

    #[tokio::test]
    async fn batch_keeps_terminal_states_in_order_and_drops_retryable() {
        let gateway = FakeGateway::scripted(vec![ok(101, "at-a"), ok(402, "at-b"), ok(403, "at-c")]);
        let adapter = adapter(
            settings(Some("acme"), Some("MEDIC")),
            FakeFactory::new(gateway.clone()),
        );

        let changes = adapter.send(&messages(&["a", "b", "c"])).await.unwrap();

        assert_eq!(
            changes,
            vec![
                StateChange {
                    message_id: MessageId::new("a"),
                    gateway_ref: Some("at-a".to_owned()),
                    state: MessageState::Sent,
                    details: "Sent".to_owned(),
                },
                StateChange {
                    message_id: MessageId::new("c"),
                    gateway_ref: Some("at-c".to_owned()),
                    state: MessageState::Failed,
                    details: "InvalidPhoneNumber".to_owned(),
                },
            ]
        );
        assert_eq!(gateway.requests().len(), 3);
    }

    #[tokio::test]
    async fn each_message_is_sent_alone_with_the_configured_sender() {
        let gateway = FakeGateway::scripted(vec![ok(101, "x")]);
        let adapter = adapter(
            settings(Some("acme"), Some("MEDIC")),
            FakeFactory::new(gateway.clone()),
        );

        adapter
            .send(&[OutgoingMessage::new("m1", "+254711082000", "hi there")])
            .await
            .unwrap();

        assert_eq!(
            gateway.requests(),
            vec![SentRequest {
                to: vec!["+254711082000".to_owned()],
                from: Some("MEDIC".to_owned()),
                message: "hi there".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn missing_username_rejects_without_submitting() {
        let gateway = FakeGateway::scripted(vec![ok(101, "x")]);
        let factory = FakeFactory::new(gateway.clone());
        let created = factory.created.clone();
        let adapter = adapter(settings(None, Some("MEDIC")), factory);

        let err = adapter.send(&messages(&["a"])).await.unwrap_err();

        assert!(matches!(err, AdapterError::MissingUsername));
        assert!(
            err.to_string()
                .contains("Africa's Talking configuration documentation")
        );
        assert!(gateway.requests().is_empty());
        assert_eq!(created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_api_key_rejects_without_submitting() {
        let gateway = FakeGateway::scripted(vec![ok(101, "x")]);
        let adapter = AfricasTalkingAdapter::new(
            settings(Some("acme"), None),
            InMemorySecretStore::new(),
        )
        .with_client_factory(FakeFactory::new(gateway.clone()));

        let err = adapter.send(&messages(&["a"])).await.unwrap_err();

        assert!(matches!(err, AdapterError::MissingApiKey));
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn submissions_run_strictly_one_after_another() {
        let gateway = FakeGateway::scripted(vec![ok(101, "1"), ok(101, "2")]);
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        );

        let changes = adapter.send(&messages(&["a", "b"])).await.unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(
            gateway.events(),
            vec!["start 1", "end 1", "start 2", "end 2"]
        );
    }

    #[tokio::test]
    async fn opaque_failure_resolves_to_empty_batch() {
        let gateway = FakeGateway::scripted(vec![Err(opaque("connection reset"))]);
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        );

        let changes = adapter.send(&messages(&["a"])).await.unwrap();
        assert!(changes.is_empty());
    }

    #[tokio::test]
    async fn failure_does_not_abort_later_messages() {
        let gateway = FakeGateway::scripted(vec![Err(opaque("boom")), ok(102, "at-b")]);
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        );

        let changes = adapter.send(&messages(&["a", "b"])).await.unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].message_id.as_str(), "b");
        assert_eq!(changes[0].state, MessageState::ReceivedByGateway);
        assert_eq!(changes[0].details, "Queued");
    }

    #[tokio::test]
    async fn structured_failure_payload_is_mapped_like_a_response() {
        let rejected = |code: i32| GatewayError::HttpStatus {
            status: 400,
            body: None,
            response: Some(payload(code, "at-x")),
        };
        let gateway = FakeGateway::scripted(vec![
            Err(rejected(406)),
            Err(rejected(405)),
            Err(rejected(777)),
        ]);
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        );

        let reports = adapter
            .send_with_report(&messages(&["a", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(
            reports[0].outcome.state_change().map(|c| c.state),
            Some(MessageState::Denied)
        );
        assert!(matches!(
            reports[1].outcome,
            SubmissionOutcome::Retryable { .. }
        ));
        assert!(matches!(
            reports[2].outcome,
            SubmissionOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn report_covers_every_message() {
        let mut empty = payload(101, "x");
        empty.recipients.clear();
        let gateway = FakeGateway::scripted(vec![
            ok(100, "at-a"),
            ok(999, "at-b"),
            Ok(empty),
            Err(opaque("down")),
        ]);
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        );

        let reports = adapter
            .send_with_report(&messages(&["a", "b", "c", "d"]))
            .await
            .unwrap();

        let ids = reports
            .iter()
            .map(|report| report.message_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(reports[0].outcome.state_change().is_some());
        assert_eq!(
            reports[1].outcome,
            SubmissionOutcome::Unmapped {
                status_code: StatusCode::new(999),
                gateway_ref: Some("at-b".to_owned()),
            }
        );
        assert_eq!(reports[2].outcome, SubmissionOutcome::NoRecipient);
        assert!(matches!(
            reports[3].outcome,
            SubmissionOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn blank_message_is_left_to_the_gateway() {
        let gateway =
            FakeGateway::scripted(vec![Err(opaque("message is empty")), ok(101, "at-b")]);
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        );

        let batch = vec![
            OutgoingMessage::new("a", "+254711082000", "   "),
            OutgoingMessage::new("b", "+254711082001", "hello"),
        ];
        let changes = adapter.send(&batch).await.unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].message_id.as_str(), "b");
        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].message, "   ");
        assert_eq!(requests[0].to, vec!["+254711082000".to_owned()]);
    }

    #[tokio::test]
    async fn timed_out_submission_yields_nothing_and_batch_continues() {
        let gateway = Arc::new(FakeGateway {
            script: Mutex::new(vec![ok(101, "late"), ok(101, "late")].into()),
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        });
        let adapter = adapter(
            settings(Some("acme"), None),
            FakeFactory::new(gateway.clone()),
        )
        .submission_timeout(Duration::from_millis(10));

        let reports = adapter
            .send_with_report(&messages(&["a", "b"]))
            .await
            .unwrap();

        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert!(matches!(report.outcome, SubmissionOutcome::Failed { .. }));
        }
        assert_eq!(gateway.events(), vec!["start 1", "start 2"]);
    }

    #[tokio::test]
    async fn local_numbers_are_normalized_when_region_is_configured() {
        let gateway = FakeGateway::scripted(vec![ok(101, "x"), ok(403, "y")]);
        let mut settings = settings(Some("acme"), None);
        if let Some(at) = settings.africas_talking.as_mut() {
            at.default_region = Some("KE".to_owned());
        }
        let adapter = adapter(settings, FakeFactory::new(gateway.clone()));

        adapter
            .send(&[
                OutgoingMessage::new("a", "0711 082 000", "hi"),
                OutgoingMessage::new("b", "not-a-number", "hi"),
            ])
            .await
            .unwrap();

        let sent = gateway
            .requests()
            .into_iter()
            .map(|request| request.to)
            .collect::<Vec<_>>();
        assert_eq!(
            sent,
            vec![
                vec!["+254711082000".to_owned()],
                vec!["not-a-number".to_owned()]
            ]
        );
    }

    #[tokio::test]
    async fn credentials_are_resolved_on_every_batch() {
        let gateway = FakeGateway::scripted(vec![ok(101, "1"), ok(101, "2")]);
        let factory = FakeFactory::new(gateway.clone());
        let created = factory.created.clone();
        let keys = factory.keys.clone();
        let secrets = Arc::new(store());
        let adapter = AfricasTalkingAdapter::new(settings(Some("acme"), None), secrets.clone())
            .with_client_factory(factory);

        adapter.send(&messages(&["a"])).await.unwrap();
        secrets.insert(PROVIDER_ID, "rotated-key");
        adapter.send(&messages(&["b"])).await.unwrap();

        assert_eq!(created.load(Ordering::SeqCst), 2);
        assert_eq!(*keys.lock().unwrap(), vec!["api-key", "rotated-key"]);
    }

    #[tokio::test]
    async fn invalid_endpoint_aborts_the_batch() {
        let mut settings = settings(Some("acme"), None);
        if let Some(at) = settings.africas_talking.as_mut() {
            at.endpoint = Some("not a url".to_owned());
        }
        let adapter = AfricasTalkingAdapter::new(settings, store());

        let err = adapter.send(&messages(&["a"])).await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::Client(GatewayError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn submit_maps_a_single_message() {
        let gateway = FakeGateway::scripted(vec![ok(401, "at-1"), Err(opaque("nope"))]);
        let from = SenderId::new("MEDIC").unwrap();
        let message = OutgoingMessage::new("m1", "+254711082000", "hi");

        let change = submit(gateway.as_ref(), Some(&from), &message)
            .await
            .unwrap();
        assert_eq!(change.state, MessageState::Failed);
        assert_eq!(change.details, "RiskHold");

        assert!(submit(gateway.as_ref(), None, &message).await.is_none());
        assert_eq!(gateway.requests()[0].from.as_deref(), Some("MEDIC"));
        assert_eq!(gateway.requests()[1].from, None);
    }

    #[test]
    fn default_factory_builds_clients_from_credentials() {
        let credentials = Credentials {
            api_key: crate::domain::ApiKey::new("key").unwrap(),
            username: crate::domain::Username::new("sandbox").unwrap(),
            from: None,
        };
        let options = ClientOptions {
            endpoint: Some("https://example.invalid/version1/messaging".to_owned()),
            timeout: Some(Duration::from_secs(5)),
            user_agent: Some("medic-sms/1.0".to_owned()),
        };
        assert!(
            AfricasTalkingClientFactory
                .create(&credentials, &options)
                .is_ok()
        );
    }
}
