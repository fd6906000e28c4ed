use std::io;

use africastalking_sms::{
    AfricasTalkingAdapter, AfricasTalkingSettings, EnvSecretStore, OutgoingMessage, PROVIDER_ID,
    SmsSettings,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,africastalking_sms=debug".into()),
        )
        .init();

    let username = std::env::var("AT_USERNAME").unwrap_or_else(|_| "sandbox".to_owned());
    let phones = std::env::var("AT_PHONES").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "AT_PHONES environment variable is required (comma-separated)",
        )
    })?;
    let message = std::env::var("AT_MESSAGE")
        .unwrap_or_else(|_| "Hello from the africastalking-sms demo.".to_owned());

    let settings = SmsSettings {
        reply_to: std::env::var("AT_SENDER_ID").ok(),
        africas_talking: Some(AfricasTalkingSettings {
            username: Some(username),
            default_region: std::env::var("AT_REGION").ok(),
            ..Default::default()
        }),
    };
    let secrets = EnvSecretStore::new().with_var(PROVIDER_ID, "AT_API_KEY");
    let adapter = AfricasTalkingAdapter::new(settings, secrets);

    let batch = phones
        .split(',')
        .enumerate()
        .map(|(idx, phone)| OutgoingMessage::new(format!("demo-{idx}"), phone, message.as_str()))
        .collect::<Vec<_>>();

    let reports = adapter.send_with_report(&batch).await?;
    for report in &reports {
        println!("{}: {:?}", report.message_id, report.outcome);
    }

    let changes = reports
        .into_iter()
        .filter_map(|report| report.outcome.into_state_change())
        .collect::<Vec<_>>();
    println!("{}", serde_json::to_string_pretty(&changes)?);

    Ok(())
}
