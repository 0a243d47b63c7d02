use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};

use pipeline_notifier::config::{MailTransport, RelayConfig};
use pipeline_notifier::error::ConfigError;
use pipeline_notifier::event::SnsEnvelope;
use pipeline_notifier::mailer::{Mailer, SesMailer, SmtpConfig, SmtpMailer};
use pipeline_notifier::relay::{Outcome, Relay};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .init();

    let config = RelayConfig::from_env()?;

    let mailer: Arc<dyn Mailer> = match config.transport {
        MailTransport::Ses => Arc::new(SesMailer::new(&config.region).await),
        MailTransport::Smtp => {
            let smtp = SmtpConfig::from_env()
                .ok_or_else(|| ConfigError::MissingEnvVar("SMTP_HOST".to_string()))?;
            Arc::new(SmtpMailer::new(smtp))
        }
    };

    let relay = Relay::new(config, mailer);

    run(service_fn(|event: LambdaEvent<SnsEnvelope>| {
        handle(&relay, event)
    }))
    .await
}

async fn handle(relay: &Relay, event: LambdaEvent<SnsEnvelope>) -> Result<(), Error> {
    match relay.handle(&event.payload).await? {
        Outcome::Sent => tracing::info!("Notification email sent"),
        Outcome::Skipped => {}
    }
    Ok(())
}
