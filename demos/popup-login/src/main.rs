//! Popup sign-in demo
//!
//! Runs one sign-in attempt with a scripted popup and prints the button
//! before and after.
//!
//! # Running
//!
//! ```bash
//! cargo run -p popup-login -- success   # or: cancel | blocked | reject
//! ```
//!
//! With `SIGNIN_BACKEND_URL` set, the session is established against that
//! backend over HTTP instead of the in-memory gateway.

use anyhow::{Context, bail};
use signin_core::environment::SystemClock;
use signin_runtime::metrics::MetricsRecorder;
use signin_trigger::mocks::{MockIdentityPopup, MockSessionGateway};
use signin_trigger::providers::{HttpSessionGateway, SessionGateway, TracingNotifier};
use signin_trigger::{
    Activation, LoginTrigger, Outcome, ProviderError, SessionEndpointConfig, TriggerConfig, TriggerEnvironment,
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scripted popup outcome.
#[derive(Debug, Clone, Copy)]
enum Scenario {
    Success,
    Cancel,
    Blocked,
    Reject,
}

impl Scenario {
    fn parse(arg: Option<&str>) -> anyhow::Result<Self> {
        Ok(match arg.unwrap_or("success") {
            "success" => Self::Success,
            "cancel" => Self::Cancel,
            "blocked" => Self::Blocked,
            "reject" => Self::Reject,
            other => bail!("unknown scenario {other:?} (expected success, cancel, blocked or reject)"),
        })
    }

    fn popup(self) -> MockIdentityPopup {
        match self {
            Self::Success | Self::Reject => MockIdentityPopup::new(),
            Self::Cancel => MockIdentityPopup::failing(ProviderError::cancelled()),
            Self::Blocked => MockIdentityPopup::failing(ProviderError::blocked()),
        }
    }

    fn in_memory_session(self) -> MockSessionGateway {
        match self {
            Self::Reject => MockSessionGateway::rejecting("Network error"),
            _ => MockSessionGateway::welcoming("Welcome"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "popup_login=info,signin_trigger=debug,signin_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let recorder = MetricsRecorder::install().context("installing metrics recorder")?;
    signin_trigger::metrics::register_metrics();

    let scenario = Scenario::parse(std::env::args().nth(1).as_deref())?;
    println!("=== Popup Sign-in Demo: {scenario:?} ===\n");

    let outcome = if std::env::var("SIGNIN_BACKEND_URL").is_ok() {
        let config = SessionEndpointConfig::from_env()?;
        tracing::info!(url = %config.login_url(), "Using HTTP session gateway");
        run(scenario, HttpSessionGateway::new(config)?).await?
    } else {
        run(scenario, scenario.in_memory_session()).await?
    };

    match outcome {
        Activation::Finished(Outcome::SignedIn { message }) => println!("\nSigned in: {message}"),
        Activation::Finished(Outcome::Failed(error)) => println!("\nSign-in failed: {error}"),
        Activation::Ignored => println!("\nActivation ignored"),
    }

    if let Some(rendered) = recorder.render() {
        println!("\n--- metrics ---\n{rendered}");
    }

    Ok(())
}

async fn run<S>(scenario: Scenario, session: S) -> anyhow::Result<Activation>
where
    S: SessionGateway + Clone + 'static,
{
    let env = TriggerEnvironment::new(
        scenario.popup(),
        session,
        TracingNotifier::new(),
        SystemClock,
        TriggerConfig::default(),
    );
    let trigger = LoginTrigger::new(env);

    println!("Before: {}", trigger.view().await);
    let outcome = trigger.activate_and_wait(Duration::from_secs(30)).await?;
    println!("After:  {}", trigger.view().await);

    trigger.shutdown(Duration::from_secs(5)).await?;
    Ok(outcome)
}
