//! Optional tracing setup for hosts that do not install their own
//! subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ab_domain::config::ObservabilityConfig;

/// Install a global subscriber: `RUST_LOG` if set, otherwise
/// `obs.log_filter`; JSON lines when `obs.json`, compact text otherwise.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(obs: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&obs.log_filter))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if obs.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
