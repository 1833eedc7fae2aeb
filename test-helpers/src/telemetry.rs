//! Log setup for the stub server and the client code it exercises.

use tracing::Subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// `RUST_LOG` wins over `default_filter` when set.
pub fn get_subscriber(default_filter: &str) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let stderr = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();
    Registry::default().with(env_filter).with(stderr)
}

/// Install the subscriber unless one is already set. Every test spawns its
/// own app, so only the first call per process has an effect.
pub fn try_init_subscriber(subscriber: impl Subscriber + Sync + Send + 'static) {
    let _ = LogTracer::init();
    if subscriber.try_init().is_err() {
        tracing::trace!("Global subscriber already installed");
    }
}
