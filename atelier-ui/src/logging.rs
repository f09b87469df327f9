//! Browser console logging for `tracing` events

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};
use tracing_web::MakeWebConsoleWriter;

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let console = fmt::layer()
        .with_ansi(false) // only partially supported across browsers
        .without_time() // no clock source in wasm
        .with_writer(MakeWebConsoleWriter::new());

    if tracing_subscriber::registry().with(filter).with(console).try_init().is_err() {
        leptos::logging::warn!("tracing subscriber already installed");
    }
}
