//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: &[&str] = &["workshop_belt", "belt_app", "belt_infra", "belt_domain"];

/// Log to stderr. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = CRATES.iter().map(|c| format!("{}={}", c, level)).collect();
        EnvFilter::new(directives.join(","))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
