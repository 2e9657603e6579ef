use leaderboard_core::config::SiteConfig;
use leaderboard_core::settings::Settings;
use leaderboard_data::SnapshotStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log level name to a `tracing` filter directive.
///
/// Unknown names are passed through unchanged so `RUST_LOG`-style
/// directives such as `leaderboard_data=debug` also work.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr so JSON written to stdout stays machine-readable.
/// Falls back to `"warn"` if the directive does not parse.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Data sources ───────────────────────────────────────────────────────────────

/// Build the snapshot store and site config the commands read from.
pub fn open_sources(settings: &Settings) -> anyhow::Result<(SnapshotStore, SiteConfig)> {
    let data_dir = settings.resolve_data_dir();
    if !data_dir.is_dir() {
        tracing::warn!(
            "Snapshot directory {} does not exist; every view will be empty",
            data_dir.display()
        );
    }
    let store = SnapshotStore::new(data_dir);
    tracing::debug!(
        "Snapshots available in {}: {:?}",
        store.base_dir().display(),
        store.available_periods()
    );

    let config_path = settings.resolve_config_path();
    let config = SiteConfig::load_from(&config_path)?;
    tracing::debug!("Site config: {}", config_path.display());

    Ok((store, config))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
