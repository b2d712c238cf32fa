use tracing_subscriber::EnvFilter;

/// Install the global subscriber.  Call once at the start of `main`.
///
/// Level is controlled by `RUST_LOG` (e.g. `RUST_LOG=il_engine=debug`) and
/// defaults to `info`.  Output goes to stderr so stdout stays a clean
/// progress report.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Failed to install tracing subscriber: {e}");
    }
}
