use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "deeptrans=info";

/// Logs go to stderr; stdout is reserved for translations.
///
/// Human-readable on a terminal, JSON lines otherwise.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if atty::is(atty::Stream::Stderr) {
        builder.with_target(false).init();
    } else {
        builder.json().init();
    }
}
