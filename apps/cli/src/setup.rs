use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr so stdout stays clean for the token itself.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "xdauth=debug,xdauth_token=debug"
    } else {
        "xdauth=info,xdauth_token=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .ok();
}
