use blockwire_config::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

/// `RUST_LOG` wins, then the configured directives, then the level implied
/// by the `debug` flag.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    config
        .filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(config.default_directive()))
}

pub fn init_subscriber(config: &LoggingConfig) -> Result<(), TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_ansi(config.use_color)
        .with_target(config.show_target);

    // The timer changes the layer's type, so the two variants are boxed.
    let fmt_layer = if config.show_timestamp {
        fmt_layer.boxed()
    } else {
        fmt_layer.without_time().boxed()
    };

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_falls_back_on_bad_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let config = LoggingConfig {
            debug: true,
            filter: Some("blockwire=loud".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filter(&config).to_string(), "debug");
    }

    #[test]
    fn test_filter_uses_configured_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let config = LoggingConfig {
            filter: Some("blockwire=trace".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filter(&config).to_string(), "blockwire=trace");
    }
}
