use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback directive when `RUST_LOG` is unset. Only this crate logs unless verbose.
fn default_directive(verbose: bool) -> String {
    let crate_name = env!("CARGO_CRATE_NAME");
    if verbose {
        format!("{}=debug,info", crate_name)
    } else {
        format!("{}=info", crate_name)
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Human-readable output for the local runner.
pub fn init_cli_logger(verbose: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt_layer)
        .init();
}

/// One JSON object per line, no timestamp (CloudWatch adds its own).
pub fn init_lambda_logger() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .json()
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_targets_this_crate() {
        assert_eq!(default_directive(false), "contact_intake=info");
        assert_eq!(default_directive(true), "contact_intake=debug,info");
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
    }
}
