use tracing_subscriber::EnvFilter;

/// Filter directives used when `RUST_LOG` does not apply.
///
/// The windowing stack is held at `warn` either way; its per-frame chatter
/// drowns out drag and persistence events otherwise.
pub fn default_directives(debug: bool) -> String {
    let app = if debug { "debug" } else { "info" };
    format!("warn,{}={app},eframe=warn,egui_glow=warn,winit=warn", env!("CARGO_CRATE_NAME"))
}

/// Install the global subscriber. `RUST_LOG` is only consulted with debug
/// logging on; a second call is ignored.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(true)))
    } else {
        EnvFilter::new(default_directives(false))
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .try_init()
        .is_err()
    {
        tracing::debug!("logging already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_scope_app_level() {
        assert!(default_directives(true).contains("wealth_dashboard=debug"));
        assert!(default_directives(false).contains("wealth_dashboard=info"));
        assert!(default_directives(false).starts_with("warn,"));
    }

    #[test]
    fn directives_parse() {
        EnvFilter::try_new(default_directives(true)).unwrap();
    }
}
