use crate::LogFormat;
use tracing::{dispatcher::SetGlobalDefaultError, level_filters::LevelFilter, subscriber};
use tracing_subscriber::{EnvFilter, Layer, filter::Directive, layer::SubscriberExt};

type LoggerResult<T> = Result<T, SetGlobalDefaultError>;

/// Level applied to the workspace crates on top of `RUST_LOG`.
pub const LOG_LEVEL_VAR: &str = "GRAPH_BINDING_LOG_LEVEL";

const WORKSPACE_CRATES: &[&str] = &[
    "graph_binding",
    "request_handlers",
    "query_core",
    "schema_builder",
    "sdl_ast",
];

/// An installer for a global logger.
#[derive(Debug, Clone)]
pub struct Logger {
    service_name: &'static str,
    log_format: LogFormat,
}

impl Logger {
    /// Initialize a new global logger installer.
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            log_format: LogFormat::Json,
        }
    }

    /// Sets the STDERR log output format. Default: Json.
    pub fn log_format(&mut self, log_format: LogFormat) {
        self.log_format = log_format;
    }

    /// Install logger as a global. Can be called only once per application
    /// instance. Logs go to stderr, stdout is reserved for command output.
    pub fn install(&self) -> LoggerResult<()> {
        let level = std::env::var(LOG_LEVEL_VAR).ok();
        let filter = create_env_filter(level.as_deref());

        let fmt_layer = match self.log_format {
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
        };

        let subscriber = tracing_subscriber::registry().with(fmt_layer);
        subscriber::set_global_default(subscriber)?;

        tracing::debug!(service = self.service_name, "logger installed");

        Ok(())
    }
}

fn create_env_filter(level: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let Some(level) = level else {
        return filter;
    };

    for krate in WORKSPACE_CRATES {
        match format!("{krate}={level}").parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(err) => {
                eprintln!("Ignoring {LOG_LEVEL_VAR}={level}: {err}");
                break;
            }
        }
    }

    filter
}
