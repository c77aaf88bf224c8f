use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive (e.g.
/// `eimu_protocol=debug,eimu_frame=trace`). Overrides `--log-level`.
pub const LOG_ENV: &str = "EIMU_LOG";

/// Crates whose events follow `--log-level`; everything else stays at warn.
const EIMU_TARGETS: [&str; 4] = ["eimu", "eimu_transport", "eimu_frame", "eimu_protocol"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Filter used when `EIMU_LOG` is unset or unparsable.
fn default_directives(level: LogLevel) -> String {
    let mut directives = String::from("warn");
    for target in EIMU_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push('=');
        directives.push_str(level.as_str());
    }
    directives
}

fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

pub fn init_logging(format: LogFormat, level: LogLevel) {
    // stderr only: stdout carries samples.
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(level))
        .with_ansi(false)
        .with_target(level == LogLevel::Trace);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().with_current_span(false).try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_scope_level_to_eimu_crates() {
        assert_eq!(
            default_directives(LogLevel::Debug),
            "warn,eimu=debug,eimu_transport=debug,eimu_frame=debug,eimu_protocol=debug"
        );
    }

    #[test]
    fn default_directives_parse() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(EnvFilter::try_new(default_directives(level)).is_ok());
        }
    }
}
