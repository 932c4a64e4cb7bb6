use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Directory that receives `telemetry.jsonl`: the summary's parent.
pub fn telemetry_dir(outputs: &ResolvedOutputs) -> PathBuf {
    outputs
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Decision and round events only; dependency chatter stays out of telemetry.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("warn,gostop_bot={level},gostop_bench={level}")
}

pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    if logging.decision_details {
        unsafe {
            std::env::set_var("GOSTOP_DECISION_DETAILS", "1");
        }
    }

    let telemetry_dir = telemetry_dir(outputs);
    fs::create_dir_all(&telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join("telemetry.jsonl");
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when several runs share a process.
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::event!(
        target: "gostop_bench::run",
        Level::INFO,
        run_id,
        decision_details = logging.decision_details,
        telemetry = %telemetry_path.display(),
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::{default_directives, init_logging, telemetry_dir};
    use crate::config::{LoggingConfig, ResolvedOutputs};
    use std::path::PathBuf;
    use tempfile::tempdir;
    use tracing::Level;

    #[test]
    fn directives_scope_the_configured_level_to_our_crates() {
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,gostop_bot=debug,gostop_bench=debug"
        );
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let outputs = ResolvedOutputs {
            jsonl: PathBuf::from("out/rounds.jsonl"),
            summary_md: PathBuf::from("out/summary.md"),
        };
        let guard = init_logging(&LoggingConfig::default(), &outputs, "quiet").expect("no io");
        assert!(guard.is_none());
    }

    #[test]
    fn telemetry_sits_next_to_the_summary() {
        let outputs = ResolvedOutputs {
            jsonl: PathBuf::from("a/rounds.jsonl"),
            summary_md: PathBuf::from("b/summary.md"),
        };
        assert_eq!(telemetry_dir(&outputs), PathBuf::from("b"));

        let bare = ResolvedOutputs {
            jsonl: PathBuf::from("rounds.jsonl"),
            summary_md: PathBuf::from("summary.md"),
        };
        assert_eq!(telemetry_dir(&bare), PathBuf::from("."));
    }

    #[test]
    fn run_id_goes_to_telemetry_not_the_environment() {
        let dir = tempdir().expect("temp dir");
        let outputs = ResolvedOutputs {
            jsonl: dir.path().join("rounds.jsonl"),
            summary_md: dir.path().join("summary.md"),
        };
        let logging = LoggingConfig {
            enable_structured: true,
            ..LoggingConfig::default()
        };
        let guard = init_logging(&logging, &outputs, "env_free")
            .expect("telemetry file created")
            .expect("structured logging enabled");
        assert_eq!(guard.telemetry_path, dir.path().join("telemetry.jsonl"));
        assert!(guard.telemetry_path.exists());
        assert!(std::env::vars_os().all(|(_, value)| value != "env_free"));
    }
}
