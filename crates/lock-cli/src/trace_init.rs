use std::path::Path;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter for a verbosity count (`-v`, `-vv`). `RUST_LOG` wins when set.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "lock_core=info,lock_cli=info,warn",
        _ => "lock_core=debug,lock_cli=debug,info",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)))
}

/// Install the global subscriber once. Logs go to stderr so stdout stays
/// clean for results; with `trace_dir` (feature `trace`) they go to a JSON
/// lines file instead. Keep the returned guard alive until exit so buffered
/// file output is flushed.
pub fn init_tracing(verbosity: u8, trace_dir: Option<&Path>) -> TracingGuard {
    #[cfg_attr(not(feature = "trace"), allow(unused_mut))]
    let mut guard = TracingGuard::default();
    INIT.call_once(|| match trace_dir {
        #[cfg(feature = "trace")]
        Some(dir) => guard.file = Some(init_json_file(dir, verbosity)),
        _ => init_stderr(verbosity),
    });
    guard
}

#[derive(Default)]
pub struct TracingGuard {
    #[cfg(feature = "trace")]
    file: Option<tracing_appender::non_blocking::WorkerGuard>,
}

fn init_stderr(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter(verbosity))
        .init();
}

#[cfg(feature = "trace")]
fn init_json_file(dir: &Path, verbosity: u8) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, "locktool-trace.jsonl");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_env_filter(env_filter(verbosity.max(2)))
        .init();
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "warn");
        assert!(default_filter(1).contains("lock_core=info"));
        assert!(default_filter(2).contains("lock_cli=debug"));
        assert_eq!(default_filter(9), default_filter(2));
    }

    #[test]
    fn test_filters_parse() {
        for v in 0..3 {
            assert!(EnvFilter::try_new(default_filter(v)).is_ok());
        }
    }
}
