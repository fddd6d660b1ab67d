//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! this service, the renderer and the HTTP trace layer.

use std::path::Path;

use tracing_subscriber::EnvFilter;

fn default_filter(level: &str) -> String {
    format!("lava_server={level},card_render={level},tower_http={level}")
}

/// Initialize the logger with optional daily rolling file output.
///
/// File output is only enabled when `log_dir` exists.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "lava-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
