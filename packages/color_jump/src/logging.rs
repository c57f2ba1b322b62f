//! Process-wide logging setup for the binary.

use std::{
    fs::File,
    path::Path,
    sync::Arc,
    env,
    panic,
};
use backtrace::Backtrace;
use tracing_subscriber::{
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};
use anyhow::*;


/// Filter used unless `RUST_LOG` adds to it. Our crates are debug, everything else is warn.
pub const DEFAULT_FILTER: &'static str = "warn,color_jump=debug,face_data=debug";

/// Build the filter string: the default, extended by whatever `RUST_LOG` says.
pub fn filter_directives(env_filter: Option<&str>) -> String {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Some(env_filter) = env_filter.filter(|s| !s.is_empty()) {
        filter.push(',');
        filter.push_str(env_filter);
    }
    filter
}

/// Install a `tracing` backend which writes to stdout, and to `log_file` too if given. Also
/// routes panics and their backtraces through the log.
///
/// Errors if the log file can't be created or a subscriber is already installed.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let format = fmt::format()
        .compact()
        .with_timer(uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);

    let file_log = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to create log file {}", path.display()))?;
            Some(fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)))
        }
        None => None,
    };

    let env_filter = env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = Registry::default()
        .with(EnvFilter::new(filter_directives(env_filter.as_deref())))
        .with(stdout_log)
        .with(file_log);
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to install log subscriber")?;
    info!("starting program");

    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));
    trace!("installed custom panic hook");
    Ok(())
}


#[test]
fn test_filter_directives() {
    assert_eq!(filter_directives(None), DEFAULT_FILTER);
    assert_eq!(filter_directives(Some("")), DEFAULT_FILTER);
    assert_eq!(
        filter_directives(Some("color_jump::physics=trace")),
        "warn,color_jump=debug,face_data=debug,color_jump::physics=trace",
    );
}
