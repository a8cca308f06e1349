use tracing::metadata::LevelFilter;

/// Maps `-v` repetitions onto a level; warnings are always shown so skipped
/// lines are never silent.
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the stderr subscriber used by the command-line tool.
pub fn setup_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(level_filter(verbosity))
        .init();
}
