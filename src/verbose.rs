use std::io::Write;

/// Route `log` records to stderr; stdout is reserved for results.
/// `-v` lowers the default filter to debug, `RUST_LOG` still wins.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
    .target(env_logger::Target::Stderr)
    .try_init();
}
