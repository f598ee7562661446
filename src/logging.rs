//! Stderr logging setup shared by both binaries.

use tracing::Level;

/// Install the global fmt subscriber.
///
/// `verbose` raises the level to `DEBUG`; otherwise `default_level` applies.
pub fn init(default_level: Level, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { default_level };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
