extern crate env_logger;
extern crate log;

use std::env;

/// Sets up `env_logger` for a binary.
///
/// Defaults to the `Info` level; `RUST_LOG` filters are applied on top.
/// Calling it twice is harmless, the second logger is silently dropped.
pub fn init() {
    let mut builder = env_logger::LogBuilder::new();
    builder.filter(None, log::LogLevelFilter::Info);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse(&filters);
    }
    builder.format(|record| {
        format!(
            "{:5} {}: {}",
            record.level(),
            record.metadata().target(),
            record.args(),
        )
    });
    let _ = builder.init();
}
