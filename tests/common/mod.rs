use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a debug-level logger once per test binary, the way the store
/// and search modules' `log::debug!` calls expect a caller to have wired
/// one up (: this crate only calls the `log` facade, never configures
/// a backend itself).
pub fn setup_logger() {
    INIT.call_once(|| {
        fern::Dispatch::new()
            .level(log::LevelFilter::Debug)
            .chain(std::io::stdout())
            .apply()
            .ok();
    });
}
