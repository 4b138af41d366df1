use log::LevelFilter;

/// Install the logger backend for the current target.
///
/// Safe to call more than once: later calls only adjust the max level.
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(level) = level.to_level() {
            // Err means a logger is already installed.
            let _ = console_log::init_with_level(level);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(level)
            .try_init();
    }

    log::set_max_level(level);
}
