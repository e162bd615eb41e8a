//! Chromini, a minimal multi-tab browser shell.
//!
//! Entry point: opens the first browser window and runs the event loop.
//! When built without the `gui` feature, prints the persisted history.

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(feature = "gui")]
fn main() {
    init_logging();
    log::info!("Chromini v{} starting", env!("CARGO_PKG_VERSION"));
    chromini::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    use chromini::managers::history_manager::{HistoryManager, HistoryManagerTrait};
    use chromini::services::config_store::{ConfigStore, ConfigStoreTrait};

    init_logging();

    let store = ConfigStore::new(None);
    println!("Chromini v{} (built without the gui feature)", env!("CARGO_PKG_VERSION"));
    println!("Config: {}", store.get_config_path().display());

    let config = store.load_or_default();
    println!(
        "Window: {}x{}",
        config.window_bounds.width, config.window_bounds.height
    );

    let history = HistoryManager::new(store).list();
    if history.is_empty() {
        println!("History is empty.");
        return;
    }
    println!("History ({} entries):", history.len());
    for (i, entry) in history.iter().enumerate() {
        println!("  {:>2}. {} ({})", i + 1, entry.title, entry.url);
    }
}
