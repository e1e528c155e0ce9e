use eframe::egui;
use std::sync::Arc;
use wealth_dashboard::gui::DashboardApp;
use wealth_dashboard::logging;
use wealth_dashboard::settings::Settings;
use wealth_dashboard::storage::{FileStorage, MemoryStorage, StorageBackend};

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".into());
    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging);

    let backend: Arc<dyn StorageBackend> = match FileStorage::new(settings.storage_dir()) {
        Ok(storage) => {
            tracing::info!(dir = %storage.dir().display(), "using preference directory");
            Arc::new(storage)
        }
        Err(e) => {
            tracing::warn!("layout preferences will not be saved: {e:#}");
            Arc::new(MemoryStorage::new())
        }
    };

    let (width, height) = settings.window_size.unwrap_or((1200.0, 800.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wealth Dashboard",
        native_options,
        Box::new(move |_cc| Box::new(DashboardApp::new(&settings, backend))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))
}
