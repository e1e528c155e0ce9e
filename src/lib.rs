pub mod columns;
pub mod dashboard;
pub mod drag;
pub mod gui;
pub mod holdings;
pub mod logging;
pub mod settings;
pub mod storage;
