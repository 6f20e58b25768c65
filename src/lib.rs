// Widget Dashboard Library
// A TUI dashboard for categories of widgets kept in sync with a REST API

// Core infrastructure - state, configuration, model, input
pub mod core;

// Operations - category API client and sync store
pub mod operations;

// UI - TUI components and views
pub mod ui;

// Utilities - helper functions and tools
pub mod utilities;

// Logging setup
pub mod logging;

// Re-export commonly used items for convenience
pub use core::{App, AppConfig, Category, Widget};
pub use operations::{CategoryApi, HttpCategoryApi, Snapshot, SyncError, SyncStore};
