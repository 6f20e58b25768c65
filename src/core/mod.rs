// Core infrastructure module
// Application state, configuration, domain model and input handling

pub mod app;
pub mod app_config;
pub mod events;
pub mod model;
pub mod widget_form;

pub use app::{App, BoardFocus, ConfirmChoice, LoadState, PendingDelete};
pub use app_config::AppConfig;
pub use events::{AppEvent, EventHandler, InputMode};
pub use model::{Category, Widget};
pub use widget_form::{FormField, WidgetForm};
