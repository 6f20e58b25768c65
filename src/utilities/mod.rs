// Utilities module
// Text and layout helpers shared by the views

pub mod layout;
pub mod text;

pub use layout::{centered_rect, hex_color};
pub use text::{truncate, wrap_text};
