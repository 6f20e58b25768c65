// UI module
// TUI views for the widget dashboard

pub mod app_view;
pub mod board;
pub mod drawer;
pub mod popup;
pub mod styles;
pub mod toast;

use anyhow::Result;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;

use crate::core::{App, EventHandler};

pub use app_view::render_app;
pub use board::render_board;
pub use drawer::render_drawer;
pub use popup::render_confirm;
pub use styles::Styles;
pub use toast::{render_toasts, Toast, ToastKind};

/// Run the main application event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    app.start_load();

    loop {
        // Pick up settled store operations before drawing
        app.pump();

        // Render the UI
        terminal.draw(|f| render_app(f, app))?;

        // Handle events
        if event::poll(app.config.ui.tick_rate)? {
            let event = event::read()?;
            let app_event = EventHandler::handle(event, app.input_mode());

            app.handle_event(app_event);
        }

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}
