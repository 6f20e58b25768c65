// Application View
// Main application layout and rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::{App, InputMode, LoadState};
use super::{render_board, render_confirm, render_drawer, render_toasts, Styles};

/// Render the entire application
pub fn render_app(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_main_content(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);

    // Overlays
    if app.drawer_open {
        render_drawer(f, app, chunks[1]);
    }
    if let Some(pending) = &app.confirm {
        render_confirm(f, pending, f.area());
    }
    render_toasts(f, chunks[1], &app.toasts);
}

/// Render the header bar
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(app.config.ui.title.as_str())
        .centered()
        .style(Styles::header())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Render the main content area
fn render_main_content(f: &mut Frame, app: &App, area: Rect) {
    match &app.load_state {
        LoadState::Loading if app.snapshot().is_empty() => {
            let loading = Paragraph::new("Loading categories...")
                .style(Styles::placeholder())
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(loading, area);
        }
        _ => render_board(f, app, area, app.input_mode() == InputMode::Board),
    }
}

/// Render the footer bar
fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.input_mode() {
        InputMode::Board => {
            "q: Quit | a: Add Widget | ←/→/↑/↓: Navigate | Enter: Open Add Tile | d/Del: Delete | r: Refresh"
        }
        InputMode::Drawer => {
            "Esc: Close | Tab/↑/↓: Field | ←/→: Category | Enter: Add Widget | Ctrl-C: Quit"
        }
        InputMode::Confirm => "←/→: Choose | Enter: Confirm | Esc/n: Cancel",
    };

    let footer = Paragraph::new(help_text)
        .style(Styles::footer())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AppConfig, Category, Widget};
    use crate::operations::stub::StubApi;
    use crate::operations::SyncStore;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    async fn loaded_app(categories: Vec<Category>) -> App {
        let api = Arc::new(StubApi::new(categories));
        let store = Arc::new(SyncStore::new(api));
        let mut app = App::new(AppConfig::default(), store, Handle::current());
        app.start_load();
        for _ in 0..200 {
            app.pump();
            if app.load_state == LoadState::Ready {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        app
    }

    #[tokio::test]
    async fn test_board_shows_categories_and_widgets() {
        let app = loaded_app(vec![
            Category::new("c1", "General", vec![Widget::with_id("w1", "Clock", "12:00")]),
            Category::new("c2", "Security", vec![]),
        ])
        .await;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| render_app(f, &app)).unwrap();

        let screen = screen(&terminal);
        assert!(screen.contains(&app.config.ui.title));
        assert!(screen.contains("General"));
        assert!(screen.contains("Clock"));
        assert!(screen.contains("12:00"));
        assert!(screen.contains("No widgets available"));
        assert!(screen.contains("+ Add Widget"));
    }

    #[tokio::test]
    async fn test_empty_board_placeholder() {
        let app = loaded_app(vec![]).await;
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal.draw(|f| render_app(f, &app)).unwrap();

        assert!(screen(&terminal).contains("No categories available"));
    }
}
