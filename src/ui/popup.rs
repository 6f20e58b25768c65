// Confirmation Popup
// Modal dialog asking before a widget is deleted

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::{ConfirmChoice, PendingDelete};
use crate::utilities::{centered_rect, wrap_text};
use super::Styles;

const TITLE: &str = "Confirm Deletion";
const MESSAGE: &str = "Are you sure you want to delete this widget? This action cannot be undone.";
const MAX_TEXT_WIDTH: usize = 50;

/// Render the delete confirmation dialog over a dimmed `area`
pub fn render_confirm(f: &mut Frame, pending: &PendingDelete, area: Rect) {
    f.render_widget(Paragraph::new("").style(Styles::dimmed()), area);

    let text_width = MAX_TEXT_WIDTH.min(area.width.saturating_sub(8) as usize);
    let mut lines = wrap_text(MESSAGE, text_width);
    lines.insert(0, format!("\"{}\"", pending.widget_name));
    lines.insert(1, String::new());

    let content_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let popup_width = (content_width as u16 + 6).max(TITLE.len() as u16 + 6).max(36);
    let popup_height = lines.len() as u16 + 5;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Styles::border_focused())
        .title(Span::styled(format!(" {} ", TITLE), Styles::title_focused()))
        .title_alignment(ratatui::layout::Alignment::Center);
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),    // Message
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let message: Vec<Line> = lines.into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(message).centered(), chunks[1]);

    let (cancel_style, delete_style) = match pending.choice {
        ConfirmChoice::Cancel => (Styles::button_selected(), Styles::button_normal()),
        ConfirmChoice::Delete => (Styles::button_normal(), Styles::button_danger_selected()),
    };
    let buttons = Line::from(vec![
        Span::styled(" Cancel ", cancel_style),
        Span::raw("    "),
        Span::styled(" Delete ", delete_style),
    ]);
    f.render_widget(Paragraph::new(buttons).centered(), chunks[2]);
}
