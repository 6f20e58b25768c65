// Add Widget Drawer
// Side panel with the category selector and the widget fields

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::{App, FormField};
use crate::utilities::truncate;
use super::Styles;

/// Area of the drawer along the right edge of `area`
pub fn drawer_area(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + area.width - width, area.y, width, area.height)
}

/// Render the "Add New Widget" side panel
pub fn render_drawer(f: &mut Frame, app: &App, area: Rect) {
    let area = drawer_area(area, app.config.ui.drawer_width);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Styles::border_focused())
        .title(Span::styled(" Add New Widget ", Styles::title_focused()))
        .title_bottom(Line::from(" Esc: close ").right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category
            Constraint::Length(3), // Name
            Constraint::Length(3), // Text
            Constraint::Length(1),
            Constraint::Length(1), // Submit hint
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.form;
    let width = chunks[0].width.saturating_sub(2) as usize;

    let category = match form.category_name(app.categories()) {
        Some(name) => format!("◀ {} ▶", truncate(name, width.saturating_sub(4))),
        None => "◀ Select Category ▶".to_string(),
    };
    render_field(f, "Category", &category, form.field == FormField::Category, chunks[0]);
    render_field(f, "Widget Name", &form.name, form.field == FormField::Name, chunks[1]);
    render_field(f, "Widget Text", &form.text, form.field == FormField::Text, chunks[2]);

    let button_style = if form.is_complete() {
        Styles::button_selected()
    } else {
        Styles::button_normal()
    };
    let button = Paragraph::new(Span::styled(" Enter: Add Widget ", button_style)).centered();
    f.render_widget(button, chunks[4]);

    // Cursor at the end of the focused text field
    let (value, rect) = match form.field {
        FormField::Name => (&form.name, chunks[1]),
        FormField::Text => (&form.text, chunks[2]),
        FormField::Category => return,
    };
    let offset = (value.chars().count() as u16).min(rect.width.saturating_sub(3));
    f.set_cursor_position(Position::new(rect.x + 1 + offset, rect.y + 1));
}

fn render_field(f: &mut Frame, label: &str, value: &str, is_focused: bool, area: Rect) {
    let (border_type, border_style, title_style) = if is_focused {
        (BorderType::Thick, Styles::border_focused(), Styles::title_focused())
    } else {
        (BorderType::Plain, Styles::border_unfocused(), Styles::field_label())
    };

    // Keep the tail of long input visible
    let visible = area.width.saturating_sub(3) as usize;
    let skip = value.chars().count().saturating_sub(visible);
    let shown: String = value.chars().skip(skip).collect();

    let field = Paragraph::new(Span::styled(shown, Styles::field_value())).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(Span::styled(label, title_style)),
    );
    f.render_widget(field, area);
}
