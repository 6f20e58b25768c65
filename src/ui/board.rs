// Category Board
// One section per category, with its widget cards and an add tile

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::core::{App, Category, Widget};
use crate::utilities::{truncate, wrap_text};
use super::Styles;

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 5;

const CARD_GAP: u16 = 1;

/// Cards that fit side by side in `inner_width` columns
fn cards_per_row(inner_width: u16, card_width: u16) -> usize {
    let stride = card_width.saturating_add(CARD_GAP);
    (inner_width.saturating_add(CARD_GAP) / stride).max(1) as usize
}

/// Rows a category section needs, borders included
///
/// An empty category still takes a cell for its placeholder text; the add
/// tile always follows the last cell.
pub fn section_height(category: &Category, width: u16, card_width: u16) -> u16 {
    let per_row = cards_per_row(width.saturating_sub(2), card_width);
    let cells = category.widgets.len().max(1) + 1;
    let rows = u16::try_from(cells.div_ceil(per_row)).unwrap_or(u16::MAX);
    rows.saturating_mul(CARD_HEIGHT).saturating_add(2)
}

/// First category to draw so the focused one is on screen
fn first_visible(app: &App, area: Rect) -> usize {
    let card_width = app.config.ui.card_width;
    let mut first = app.focus.category;
    let mut used = 0u16;

    for index in (0..=app.focus.category).rev() {
        let height = section_height(&app.categories()[index], area.width, card_width);
        if used.saturating_add(height) > area.height && index != app.focus.category {
            break;
        }
        used = used.saturating_add(height);
        first = index;
    }
    first
}

/// Render the board of categories
pub fn render_board(f: &mut Frame, app: &App, area: Rect, has_focus: bool) {
    let categories = app.categories();
    if categories.is_empty() {
        let placeholder = Paragraph::new("No categories available")
            .style(Styles::placeholder())
            .block(Block::default().borders(Borders::ALL).border_style(Styles::border_unfocused()));
        f.render_widget(placeholder, area);
        return;
    }

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (index, category) in categories.iter().enumerate().skip(first_visible(app, area)) {
        if y >= bottom {
            break;
        }
        let height = section_height(category, area.width, app.config.ui.card_width);
        let section = Rect::new(area.x, y, area.width, height.min(bottom - y));

        let focused_slot = (has_focus && index == app.focus.category).then_some(app.focus.slot);
        render_category(f, app, category, focused_slot, section);
        y = y.saturating_add(height);
    }
}

fn render_category(
    f: &mut Frame,
    app: &App,
    category: &Category,
    focused_slot: Option<usize>,
    area: Rect,
) {
    let (border_style, title_style) = if focused_slot.is_some() {
        (Styles::border_focused(), Styles::title_focused())
    } else {
        (Styles::border_unfocused(), Styles::category_title())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", category.name), title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let card_width = app.config.ui.card_width;
    let per_row = cards_per_row(inner.width, card_width);
    let cell = |position: usize| -> Option<Rect> {
        let col = u16::try_from(position % per_row).ok()?;
        let row = u16::try_from(position / per_row).ok()?;
        let x = inner.x.saturating_add(col.saturating_mul(card_width.saturating_add(CARD_GAP)));
        let y = inner.y.saturating_add(row.saturating_mul(CARD_HEIGHT));
        let right = inner.x.saturating_add(inner.width);
        if x >= right || y.saturating_add(CARD_HEIGHT) > inner.y.saturating_add(inner.height) {
            return None;
        }
        Some(Rect::new(x, y, card_width.min(right - x), CARD_HEIGHT))
    };

    if category.widgets.is_empty() {
        if let Some(rect) = cell(0) {
            let placeholder = Paragraph::new("\nNo widgets available").style(Styles::placeholder());
            f.render_widget(placeholder, rect);
        }
    }
    for (slot, widget) in category.widgets.iter().enumerate() {
        if let Some(rect) = cell(slot) {
            render_card(f, widget, focused_slot == Some(slot), rect);
        }
    }

    let add_slot = category.widgets.len();
    if let Some(rect) = cell(add_slot.max(1)) {
        render_add_tile(f, focused_slot == Some(add_slot), rect);
    }
}

fn render_card(f: &mut Frame, widget: &Widget, is_focused: bool, area: Rect) {
    let text_width = area.width.saturating_sub(2) as usize;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(truncate(&widget.name, text_width), Styles::card_name()));
    block = if is_focused {
        block
            .border_type(BorderType::Thick)
            .border_style(Styles::border_focused())
            .title_bottom(Line::from(" d: delete ").right_aligned())
    } else {
        block.border_style(Styles::border_unfocused())
    };

    let lines: Vec<Line> = wrap_text(&widget.text, text_width)
        .into_iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| Line::from(Span::styled(line, Styles::card_text())))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_add_tile(f: &mut Frame, is_focused: bool, area: Rect) {
    let (border_type, border_style) = if is_focused {
        (BorderType::Thick, Styles::border_focused())
    } else {
        (BorderType::Plain, Styles::add_tile())
    };

    let tile = Paragraph::new("\n+ Add Widget")
        .centered()
        .style(Styles::add_tile())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style),
        );
    f.render_widget(tile, area);
}
