// UI Styles
// Color schemes and styling for the TUI

use ratatui::style::{Color, Modifier, Style};

use crate::utilities::hex_color;

/// Application color scheme and styles
pub struct Styles;

impl Styles {
    // === Header / Footer ===

    pub fn header() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer() -> Style {
        Style::default().fg(Color::Yellow)
    }

    // === Board ===

    pub fn category_title() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_name() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_text() -> Style {
        Style::default()
    }

    pub fn add_tile() -> Style {
        Style::default().fg(hex_color(0x777777))
    }

    pub fn placeholder() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    // === Form ===

    pub fn field_label() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn field_value() -> Style {
        Style::default().fg(Color::White)
    }

    // === Dialog Buttons ===

    pub fn button_selected() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn button_danger_selected() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_normal() -> Style {
        Style::default().fg(hex_color(0x777777))
    }

    /// Background drawn behind a modal
    pub fn dimmed() -> Style {
        Style::default().bg(hex_color(0x0A0A0A))
    }

    // === Border Styles ===

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn border_unfocused() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_focused() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_unfocused() -> Style {
        Style::default().fg(Color::Gray)
    }
}
