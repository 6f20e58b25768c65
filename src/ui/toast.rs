// Toast Notifications
// Transient messages stacked in the bottom-left corner

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::time::Instant;

use crate::utilities::{hex_color, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: String, kind: ToastKind) -> Self {
        Self {
            message,
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastKind::Info)
    }

    fn icon_and_color(&self) -> (&'static str, Color) {
        match self.kind {
            ToastKind::Success => ("✓", Color::Green),
            ToastKind::Error => ("✗", Color::Red),
            ToastKind::Info => ("ℹ", Color::Cyan),
        }
    }
}

/// Render toasts in the bottom-left corner of `area`, newest at the bottom
pub fn render_toasts(f: &mut Frame, area: Rect, toasts: &[Toast]) {
    if toasts.is_empty() || area.width < 4 || area.height < 2 {
        return;
    }

    // Inset by 1 from left and bottom
    let max_content = area.width.saturating_sub(4) as usize;
    let lines: Vec<(String, Color)> = toasts
        .iter()
        .map(|toast| {
            let (icon, color) = toast.icon_and_color();
            (truncate(&format!("{} {}", icon, toast.message), max_content), color)
        })
        .collect();

    let width = lines
        .iter()
        .map(|(content, _)| content.chars().count())
        .max()
        .unwrap_or(0) as u16
        + 3;

    let mut bottom = area.y + area.height - 1;
    for (content, color) in lines.iter().rev() {
        if bottom <= area.y {
            break;
        }
        let toast_area = Rect {
            x: area.x + 1,
            y: bottom - 1,
            width: width.min(area.width - 1),
            height: 1,
        };

        f.render_widget(Clear, toast_area);
        let toast_widget = Paragraph::new(format!("  {} ", content)).style(
            Style::default()
                .fg(*color)
                .bg(hex_color(0x0A0A0A))
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(toast_widget, toast_area);

        bottom -= 1;
    }
}
