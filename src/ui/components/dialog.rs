//! Modal dialog overlay component.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{Dialog, DialogKind};
use crate::ui::theme::Theme;

/// Renders the modal dialog centered over whatever screen is underneath.
pub fn render(frame: &mut Frame, theme: &Theme, dialog: &Dialog, area: Rect) {
    let accent = match dialog.kind {
        DialogKind::Success => &theme.colors.success_fg,
        DialogKind::Error => &theme.colors.error_fg,
        DialogKind::Warning => &theme.colors.warning_fg,
        DialogKind::Info | DialogKind::Confirm => &theme.colors.info_fg,
    };
    let accent = Theme::color(accent);

    let hint = match dialog.kind {
        DialogKind::Confirm => "y: confirm  n/ESC: cancel",
        _ => "Enter/ESC: dismiss",
    };

    let box_area = centered_box(area, 50, 8);
    frame.render_widget(Clear, box_area);

    let widget = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            dialog.message.clone(),
            Style::default().fg(Theme::color(&theme.colors.text_normal)),
        )),
        Line::default(),
        Line::from(Span::styled(
            hint,
            Style::default().fg(Theme::color(&theme.colors.text_dim)),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .title(format!(" {} ", dialog.title)),
    );

    frame.render_widget(widget, box_area);
}

fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
