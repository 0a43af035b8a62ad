//! Empty state component.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::theme::Theme;

/// Renders a centered placeholder message where the match table would be.
pub fn render(frame: &mut Frame, theme: &Theme, message: &str, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Theme::color(&theme.colors.empty_state_fg)),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::color(&theme.colors.border))),
    );

    frame.render_widget(widget, area);
}
