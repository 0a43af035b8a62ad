//! Footer keybinding bar component.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer with the keybinding hints for the active mode.
pub fn render(frame: &mut Frame, theme: &Theme, footer: &FooterInfo, area: Rect) {
    let widget = Paragraph::new(Line::from(Span::styled(
        format!(" {}", footer.keybindings),
        Style::default().fg(Theme::color(&theme.colors.text_dim)),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::color(&theme.colors.border))),
    );

    frame.render_widget(widget, area);
}
