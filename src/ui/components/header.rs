//! Header bar component.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header bar: tab title and count on the left, operator name on
/// the right.
pub fn render(frame: &mut Frame, theme: &Theme, header: &HeaderInfo, area: Rect) {
    let mut spans = vec![Span::styled(
        header.title.clone(),
        Style::default()
            .fg(Theme::color(&theme.colors.header_fg))
            .add_modifier(Modifier::BOLD),
    )];

    if !header.operator.is_empty() {
        spans.push(Span::styled(
            format!("  operator: {}", header.operator),
            Style::default().fg(Theme::color(&theme.colors.text_dim)),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::color(&theme.colors.border)))
            .title(" gatescan "),
    );

    frame.render_widget(widget, area);
}
