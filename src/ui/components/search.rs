//! Search bar component.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Renders the search input. The border takes the accent color while the
/// input field has focus, the plain border color while the results do.
pub fn render(frame: &mut Frame, theme: &Theme, search: &SearchBarInfo, area: Rect) {
    let border_color = if search.focused {
        Theme::color(&theme.colors.search_bar_border)
    } else {
        Theme::color(&theme.colors.border)
    };

    let cursor = if search.focused { "▏" } else { "" };

    let widget = Paragraph::new(Line::from(Span::styled(
        format!(" {}{cursor}", search.query),
        Style::default().fg(Theme::color(&theme.colors.text_normal)),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Search "),
    );

    frame.render_widget(widget, area);
}
