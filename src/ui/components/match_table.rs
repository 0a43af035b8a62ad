//! Match table component.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::MatchRow;

/// Renders the visible window of the filtered match list.
///
/// The selected row gets the selection colors; fuzzy match positions in the
/// title are highlighted while a query is active.
pub fn render(frame: &mut Frame, theme: &Theme, rows: &[MatchRow], area: Rect) {
    let items: Vec<ListItem> = rows.iter().map(|row| row_item(theme, row)).collect();

    let widget = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::color(&theme.colors.border)))
            .title(" Matches "),
    );

    frame.render_widget(widget, area);
}

fn row_item<'a>(theme: &Theme, row: &'a MatchRow) -> ListItem<'a> {
    let base_style = if row.is_selected {
        Style::default()
            .fg(Theme::color(&theme.colors.selection_fg))
            .bg(Theme::color(&theme.colors.selection_bg))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::color(&theme.colors.text_normal))
    };

    let marker = if row.is_selected { "▸ " } else { "  " };

    let mut title_spans = vec![Span::styled(marker, base_style)];
    title_spans.extend(highlight_title(theme, row, base_style));

    let detail_style = if row.is_selected {
        base_style
    } else {
        Style::default().fg(Theme::color(&theme.colors.text_dim))
    };

    let detail = Line::from(Span::styled(
        format!(
            "    {} · {} · {}",
            row.schedule,
            if row.stadium.is_empty() { "?" } else { &row.stadium },
            row.status_label
        ),
        detail_style,
    ));

    ListItem::new(vec![Line::from(title_spans), detail])
}

/// Splits the title into styled spans around the fuzzy highlight ranges.
fn highlight_title<'a>(theme: &Theme, row: &'a MatchRow, base_style: Style) -> Vec<Span<'a>> {
    if row.highlight_ranges.is_empty() {
        return vec![Span::styled(row.title.as_str(), base_style)];
    }

    let highlight_style = Style::default()
        .fg(Theme::color(&theme.colors.match_highlight_fg))
        .bg(Theme::color(&theme.colors.match_highlight_bg));

    let mut spans = Vec::new();
    let mut cursor = 0;

    for &(start, end) in &row.highlight_ranges {
        if start > cursor {
            if let Some(segment) = row.title.get(cursor..start) {
                spans.push(Span::styled(segment, base_style));
            }
        }
        if let Some(segment) = row.title.get(start..end) {
            spans.push(Span::styled(segment, highlight_style));
        }
        cursor = end;
    }

    if let Some(rest) = row.title.get(cursor..) {
        if !rest.is_empty() {
            spans.push(Span::styled(rest, base_style));
        }
    }

    spans
}
