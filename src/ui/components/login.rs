//! Login form component.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{LoginField, LoginForm};
use crate::ui::theme::Theme;

/// Renders the centered credential form.
///
/// The password renders masked; an inline failure message from the last
/// attempt sits under the fields until the next submit or Escape.
pub fn render(frame: &mut Frame, theme: &Theme, form: &LoginForm, area: Rect) {
    let box_area = centered_box(area, 46, 11);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::color(&theme.colors.border)))
        .title(" Operator login ");
    let inner = outer.inner(box_area);
    frame.render_widget(outer, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_field(
        frame,
        theme,
        "Email",
        &form.email,
        form.focus == LoginField::Email,
        chunks[0],
    );
    render_field(
        frame,
        theme,
        "Password",
        &"*".repeat(form.password.chars().count()),
        form.focus == LoginField::Password,
        chunks[1],
    );

    let status = if form.busy {
        Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Theme::color(&theme.colors.info_fg)),
        ))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Theme::color(&theme.colors.error_fg)),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[2]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Tab: switch field  Enter: sign in  Ctrl+C: quit",
            Style::default().fg(Theme::color(&theme.colors.text_dim)),
        )))
        .alignment(Alignment::Center),
        chunks[3],
    );
}

fn render_field(
    frame: &mut Frame,
    theme: &Theme,
    label: &str,
    value: &str,
    focused: bool,
    area: Rect,
) {
    let border_color = if focused {
        Theme::color(&theme.colors.search_bar_border)
    } else {
        Theme::color(&theme.colors.border)
    };

    let cursor = if focused { "▏" } else { "" };

    let style = if focused {
        Style::default()
            .fg(Theme::color(&theme.colors.text_normal))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::color(&theme.colors.text_normal))
    };

    let widget = Paragraph::new(Line::from(Span::styled(format!(" {value}{cursor}"), style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {label} ")),
        );

    frame.render_widget(widget, area);
}

/// Centers a fixed-size box in the given area, clamped to fit.
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
