//! Scan screen component.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::scan::{ScanController, ScanPhase};
use crate::ui::theme::Theme;

/// Renders the scan surface for the controller's current phase.
///
/// While armed, the in-progress wedge input is echoed so the operator can
/// see the payload building up before the terminating Enter.
pub fn render(
    frame: &mut Frame,
    theme: &Theme,
    controller: &ScanController,
    input: &str,
    area: Rect,
) {
    let (status_line, accent) = match controller.phase() {
        ScanPhase::Idle => ("Scanner stopped", &theme.colors.text_dim),
        ScanPhase::AwaitingPermission => ("Requesting scanner access...", &theme.colors.info_fg),
        ScanPhase::Armed => ("Ready — scan a passport", &theme.colors.success_fg),
        ScanPhase::Processing => ("Checking ticket...", &theme.colors.warning_fg),
        ScanPhase::Resolved => ("Verdict received", &theme.colors.info_fg),
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            status_line,
            Style::default()
                .fg(Theme::color(accent))
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if controller.phase() == ScanPhase::Armed {
        lines.push(Line::from(Span::styled(
            format!("▸ {input}▏"),
            Style::default().fg(Theme::color(&theme.colors.text_normal)),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter: submit  ESC: back to matches",
            Style::default().fg(Theme::color(&theme.colors.text_dim)),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "ESC: back to matches",
            Style::default().fg(Theme::color(&theme.colors.text_dim)),
        )));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::color(&theme.colors.border)))
            .title(format!(" Scan — match {} ", controller.context().match_id)),
    );

    frame.render_widget(widget, area);
}
