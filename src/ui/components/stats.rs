//! Statistics panel component.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::StatsPanel;
use crate::domain::stats::{MatchStatistics, StatsOutcome};
use crate::ui::theme::Theme;

/// Renders the per-match statistics panel beside the match table.
///
/// The three snapshot sections arrive independently; each renders only when
/// present rather than assuming the server sent the full trio.
pub fn render(frame: &mut Frame, theme: &Theme, panel: &StatsPanel, area: Rect) {
    let lines = match &panel.outcome {
        None => vec![
            Line::default(),
            Line::from(Span::styled(
                "Loading statistics...",
                Style::default().fg(Theme::color(&theme.colors.info_fg)),
            )),
        ],
        Some(StatsOutcome::Unavailable { message }) => vec![
            Line::default(),
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Theme::color(&theme.colors.warning_fg)),
            )),
        ],
        Some(StatsOutcome::Loaded(stats)) => snapshot_lines(theme, stats, area.height as usize),
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::color(&theme.colors.border)))
            .title(format!(" Stats — {} ", panel.match_title)),
    );

    frame.render_widget(widget, area);
}

fn snapshot_lines(theme: &Theme, stats: &MatchStatistics, height: usize) -> Vec<Line<'static>> {
    let normal = Style::default().fg(Theme::color(&theme.colors.text_normal));
    let dim = Style::default().fg(Theme::color(&theme.colors.text_dim));
    let warn = Style::default().fg(Theme::color(&theme.colors.warning_fg));

    let mut lines = Vec::new();

    if let Some(info) = &stats.match_info {
        lines.push(Line::from(vec![
            Span::styled(" Used:  ", dim),
            Span::styled(
                format!("{}/{}", info.used_qr_codes, info.total_qr_codes),
                normal.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({:.1}%)", info.usage_percentage), dim),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Fraud: ", dim),
            Span::styled(format!("{}", info.fraud_qr_codes), warn),
            Span::styled(format!("  ({:.1}%)", info.fraud_percentage), dim),
        ]));
        lines.push(Line::default());
    }

    if !stats.zones.is_empty() {
        lines.push(Line::from(Span::styled(" Zones", dim)));
        let zone_rows = height.saturating_sub(lines.len() + 6);
        for zone in stats.zones.iter().take(zone_rows.max(1)) {
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<12}", zone.zone), normal),
                Span::styled(
                    format!("{:>5}/{:<5}", zone.used_qrcodes, zone.total_qrcodes),
                    normal,
                ),
                Span::styled(format!(" {:>5.1}%", zone.usage_percentage), dim),
                Span::styled(format!("  fraud {:>4.1}%", zone.fraud_percentage), warn),
            ]));
        }
        lines.push(Line::default());
    }

    if let Some(summary) = &stats.summary {
        lines.push(Line::from(vec![
            Span::styled(" Coverage: ", dim),
            Span::styled(
                format!("{}/{} zones", summary.zones_with_data, summary.total_zones),
                normal,
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Busiest:  ", dim),
            Span::styled(summary.most_used_zone.zone.clone(), normal),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Fraud hotspot: ", dim),
            Span::styled(summary.highest_fraud_zone.zone.clone(), warn),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(" No data for this match", dim)));
    }

    lines
}
