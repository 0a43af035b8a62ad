//! Top-level rendering coordinator.
//!
//! One `render` entry point per frame: it lays out the active screen,
//! dispatches to the components, and draws the modal dialog overlay last so
//! it sits above everything else.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::{AppState, Screen};
use crate::ui::components::{
    dialog, empty, footer, header, login, match_table, scanner, search, stats,
};

/// Renders one frame from the current application state.
///
/// `scan_input` is the wedge input being accumulated by the runtime while
/// the scan screen is armed; it is echoed but never stored in state.
pub fn render(frame: &mut Frame, state: &AppState, scan_input: &str) {
    match state.screen {
        Screen::Login => login::render(frame, &state.theme, &state.login, frame.area()),
        Screen::Matches => render_matches(frame, state),
        Screen::Scan => render_scan(frame, state, scan_input),
    }

    if let Some(open_dialog) = &state.dialog {
        dialog::render(frame, &state.theme, open_dialog, frame.area());
    }
}

fn render_matches(frame: &mut Frame, state: &AppState) {
    let vm = state.compute_viewmodel(frame.area().height as usize);

    let mut constraints = vec![Constraint::Length(3)];
    if vm.search_bar.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(4));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    header::render(frame, &state.theme, &vm.header, chunks[next]);
    next += 1;

    if let Some(bar) = &vm.search_bar {
        search::render(frame, &state.theme, bar, chunks[next]);
        next += 1;
    }

    let body = chunks[next];
    next += 1;

    if let Some(panel) = &state.stats {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);

        match &vm.empty_state {
            Some(message) => empty::render(frame, &state.theme, message, halves[0]),
            None => match_table::render(frame, &state.theme, &vm.rows, halves[0]),
        }
        stats::render(frame, &state.theme, panel, halves[1]);
    } else {
        match &vm.empty_state {
            Some(message) => empty::render(frame, &state.theme, message, body),
            None => match_table::render(frame, &state.theme, &vm.rows, body),
        }
    }

    footer::render(frame, &state.theme, &vm.footer, chunks[next]);
}

fn render_scan(frame: &mut Frame, state: &AppState, scan_input: &str) {
    let Some(controller) = state.scan.as_ref() else {
        return;
    };
    scanner::render(frame, &state.theme, controller, scan_input, frame.area());
}
