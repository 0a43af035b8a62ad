//! Event handling and state transition logic.
//!
//! The handler is the one place application state changes. Events arrive
//! from the terminal (already mapped to semantic variants by the runtime) or
//! as results of executed actions; [`handle_event`] pattern-matches them,
//! mutates [`AppState`], and returns whether a redraw is needed plus the
//! actions to execute next.
//!
//! # Event flow
//!
//! 1. The runtime maps a key press or an action result to an [`Event`]
//! 2. [`handle_event`] mutates state and collects actions
//! 3. The runtime executes each action and feeds results back as events
//!
//! A modal dialog, while open, swallows every user input except its own
//! confirm/cancel answers; action results still land so an in-flight
//! exchange cannot be lost behind a dialog.

use super::dialog::{Dialog, FollowUp};
use super::modes::{InputMode, Screen, SearchFocus};
use super::state::StatsPanel;
use super::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::stats::StatsOutcome;
use crate::domain::{Match, ScanVerdict, Session};
use crate::scan::capture::{DecodeEvent, PermissionStatus};
use crate::scan::ScanContext;

/// Events triggered by operator input or by completed actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Navigation and commands.
    /// Moves selection down by one (wraps).
    KeyDown,
    /// Moves selection up by one (wraps).
    KeyUp,
    /// Opens the scan screen for the selected match.
    SelectMatch,
    /// Switches between the upcoming and finished tabs.
    ToggleTab,
    /// Opens the statistics panel for the selected match.
    OpenStats,
    /// Closes the statistics panel.
    CloseStats,
    /// Requests a fresh match list.
    RefreshMatches,
    /// Asks for logout confirmation.
    LogoutRequested,
    /// Exits the application.
    Quit,

    // Search.
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field.
    FocusSearchBar,
    /// Focuses the filtered results.
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Clears transient input state (search query or login error).
    Escape,

    // Text input, routed by screen and mode.
    Char(char),
    Backspace,

    // Login form.
    /// Moves focus between the email and password fields.
    FocusNextField,
    /// Submits the login form.
    SubmitLogin,

    // Scan screen.
    /// One decoded payload from the capture surface.
    Decode(DecodeEvent),
    /// Closes the scan screen.
    CloseScan,

    // Dialog answers.
    DialogConfirm,
    DialogCancel,

    // Action results.
    /// A persisted session was (or was not) found at startup.
    SessionRestored(Option<Session>),
    LoginSucceeded(Session),
    LoginFailed(String),
    MatchesLoaded(Vec<Match>),
    MatchesFailed(String),
    PermissionResult(PermissionStatus),
    /// The scan exchange finished; the controller already holds the verdict.
    VerdictResolved(ScanVerdict),
    StatsLoaded {
        match_id: String,
        outcome: StatsOutcome,
    },
}

impl Event {
    /// Whether this event originates from operator input rather than from a
    /// completed action.
    const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::SessionRestored(_)
                | Self::LoginSucceeded(_)
                | Self::LoginFailed(_)
                | Self::MatchesLoaded(_)
                | Self::MatchesFailed(_)
                | Self::PermissionResult(_)
                | Self::VerdictResolved(_)
                | Self::StatsLoaded { .. }
        )
    }
}

/// Processes an event, mutates application state, and returns `(redraw,
/// actions)`.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` keeps the signature stable
/// for state mutations that can fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    // An open dialog owns the keyboard.
    if state.dialog.is_some()
        && event.is_user_input()
        && !matches!(event, Event::DialogConfirm | Event::DialogCancel | Event::Quit)
    {
        return Ok((false, vec![]));
    }

    match event {
        Event::Quit => Ok((false, vec![Action::Quit])),

        Event::DialogConfirm => Ok(answer_dialog(state, true)),
        Event::DialogCancel => Ok(answer_dialog(state, false)),

        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }

        Event::SelectMatch => {
            let Some(m) = state.selected_match() else {
                // Enter on an empty result list drops back to normal mode.
                if matches!(state.input_mode, InputMode::Search(_)) {
                    state.input_mode = InputMode::Normal;
                    state.search_query.clear();
                    state.apply_search_filter();
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            let Some(session) = state.session.as_ref() else {
                return Ok((false, vec![]));
            };

            let context = ScanContext {
                match_id: m.id.clone(),
                operator: session.operator().to_string(),
            };
            tracing::debug!(match_id = %context.match_id, "opening scan screen");
            state.open_scan(context);
            Ok((true, vec![Action::RequestPermission]))
        }

        Event::ToggleTab => {
            state.tab = state.tab.toggled();
            state.selected_index = 0;
            state.apply_search_filter();
            Ok((true, vec![]))
        }

        Event::OpenStats => {
            let Some(m) = state.selected_match() else {
                return Ok((false, vec![]));
            };
            let match_id = m.id.clone();
            state.stats = Some(StatsPanel {
                match_id: match_id.clone(),
                match_title: m.title(),
                outcome: None,
            });
            Ok((true, vec![Action::FetchStats { match_id }]))
        }
        Event::CloseStats => {
            state.stats = None;
            Ok((true, vec![]))
        }

        Event::RefreshMatches => {
            state.loading_matches = true;
            Ok((true, vec![Action::LoadMatches]))
        }

        Event::LogoutRequested => {
            state.dialog = Some(Dialog::confirm_logout());
            Ok((true, vec![]))
        }

        Event::SearchMode => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.apply_search_filter();
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Escape => match state.screen {
            Screen::Login => {
                state.login.error = None;
                Ok((true, vec![]))
            }
            Screen::Matches => {
                if matches!(state.input_mode, InputMode::Search(_)) {
                    state.input_mode = InputMode::Normal;
                    state.search_query.clear();
                    state.apply_search_filter();
                    Ok((true, vec![]))
                } else if state.stats.is_some() {
                    state.stats = None;
                    Ok((true, vec![]))
                } else {
                    Ok((false, vec![]))
                }
            }
            Screen::Scan => {
                state.close_scan();
                Ok((true, vec![]))
            }
        },

        Event::Char(c) => match state.screen {
            Screen::Login => {
                state.login.push_char(*c);
                Ok((true, vec![]))
            }
            Screen::Matches if matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) => {
                state.search_query.push(*c);
                state.apply_search_filter();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match state.screen {
            Screen::Login => {
                state.login.backspace();
                Ok((true, vec![]))
            }
            Screen::Matches if matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) => {
                state.search_query.pop();
                state.apply_search_filter();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },

        Event::FocusNextField => {
            state.login.focus = state.login.focus.toggled();
            Ok((true, vec![]))
        }
        Event::SubmitLogin => {
            if !state.login.is_submittable() {
                return Ok((false, vec![]));
            }
            state.login.busy = true;
            state.login.error = None;
            Ok((
                true,
                vec![Action::Login {
                    email: state.login.email.trim().to_string(),
                    password: state.login.password.clone(),
                }],
            ))
        }

        Event::Decode(decode) => {
            let Some(controller) = state.scan.as_mut() else {
                return Ok((false, vec![]));
            };
            match controller.accept_decode(decode.clone()) {
                Some(attempt) => Ok((true, vec![Action::SubmitScan { attempt }])),
                None => Ok((false, vec![])),
            }
        }
        Event::CloseScan => {
            state.close_scan();
            Ok((true, vec![]))
        }

        Event::SessionRestored(session) => match session {
            Some(session) => {
                state.establish_session(session.clone());
                state.loading_matches = true;
                Ok((true, vec![Action::LoadMatches]))
            }
            None => Ok((true, vec![])),
        },
        Event::LoginSucceeded(session) => {
            state.establish_session(session.clone());
            state.loading_matches = true;
            Ok((true, vec![Action::SaveSession, Action::LoadMatches]))
        }
        Event::LoginFailed(message) => {
            state.login.busy = false;
            state.login.error = Some(message.clone());
            Ok((true, vec![]))
        }

        Event::MatchesLoaded(matches) => {
            state.set_matches(matches.clone());
            Ok((true, vec![]))
        }
        Event::MatchesFailed(message) => {
            state.loading_matches = false;
            state.dialog = Some(Dialog::error("Could not load matches", message.clone()));
            Ok((true, vec![]))
        }

        Event::PermissionResult(status) => {
            let Some(controller) = state.scan.as_mut() else {
                return Ok((false, vec![]));
            };
            controller.permission_result(*status);
            if !status.is_granted() {
                state.dialog = Some(if status.can_ask_again() {
                    Dialog::confirm_permission_retry()
                } else {
                    Dialog::permission_blocked()
                });
            }
            Ok((true, vec![]))
        }

        Event::VerdictResolved(verdict) => {
            state.dialog = Some(Dialog::for_verdict(verdict));
            Ok((true, vec![]))
        }

        Event::StatsLoaded { match_id, outcome } => {
            // A stale result for a panel the operator already closed or
            // switched away from is dropped.
            if let Some(panel) = state.stats.as_mut() {
                if panel.match_id == *match_id {
                    panel.outcome = Some(outcome.clone());
                    return Ok((true, vec![]));
                }
            }
            Ok((false, vec![]))
        }
    }
}

/// Resolves the open dialog and applies its follow-up.
fn answer_dialog(state: &mut AppState, confirmed: bool) -> (bool, Vec<Action>) {
    let Some(dialog) = state.dialog.take() else {
        return (false, vec![]);
    };

    tracing::debug!(follow_up = ?dialog.follow_up, confirmed, "dialog answered");

    match (dialog.follow_up, confirmed) {
        (FollowUp::Logout, true) => {
            state.clear_session();
            (true, vec![Action::ClearSession])
        }
        (FollowUp::RequestPermission, true) => {
            if let Some(controller) = state.scan.as_mut() {
                controller.begin();
            }
            (true, vec![Action::RequestPermission])
        }
        (FollowUp::RequestPermission, false) => {
            // Declining the retry means the scan screen is unusable.
            state.close_scan();
            (true, vec![])
        }
        // The verdict dialog re-arms on either answer; there is nothing to
        // cancel once the verdict exists.
        (FollowUp::AcknowledgeVerdict, _) => {
            if let Some(controller) = state.scan.as_mut() {
                controller.acknowledge();
            }
            (true, vec![])
        }
        _ => (true, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchStatus, User};
    use crate::scan::ScanPhase;
    use crate::ui::theme::Theme;

    fn session() -> Session {
        Session::new(
            "abc".to_string(),
            User {
                id: "u1".to_string(),
                email: "jean@example.org".to_string(),
                name: "Jean".to_string(),
            },
        )
    }

    fn upcoming_match(id: &str) -> Match {
        Match {
            id: id.to_string(),
            home_team: Some("Club Africain".to_string()),
            away_team: Some("Esperance".to_string()),
            date: Some("2026-09-01".to_string()),
            time: Some("20:00".to_string()),
            stadium: None,
            status: MatchStatus::Upcoming,
            activation_timestamp: None,
        }
    }

    fn logged_in_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.establish_session(session());
        state.set_matches(vec![upcoming_match("42")]);
        state
    }

    #[test]
    fn submit_login_emits_the_login_action_once() {
        let mut state = AppState::new(Theme::default());
        state.login.email = "jean@example.org".to_string();
        state.login.password = "secret".to_string();

        let (_, actions) = handle_event(&mut state, &Event::SubmitLogin).unwrap();
        assert_eq!(
            actions,
            vec![Action::Login {
                email: "jean@example.org".to_string(),
                password: "secret".to_string(),
            }]
        );
        assert!(state.login.busy);

        // Busy form ignores a second submit.
        let (_, actions) = handle_event(&mut state, &Event::SubmitLogin).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn login_success_persists_and_loads_matches() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) =
            handle_event(&mut state, &Event::LoginSucceeded(session())).unwrap();
        assert_eq!(actions, vec![Action::SaveSession, Action::LoadMatches]);
        assert_eq!(state.screen, Screen::Matches);
        assert!(state.loading_matches);
    }

    #[test]
    fn login_failure_surfaces_inline_and_unblocks_the_form() {
        let mut state = AppState::new(Theme::default());
        state.login.busy = true;
        handle_event(&mut state, &Event::LoginFailed("Invalid credentials".to_string()))
            .unwrap();
        assert!(!state.login.busy);
        assert_eq!(state.login.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn selecting_a_match_opens_scan_and_requests_permission() {
        let mut state = logged_in_state();
        let (_, actions) = handle_event(&mut state, &Event::SelectMatch).unwrap();
        assert_eq!(actions, vec![Action::RequestPermission]);
        assert_eq!(state.screen, Screen::Scan);

        let controller = state.scan.as_ref().expect("controller");
        assert_eq!(controller.phase(), ScanPhase::AwaitingPermission);
        assert_eq!(controller.context().match_id, "42");
        assert_eq!(controller.context().operator, "Jean");
    }

    #[test]
    fn decode_produces_exactly_one_submit_action() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::SelectMatch).unwrap();
        handle_event(
            &mut state,
            &Event::PermissionResult(PermissionStatus::Granted),
        )
        .unwrap();

        let (_, actions) =
            handle_event(&mut state, &Event::Decode(DecodeEvent::qr("QR123"))).unwrap();
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::SubmitScan { .. }));

        // The latch discards everything after the first decode.
        let (_, actions) =
            handle_event(&mut state, &Event::Decode(DecodeEvent::qr("QR124"))).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn verdict_dialog_blocks_input_until_answered_then_re_arms() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::SelectMatch).unwrap();
        handle_event(
            &mut state,
            &Event::PermissionResult(PermissionStatus::Granted),
        )
        .unwrap();
        handle_event(&mut state, &Event::Decode(DecodeEvent::qr("QR123"))).unwrap();

        handle_event(
            &mut state,
            &Event::VerdictResolved(ScanVerdict::Rejected {
                message: "expired".to_string(),
            }),
        )
        .unwrap();
        assert!(state.dialog.is_some());

        // Keystrokes other than the dialog answer are swallowed.
        let (redraw, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());

        // Note: the runtime resolved the controller before emitting the event.
        state.scan.as_mut().unwrap().resolve(ScanVerdict::Rejected {
            message: "expired".to_string(),
        });
        handle_event(&mut state, &Event::DialogConfirm).unwrap();
        assert!(state.dialog.is_none());
        assert_eq!(state.scan.as_ref().unwrap().phase(), ScanPhase::Armed);
    }

    #[test]
    fn denied_permission_offers_a_retry() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::SelectMatch).unwrap();
        handle_event(
            &mut state,
            &Event::PermissionResult(PermissionStatus::Denied),
        )
        .unwrap();

        let dialog = state.dialog.as_ref().expect("dialog");
        assert_eq!(dialog.follow_up, FollowUp::RequestPermission);

        let (_, actions) = handle_event(&mut state, &Event::DialogConfirm).unwrap();
        assert_eq!(actions, vec![Action::RequestPermission]);
        assert_eq!(
            state.scan.as_ref().unwrap().phase(),
            ScanPhase::AwaitingPermission
        );
    }

    #[test]
    fn declining_the_permission_retry_closes_the_scan_screen() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::SelectMatch).unwrap();
        handle_event(
            &mut state,
            &Event::PermissionResult(PermissionStatus::Denied),
        )
        .unwrap();
        handle_event(&mut state, &Event::DialogCancel).unwrap();

        assert!(state.scan.is_none());
        assert_eq!(state.screen, Screen::Matches);
    }

    #[test]
    fn logout_requires_confirmation_and_clears_everything() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::LogoutRequested).unwrap();
        assert!(state.dialog.is_some());
        assert!(state.session.is_some());

        let (_, actions) = handle_event(&mut state, &Event::DialogConfirm).unwrap();
        assert_eq!(actions, vec![Action::ClearSession]);
        assert!(state.session.is_none());
        assert_eq!(state.screen, Screen::Login);
    }

    #[test]
    fn cancelled_logout_changes_nothing() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::LogoutRequested).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DialogCancel).unwrap();
        assert!(actions.is_empty());
        assert!(state.session.is_some());
        assert_eq!(state.screen, Screen::Matches);
    }

    #[test]
    fn stale_stats_results_are_dropped() {
        let mut state = logged_in_state();
        handle_event(&mut state, &Event::OpenStats).unwrap();
        assert!(state.stats.is_some());

        let (redraw, _) = handle_event(
            &mut state,
            &Event::StatsLoaded {
                match_id: "99".to_string(),
                outcome: StatsOutcome::Unavailable {
                    message: "gone".to_string(),
                },
            },
        )
        .unwrap();
        assert!(!redraw);
        assert!(state.stats.as_ref().unwrap().outcome.is_none());

        handle_event(
            &mut state,
            &Event::StatsLoaded {
                match_id: "42".to_string(),
                outcome: StatsOutcome::Unavailable {
                    message: "gone".to_string(),
                },
            },
        )
        .unwrap();
        assert!(state.stats.as_ref().unwrap().outcome.is_some());
    }

    #[test]
    fn restored_session_skips_login() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) =
            handle_event(&mut state, &Event::SessionRestored(Some(session()))).unwrap();
        assert_eq!(actions, vec![Action::LoadMatches]);
        assert_eq!(state.screen, Screen::Matches);

        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::SessionRestored(None)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.screen, Screen::Login);
    }
}
