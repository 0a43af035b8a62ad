//! Gatescan terminal runtime.
//!
//! Owns everything the library must not: the terminal itself, the key-to-
//! event mapping, the wedge scanner input buffer, and the execution of
//! actions against the HTTP gateway and the session store. All state
//! transitions go through [`gatescan::handle_event`]; this file only maps
//! inputs in and carries action results back.
//!
//! ## Usage
//!
//! ```bash
//! # Default backend
//! gatescan
//!
//! # Staging backend with verbose logs
//! gatescan --base-url https://staging.example.org/api --log-level gatescan=debug
//! ```

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use gatescan::app::{handle_event, Action, AppState, Event, InputMode, Screen, SearchFocus};
use gatescan::domain::error::{GatescanError, Result};
use gatescan::infrastructure::paths;
use gatescan::observability::init_tracing;
use gatescan::scan::{DecodeEvent, PermissionGate, ScanPhase, TerminalGate};
use gatescan::session::{JsonSessionStore, SessionStore};
use gatescan::{initialize, ApiClient, Config};

/// Stadium access control operator console
#[derive(Parser, Debug)]
#[command(name = "gatescan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// API base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Path to the config file
    #[arg(long)]
    config: Option<String>,

    /// Log filter directive, e.g. "gatescan=debug" (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .map_or_else(paths::config_file, Into::into);
    let mut config = Config::load(config_path)?;
    if args.base_url.is_some() {
        config.base_url = args.base_url.clone();
    }
    if args.log_level.is_some() {
        config.log_level = args.log_level.clone();
    }

    init_tracing(&config);
    tracing::info!(base_url = %config.base_url(), "starting gatescan");

    let client = ApiClient::new(config.base_url())?;
    let mut store = JsonSessionStore::new(paths::session_file())?;
    let mut state = initialize(&config);

    // Terminal teardown must also run on panic or the shell is left raw.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut state, &client, &mut store).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        eprintln!("Error: {e}");
    }

    result
}

/// Main application loop.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    client: &ApiClient,
    store: &mut JsonSessionStore,
) -> Result<()> {
    let mut gate = TerminalGate::new();
    // Wedge scanners type the payload and terminate with Enter; the buffer
    // accumulates here, outside application state.
    let mut scan_input = String::new();

    // Restore a persisted session before the first frame.
    let restored = match store.load() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "failed to restore session, starting logged out");
            None
        }
    };
    if dispatch(
        state,
        Event::SessionRestored(restored),
        client,
        store,
        &mut gate,
        &mut scan_input,
    )
    .await?
    {
        return Ok(());
    }

    loop {
        terminal.draw(|frame| gatescan::ui::render(frame, state, &scan_input))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Some(app_event) = map_key(state, key.code, key.modifiers, &mut scan_input) else {
            continue;
        };

        if dispatch(state, app_event, client, store, &mut gate, &mut scan_input).await? {
            return Ok(());
        }
    }
}

/// Feeds one event through the handler, executing every resulting action and
/// any follow-up events, until the queue drains. Returns `true` on quit.
async fn dispatch(
    state: &mut AppState,
    event: Event,
    client: &ApiClient,
    store: &mut JsonSessionStore,
    gate: &mut TerminalGate,
    scan_input: &mut String,
) -> Result<bool> {
    let mut queue = VecDeque::from([event]);

    while let Some(event) = queue.pop_front() {
        let (_redraw, actions) = handle_event(state, &event)?;

        for action in actions {
            if matches!(action, Action::Quit) {
                return Ok(true);
            }
            if let Some(follow_up) =
                execute_action(action, state, client, store, gate, scan_input).await?
            {
                queue.push_back(follow_up);
            }
        }
    }

    Ok(false)
}

/// Executes one side effect and maps its result back to an event.
async fn execute_action(
    action: Action,
    state: &mut AppState,
    client: &ApiClient,
    store: &mut JsonSessionStore,
    gate: &mut TerminalGate,
    scan_input: &mut String,
) -> Result<Option<Event>> {
    match action {
        Action::Quit => Ok(None),

        Action::Login { email, password } => match client.login(&email, &password).await {
            Ok(session) => Ok(Some(Event::LoginSucceeded(session))),
            Err(GatescanError::Validation(message)) => Ok(Some(Event::LoginFailed(message))),
            Err(e) => {
                tracing::warn!(error = %e, "login exchange failed");
                Ok(Some(Event::LoginFailed(
                    "Could not reach the server. Check your connection".to_string(),
                )))
            }
        },

        Action::LoadMatches => {
            let Some(token) = state.token().map(str::to_string) else {
                return Ok(None);
            };
            match client.list_matches(&token).await {
                Ok(matches) => Ok(Some(Event::MatchesLoaded(matches))),
                Err(GatescanError::Validation(message)) => {
                    Ok(Some(Event::MatchesFailed(message)))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "match list fetch failed");
                    Ok(Some(Event::MatchesFailed(
                        "Could not load matches. Check your connection".to_string(),
                    )))
                }
            }
        }

        Action::FetchStats { match_id } => {
            let Some(token) = state.token().map(str::to_string) else {
                return Ok(None);
            };
            let outcome = client.fetch_match_stats(&match_id, &token).await;
            Ok(Some(Event::StatsLoaded { match_id, outcome }))
        }

        Action::RequestPermission => Ok(Some(Event::PermissionResult(gate.request()))),

        Action::SubmitScan { attempt } => {
            let token = state.token().map(str::to_string);
            let Some(controller) = state.scan.as_mut() else {
                return Ok(None);
            };
            let verdict = controller
                .submit_scan(client, &attempt, token.as_deref())
                .await;
            scan_input.clear();
            Ok(Some(Event::VerdictResolved(verdict)))
        }

        Action::SaveSession => {
            if let Some(session) = state.session.clone() {
                if let Err(e) = store.save(&session) {
                    tracing::warn!(error = %e, "failed to persist session");
                }
            }
            Ok(None)
        }

        Action::ClearSession => {
            if let Err(e) = store.clear() {
                tracing::warn!(error = %e, "failed to clear persisted session");
            }
            Ok(None)
        }
    }
}

/// Maps a key press to a semantic event for the current screen and mode.
///
/// Returns `None` when the key only feeds the wedge input buffer or means
/// nothing in the current context.
fn map_key(
    state: &AppState,
    code: KeyCode,
    modifiers: KeyModifiers,
    scan_input: &mut String,
) -> Option<Event> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }

    // An open dialog owns the keyboard.
    if state.dialog.is_some() {
        return match code {
            KeyCode::Enter | KeyCode::Char('y') => Some(Event::DialogConfirm),
            KeyCode::Esc | KeyCode::Char('n') => Some(Event::DialogCancel),
            _ => None,
        };
    }

    match state.screen {
        Screen::Login => match code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => Some(Event::FocusNextField),
            KeyCode::Enter => Some(Event::SubmitLogin),
            KeyCode::Esc => Some(Event::Escape),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Char(c)),
            _ => None,
        },

        Screen::Matches => match state.input_mode {
            InputMode::Normal => match code {
                KeyCode::Char('j') | KeyCode::Down => Some(Event::KeyDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Event::KeyUp),
                KeyCode::Enter => Some(Event::SelectMatch),
                KeyCode::Tab => Some(Event::ToggleTab),
                KeyCode::Char('/') => Some(Event::SearchMode),
                KeyCode::Char('i') => Some(Event::OpenStats),
                KeyCode::Char('r') => Some(Event::RefreshMatches),
                KeyCode::Char('L') => Some(Event::LogoutRequested),
                KeyCode::Char('q') => Some(Event::Quit),
                KeyCode::Esc => Some(Event::Escape),
                _ => None,
            },
            InputMode::Search(SearchFocus::Typing) => match code {
                KeyCode::Esc => Some(Event::ExitSearch),
                KeyCode::Enter => Some(Event::FocusResults),
                KeyCode::Down => Some(Event::KeyDown),
                KeyCode::Up => Some(Event::KeyUp),
                KeyCode::Backspace => Some(Event::Backspace),
                KeyCode::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::Search(SearchFocus::Navigating) => match code {
                KeyCode::Esc => Some(Event::ExitSearch),
                KeyCode::Char('/') => Some(Event::FocusSearchBar),
                KeyCode::Char('j') | KeyCode::Down => Some(Event::KeyDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Event::KeyUp),
                KeyCode::Enter => Some(Event::SelectMatch),
                KeyCode::Char('q') => Some(Event::Quit),
                _ => None,
            },
        },

        Screen::Scan => {
            let armed = state
                .scan
                .as_ref()
                .is_some_and(|c| c.phase() == ScanPhase::Armed);

            match code {
                KeyCode::Esc => {
                    scan_input.clear();
                    Some(Event::CloseScan)
                }
                KeyCode::Enter if armed && !scan_input.is_empty() => {
                    let payload = std::mem::take(scan_input);
                    Some(Event::Decode(DecodeEvent::qr(payload)))
                }
                KeyCode::Backspace if armed => {
                    scan_input.pop();
                    None
                }
                KeyCode::Char(c) if armed => {
                    scan_input.push(c);
                    None
                }
                _ => None,
            }
        }
    }
}
