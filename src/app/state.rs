//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for all transient UI state:
//! the active screen, the operator session, the match list with its tab and
//! search filters, the statistics panel, the modal dialog slot, and the scan
//! controller for an open scan screen.
//!
//! # Architecture
//!
//! Core data (session, master match list) is kept separate from derived
//! state (filtered matches, selection index) so filters can be recomputed
//! after any mutation without drift. The matches table view model is
//! computed on demand from a state snapshot plus terminal dimensions.

use fuzzy_matcher::skim::SkimMatcherV2;

use super::dialog::Dialog;
use super::modes::{InputMode, LoginField, MatchTab, Screen, SearchFocus};
use crate::domain::stats::StatsOutcome;
use crate::domain::{Match, Session};
use crate::scan::{ScanContext, ScanController};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, HeaderInfo, MatchRow, MatchesViewModel, SearchBarInfo};

/// Credential entry form on the login screen.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Set while a login exchange is in flight; blocks resubmission.
    pub busy: bool,
    /// Last failure message, rendered inline under the form.
    pub error: Option<String>,
}

impl LoginForm {
    /// Appends a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Removes the last character from the focused field.
    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Whether the form holds something submittable.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.busy && !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Statistics panel state for the matches screen.
///
/// `outcome` is `None` while the fetch is in flight. Unavailability is a
/// rendered value, never an error path.
#[derive(Debug, Clone)]
pub struct StatsPanel {
    pub match_id: String,
    pub match_title: String,
    pub outcome: Option<StatsOutcome>,
}

/// Central application state container.
///
/// Mutated only by the event handler; the runtime reads it to render and to
/// execute actions.
#[derive(Debug)]
pub struct AppState {
    /// Screen currently shown.
    pub screen: Screen,

    /// Authenticated operator session, `None` on the login screen.
    pub session: Option<Session>,

    /// Login form state.
    pub login: LoginForm,

    /// Master match list as loaded from the gateway.
    pub matches: Vec<Match>,

    /// Matches passing the current tab and search filters.
    ///
    /// Recomputed by `apply_search_filter()` after every relevant mutation.
    pub filtered_matches: Vec<Match>,

    /// Zero-based selection within `filtered_matches`; wraps on navigation.
    pub selected_index: usize,

    /// Active tab on the matches screen.
    pub tab: MatchTab,

    /// Input handling mode on the matches screen.
    pub input_mode: InputMode,

    /// Current search query, tokenized for fuzzy filtering.
    pub search_query: String,

    /// Set while a match list fetch is in flight.
    pub loading_matches: bool,

    /// Statistics panel, shown beside the match table when open.
    pub stats: Option<StatsPanel>,

    /// Modal dialog awaiting an answer; blocks all other input.
    pub dialog: Option<Dialog>,

    /// Scan workflow controller while the scan screen is open.
    pub scan: Option<ScanController>,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the initial state: login screen, nothing loaded.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            screen: Screen::Login,
            session: None,
            login: LoginForm::default(),
            matches: vec![],
            filtered_matches: vec![],
            selected_index: 0,
            tab: MatchTab::Upcoming,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            loading_matches: false,
            stats: None,
            dialog: None,
            scan: None,
            theme,
        }
    }

    /// Installs a session and moves to the matches screen.
    ///
    /// Clears the password from the form the moment it is no longer needed.
    pub fn establish_session(&mut self, session: Session) {
        tracing::info!(operator = %session.operator(), "session established");
        self.session = Some(session);
        self.login = LoginForm::default();
        self.screen = Screen::Matches;
    }

    /// Discards the session and every piece of state derived from it.
    ///
    /// Token and user identity always leave together; after this the state
    /// is indistinguishable from a fresh start on the same theme.
    pub fn clear_session(&mut self) {
        tracing::info!("session cleared");
        self.session = None;
        self.login = LoginForm::default();
        self.matches.clear();
        self.filtered_matches.clear();
        self.selected_index = 0;
        self.tab = MatchTab::Upcoming;
        self.input_mode = InputMode::Normal;
        self.search_query.clear();
        self.loading_matches = false;
        self.stats = None;
        self.scan = None;
        self.screen = Screen::Login;
    }

    /// Bearer token of the current session, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Replaces the master match list and refilters.
    pub fn set_matches(&mut self, matches: Vec<Match>) {
        self.matches = matches;
        self.loading_matches = false;
        self.apply_search_filter();
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_matches.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_matches.len();
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_matches.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_matches.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Currently selected match, if the filtered list is non-empty.
    #[must_use]
    pub fn selected_match(&self) -> Option<&Match> {
        self.filtered_matches.get(self.selected_index)
    }

    /// Opens the scan screen for one match.
    pub fn open_scan(&mut self, context: ScanContext) {
        let mut controller = ScanController::new(context);
        controller.begin();
        self.scan = Some(controller);
        self.screen = Screen::Scan;
    }

    /// Closes the scan screen and returns to the match list.
    pub fn close_scan(&mut self) {
        if let Some(controller) = self.scan.as_mut() {
            controller.stop();
        }
        self.scan = None;
        self.screen = Screen::Matches;
    }

    /// Applies the tab filter and the fuzzy search query.
    ///
    /// Tab filtering comes first, then every whitespace-separated query
    /// token must fuzzy-match the combined title/stadium haystack. The
    /// selection index is clamped to the new bounds.
    pub fn apply_search_filter(&mut self) {
        use fuzzy_matcher::FuzzyMatcher;

        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_matches = self.matches.len(),
            query_len = self.search_query.len(),
            tab = ?self.tab
        )
        .entered();

        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let matcher = if tokens.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        self.filtered_matches = self
            .matches
            .iter()
            .filter(|m| {
                let passes_tab = match self.tab {
                    MatchTab::Upcoming => m.is_upcoming(),
                    MatchTab::Finished => m.is_finished(),
                };
                if !passes_tab {
                    return false;
                }

                matcher.as_ref().map_or(true, |fm| {
                    let haystack = format!(
                        "{} {}",
                        m.title().to_lowercase(),
                        m.stadium.as_deref().unwrap_or("").to_lowercase()
                    );
                    tokens
                        .iter()
                        .all(|token| fm.fuzzy_match(&haystack, token).is_some())
                })
            })
            .cloned()
            .collect();

        if self.filtered_matches.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_matches.len() - 1);
        }

        tracing::debug!(
            filtered_count = self.filtered_matches.len(),
            "search filter applied"
        );
    }

    /// Computes the matches table view model for the given terminal size.
    ///
    /// Handles windowing around the selection, fuzzy match highlighting
    /// while a query is active, and the empty state message.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize) -> MatchesViewModel {
        if self.filtered_matches.is_empty() {
            return MatchesViewModel {
                rows: vec![],
                selected_index: 0,
                header: self.compute_header(),
                footer: self.compute_footer(),
                search_bar: self.compute_search_bar(),
                empty_state: Some(self.empty_state_message()),
            };
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_matches.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.filtered_matches.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = if self.search_query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let table_rows: Vec<MatchRow> = self.filtered_matches[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, m)| {
                let absolute_idx = visible_start + relative_idx;
                MatchRow {
                    title: m.title(),
                    schedule: m.schedule(),
                    stadium: m.stadium.clone().unwrap_or_default(),
                    status_label: m.status.label().to_string(),
                    is_selected: absolute_idx == self.selected_index,
                    highlight_ranges: matcher
                        .as_ref()
                        .map_or_else(Vec::new, |fm| self.compute_highlight_ranges(&m.title(), fm)),
                }
            })
            .collect();

        MatchesViewModel {
            rows: table_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(),
            empty_state: None,
        }
    }

    /// Coalesces fuzzy match indices into contiguous `(start, end)` ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search_query) else {
            return vec![];
        };

        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;

        for &idx in &indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }

        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }

        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let tab_name = match self.tab {
            MatchTab::Upcoming => "Upcoming",
            MatchTab::Finished => "Finished",
        };
        HeaderInfo {
            title: format!(" {tab_name} ({}) ", self.filtered_matches.len()),
            operator: self
                .session
                .as_ref()
                .map(|s| s.operator().to_string())
                .unwrap_or_default(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Enter: results  Type to filter".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: scan".to_string()
            }
            InputMode::Normal => {
                "j/k: navigate  Tab: finished/upcoming  /: search  Enter: scan  i: stats  L: logout  q: quit"
                    .to_string()
            }
        };
        FooterInfo { keybindings }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                focused: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn empty_state_message(&self) -> String {
        if self.loading_matches {
            "Loading matches...".to_string()
        } else if !self.search_query.is_empty() {
            "No matches for this query".to_string()
        } else {
            match self.tab {
                MatchTab::Upcoming => "No upcoming matches".to_string(),
                MatchTab::Finished => "No finished matches".to_string(),
            }
        }
    }

    /// Rows left for the table after header, footer, and search chrome.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(6),
            InputMode::Search(_) => total_rows.saturating_sub(9),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchStatus;

    fn match_with(id: &str, home: &str, away: &str, status: MatchStatus) -> Match {
        Match {
            id: id.to_string(),
            home_team: Some(home.to_string()),
            away_team: Some(away.to_string()),
            date: Some("2026-09-01".to_string()),
            time: Some("20:00".to_string()),
            stadium: Some("Stade Olympique".to_string()),
            status,
            activation_timestamp: None,
        }
    }

    fn populated_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.set_matches(vec![
            match_with("1", "Club Africain", "Esperance", MatchStatus::Upcoming),
            match_with("2", "Etoile", "Sfaxien", MatchStatus::Active),
            match_with("3", "Monastir", "Bizertin", MatchStatus::Finished),
        ]);
        state
    }

    #[test]
    fn upcoming_tab_includes_active_matches() {
        let state = populated_state();
        let ids: Vec<&str> = state.filtered_matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn finished_tab_shows_only_finished() {
        let mut state = populated_state();
        state.tab = MatchTab::Finished;
        state.apply_search_filter();
        let ids: Vec<&str> = state.filtered_matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["3"]);
    }

    #[test]
    fn fuzzy_query_narrows_by_title() {
        let mut state = populated_state();
        state.search_query = "esper".to_string();
        state.apply_search_filter();
        assert_eq!(state.filtered_matches.len(), 1);
        assert_eq!(state.filtered_matches[0].id, "1");
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = populated_state();
        assert_eq!(state.selected_index, 0);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_clamps_when_filter_shrinks_the_list() {
        let mut state = populated_state();
        state.move_selection_down();
        assert_eq!(state.selected_index, 1);
        state.search_query = "africain".to_string();
        state.apply_search_filter();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn clearing_session_resets_everything() {
        let mut state = populated_state();
        state.establish_session(Session::new(
            "abc".to_string(),
            crate::domain::User {
                id: "u1".to_string(),
                email: "jean@example.org".to_string(),
                name: "Jean".to_string(),
            },
        ));
        state.search_query = "esper".to_string();
        state.clear_session();

        assert!(state.session.is_none());
        assert!(state.matches.is_empty());
        assert!(state.search_query.is_empty());
        assert_eq!(state.screen, Screen::Login);
    }

    #[test]
    fn empty_state_message_reflects_loading() {
        let mut state = AppState::new(Theme::default());
        state.loading_matches = true;
        let vm = state.compute_viewmodel(24);
        assert_eq!(vm.empty_state.as_deref(), Some("Loading matches..."));
    }
}
