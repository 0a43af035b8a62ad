//! View model types representing renderable UI state.
//!
//! The matches screen renders from a [`MatchesViewModel`] computed by the
//! state layer rather than from raw state, so windowing, highlight ranges,
//! and chrome text are decided once and the components stay dumb.

/// One visible row of the match table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    /// "Home vs Away" title, with `?` placeholders for unknown teams.
    pub title: String,
    /// "date at time" schedule line.
    pub schedule: String,
    pub stadium: String,
    pub status_label: String,
    pub is_selected: bool,
    /// Byte ranges of `title` to highlight for the active fuzzy query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Tab name with the filtered count, e.g. " Upcoming (3) ".
    pub title: String,
    /// Operator display name shown on the right.
    pub operator: String,
}

/// Footer keybinding hints for the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Search bar state while search mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether the input field (rather than the results) has focus.
    pub focused: bool,
}

/// Everything the matches screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchesViewModel {
    /// Visible window of the filtered match list.
    pub rows: Vec<MatchRow>,
    /// Selection index relative to `rows`.
    pub selected_index: usize,
    pub header: HeaderInfo,
    pub footer: FooterInfo,
    pub search_bar: Option<SearchBarInfo>,
    /// Message to show instead of the table when no rows are visible.
    pub empty_state: Option<String>,
}
