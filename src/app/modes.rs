//! Screen and input mode state types.
//!
//! These enums drive keybinding interpretation and layout: which screen is
//! visible, which match tab is active, which login field has focus, and
//! whether keystrokes go to navigation or to the search query.

/// Top-level screen the console is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Credential entry. The only screen reachable without a session.
    Login,
    /// Match list with search, tabs, and the statistics panel.
    Matches,
    /// Scan workflow for one selected match.
    Scan,
}

/// Tab filter on the matches screen.
///
/// Active matches count as upcoming so an in-progress match never drops off
/// the operator's working list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTab {
    /// Upcoming and currently active matches.
    Upcoming,
    /// Finished matches.
    Finished,
}

impl MatchTab {
    /// The other tab, for toggle keybindings.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Upcoming => Self::Finished,
            Self::Finished => Self::Upcoming,
        }
    }
}

/// Which login form field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Email,
        }
    }
}

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes extend the query.
    Typing,
    /// Keystrokes navigate the filtered results.
    Navigating,
}

/// Input handling mode on the matches screen.
///
/// Controls which keybindings are active and whether the search bar is
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,
    /// Active search with a [`SearchFocus`] variant.
    Search(SearchFocus),
}
