//! Application layer coordinating state, events, and actions.
//!
//! Sits between the terminal runtime (main.rs) and the domain, gateway, and
//! session layers. The architecture is a unidirectional data flow:
//!
//! ```text
//! Key press → Event → handle_event → state mutation → Actions → side effects
//!                 ↑                                                  ↓
//!                 └───────────────── action results ────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`dialog`]: the modal dialog model with typed follow-ups
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: screen, tab, and input mode types
//! - [`state`]: the central state container and view model computation

pub mod actions;
pub mod dialog;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use dialog::{Dialog, DialogKind, FollowUp};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, LoginField, MatchTab, Screen, SearchFocus};
pub use state::{AppState, LoginForm, StatsPanel};
