//! Composable UI component renderers.
//!
//! Each component draws one region of the frame from a view model or state
//! snapshot. Components never mutate state.

pub mod dialog;
pub mod empty;
pub mod footer;
pub mod header;
pub mod login;
pub mod match_table;
pub mod scanner;
pub mod search;
pub mod stats;
