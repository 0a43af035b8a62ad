//! User interface rendering layer with component-based architecture.
//!
//! The rendering model is declarative:
//!
//! ```text
//! AppState → compute_viewmodel → MatchesViewModel → render → terminal frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: view model types for the matches screen
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: composable component renderers
//! - [`theme`]: color scheme definitions and resolution

pub mod components;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FooterInfo, HeaderInfo, MatchRow, MatchesViewModel, SearchBarInfo};
