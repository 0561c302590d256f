//! Treemap Viewer (tmv)
//!
//! Slice-and-dice treemap layout with hover/selection state, and a terminal
//! front end that draws it.
//!
//! The layout, model and state modules are a pure core; `view` is the
//! impure shell that owns the terminal.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod output;
pub mod source;
pub mod state;
pub mod view;
