//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `panels`: Condition list, budget gauge and meal table

pub mod input;
pub mod panels;
pub mod render;
pub mod styles;
