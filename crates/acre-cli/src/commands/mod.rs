//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status, modules) and shared utilities (open_db)
//! - `events` - Tracking event commands (list, add, remove)
//! - `predict` - Prediction command
//! - `transfer` - Export/import commands

pub mod core;
pub mod events;
pub mod predict;
pub mod transfer;

// Re-export command functions for main.rs
pub use self::core::*;
pub use events::*;
pub use predict::*;
pub use transfer::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
