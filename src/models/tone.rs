//! Visual variants shared by tiles, badges and log rows.
//!
//! Renderers map each variant to their own palette.

use serde::Serialize;

/// Colour family a renderer should use for a piece of UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Brand colour, for neutral headline figures
    Primary,
    /// Something was added or is healthy
    Success,
    /// Informational change
    Info,
    /// Needs attention soon
    Warning,
    /// Removed, expired or failing
    Error,
    /// No particular emphasis
    Neutral,
}
