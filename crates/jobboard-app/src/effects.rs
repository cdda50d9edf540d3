//! Navigation effects.
//!
//! Views never touch history themselves. They return effects and the app
//! executes them, running the target route's guard first.

use jobboard_core::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEffect {
    /// Push a new history entry.
    Navigate(Route),
    /// Replace the current history entry.
    Replace(Route),
}
