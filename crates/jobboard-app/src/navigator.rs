//! In-memory history stack.

use jobboard_core::Route;

/// How a navigation lands in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Push,
    /// Overwrite the current entry so back cannot return to it.
    Replace,
}

/// Current location plus the entries behind it.
#[derive(Debug, Default, Clone)]
pub struct Navigator {
    entries: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current location, if anything was visited yet.
    pub fn current(&self) -> Option<&Route> {
        self.entries.last()
    }

    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    pub fn replace(&mut self, route: Route) {
        match self.entries.last_mut() {
            Some(current) => *current = route,
            None => self.entries.push(route),
        }
    }

    pub fn commit(&mut self, route: Route, mode: NavMode) {
        match mode {
            NavMode::Push => self.push(route),
            NavMode::Replace => self.replace(route),
        }
    }

    /// Drops the current entry and returns the one now on top.
    ///
    /// The first entry is never dropped; `None` means there is nowhere to go.
    pub fn back(&mut self) -> Option<Route> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.entries.last().cloned()
    }

    pub fn entries(&self) -> &[Route] {
        &self.entries
    }
}
