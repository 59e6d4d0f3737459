//! View definitions for the ticketwatch TUI.

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Live chart, controls, and log tail.
    #[default]
    Dashboard,
    /// One-shot pool configuration form.
    Configure,
}

impl View {
    /// Human-readable title for the header.
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Configure => "Configure Pool",
        }
    }

    /// The next view in the Tab cycle.
    pub fn next(&self) -> View {
        match self {
            View::Dashboard => View::Configure,
            View::Configure => View::Dashboard,
        }
    }

    /// The previous view in the Tab cycle.
    pub fn prev(&self) -> View {
        // Two views, so the cycle is its own inverse
        self.next()
    }
}
