//! Memoized rich-console capability probe
//!
//! The probe runs at most once per [`CapabilityState`]. The process entry
//! point owns a single state and lends it to the presenter; tests that
//! toggle availability call [`CapabilityState::reset`].

use std::cell::Cell;

use crate::ui::RichConsole;

#[derive(Debug, Default)]
pub struct CapabilityState {
    rich: Cell<Option<bool>>,
}

impl CapabilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the rich console can be used, probing it on first call
    ///
    /// A probe that errors counts as "unavailable".
    pub fn rich_available(&self, console: &dyn RichConsole) -> bool {
        if let Some(known) = self.rich.get() {
            return known;
        }
        let available = match console.is_available() {
            Ok(available) => available,
            Err(e) => {
                log::debug!("Rich console probe failed: {e:#}");
                false
            }
        };
        self.rich.set(Some(available));
        available
    }

    /// Forget the memoized answer so the next call probes again
    pub fn reset(&self) {
        self.rich.set(None);
    }
}
