//! Program registry for front-end discovery.
//!
//! Each diagnostic self-registers via [`inventory::submit!`] with a
//! [`ProgramEntry`] containing its CLI name, window title, and a factory
//! function. The front-end discovers available programs at runtime without
//! any central list.

use keylight_core::core::handheld::Program;

/// Describes a runnable diagnostic program.
pub struct ProgramEntry {
    /// CLI name used to select this program (e.g., "keytest").
    pub name: &'static str,
    /// Window title shown by the front-end.
    pub title: &'static str,
    /// Factory: construct the program in its initial state.
    pub create: fn() -> Box<dyn Program>,
}

impl ProgramEntry {
    pub const fn new(
        name: &'static str,
        title: &'static str,
        create: fn() -> Box<dyn Program>,
    ) -> Self {
        Self {
            name,
            title,
            create,
        }
    }
}

inventory::collect!(ProgramEntry);

/// Return all registered programs, sorted by name.
pub fn all() -> Vec<&'static ProgramEntry> {
    let mut entries: Vec<_> = inventory::iter::<ProgramEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a program by its CLI name.
pub fn find(name: &str) -> Option<&'static ProgramEntry> {
    inventory::iter::<ProgramEntry>
        .into_iter()
        .find(|e| e.name == name)
}
