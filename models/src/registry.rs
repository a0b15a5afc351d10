//! Hardware-model registry for automatic front-end discovery.
//!
//! Each model self-registers via [`inventory::submit!`] with a
//! [`ModelEntry`] containing its CLI name, a one-line description and a
//! factory function. The front-end discovers available models at runtime
//! without any central list.

use vgasim_core::model::HardwareModel;

/// Describes a front-end-selectable hardware model.
pub struct ModelEntry {
    /// CLI name used to select this model (e.g., "vga_test_pattern").
    pub name: &'static str,
    /// Shown by `--list-models`.
    pub description: &'static str,
    /// Factory: construct a fresh model instance. Called once per session.
    pub create: fn() -> Box<dyn HardwareModel>,
}

impl ModelEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        create: fn() -> Box<dyn HardwareModel>,
    ) -> Self {
        Self {
            name,
            description,
            create,
        }
    }
}

inventory::collect!(ModelEntry);

/// Return all registered models, sorted by name.
pub fn all() -> Vec<&'static ModelEntry> {
    let mut entries: Vec<_> = inventory::iter::<ModelEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a model by its CLI name.
pub fn find(name: &str) -> Option<&'static ModelEntry> {
    inventory::iter::<ModelEntry>
        .into_iter()
        .find(|e| e.name == name)
}
