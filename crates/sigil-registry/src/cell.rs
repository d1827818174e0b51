// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build-once holder for a process-wide registry.
//!
//! A `RegistryCell` can live in a `static`. The first caller of
//! [`RegistryCell::get_or_build`] runs the build on its own thread; concurrent
//! callers block until it finishes and then share the result. The outcome,
//! success or failure, is kept for the rest of the process, so discovery never
//! runs twice.

use std::fmt;
use std::sync::OnceLock;

use sigil_core::RegistryError;

use crate::registry::Registry;

/// Holds the outcome of a single registry build for the life of the process.
pub struct RegistryCell<C: ?Sized> {
    slot: OnceLock<Result<Registry<C>, RegistryError>>,
}

impl<C: ?Sized> RegistryCell<C> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the registry, running `build` if no build has happened yet.
    pub fn get_or_build<F>(&self, build: F) -> Result<&Registry<C>, RegistryError>
    where
        F: FnOnce() -> Result<Registry<C>, RegistryError>,
    {
        self.slot.get_or_init(build).as_ref().map_err(Clone::clone)
    }

    /// The registry, if a build has already succeeded.
    pub fn get(&self) -> Option<&Registry<C>> {
        self.slot.get().and_then(|built| built.as_ref().ok())
    }

    /// Returns true once a build has run, whatever its outcome.
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<C: ?Sized> Default for RegistryCell<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for RegistryCell<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCell")
            .field("slot", &self.slot.get())
            .finish()
    }
}
