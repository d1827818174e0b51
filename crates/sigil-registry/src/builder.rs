// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry builder: one discovery pass, then validate, instantiate, and freeze.
//!
//! Each candidate reported by the enumerator goes through the contract check,
//! the marker check, instantiation, and the duplicate-name check, in that
//! order. The first failure stops the enumerator and aborts the whole build;
//! a partially populated registry is never returned.

use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use indexmap::map::Entry;
use indexmap::IndexMap;
use sigil_core::{Candidate, ContractId, RegistryError, Target, TypeEnumerator};
use tracing::{error, info};

use crate::registry::{Registry, RegistryEntry};

/// Knobs for a registry build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail the build with [`RegistryError::NoPlugins`] when discovery finds nothing.
    pub require_plugins: bool,
    /// Attach a "did you mean" suggestion to lookup misses.
    pub suggest_on_miss: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            require_plugins: false,
            suggest_on_miss: true,
        }
    }
}

/// Builds a [`Registry`] of plugins implementing the contract `C`.
///
/// `C` is normally a trait object, e.g. `RegistryBuilder::<dyn Method>::new("method")`.
pub struct RegistryBuilder<C: ?Sized> {
    target: Target,
    options: BuildOptions,
    _contract: PhantomData<fn() -> Arc<C>>,
}

impl<C: ?Sized + Send + Sync + 'static> RegistryBuilder<C> {
    /// Create a builder for plugins tagged with the given marker kind.
    pub fn new(marker: &'static str) -> Self {
        Self {
            target: Target::new::<C>(marker),
            options: BuildOptions::default(),
            _contract: PhantomData,
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one discovery pass and assemble the registry.
    pub fn build(&self, enumerator: &dyn TypeEnumerator) -> Result<Registry<C>, RegistryError> {
        let begin = Instant::now();
        info!(marker = self.target.marker, "scanning for plugins");

        let mut accumulator = Accumulator::<C>::new(self.target);
        let walked = {
            let mut reporter = |candidate: Candidate| match accumulator.admit(candidate) {
                Ok(()) => ControlFlow::Continue(()),
                Err(err) => {
                    accumulator.failure = Some(err);
                    ControlFlow::Break(())
                }
            };
            enumerator.enumerate(&self.target, &mut reporter)
        };

        // A rejected candidate takes precedence over whatever the enumerator
        // returned after being told to stop.
        let result = match (accumulator.failure.take(), walked) {
            (Some(err), _) => Err(err),
            (None, Err(err)) => Err(RegistryError::from(err)),
            (None, Ok(())) => Ok(()),
        };
        if let Err(err) = result {
            error!(marker = self.target.marker, error = %err, "plugin discovery aborted");
            return Err(err);
        }

        if self.options.require_plugins && accumulator.entries.is_empty() {
            let err = RegistryError::NoPlugins {
                marker: self.target.marker,
            };
            error!(marker = self.target.marker, error = %err, "plugin discovery aborted");
            return Err(err);
        }

        let count = accumulator.entries.len();
        info!(
            marker = self.target.marker,
            count,
            elapsed_ms = begin.elapsed().as_millis() as u64,
            "finished plugin scan"
        );
        Ok(Registry::from_entries(
            accumulator.entries,
            self.options.suggest_on_miss,
        ))
    }
}

/// Mutable state for a single build. Never escapes [`RegistryBuilder::build`].
struct Accumulator<C: ?Sized> {
    target: Target,
    entries: IndexMap<String, RegistryEntry<C>>,
    failure: Option<RegistryError>,
}

impl<C: ?Sized + Send + Sync + 'static> Accumulator<C> {
    fn new(target: Target) -> Self {
        Self {
            target,
            entries: IndexMap::new(),
            failure: None,
        }
    }

    fn admit(&mut self, candidate: Candidate) -> Result<(), RegistryError> {
        let Candidate {
            type_name,
            marker,
            contract,
            constructor,
        } = candidate;

        if contract != self.target.contract {
            return Err(RegistryError::ContractViolation {
                type_name: type_name.into_owned(),
                expected: self.target.contract.name(),
                found: contract.name(),
            });
        }

        let Some(name) = marker.valid_name() else {
            return Err(RegistryError::InvalidMarker {
                type_name: type_name.into_owned(),
                marker: marker.kind,
            });
        };
        let name = name.to_string();

        let instance = instantiate::<C>(&type_name, constructor, self.target.contract)?;

        match self.entries.entry(name) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateName {
                name: existing.key().clone(),
                first: existing.get().type_name().to_string(),
                second: type_name.into_owned(),
            }),
            Entry::Vacant(slot) => {
                info!(name = %slot.key(), type_name = %type_name, "found plugin");
                let name = slot.key().clone();
                slot.insert(RegistryEntry::new(name, type_name, instance));
                Ok(())
            }
        }
    }
}

/// Call a plugin's constructor, turning errors and panics into build failures.
fn instantiate<C: ?Sized + Send + Sync + 'static>(
    type_name: &str,
    constructor: sigil_core::Constructor,
    contract: ContractId,
) -> Result<Arc<C>, RegistryError> {
    let failed = |reason: String| RegistryError::Instantiation {
        type_name: type_name.to_string(),
        reason,
    };

    let erased = match panic::catch_unwind(AssertUnwindSafe(constructor)) {
        Ok(Ok(erased)) => erased,
        Ok(Err(err)) => return Err(failed(err.to_string())),
        Err(payload) => return Err(failed(panic_message(payload.as_ref()))),
    };

    erased
        .downcast::<Arc<C>>()
        .map(|instance| *instance)
        .map_err(|_| failed(format!("constructor did not produce an `{}`", contract.name())))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("constructor panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("constructor panicked: {s}")
    } else {
        "constructor panicked".to_string()
    }
}
