// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture contracts and plugin types for registry tests.

use std::borrow::Cow;
use std::sync::Arc;

use sigil_core::{erase, Candidate, ContractId, Instance, InstantiationError, Marker};

/// Marker kind carried by every fixture candidate.
pub const PROBE_MARKER: &str = "sigil-test::probe";

/// Type name reported for [`foreign_candidate`].
pub const FOREIGN_TYPE_NAME: &str = "sigil_test_utils::fixtures::Widget";

/// The capability contract fixture plugins implement.
pub trait Probe: Send + Sync {
    fn id(&self) -> &'static str;
}

/// An unrelated contract, used to provoke contract violations.
pub trait Gadget: Send + Sync {
    fn spin(&self) -> u32;
}

#[derive(Debug, Default)]
pub struct Alpha;

impl Probe for Alpha {
    fn id(&self) -> &'static str {
        "alpha-probe"
    }
}

#[derive(Debug, Default)]
pub struct Beta;

impl Probe for Beta {
    fn id(&self) -> &'static str {
        "beta-probe"
    }
}

#[derive(Debug, Default)]
pub struct Widget;

impl Gadget for Widget {
    fn spin(&self) -> u32 {
        7
    }
}

/// Default constructor for a fixture probe.
pub fn construct<T: Probe + Default + 'static>() -> Result<Instance, InstantiationError> {
    Ok(erase::<dyn Probe>(Arc::new(T::default())))
}

pub fn type_name<T>() -> &'static str {
    std::any::type_name::<T>()
}

/// A probe candidate tagged with [`PROBE_MARKER`] and the given name.
pub fn candidate<T: Probe + Default + 'static>(name: &'static str) -> Candidate {
    Candidate {
        type_name: Cow::Borrowed(type_name::<T>()),
        marker: Marker::named(PROBE_MARKER, name),
        contract: ContractId::of::<dyn Probe>(),
        constructor: construct::<T>,
    }
}

/// Like [`candidate`], for names generated at runtime.
pub fn owned_candidate<T: Probe + Default + 'static>(name: &str) -> Candidate {
    Candidate {
        marker: Marker {
            kind: PROBE_MARKER,
            name: Some(Cow::Owned(name.to_string())),
        },
        ..candidate::<T>("")
    }
}

/// A candidate tagged with [`PROBE_MARKER`] whose type implements [`Gadget`], not [`Probe`].
pub fn foreign_candidate(name: &'static str) -> Candidate {
    Candidate {
        type_name: Cow::Borrowed(FOREIGN_TYPE_NAME),
        marker: Marker::named(PROBE_MARKER, name),
        contract: ContractId::of::<dyn Gadget>(),
        constructor: || Ok(erase::<dyn Gadget>(Arc::new(Widget))),
    }
}
