// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker, contract, and candidate types shared by enumerators and the registry builder.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::InstantiationError;

/// Declarative tag attached to a plugin type.
///
/// `kind` identifies the marker declaration itself (two registries built for
/// different markers never see each other's plugins). `name` is the logical
/// name the plugin is registered under and must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: &'static str,
    pub name: Option<Cow<'static, str>>,
}

impl Marker {
    /// A marker carrying a logical name. Usable in `static` registrations.
    pub const fn named(kind: &'static str, name: &'static str) -> Self {
        Self {
            kind,
            name: Some(Cow::Borrowed(name)),
        }
    }

    /// A marker whose `name` attribute was never set.
    pub const fn unnamed(kind: &'static str) -> Self {
        Self { kind, name: None }
    }

    /// Returns the logical name if it is present and non-empty.
    pub fn valid_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Runtime identity of a capability contract, usually a trait object type.
#[derive(Clone, Copy)]
pub struct ContractId {
    id: TypeId,
    name: &'static str,
}

impl ContractId {
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Human-readable contract name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ContractId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ContractId {}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-erased plugin instance. Always wraps an `Arc<C>` for the contract `C`
/// the plugin was registered under; see [`erase`].
pub type Instance = Box<dyn Any + Send + Sync>;

/// Default constructor for a plugin type.
pub type Constructor = fn() -> Result<Instance, InstantiationError>;

/// Erase a contract-typed instance so it can cross the enumerator seam.
pub fn erase<C: ?Sized + Send + Sync + 'static>(instance: Arc<C>) -> Instance {
    Box::new(instance)
}

/// A marked type reported by an enumerator, not yet validated.
#[derive(Clone)]
pub struct Candidate {
    /// Fully-qualified type name.
    pub type_name: Cow<'static, str>,
    pub marker: Marker,
    /// The contract the type declares it implements.
    pub contract: ContractId,
    pub constructor: Constructor,
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("type_name", &self.type_name)
            .field("marker", &self.marker)
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

/// What an enumerator is asked to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Marker kind; only types tagged with this kind are reported.
    pub marker: &'static str,
    /// Contract the registry is being built for.
    pub contract: ContractId,
}

impl Target {
    pub fn new<C: ?Sized + 'static>(marker: &'static str) -> Self {
        Self {
            marker,
            contract: ContractId::of::<C>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    trait Counter: Send + Sync {}

    #[test]
    fn marker_name_validity() {
        assert_eq!(Marker::named("test", "alpha").valid_name(), Some("alpha"));
        assert_eq!(Marker::named("test", "").valid_name(), None);
        assert_eq!(Marker::named("test", "   ").valid_name(), Some("   "));
        assert_eq!(Marker::unnamed("test").valid_name(), None);
    }

    #[test]
    fn contract_ids_compare_by_type() {
        assert_eq!(ContractId::of::<dyn Greeter>(), ContractId::of::<dyn Greeter>());
        assert_ne!(ContractId::of::<dyn Greeter>(), ContractId::of::<dyn Counter>());
        assert!(ContractId::of::<dyn Greeter>().name().contains("Greeter"));
    }

    #[test]
    fn erased_instance_downcasts_to_contract_arc() {
        struct Hello;
        impl Greeter for Hello {
            fn greet(&self) -> &'static str {
                "hello"
            }
        }

        let erased = erase::<dyn Greeter>(Arc::new(Hello));
        let greeter = erased
            .downcast::<Arc<dyn Greeter>>()
            .expect("should downcast to the registered contract");
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn target_carries_contract() {
        let target = Target::new::<dyn Greeter>("test");
        assert_eq!(target.marker, "test");
        assert_eq!(target.contract, ContractId::of::<dyn Greeter>());
    }
}
