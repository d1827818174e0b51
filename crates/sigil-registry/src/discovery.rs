// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Link-time plugin registration and the enumerator that walks it.
//!
//! Plugins are declared with [`register_plugin!`](crate::register_plugin),
//! which submits a [`PluginRegistration`] through `inventory`. At startup the
//! [`StaticEnumerator`] walks every submitted registration in the binary and
//! reports those tagged with the requested marker kind.

use std::borrow::Cow;

use sigil_core::{
    Candidate, Constructor, ContractId, EnumerationError, Marker, Target, TypeEnumerator,
    TypeReporter,
};

/// A plugin type registered at link time.
#[derive(Debug)]
pub struct PluginRegistration {
    /// Fully-qualified type name.
    pub type_name: &'static str,
    pub marker: Marker,
    /// The contract the plugin is registered under.
    pub contract: fn() -> ContractId,
    pub constructor: Constructor,
}

inventory::collect!(PluginRegistration);

impl PluginRegistration {
    pub fn candidate(&self) -> Candidate {
        Candidate {
            type_name: Cow::Borrowed(self.type_name),
            marker: self.marker.clone(),
            contract: (self.contract)(),
            constructor: self.constructor,
        }
    }
}

/// Iterate every registration linked into the binary, for any marker kind.
pub fn registrations() -> impl Iterator<Item = &'static PluginRegistration> {
    inventory::iter::<PluginRegistration>.into_iter()
}

/// Enumerates plugins declared with [`register_plugin!`](crate::register_plugin).
///
/// Registrations are reported in ascending type-name order, then by logical
/// name, so discovery order does not depend on link order. The walk is over an in-memory table and
/// cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEnumerator;

impl TypeEnumerator for StaticEnumerator {
    fn enumerate(
        &self,
        target: &Target,
        reporter: &mut dyn TypeReporter,
    ) -> Result<(), EnumerationError> {
        let mut matching: Vec<&'static PluginRegistration> = registrations()
            .filter(|registration| registration.marker.kind == target.marker)
            .collect();
        matching.sort_by(|a, b| {
            a.type_name
                .cmp(b.type_name)
                .then_with(|| a.marker.name.cmp(&b.marker.name))
        });

        for registration in matching {
            if reporter.report(registration.candidate()).is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// Register a default-constructible plugin type under a marker and logical name.
///
/// The plugin type must implement the contract; the compiler rejects the
/// registration otherwise.
///
/// ```ignore
/// pub const METHOD: &str = "sigil::method";
///
/// pub trait Method: Send + Sync {
///     fn run(&self);
/// }
///
/// #[derive(Default)]
/// struct Noop;
///
/// impl Method for Noop {
///     fn run(&self) {}
/// }
///
/// sigil_registry::register_plugin! {
///     marker: METHOD,
///     name: "noop",
///     contract: dyn Method,
///     plugin: Noop,
/// }
/// ```
#[macro_export]
macro_rules! register_plugin {
    {
        marker: $marker:expr,
        name: $name:expr,
        contract: $contract:ty,
        plugin: $plugin:ty $(,)?
    } => {
        $crate::inventory::submit! {
            $crate::PluginRegistration {
                type_name: ::std::concat!(::std::module_path!(), "::", ::std::stringify!($plugin)),
                marker: $crate::__private::Marker::named($marker, $name),
                contract: $crate::__private::ContractId::of::<$contract>,
                constructor: || {
                    let instance: ::std::sync::Arc<$contract> =
                        ::std::sync::Arc::new(<$plugin as ::std::default::Default>::default());
                    ::std::result::Result::Ok($crate::__private::erase::<$contract>(instance))
                },
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildOptions, RegistryBuilder};
    use std::ops::ControlFlow;

    const SHAPE: &str = "sigil-registry-test::shape";
    const EMPTY: &str = "sigil-registry-test::nothing-here";
    const ALIASED: &str = "sigil-registry-test::aliased";

    trait Shape: Send + Sync {
        fn sides(&self) -> u32;
    }

    #[derive(Default)]
    struct Triangle;
    impl Shape for Triangle {
        fn sides(&self) -> u32 {
            3
        }
    }

    #[derive(Default)]
    struct Hexagon;
    impl Shape for Hexagon {
        fn sides(&self) -> u32 {
            6
        }
    }

    crate::register_plugin! {
        marker: SHAPE,
        name: "triangle",
        contract: dyn Shape,
        plugin: Triangle,
    }

    crate::register_plugin! {
        marker: SHAPE,
        name: "hexagon",
        contract: dyn Shape,
        plugin: Hexagon,
    }

    crate::register_plugin! {
        marker: ALIASED,
        name: "trio",
        contract: dyn Shape,
        plugin: Triangle,
    }

    crate::register_plugin! {
        marker: ALIASED,
        name: "delta",
        contract: dyn Shape,
        plugin: Triangle,
    }

    #[test]
    fn static_enumerator_reports_in_type_name_order() {
        let mut seen = Vec::new();
        StaticEnumerator
            .enumerate(
                &Target::new::<dyn Shape>(SHAPE),
                &mut |candidate: Candidate| {
                    seen.push(candidate.type_name.into_owned());
                    ControlFlow::Continue(())
                },
            )
            .unwrap();

        assert_eq!(
            seen,
            vec![
                "sigil_registry::discovery::tests::Hexagon".to_string(),
                "sigil_registry::discovery::tests::Triangle".to_string(),
            ]
        );
    }

    #[test]
    fn builds_registry_from_linked_plugins() {
        let registry = RegistryBuilder::<dyn Shape>::new(SHAPE)
            .build(&StaticEnumerator)
            .unwrap();

        assert_eq!(registry.list_names(), vec!["hexagon", "triangle"]);
        assert_eq!(registry.lookup("triangle").unwrap().sides(), 3);
        assert_eq!(registry.lookup("hexagon").unwrap().sides(), 6);
    }

    #[test]
    fn unknown_marker_discovers_nothing() {
        let registry = RegistryBuilder::<dyn Shape>::new(EMPTY)
            .build(&StaticEnumerator)
            .unwrap();
        assert!(registry.is_empty());

        let strict = RegistryBuilder::<dyn Shape>::new(EMPTY)
            .with_options(BuildOptions {
                require_plugins: true,
                ..BuildOptions::default()
            })
            .build(&StaticEnumerator);
        assert!(strict.is_err());
    }

    #[test]
    fn same_type_under_two_names_is_ordered_by_name() {
        let registry = RegistryBuilder::<dyn Shape>::new(ALIASED)
            .build(&StaticEnumerator)
            .unwrap();

        assert_eq!(registry.list_names(), vec!["delta", "trio"]);
        assert_eq!(registry.lookup("delta").unwrap().sides(), 3);
        assert_eq!(
            registry.entry("trio").unwrap().type_name(),
            registry.entry("delta").unwrap().type_name()
        );
    }

    #[test]
    fn registrations_are_visible() {
        let count = registrations()
            .filter(|registration| registration.marker.kind == SHAPE)
            .count();
        assert_eq!(count, 2);
    }
}
