// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sigil plugin registry.
//!
//! This crate provides the marker and contract types, the error taxonomy, and
//! the [`TypeEnumerator`] seam that every discovery mechanism implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{EnumerationError, InstantiationError, RegistryError};
pub use traits::{TypeEnumerator, TypeReporter};
pub use types::{erase, Candidate, Constructor, ContractId, Instance, Marker, Target};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn registry_error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _enumeration = RegistryError::Enumeration { reason: "io".into() };
        let _contract = RegistryError::ContractViolation {
            type_name: "a::A".into(),
            expected: "dyn X",
            found: "dyn Y",
        };
        let _marker = RegistryError::InvalidMarker {
            type_name: "a::A".into(),
            marker: "test",
        };
        let _instantiation = RegistryError::Instantiation {
            type_name: "a::A".into(),
            reason: "boom".into(),
        };
        let _duplicate = RegistryError::DuplicateName {
            name: "a".into(),
            first: "a::A".into(),
            second: "b::B".into(),
        };
        let _empty = RegistryError::NoPlugins { marker: "test" };
        let _miss = RegistryError::NotFound {
            name: "a".into(),
            suggestion: None,
        };
    }

    #[test]
    fn closures_are_type_reporters() {
        let mut seen = Vec::new();
        let mut reporter = |candidate: Candidate| {
            seen.push(candidate.type_name.into_owned());
            ControlFlow::Continue(())
        };

        let candidate = Candidate {
            type_name: "demo::Alpha".into(),
            marker: Marker::named("test", "alpha"),
            contract: ContractId::of::<dyn std::any::Any + Send + Sync>(),
            constructor: || Err(InstantiationError::new("not constructible")),
        };
        assert!(reporter.report(candidate).is_continue());
        assert_eq!(seen, vec!["demo::Alpha".to_string()]);
    }
}
