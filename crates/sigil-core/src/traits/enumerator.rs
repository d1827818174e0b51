// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The type enumerator seam between plugin discovery and the registry builder.

use std::ops::ControlFlow;

use crate::error::EnumerationError;
use crate::types::{Candidate, Target};

/// Receives candidates from an enumerator, one at a time.
///
/// Returning `ControlFlow::Break(())` asks the enumerator to stop walking;
/// the reporter keeps whatever reason it had for stopping.
pub trait TypeReporter {
    fn report(&mut self, candidate: Candidate) -> ControlFlow<()>;
}

impl<F> TypeReporter for F
where
    F: FnMut(Candidate) -> ControlFlow<()>,
{
    fn report(&mut self, candidate: Candidate) -> ControlFlow<()> {
        self(candidate)
    }
}

/// Walks the program image for types tagged with a marker.
///
/// Implementations must report every type whose marker kind equals
/// `target.marker` exactly once, whether or not it declares `target.contract`
/// (contract checking is the builder's job). A walk that cannot complete must
/// return an error rather than a partial sequence of reports.
pub trait TypeEnumerator {
    fn enumerate(
        &self,
        target: &Target,
        reporter: &mut dyn TypeReporter,
    ) -> Result<(), EnumerationError>;
}

impl<E: TypeEnumerator + ?Sized> TypeEnumerator for &E {
    fn enumerate(
        &self,
        target: &Target,
        reporter: &mut dyn TypeReporter,
    ) -> Result<(), EnumerationError> {
        (**self).enumerate(target, reporter)
    }
}
