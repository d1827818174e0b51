// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock type enumerator for deterministic testing.
//!
//! `MockEnumerator` reports a scripted list of candidates in order, can inject
//! an enumeration failure before or after reporting, and counts how often it
//! was walked so tests can assert that discovery ran exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};

use sigil_core::{Candidate, EnumerationError, Target, TypeEnumerator, TypeReporter};

/// Where an injected failure happens relative to the scripted reports.
#[derive(Debug, Clone)]
enum Failure {
    Before(String),
    After(String),
}

/// A type enumerator that replays pre-configured candidates.
///
/// Candidates whose marker kind differs from the requested target are skipped,
/// the same way a real enumerator ignores types tagged with other markers.
pub struct MockEnumerator {
    candidates: Vec<Candidate>,
    failure: Option<Failure>,
    calls: AtomicUsize,
    reported: AtomicUsize,
}

impl MockEnumerator {
    /// Create a mock enumerator reporting the given candidates in order.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            failure: None,
            calls: AtomicUsize::new(0),
            reported: AtomicUsize::new(0),
        }
    }

    /// Fail the walk before any candidate is reported.
    pub fn failing_before(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(Failure::Before(message.into()));
        self
    }

    /// Report every candidate, then fail the walk.
    pub fn failing_after(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(Failure::After(message.into()));
        self
    }

    /// Number of times `enumerate` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total number of candidates handed to reporters across all calls.
    pub fn reported(&self) -> usize {
        self.reported.load(Ordering::SeqCst)
    }
}

impl TypeEnumerator for MockEnumerator {
    fn enumerate(
        &self,
        target: &Target,
        reporter: &mut dyn TypeReporter,
    ) -> Result<(), EnumerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(Failure::Before(message)) = &self.failure {
            return Err(EnumerationError::new(message.clone()));
        }

        for candidate in &self.candidates {
            if candidate.marker.kind != target.marker {
                continue;
            }
            self.reported.fetch_add(1, Ordering::SeqCst);
            if reporter.report(candidate.clone()).is_break() {
                return Ok(());
            }
        }

        match &self.failure {
            Some(Failure::After(message)) => Err(EnumerationError::new(message.clone())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, Probe, PROBE_MARKER};
    use std::ops::ControlFlow;

    fn collect(enumerator: &MockEnumerator) -> (Vec<String>, Result<(), EnumerationError>) {
        let mut names = Vec::new();
        let result = enumerator.enumerate(
            &Target::new::<dyn Probe>(PROBE_MARKER),
            &mut |candidate: Candidate| {
                names.push(candidate.type_name.into_owned());
                ControlFlow::Continue(())
            },
        );
        (names, result)
    }

    #[test]
    fn reports_candidates_in_order() {
        let enumerator = MockEnumerator::new(vec![
            fixtures::candidate::<fixtures::Beta>("beta"),
            fixtures::candidate::<fixtures::Alpha>("alpha"),
        ]);
        let (names, result) = collect(&enumerator);
        assert!(result.is_ok());
        assert_eq!(
            names,
            vec![
                fixtures::type_name::<fixtures::Beta>().to_string(),
                fixtures::type_name::<fixtures::Alpha>().to_string(),
            ]
        );
        assert_eq!(enumerator.calls(), 1);
        assert_eq!(enumerator.reported(), 2);
    }

    #[test]
    fn failing_before_reports_nothing() {
        let enumerator = MockEnumerator::new(vec![fixtures::candidate::<fixtures::Alpha>("alpha")])
            .failing_before("disk on fire");
        let (names, result) = collect(&enumerator);
        assert!(names.is_empty());
        assert_eq!(result.unwrap_err().to_string(), "disk on fire");
    }

    #[test]
    fn stops_on_break() {
        let enumerator = MockEnumerator::new(vec![
            fixtures::candidate::<fixtures::Alpha>("alpha"),
            fixtures::candidate::<fixtures::Beta>("beta"),
        ]);
        let result = enumerator.enumerate(
            &Target::new::<dyn Probe>(PROBE_MARKER),
            &mut |_: Candidate| ControlFlow::Break(()),
        );
        assert!(result.is_ok());
        assert_eq!(enumerator.reported(), 1);
    }
}
