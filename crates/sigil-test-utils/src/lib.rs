// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sigil registry tests.
//!
//! Provides a scripted type enumerator and fixture plugins for fast,
//! deterministic tests that do not depend on link-time registration.
//!
//! # Components
//!
//! - [`MockEnumerator`] - Replays candidates, injects failures, counts walks
//! - [`fixtures`] - The `Probe` contract, sample plugins, and candidate helpers

pub mod fixtures;
pub mod mock_enumerator;

pub use mock_enumerator::MockEnumerator;
