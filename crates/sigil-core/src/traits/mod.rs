// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the discovery seam.

pub mod enumerator;

pub use enumerator::{TypeEnumerator, TypeReporter};
