// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Method` contract, the built-in methods, and the process-wide registry.

use std::hint::black_box;

use sigil_core::RegistryError;
use sigil_registry::{register_plugin, BuildOptions, Registry, RegistryBuilder, RegistryCell, StaticEnumerator};

/// Marker kind for runnable methods.
pub const METHOD_MARKER: &str = "sigil::method";

/// A named, repeatable unit of work.
pub trait Method: Send + Sync {
    /// One-line description shown by `sigil show`.
    fn description(&self) -> &'static str;

    /// Run the method once, returning a value derived from the work done.
    fn invoke(&self) -> u64;
}

static METHODS: RegistryCell<dyn Method> = RegistryCell::new();

/// The process-wide method registry, discovered on first call.
///
/// `options` only affects the first call; later calls return the registry (or
/// the error) produced by that first build.
pub fn methods(options: &BuildOptions) -> Result<&'static Registry<dyn Method>, RegistryError> {
    METHODS.get_or_build(|| {
        RegistryBuilder::<dyn Method>::new(METHOD_MARKER)
            .with_options(options.clone())
            .build(&StaticEnumerator)
    })
}

#[derive(Debug, Default)]
pub struct Noop;

impl Method for Noop {
    fn description(&self) -> &'static str {
        "does nothing; measures dispatch overhead"
    }

    fn invoke(&self) -> u64 {
        black_box(0)
    }
}

register_plugin! {
    marker: METHOD_MARKER,
    name: "noop",
    contract: dyn Method,
    plugin: Noop,
}

const CHECKSUM_LEN: usize = 64 * 1024;

#[derive(Debug)]
pub struct Checksum {
    buffer: Vec<u8>,
}

impl Default for Checksum {
    fn default() -> Self {
        Self {
            buffer: (0..CHECKSUM_LEN).map(|i| (i % 251) as u8).collect(),
        }
    }
}

impl Method for Checksum {
    fn description(&self) -> &'static str {
        "sums a 64 KiB buffer"
    }

    fn invoke(&self) -> u64 {
        black_box(&self.buffer)
            .iter()
            .fold(0u64, |acc, &b| acc.wrapping_add(u64::from(b)))
    }
}

register_plugin! {
    marker: METHOD_MARKER,
    name: "checksum",
    contract: dyn Method,
    plugin: Checksum,
}

const ALLOC_LEN: usize = 1024 * 1024;

#[derive(Debug, Default)]
pub struct Alloc;

impl Method for Alloc {
    fn description(&self) -> &'static str {
        "allocates and frees 1 MiB"
    }

    fn invoke(&self) -> u64 {
        let block = black_box(vec![1u8; ALLOC_LEN]);
        block.len() as u64
    }
}

register_plugin! {
    marker: METHOD_MARKER,
    name: "alloc",
    contract: dyn Method,
    plugin: Alloc,
}
