// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, validation, and the immutable plugin registry.
//!
//! Plugin types are declared with [`register_plugin!`], discovered at startup
//! by a [`TypeEnumerator`](sigil_core::TypeEnumerator) (normally the
//! [`StaticEnumerator`]), validated and instantiated by a [`RegistryBuilder`],
//! and exposed by name through a read-only [`Registry`]. A [`RegistryCell`]
//! holds a process-wide registry that is built at most once.

pub mod builder;
pub mod cell;
pub mod discovery;
pub mod registry;

pub use builder::{BuildOptions, RegistryBuilder};
pub use cell::RegistryCell;
pub use discovery::{registrations, PluginRegistration, StaticEnumerator};
pub use registry::{suggest_name, Registry, RegistryEntry};

pub use inventory;

#[doc(hidden)]
pub mod __private {
    pub use sigil_core::{erase, ContractId, Marker};
}
