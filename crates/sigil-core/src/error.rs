// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sigil plugin registry.

use thiserror::Error;

/// The primary error type produced while building and querying a registry.
///
/// Every variant except [`RegistryError::NotFound`] is a build failure: the
/// build that produced it published no registry at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The type enumerator could not complete its walk.
    #[error("plugin discovery failed: {reason}")]
    Enumeration { reason: String },

    /// A marked type does not implement the contract the registry is built for.
    #[error("type `{type_name}` does not implement `{expected}` (declared `{found}`)")]
    ContractViolation {
        type_name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The marker is present but its `name` attribute is missing or empty.
    #[error("type `{type_name}` carries a `{marker}` marker without a name")]
    InvalidMarker {
        type_name: String,
        marker: &'static str,
    },

    /// Default construction of a validated candidate failed.
    #[error("failed to instantiate `{type_name}`: {reason}")]
    Instantiation { type_name: String, reason: String },

    /// Two candidates claim the same logical name.
    #[error("plugin name `{name}` is claimed by both `{first}` and `{second}`")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    /// Discovery found nothing and the build was configured to require plugins.
    #[error("no plugins carrying the `{marker}` marker were found")]
    NoPlugins { marker: &'static str },

    /// A lookup named a plugin that is not registered.
    #[error("plugin `{name}` is not registered{}", suggestion_suffix(.suggestion.as_deref()))]
    NotFound {
        name: String,
        suggestion: Option<String>,
    },
}

impl RegistryError {
    /// Returns true if this error aborted a registry build.
    pub fn is_build_failure(&self) -> bool {
        !matches!(self, RegistryError::NotFound { .. })
    }
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{s}`?)"),
        None => String::new(),
    }
}

/// Failure reported by a [`TypeEnumerator`](crate::traits::TypeEnumerator) that
/// could not finish walking the program image.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EnumerationError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EnumerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying failure (typically I/O) with context.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<EnumerationError> for RegistryError {
    fn from(err: EnumerationError) -> Self {
        let mut reason = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        RegistryError::Enumeration { reason }
    }
}

/// Failure raised by a plugin constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InstantiationError(pub String);

impl InstantiationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
