// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stable coordinator-worker error contract.
//!
//! Workers report every failure as a [`TranslationResult`] carrying a public
//! [`ErrorDescriptor`]. The descriptor's numeric `code`, `name`, and
//! [`ErrorType`] are part of a cross-process compatibility contract: they are
//! append-only and never renumbered or repurposed. The `message` and `type`
//! fields are diagnostics and may change format freely.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the public error taxonomy carried by this crate.
///
/// Bumped only when descriptors are added; existing codes and names are
/// permanent.
pub const TAXONOMY_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// ErrorType
// ---------------------------------------------------------------------------

/// Coarse public error bucket consumed by the coordinator for routing and
/// retry decisions and by clients for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Caused by the query or its input data. Report to the client, do not
    /// retry.
    UserError,
    /// Engine bug or unexpected internal state.
    InternalError,
    /// Transient capacity limit. May inform coordinator-level backoff.
    InsufficientResources,
    /// Raised by an external system (connector, remote storage). Reserved in
    /// the taxonomy; no worker-side mapping produces it today.
    External,
}

impl ErrorType {
    /// Stable wire spelling of this type (e.g. `"USER_ERROR"`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserError => "USER_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::InsufficientResources => "INSUFFICIENT_RESOURCES",
            Self::External => "EXTERNAL",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorDescriptor
// ---------------------------------------------------------------------------

/// Published description of one public error.
///
/// `code` and `name` are a versioned contract: once a (code, name) pair has
/// shipped it never changes meaning or numeric value. New descriptors may
/// only be added with new codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// Published numeric code.
    pub code: u32,
    /// Published stable name (e.g. `"DIVISION_BY_ZERO"`).
    pub name: String,
    /// Coarse public bucket.
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Whether the coordinator may consider retrying the task.
    pub retriable: bool,
    /// Whether a query-level TRY expression may suppress this failure
    /// instead of failing the whole query.
    pub catchable_by_try: bool,
}

impl ErrorDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(
        code: u32,
        name: impl Into<String>,
        error_type: ErrorType,
        retriable: bool,
        catchable_by_try: bool,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            error_type,
            retriable,
            catchable_by_try,
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010x}, {})", self.name, self.code, self.error_type)
    }
}

// ---------------------------------------------------------------------------
// TranslationResult
// ---------------------------------------------------------------------------

/// Wire-level failure report produced by the worker's exception translator.
///
/// Only `error_code` is covered by the compatibility contract. `message` and
/// `exception_type` exist for logs and human debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Public descriptor for the failure.
    pub error_code: ErrorDescriptor,
    /// Human-readable message taken from the originating error.
    pub message: String,
    /// Diagnostic tag identifying the kind of error encountered (the engine
    /// exception family, or a shared tag for foreign errors).
    #[serde(rename = "type")]
    pub exception_type: String,
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code.name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_type_wire_spellings() {
        assert_eq!(ErrorType::UserError.as_str(), "USER_ERROR");
        assert_eq!(ErrorType::InternalError.as_str(), "INTERNAL_ERROR");
        assert_eq!(
            ErrorType::InsufficientResources.as_str(),
            "INSUFFICIENT_RESOURCES"
        );
        assert_eq!(ErrorType::External.as_str(), "EXTERNAL");
    }

    #[test]
    fn descriptor_display() {
        let d = ErrorDescriptor::new(0x0000_0008, "DIVISION_BY_ZERO", ErrorType::UserError, false, true);
        assert_eq!(d.to_string(), "DIVISION_BY_ZERO (0x00000008, USER_ERROR)");
    }

    #[test]
    fn result_display() {
        let r = TranslationResult {
            error_code: ErrorDescriptor::new(
                0x0001_0000,
                "GENERIC_INTERNAL_ERROR",
                ErrorType::InternalError,
                false,
                false,
            ),
            message: "boom".to_string(),
            exception_type: "std::error::Error".to_string(),
        };
        assert_eq!(r.to_string(), "[GENERIC_INTERNAL_ERROR] boom");
    }
}
