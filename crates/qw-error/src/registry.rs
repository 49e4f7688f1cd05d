// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curated (source, code) → descriptor table.

use qw_protocol::{ErrorDescriptor, ErrorType};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::exception::{error_code, error_source};

/// Published descriptor values, one row per curated (source, code) pair.
///
/// Append-only: numeric codes and names here have shipped and are permanent.
/// Every row is hand-authored because `retriable` and `catchable_by_try`
/// encode policy, not mechanical facts about the engine code.
const CURATED: &[(&str, &str, u32, &str, ErrorType, bool, bool)] = &[
    // source, engine code, published code, published name, type, retriable, catchable by TRY
    (
        error_source::USER,
        error_code::ARITHMETIC_ERROR,
        0x0000_0008,
        "DIVISION_BY_ZERO",
        ErrorType::UserError,
        false,
        true,
    ),
    (
        error_source::USER,
        error_code::INVALID_ARGUMENT,
        0x0000_0007,
        "INVALID_FUNCTION_ARGUMENT",
        ErrorType::UserError,
        false,
        true,
    ),
    // Capability gaps: suppressing these would silently produce wrong
    // results, so TRY must not catch them.
    (
        error_source::USER,
        error_code::UNSUPPORTED,
        0x0000_000D,
        "NOT_SUPPORTED",
        ErrorType::UserError,
        false,
        false,
    ),
    (
        error_source::USER,
        error_code::UNSUPPORTED_INPUT_UNCATCHABLE,
        0x0000_000D,
        "NOT_SUPPORTED",
        ErrorType::UserError,
        false,
        false,
    ),
    // Structural inconsistency; a per-row suppression cannot mask it safely.
    (
        error_source::USER,
        error_code::SCHEMA_MISMATCH,
        0x0000_0000,
        "GENERIC_USER_ERROR",
        ErrorType::UserError,
        false,
        false,
    ),
    (
        error_source::RUNTIME,
        error_code::MEM_CAP_EXCEEDED,
        0x0002_0007,
        "EXCEEDED_LOCAL_MEMORY_LIMIT",
        ErrorType::InsufficientResources,
        false,
        false,
    ),
    (
        error_source::RUNTIME,
        error_code::MEM_ABORTED,
        0x0002_0000,
        "GENERIC_INSUFFICIENT_RESOURCES",
        ErrorType::InsufficientResources,
        false,
        false,
    ),
    (
        error_source::RUNTIME,
        error_code::INVALID_STATE,
        0x0001_0000,
        "GENERIC_INTERNAL_ERROR",
        ErrorType::InternalError,
        false,
        false,
    ),
    (
        error_source::RUNTIME,
        error_code::UNREACHABLE_CODE,
        0x0001_0000,
        "GENERIC_INTERNAL_ERROR",
        ErrorType::InternalError,
        false,
        false,
    ),
    (
        error_source::RUNTIME,
        error_code::NOT_IMPLEMENTED,
        0x0001_0000,
        "GENERIC_INTERNAL_ERROR",
        ErrorType::InternalError,
        false,
        false,
    ),
    (
        error_source::RUNTIME,
        error_code::UNKNOWN,
        0x0001_0000,
        "GENERIC_INTERNAL_ERROR",
        ErrorType::InternalError,
        false,
        false,
    ),
];

// ---------------------------------------------------------------------------
// ErrorRegistry
// ---------------------------------------------------------------------------

/// Immutable lookup table mapping (error source, error code) pairs to
/// published descriptors, plus the reserved fallback descriptor.
///
/// Built once, never mutated; reads take no locks and are safe under
/// unbounded concurrent readers.
#[derive(Debug)]
pub struct ErrorRegistry {
    entries: BTreeMap<String, BTreeMap<String, ErrorDescriptor>>,
    fallback: ErrorDescriptor,
}

impl ErrorRegistry {
    /// Build the curated registry. Prefer [`ErrorRegistry::shared`] unless a
    /// call site needs its own instance (tests, tools).
    #[must_use]
    pub fn new() -> Self {
        let mut entries: BTreeMap<String, BTreeMap<String, ErrorDescriptor>> = BTreeMap::new();
        for &(source, code, value, name, error_type, retriable, catchable) in CURATED {
            entries.entry(source.to_string()).or_default().insert(
                code.to_string(),
                ErrorDescriptor::new(value, name, error_type, retriable, catchable),
            );
        }
        Self {
            entries,
            fallback: ErrorDescriptor::new(
                0x0001_0000,
                "GENERIC_INTERNAL_ERROR",
                ErrorType::InternalError,
                false,
                false,
            ),
        }
    }

    /// Process-lifetime shared registry, built race-free on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ErrorRegistry>> = OnceLock::new();
        SHARED
            .get_or_init(|| {
                let registry = ErrorRegistry::new();
                debug!(
                    taxonomy_version = qw_protocol::TAXONOMY_VERSION,
                    sources = registry.entries.len(),
                    entries = registry.len(),
                    "error registry initialized"
                );
                Arc::new(registry)
            })
            .clone()
    }

    /// Exact two-level lookup. No prefix matching, no inheritance between
    /// sources.
    #[must_use]
    pub fn lookup(&self, source: &str, code: &str) -> Option<&ErrorDescriptor> {
        self.entries.get(source).and_then(|codes| codes.get(code))
    }

    /// The reserved descriptor returned whenever lookup fails. Not keyed
    /// under any (source, code).
    #[must_use]
    pub fn fallback(&self) -> &ErrorDescriptor {
        &self.fallback
    }

    /// Error sources with at least one curated entry.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Curated (code, descriptor) pairs for one source, in code order.
    pub fn entries(&self, source: &str) -> impl Iterator<Item = (&str, &ErrorDescriptor)> {
        self.entries
            .get(source)
            .into_iter()
            .flat_map(|codes| codes.iter().map(|(code, d)| (code.as_str(), d)))
    }

    /// Total number of curated entries across all sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// True when no entries are curated. Never the case for the built-in
    /// table; present for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
