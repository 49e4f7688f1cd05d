// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exception shapes crossing the engine boundary.

use std::any::Any;
use std::fmt;
use thiserror::Error;

/// Well-known error sources assigned by the execution engine.
///
/// The source space is open-ended and owned by the engine; unrecognized
/// sources are carried as opaque strings, never rejected.
pub mod error_source {
    /// Failure caused by the query or its input data.
    pub const USER: &str = "user";
    /// Failure raised by the engine or its infrastructure.
    pub const RUNTIME: &str = "runtime";
    /// Failure raised by the host system. Reserved; no curated mappings
    /// exist for it today, so system-source errors fall back.
    pub const SYSTEM: &str = "system";
}

/// Well-known error codes assigned by the execution engine, scoped within an
/// error source. Open-ended, owned by the engine.
pub mod error_code {
    /// Arithmetic failure on a single value (e.g. division by zero).
    pub const ARITHMETIC_ERROR: &str = "arithmetic error";
    /// A function received an argument it cannot process.
    pub const INVALID_ARGUMENT: &str = "invalid argument";
    /// The query exercised a capability the engine does not support.
    pub const UNSUPPORTED: &str = "unsupported";
    /// Unsupported input the engine explicitly marks as not suppressible.
    pub const UNSUPPORTED_INPUT_UNCATCHABLE: &str = "unsupported-input-uncatchable";
    /// Data does not match the declared schema.
    pub const SCHEMA_MISMATCH: &str = "schema mismatch";
    /// The task hit its local memory cap.
    pub const MEM_CAP_EXCEEDED: &str = "memory cap exceeded";
    /// A memory allocation was aborted by the arbitrator.
    pub const MEM_ABORTED: &str = "memory aborted";
    /// An internal invariant was violated.
    pub const INVALID_STATE: &str = "invalid state";
    /// Control flow reached code marked unreachable.
    pub const UNREACHABLE_CODE: &str = "unreachable code";
    /// The engine hit a code path it has not implemented.
    pub const NOT_IMPLEMENTED: &str = "not implemented";
    /// The engine could not determine a more specific code.
    pub const UNKNOWN: &str = "unknown";
}

// ---------------------------------------------------------------------------
// EngineException
// ---------------------------------------------------------------------------

/// Structured failure raised by the execution engine.
///
/// This is the boundary contract with the engine: source, code, and message
/// are always present; `retriable` is an engine-assigned per-occurrence hint.
/// Translation deliberately ignores that hint — retriability is a property of
/// the error *kind* and comes from the curated registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{error_source}:{code}] {message}")]
pub struct EngineException {
    // Not named `source` because thiserror would treat that field as the
    // `std::error::Error::source`, which a `String` cannot be.
    error_source: String,
    code: String,
    message: String,
    retriable: bool,
}

impl EngineException {
    /// Create an engine exception with `retriable = false`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_source: source.into(),
            code: code.into(),
            message: message.into(),
            retriable: false,
        }
    }

    /// Set the engine-assigned per-occurrence retriable hint.
    #[must_use]
    pub fn retriable(mut self, retriable: bool) -> Self {
        self.retriable = retriable;
        self
    }

    /// Error source assigned by the engine.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.error_source
    }

    /// Error code assigned by the engine, scoped within the source.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Engine-assigned per-occurrence retriable hint.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        self.retriable
    }

    /// Diagnostic name of this exception family, distinct per source.
    /// Logs-only; not part of the wire contract.
    #[must_use]
    pub fn exception_name(&self) -> &'static str {
        match self.error_source.as_str() {
            error_source::USER => "EngineUserError",
            error_source::RUNTIME => "EngineRuntimeError",
            error_source::SYSTEM => "EngineSystemError",
            _ => "EngineError",
        }
    }
}

// ---------------------------------------------------------------------------
// CaughtException
// ---------------------------------------------------------------------------

/// Everything an execution thread can catch, reduced to a closed set of
/// shapes with exhaustive handling.
#[derive(Debug)]
pub enum CaughtException {
    /// A structured exception raised by the execution engine.
    Engine(EngineException),
    /// Any other error that escaped an operator.
    Foreign(Box<dyn std::error::Error + Send + Sync>),
}

impl CaughtException {
    /// Classify a boxed error: engine exceptions are recovered by downcast,
    /// everything else is foreign.
    #[must_use]
    pub fn classify(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<EngineException>() {
            Ok(engine) => Self::Engine(*engine),
            Err(other) => Self::Foreign(other),
        }
    }

    /// Adapt a `catch_unwind` payload from an operator thread.
    ///
    /// String payloads are recovered as the foreign error's message; any
    /// other payload carries no recoverable text and degrades to the
    /// unknown-error placeholder at translation time.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        Self::Foreign(Box::new(PanicPayload(message)))
    }
}

impl From<EngineException> for CaughtException {
    fn from(err: EngineException) -> Self {
        Self::Engine(err)
    }
}

impl fmt::Display for CaughtException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "{err}"),
            Self::Foreign(err) => write!(f, "{err}"),
        }
    }
}

/// Foreign error wrapping the textual payload of a caught panic.
#[derive(Debug, Error)]
#[error("{0}")]
struct PanicPayload(String);
