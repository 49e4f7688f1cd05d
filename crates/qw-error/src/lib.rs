// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exception translation for the query worker.
//!
//! Execution threads catch failures anywhere in a parallel pipeline and hand
//! them to [`ExceptionTranslator::translate`], which classifies the failure,
//! consults the curated [`ErrorRegistry`], and returns an immutable
//! [`TranslationResult`](qw_protocol::TranslationResult) for the wire and for
//! the TRY evaluator.
//!
//! The registry is hand-authored policy, not a mechanical derivation from
//! engine codes: `retriable` and `catchable_by_try` encode what is safe to
//! retry or suppress, which only a human can decide per error kind.
//!
//! ```
//! use qw_error::{CaughtException, EngineException, ExceptionTranslator, error_code, error_source};
//!
//! let translator = ExceptionTranslator::default();
//! let caught = CaughtException::from(EngineException::new(
//!     error_source::USER,
//!     error_code::ARITHMETIC_ERROR,
//!     "division by zero",
//! ));
//! let result = translator.translate(&caught);
//! assert_eq!(result.error_code.name, "DIVISION_BY_ZERO");
//! assert!(result.error_code.catchable_by_try);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod exception;
mod registry;
mod translate;

pub use exception::{error_code, error_source, CaughtException, EngineException};
pub use registry::ErrorRegistry;
pub use translate::{ExceptionTranslator, FOREIGN_EXCEPTION_TAG, UNKNOWN_ERROR_MESSAGE};
