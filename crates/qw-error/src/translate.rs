// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless exception → descriptor dispatch.

use qw_protocol::TranslationResult;
use std::sync::Arc;

use crate::exception::CaughtException;
use crate::registry::ErrorRegistry;

/// Diagnostic tag shared by all foreign (non-engine) errors.
pub const FOREIGN_EXCEPTION_TAG: &str = "std::error::Error";

/// Message used when the caught failure carries no recoverable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Translates any caught failure into exactly one [`TranslationResult`].
///
/// Holds no per-call state; `translate` is a pure function of its input and
/// may run concurrently from any number of worker threads. It cannot fail:
/// everything it does not recognize degrades to the registry's fallback
/// descriptor, because error translation must never become a source of new
/// failures inside a query's failure-handling path.
#[derive(Debug, Clone)]
pub struct ExceptionTranslator {
    registry: Arc<ErrorRegistry>,
}

impl ExceptionTranslator {
    /// Create a translator over an explicitly injected registry.
    #[must_use]
    pub fn new(registry: Arc<ErrorRegistry>) -> Self {
        Self { registry }
    }

    /// Translate a classified failure.
    ///
    /// For engine exceptions the descriptor's `retriable` and
    /// `catchable_by_try` are taken verbatim from the registry; the
    /// engine-assigned per-occurrence retriable hint is not consulted.
    #[must_use]
    pub fn translate(&self, caught: &CaughtException) -> TranslationResult {
        match caught {
            CaughtException::Engine(err) => {
                let descriptor = self
                    .registry
                    .lookup(err.source(), err.code())
                    .unwrap_or_else(|| self.registry.fallback())
                    .clone();
                TranslationResult {
                    error_code: descriptor,
                    message: message_or_placeholder(err.message()),
                    exception_type: err.exception_name().to_string(),
                }
            }
            CaughtException::Foreign(err) => TranslationResult {
                error_code: self.registry.fallback().clone(),
                message: message_or_placeholder(&err.to_string()),
                exception_type: FOREIGN_EXCEPTION_TAG.to_string(),
            },
        }
    }

    /// Classify and translate a boxed error in one step.
    #[must_use]
    pub fn translate_boxed(
        &self,
        err: Box<dyn std::error::Error + Send + Sync>,
    ) -> TranslationResult {
        self.translate(&CaughtException::classify(err))
    }
}

impl Default for ExceptionTranslator {
    /// Translator over the process-wide shared registry.
    fn default() -> Self {
        Self::new(ErrorRegistry::shared())
    }
}

fn message_or_placeholder(message: &str) -> String {
    if message.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::{error_code, error_source, EngineException};

    #[test]
    fn empty_engine_message_gets_placeholder() {
        let translator = ExceptionTranslator::default();
        let caught = CaughtException::from(EngineException::new(
            error_source::USER,
            error_code::ARITHMETIC_ERROR,
            "",
        ));
        assert_eq!(translator.translate(&caught).message, UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn translate_boxed_classifies_first() {
        let translator = ExceptionTranslator::default();
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(EngineException::new(
            error_source::USER,
            error_code::INVALID_ARGUMENT,
            "bad argument",
        ));
        let result = translator.translate_boxed(boxed);
        assert_eq!(result.error_code.name, "INVALID_FUNCTION_ARGUMENT");
        assert_eq!(result.exception_type, "EngineUserError");
    }
}
