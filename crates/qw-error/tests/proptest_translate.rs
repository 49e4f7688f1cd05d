// SPDX-License-Identifier: MIT OR Apache-2.0

//! Totality properties: translation never fails, never invents policy.

use proptest::prelude::*;
use qw_error::{
    CaughtException, EngineException, ErrorRegistry, ExceptionTranslator, FOREIGN_EXCEPTION_TAG,
    UNKNOWN_ERROR_MESSAGE,
};
use qw_protocol::ErrorType;

proptest! {
    /// Any (source, code) pair outside the curated table falls back to
    /// GENERIC_INTERNAL_ERROR, whatever the message or retriable hint.
    #[test]
    fn uncurated_pairs_always_fall_back(
        source in "[a-z_]{1,24}",
        code in "[a-z ]{1,32}",
        message in ".{0,64}",
        retriable in any::<bool>(),
    ) {
        let registry = ErrorRegistry::shared();
        prop_assume!(registry.lookup(&source, &code).is_none());

        let translator = ExceptionTranslator::new(registry);
        let caught = CaughtException::from(
            EngineException::new(source, code, message).retriable(retriable),
        );
        let result = translator.translate(&caught);

        prop_assert_eq!(result.error_code.code, 0x0001_0000);
        prop_assert_eq!(&result.error_code.name, "GENERIC_INTERNAL_ERROR");
        prop_assert_eq!(result.error_code.error_type, ErrorType::InternalError);
        prop_assert!(!result.error_code.retriable);
        prop_assert!(!result.error_code.catchable_by_try);
    }

    /// Non-empty messages pass through unmodified; empty ones get the
    /// placeholder. Holds for curated and uncurated pairs alike.
    #[test]
    fn messages_pass_through(source in "[a-z]{1,12}", code in "[a-z ]{1,24}", message in ".{0,64}") {
        let translator = ExceptionTranslator::default();
        let caught = CaughtException::from(EngineException::new(source, code, message.clone()));
        let result = translator.translate(&caught);

        if message.is_empty() {
            prop_assert_eq!(result.message, UNKNOWN_ERROR_MESSAGE);
        } else {
            prop_assert_eq!(result.message, message);
        }
    }

    /// Foreign errors of arbitrary text always land on the fallback with the
    /// shared foreign tag.
    #[test]
    fn foreign_errors_always_fall_back(message in ".{1,64}") {
        let translator = ExceptionTranslator::default();
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(std::io::Error::other(message.clone()));
        let result = translator.translate(&CaughtException::Foreign(err));

        prop_assert_eq!(&result.error_code.name, "GENERIC_INTERNAL_ERROR");
        prop_assert_eq!(result.exception_type, FOREIGN_EXCEPTION_TAG);
        prop_assert_eq!(result.message, message);
    }

    /// The engine's per-occurrence retriable hint never reaches the result,
    /// even on curated hits.
    #[test]
    fn instance_retriable_hint_never_propagates(retriable in any::<bool>()) {
        let registry = ErrorRegistry::shared();
        let translator = ExceptionTranslator::new(registry.clone());
        let sources: Vec<String> = registry.sources().map(str::to_string).collect();

        for source in &sources {
            let codes: Vec<String> =
                registry.entries(source).map(|(c, _)| c.to_string()).collect();
            for code in codes {
                let descriptor = registry.lookup(source, &code).unwrap().clone();
                let caught = CaughtException::from(
                    EngineException::new(source.clone(), code, "m").retriable(retriable),
                );
                let result = translator.translate(&caught);
                prop_assert_eq!(result.error_code.retriable, descriptor.retriable);
            }
        }
    }
}
