//! Cross-crate contract checks on the error classifier, driven by the
//! shared generators.

use proptest::prelude::*;
use support_admin_client::error::{user_message_for_status, GENERIC_ERROR_MESSAGE};
use support_admin_client::ApiError;
use test_utils::{
    mapped_status_strategy, raw_message_strategy, token_strategy, unmapped_status_strategy,
};

proptest! {
    /// Every status yields a non-empty user message, whatever the backend
    /// said.
    #[test]
    fn prop_user_message_is_total(
        status in prop_oneof![mapped_status_strategy(), unmapped_status_strategy()],
        raw in prop_oneof![Just(String::new()), raw_message_strategy()],
    ) {
        let message = user_message_for_status(status, &raw);
        prop_assert!(!message.trim().is_empty());
    }

    /// Mapped statuses never leak the backend's technical message into the
    /// user-facing string.
    #[test]
    fn prop_mapped_statuses_never_leak_raw(
        status in mapped_status_strategy(),
        raw in token_strategy(),
    ) {
        // Token-shaped raw messages stand in for content that must not be
        // shown to users.
        prop_assert!(!user_message_for_status(status, &raw).contains(&raw));
    }

    /// Unmapped statuses with a blank raw message fall back to the generic
    /// string.
    #[test]
    fn prop_blank_raw_falls_back(status in unmapped_status_strategy()) {
        prop_assert_eq!(user_message_for_status(status, ""), GENERIC_ERROR_MESSAGE);
    }

    /// A status error's user message always matches the classifier applied
    /// to the same parts.
    #[test]
    fn prop_error_and_classifier_agree(
        status in mapped_status_strategy(),
        raw in raw_message_strategy(),
    ) {
        let err = ApiError::status(status, raw.clone(), None);
        prop_assert_eq!(err.user_message(), user_message_for_status(status, &raw));
    }
}
