//! Proptest generators for domain values.

use proptest::prelude::*;

/// Statuses with a fixed entry in the classifier table (0 denotes a
/// transport failure).
pub const MAPPED_STATUSES: [u16; 12] = [400, 401, 403, 404, 409, 422, 429, 500, 502, 503, 504, 0];

/// Strategy over statuses with a fixed classifier entry.
pub fn mapped_status_strategy() -> impl Strategy<Value = u16> {
    prop::sample::select(MAPPED_STATUSES.to_vec())
}

/// Strategy over HTTP statuses outside the classifier table.
pub fn unmapped_status_strategy() -> impl Strategy<Value = u16> {
    (100u16..600).prop_filter("statuses outside the classifier table", |s| {
        !MAPPED_STATUSES.contains(s)
    })
}

/// Printable technical messages, trim-stable and never blank.
pub fn raw_message_strategy() -> impl Strategy<Value = String> {
    "[!-~]([ -~]{0,58}[!-~])?"
}

/// Opaque bearer token strings.
pub fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{16,64}"
}

/// Plausible account email addresses.
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{2,10}", "[a-z]{3,10}")
        .prop_map(|(local, domain)| format!("{local}@{domain}.example.com"))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_unmapped_statuses_avoid_the_table(status in unmapped_status_strategy()) {
            prop_assert!(!MAPPED_STATUSES.contains(&status));
        }

        #[test]
        fn prop_raw_messages_are_trim_stable(message in raw_message_strategy()) {
            prop_assert_eq!(message.trim(), message.as_str());
            prop_assert!(!message.is_empty());
        }

        #[test]
        fn prop_emails_have_one_at_sign(email in email_strategy()) {
            prop_assert_eq!(email.matches('@').count(), 1);
        }
    }
}
