//! Subscription filter evaluation.
//!
//! Filter expressions are accepted and stored on subscriptions, but no filter
//! language is implemented yet: every envelope matches.

use crate::broker::message::Envelope;

/// Returns whether `envelope` passes `expression`. Always `true`.
pub fn matches(_envelope: &Envelope, _expression: &str) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::message::Attributes;

    #[test]
    fn test_any_expression_matches() {
        let env = Envelope::new("t", "{}".into(), Attributes::new());
        assert!(matches(&env, "attributes.kind = \"alert\""));
        assert!(matches(&env, ""));
    }
}
