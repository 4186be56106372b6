//! Conversion rules and first-match dispatch.

use crate::Element;

/// A conversion rule for a kind of element.
///
/// The engine first asks [`Rule::matches`]; if it returns `true` the engine calls
/// [`Rule::transform`]. Returning `None` from `transform` means the rule does not
/// apply to this particular element after all, and the engine should try the next
/// rule or fall back to its default handling. It is not an error.
pub trait Rule {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this rule is interested in the element at all (usually a tag check).
    fn matches(&self, element: &dyn Element) -> bool;

    /// Produce the Markdown replacement for the element, or decline with `None`.
    fn transform(&self, element: &dyn Element) -> Option<String>;
}

/// Ordered set of rules, tried in insertion order.
#[derive(Default)]
pub struct Rules {
    rules: Vec<Box<dyn Rule + Send + Sync>>,
}

impl Rules {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, builder style.
    #[must_use]
    pub fn with<R: Rule + Send + Sync + 'static>(mut self, rule: R) -> Self {
        self.push(rule);
        self
    }

    /// Append a rule.
    pub fn push<R: Rule + Send + Sync + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the element through the rules and return the first replacement produced.
    ///
    /// Rules whose predicate does not match are skipped, as are rules that match
    /// but decline. `None` means no rule applied.
    pub fn apply(&self, element: &dyn Element) -> Option<String> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(element))
            .find_map(|rule| {
                let replacement = rule.transform(element);
                if replacement.is_some() {
                    tracing::debug!(
                        rule = rule.name(),
                        tag = element.tag_name(),
                        "rule produced replacement"
                    );
                } else {
                    tracing::trace!(rule = rule.name(), tag = element.tag_name(), "rule declined");
                }
                replacement
            })
    }
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlElement;

    /// Replaces `<hr>` unconditionally.
    struct Divider;

    impl Rule for Divider {
        fn name(&self) -> &'static str {
            "divider"
        }

        fn matches(&self, element: &dyn Element) -> bool {
            element.is("hr")
        }

        fn transform(&self, _element: &dyn Element) -> Option<String> {
            Some("---".to_string())
        }
    }

    /// Replaces `<a>` only when it carries an `href`.
    struct Anchor;

    impl Rule for Anchor {
        fn name(&self) -> &'static str {
            "anchor"
        }

        fn matches(&self, element: &dyn Element) -> bool {
            element.is("a")
        }

        fn transform(&self, element: &dyn Element) -> Option<String> {
            element.attr("href").map(|href| format!("<{href}>"))
        }
    }

    /// Matches `<a>` too, but always as a last resort.
    struct Fallback;

    impl Rule for Fallback {
        fn name(&self) -> &'static str {
            "fallback"
        }

        fn matches(&self, element: &dyn Element) -> bool {
            element.is("a")
        }

        fn transform(&self, _element: &dyn Element) -> Option<String> {
            Some("link".to_string())
        }
    }

    #[test]
    fn test_empty_rules_decline_everything() {
        let rules = Rules::new();
        assert!(rules.is_empty());
        assert_eq!(rules.apply(&HtmlElement::new("hr")), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = Rules::new().with(Anchor).with(Fallback);
        let element = HtmlElement::new("a").with_attr("href", "https://example.com");
        assert_eq!(
            rules.apply(&element).as_deref(),
            Some("<https://example.com>")
        );
    }

    #[test]
    fn test_declining_rule_defers_to_next() {
        let rules = Rules::new().with(Anchor).with(Fallback);
        assert_eq!(
            rules.apply(&HtmlElement::new("a")).as_deref(),
            Some("link")
        );
    }

    #[test]
    fn test_unmatched_tag_is_declined() {
        let rules = Rules::new().with(Divider).with(Anchor);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.apply(&HtmlElement::new("p")), None);
    }

    #[test]
    fn test_debug_lists_rule_names() {
        let rules = Rules::new().with(Divider).with(Anchor);
        assert_eq!(format!("{rules:?}"), r#"["divider", "anchor"]"#);
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_apply_logs_the_rule_used() {
        let rules = Rules::new().with(Divider);
        assert_eq!(rules.apply(&HtmlElement::new("hr")).as_deref(), Some("---"));
        assert!(logs_contain("rule produced replacement"));
        assert!(logs_contain("divider"));
    }
}
