//! Core traits for marksafe conversion rules.
//!
//! An HTML-to-Markdown engine walks the HTML tree and, for each element, asks its
//! registered rules whether they want to produce the Markdown for it. This crate
//! provides the small capability interfaces shared by such rules:
//!
//! - [`Element`] - read-only view of an element (tag name and attribute lookup)
//! - [`HtmlElement`] - an owned element, handy for tests and the CLI
//! - [`Rule`] - predicate and transform pair implemented by each rule
//! - [`Rules`] - ordered, first-match dispatch over a set of rules
//!
//! # Example
//!
//! ```
//! use marksafe_converters_core::{Element, HtmlElement, Rule, Rules};
//!
//! struct Shout;
//!
//! impl Rule for Shout {
//!     fn name(&self) -> &'static str {
//!         "shout"
//!     }
//!
//!     fn matches(&self, element: &dyn Element) -> bool {
//!         element.is("h1")
//!     }
//!
//!     fn transform(&self, element: &dyn Element) -> Option<String> {
//!         Some(element.attr_or("title", "").to_uppercase())
//!     }
//! }
//!
//! let rules = Rules::new().with(Shout);
//! let heading = HtmlElement::new("h1").with_attr("title", "hello");
//! assert_eq!(rules.apply(&heading).as_deref(), Some("HELLO"));
//! ```

mod element;
mod rule;

pub use element::{Element, HtmlElement};
pub use rule::{Rule, Rules};
