//! Element view handed to conversion rules.

use std::{collections::BTreeMap, fmt};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

/// Read-only view of an HTML element as seen by a [`Rule`](crate::Rule).
///
/// The conversion engine owns the actual tree; rules only need the tag name and
/// attribute lookup, so that is all this trait exposes.
pub trait Element {
    /// Tag name of the element, e.g. `iframe`.
    fn tag_name(&self) -> &str;

    /// Look up an attribute by name. Returns `None` when the attribute is absent.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Look up an attribute, falling back to `default` when it is absent.
    fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Whether the element has the given tag name (ASCII case-insensitive).
    fn is(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }
}

/// An owned element with a tag name and a set of attributes.
///
/// Attribute names are matched ASCII case-insensitively, as in HTML.
///
/// Deserializes from JSON of the form:
///
/// ```json
/// { "tag": "iframe", "attributes": { "src": "https://www.youtube.com/embed/abc123" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HtmlElement {
    tag: String,
    #[serde(default, deserialize_with = "lowercase_attributes")]
    attributes: BTreeMap<String, String>,
}

/// Deserialize an attribute map the way [`HtmlElement::set_attr`] builds one:
/// names are lowercased and a later duplicate replaces an earlier one.
fn lowercase_attributes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AttributesVisitor;

    impl<'de> Visitor<'de> for AttributesVisitor {
        type Value = BTreeMap<String, String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of attribute names to string values")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut attributes = BTreeMap::new();
            while let Some((name, value)) = map.next_entry::<String, String>()? {
                attributes.insert(name.to_ascii_lowercase(), value);
            }
            Ok(attributes)
        }
    }

    deserializer.deserialize_map(AttributesVisitor)
}

impl HtmlElement {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute, replacing any previous value with the same name.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
    }
}

impl Element for HtmlElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
