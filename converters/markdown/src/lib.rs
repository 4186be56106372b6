//! Markdown escaping and embed rules for HTML-to-Markdown conversion.
//!
//! An HTML-to-Markdown engine needs two things from this crate:
//!
//! - text nodes must be escaped so their content renders literally, see [`escape`]
//!   and, for text that carries verbatim spans, [`escape_outside`]
//! - elements Markdown cannot express need a rule, see [`YoutubeEmbed`] and
//!   [`default_rules`]
//!
//! # Example
//!
//! ```
//! use marksafe_converters_core::HtmlElement;
//! use marksafe_converters_markdown::{Options, default_rules};
//!
//! let options = Options::builder().code_spans().build();
//! assert_eq!(options.escape("use `a*b` for *emphasis*"), r"use `a*b` for \*emphasis\*");
//!
//! let iframe = HtmlElement::new("iframe")
//!     .with_attr("src", "https://www.youtube.com/embed/abc123")
//!     .with_attr("title", "Demo");
//! assert_eq!(
//!     default_rules().apply(&iframe).as_deref(),
//!     Some("[![Demo](https://img.youtube.com/vi/abc123/0.jpg)](https://www.youtube.com/watch?v=abc123)")
//! );
//! ```

use std::borrow::Cow;

use marksafe_converters_core::Rules;

mod delimited;
mod embed;
mod error;
mod escape;

pub use delimited::{Delimiter, escape_outside, escape_outside_delimiters};
pub use embed::{YoutubeEmbed, youtube_id, youtube_thumbnail_url, youtube_watch_url};
pub use error::Error;
pub use escape::escape;

/// The rules this crate provides, in the order they should be tried.
#[must_use]
pub fn default_rules() -> Rules {
    Rules::new().with(YoutubeEmbed)
}

/// Escaping options.
///
/// Use [`Options::builder()`] to construct an instance.
///
/// # Example
///
/// ```
/// use marksafe_converters_markdown::{Delimiter, Options};
///
/// let options = Options::builder()
///     .delimiter(Delimiter::new("$", "$")?)
///     .build();
/// assert_eq!(options.escape("$a_b$ c_d"), r"$a_b$ c\_d");
/// # Ok::<(), marksafe_converters_markdown::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Options {
    delimiters: Vec<Delimiter>,
}

impl Options {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Get the delimiters whose spans are copied verbatim.
    #[must_use]
    pub fn delimiters(&self) -> &[Delimiter] {
        &self.delimiters
    }

    /// Escape `text` according to these options.
    ///
    /// Without delimiters this is exactly [`escape`].
    #[must_use]
    pub fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.delimiters.is_empty() {
            escape(text)
        } else {
            Cow::Owned(escape_outside(text, &self.delimiters))
        }
    }
}

/// Builder for [`Options`].
///
/// Use [`Options::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct OptionsBuilder {
    delimiters: Vec<Delimiter>,
}

impl OptionsBuilder {
    /// Add a delimiter. Delimiters added first win ties.
    #[must_use]
    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiters.push(delimiter);
        self
    }

    /// Add several delimiters, keeping their order.
    #[must_use]
    pub fn delimiters<I: IntoIterator<Item = Delimiter>>(mut self, delimiters: I) -> Self {
        self.delimiters.extend(delimiters);
        self
    }

    /// Leave backtick code spans untouched.
    #[must_use]
    pub fn code_spans(self) -> Self {
        self.delimiter(Delimiter::code_span())
    }

    /// Build the [`Options`] instance.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            delimiters: self.delimiters,
        }
    }
}
