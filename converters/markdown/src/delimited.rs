//! Escaping that leaves delimited spans alone.
//!
//! Text that already contains Markdown constructs which must survive verbatim
//! (code spans being the usual case) is split on start/end marker pairs: prose
//! between spans goes through [`escape`], the spans themselves are copied as is.

use crate::{Error, escape};

/// A start/end marker pair delimiting a span that must not be escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    start: String,
    end: String,
}

impl Delimiter {
    /// Create a delimiter pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDelimiter`] if either marker is empty.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, Error> {
        let (start, end) = (start.into(), end.into());
        if start.is_empty() || end.is_empty() {
            return Err(Error::EmptyDelimiter { start, end });
        }
        Ok(Self { start, end })
    }

    /// Backtick code span delimiter.
    #[must_use]
    pub fn code_span() -> Self {
        Self {
            start: "`".to_string(),
            end: "`".to_string(),
        }
    }

    /// The start marker.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The end marker.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// Escape `text` except inside spans delimited by `starts[i]` ... `ends[i]`.
///
/// # Errors
///
/// Returns [`Error::MismatchedDelimiters`] if the lists differ in length, and
/// [`Error::EmptyDelimiter`] if any marker is empty.
///
/// # Example
///
/// ```
/// use marksafe_converters_markdown::escape_outside_delimiters;
///
/// let escaped = escape_outside_delimiters("a *b* `c*d` e", &["`"], &["`"])?;
/// assert_eq!(escaped, r"a \*b\* `c*d` e");
/// # Ok::<(), marksafe_converters_markdown::Error>(())
/// ```
pub fn escape_outside_delimiters<S: AsRef<str>>(
    text: &str,
    starts: &[S],
    ends: &[S],
) -> Result<String, Error> {
    if starts.len() != ends.len() {
        return Err(Error::MismatchedDelimiters {
            starts: starts.len(),
            ends: ends.len(),
        });
    }

    let delimiters = starts
        .iter()
        .zip(ends)
        .map(|(start, end)| Delimiter::new(start.as_ref(), end.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(escape_outside(text, &delimiters))
}

/// Escape `text` except inside spans delimited by any of `delimiters`.
///
/// The text is scanned left to right. At each step the earliest start marker wins;
/// when two start at the same offset the one listed first wins. Everything before
/// it is escaped, then the span up to and including the paired end marker is
/// copied verbatim. A start marker without a matching end marker does not open a
/// verbatim span: the marker itself is kept and the rest of the text is escaped.
#[must_use]
pub fn escape_outside(text: &str, delimiters: &[Delimiter]) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    let mut rest = text;
    let mut starts = StartMarkers::new(text, delimiters);

    // Offsets come from `str::find`, so every split below lands on a char boundary.
    while let Some((position, delimiter)) = starts.earliest(rest, text.len() - rest.len()) {
        let (before, from_start) = rest.split_at(position);
        let (start, after_start) = from_start.split_at(delimiter.start.len());
        result.push_str(&escape(before));
        result.push_str(start);

        let Some(end_position) = after_start.find(&delimiter.end) else {
            tracing::trace!(
                start = delimiter.start(),
                end = delimiter.end(),
                "unterminated delimited span, escaping the remainder"
            );
            result.push_str(&escape(after_start));
            return result;
        };

        let (verbatim, remainder) = after_start.split_at(end_position + delimiter.end.len());
        tracing::trace!(length = verbatim.len(), "copying delimited span verbatim");
        result.push_str(verbatim);
        rest = remainder;
    }

    result.push_str(&escape(rest));
    result
}

/// Next occurrence of each start marker, as an offset into the whole text.
///
/// A marker is searched for again only once the scan has moved past its cached
/// occurrence, and never again once it has no occurrence left.
struct StartMarkers<'d> {
    delimiters: &'d [Delimiter],
    next: Vec<Option<usize>>,
}

impl<'d> StartMarkers<'d> {
    fn new(text: &str, delimiters: &'d [Delimiter]) -> Self {
        Self {
            delimiters,
            next: delimiters
                .iter()
                .map(|delimiter| text.find(&delimiter.start))
                .collect(),
        }
    }

    /// Earliest start marker in `rest`, which begins at `offset` in the whole text.
    /// Ties go to the delimiter listed first. The returned position is relative
    /// to `rest`.
    fn earliest(&mut self, rest: &str, offset: usize) -> Option<(usize, &'d Delimiter)> {
        let mut earliest: Option<(usize, &'d Delimiter)> = None;
        for (next, delimiter) in self.next.iter_mut().zip(self.delimiters) {
            if next.is_some_and(|position| position < offset) {
                *next = rest.find(&delimiter.start).map(|position| position + offset);
            }
            if let Some(position) = *next
                && earliest.is_none_or(|(best, _)| position < best)
            {
                earliest = Some((position, delimiter));
            }
        }
        earliest.map(|(position, delimiter)| (position - offset, delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_span_kept_verbatim() -> Result<(), Error> {
        let escaped = escape_outside_delimiters("a *b* `c*d` e*f*", &["`"], &["`"])?;
        assert_eq!(escaped, r"a \*b\* `c*d` e\*f\*");
        Ok(())
    }

    #[test]
    fn test_no_delimiters_behaves_like_escape() -> Result<(), Error> {
        let escaped = escape_outside_delimiters::<&str>("# *x*", &[], &[])?;
        assert_eq!(escaped, r"\# \*x\*");
        Ok(())
    }

    #[test]
    fn test_no_start_marker_in_text() {
        assert_eq!(
            escape_outside("just *text*", &[Delimiter::code_span()]),
            r"just \*text\*"
        );
    }

    #[test]
    fn test_unterminated_span_escapes_remainder() {
        assert_eq!(
            escape_outside("a `b*c", &[Delimiter::code_span()]),
            r"a `b\*c"
        );
    }

    #[test]
    fn test_multiple_spans() {
        assert_eq!(
            escape_outside("`*` and `_` or _", &[Delimiter::code_span()]),
            r"`*` and `_` or \_"
        );
    }

    #[test]
    fn test_earliest_start_marker_wins() -> Result<(), Error> {
        let escaped = escape_outside_delimiters("x [[*]] `*` *", &["`", "[["], &["`", "]]"])?;
        assert_eq!(escaped, r"x [[*]] `*` \*");
        Ok(())
    }

    #[test]
    fn test_tie_goes_to_first_listed() -> Result<(), Error> {
        // Both markers start at offset 0.
        let escaped = escape_outside_delimiters("```a`*```_", &["```", "`"], &["```", "`"])?;
        assert_eq!(escaped, r"```a`*```\_");

        let escaped = escape_outside_delimiters("```a`*```_", &["`", "```"], &["`", "```"])?;
        assert_eq!(escaped, r"```a`\*```\_");
        Ok(())
    }

    #[test]
    fn test_marker_inside_a_span_is_not_reused() -> Result<(), Error> {
        // The first `$` sits inside the backtick span; the next one opens a span.
        let escaped = escape_outside_delimiters("`$` $a*$ *", &["`", "$"], &["`", "$"])?;
        assert_eq!(escaped, r"`$` $a*$ \*");
        Ok(())
    }

    #[test]
    fn test_many_spans_with_an_absent_marker() -> Result<(), Error> {
        let text = "`*` _ ".repeat(50);
        let escaped = escape_outside_delimiters(&text, &["[[", "`"], &["]]", "`"])?;
        assert_eq!(escaped, r"`*` \_ ".repeat(50));
        Ok(())
    }

    #[test]
    fn test_multibyte_text_around_spans() {
        assert_eq!(
            escape_outside("é*ü `日*本` ß_", &[Delimiter::code_span()]),
            r"é\*ü `日*本` ß\_"
        );
    }

    #[test]
    fn test_multibyte_markers() -> Result<(), Error> {
        let delimiter = Delimiter::new("«", "»")?;
        assert_eq!(escape_outside("*«*»*", &[delimiter]), r"\*«*»\*");
        Ok(())
    }

    #[test]
    fn test_mismatched_lengths_fail_fast() {
        assert_eq!(
            escape_outside_delimiters("text", &["`", "$"], &["`"]),
            Err(Error::MismatchedDelimiters { starts: 2, ends: 1 })
        );
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        assert_eq!(
            escape_outside_delimiters("text", &[""], &["`"]),
            Err(Error::EmptyDelimiter {
                start: String::new(),
                end: "`".to_string(),
            })
        );
        assert!(Delimiter::new("`", "").is_err());
    }
}
