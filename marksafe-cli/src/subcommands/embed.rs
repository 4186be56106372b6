//! Run an element through the embed rules.
//!
//! ## Input
//!
//! Either flags describing an `<iframe>`, or a JSON element on stdin:
//!
//! ```json
//! { "tag": "iframe", "attributes": { "src": "https://www.youtube.com/embed/abc123", "title": "Demo" } }
//! ```
//!
//! ## Output
//!
//! The Markdown replacement on stdout, or nothing when no rule applies.
//!
//! ## Usage:
//!
//! ```bash
//! marksafe embed --src https://www.youtube.com/embed/abc123 --title Demo
//! echo '{"tag":"iframe","attributes":{"src":"https://www.youtube.com/embed/abc123"}}' | marksafe embed --stdin
//! ```

use std::io::{self, Read, Write};

use clap::Args as ClapArgs;
use marksafe_converters_core::{Element, HtmlElement};
use marksafe_converters_markdown::default_rules;

use crate::error::Error;

/// Convert an embedded element (e.g. a `YouTube` iframe) to Markdown
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Iframe source URL
    #[arg(long, conflicts_with = "stdin", required_unless_present = "stdin")]
    pub src: Option<String>,

    /// Iframe title, used as the image alt text
    #[arg(long, conflicts_with = "stdin")]
    pub title: Option<String>,

    /// Read a JSON element from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Build an `iframe` element from the `--src` and `--title` flags.
fn iframe_from_flags(args: &Args) -> HtmlElement {
    let mut element = HtmlElement::new("iframe");
    if let Some(src) = &args.src {
        element.set_attr("src", src.as_str());
    }
    if let Some(title) = &args.title {
        element.set_attr("title", title.as_str());
    }
    element
}

fn parse_element<R: Read>(reader: R) -> Result<HtmlElement, Error> {
    Ok(serde_json::from_reader(reader)?)
}

/// The Markdown replacement for `element`, if any rule applies.
fn convert(element: &HtmlElement) -> Option<String> {
    default_rules().apply(element)
}

pub fn run(args: &Args) -> Result<(), Error> {
    let element = if args.stdin {
        parse_element(io::stdin().lock())?
    } else {
        iframe_from_flags(args)
    };

    match convert(&element) {
        Some(markdown) => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{markdown}")?;
            stdout.flush()?;
        }
        None => tracing::info!(tag = element.tag_name(), "no rule applies, nothing to print"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        args: Args,
    }

    #[test]
    fn test_flags_build_youtube_markdown() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "marksafe",
            "--src",
            "https://www.youtube.com/embed/abc123?x=1",
            "--title",
            "Demo",
        ])?;
        assert_eq!(
            convert(&iframe_from_flags(&cli.args)).as_deref(),
            Some(
                "[![Demo](https://img.youtube.com/vi/abc123/0.jpg)](https://www.youtube.com/watch?v=abc123)"
            )
        );
        Ok(())
    }

    #[rstest]
    #[case::src_is_required_without_stdin(&["--title", "Demo"])]
    #[case::src_conflicts_with_stdin(&["--stdin", "--src", "https://www.youtube.com/embed/abc123"])]
    #[case::title_conflicts_with_stdin(&["--stdin", "--title", "Demo"])]
    fn test_rejected_arguments(#[case] argv: &[&str]) {
        let argv = std::iter::once("marksafe").chain(argv.iter().copied());
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[rstest]
    #[case::youtube(
        "https://www.youtube.com/embed/abc123?x=1",
        Some("[![](https://img.youtube.com/vi/abc123/0.jpg)](https://www.youtube.com/watch?v=abc123)")
    )]
    #[case::watch_page("https://www.youtube.com/watch?v=abc123", None)]
    #[case::other_provider("https://player.vimeo.com/video/42", None)]
    fn test_src_flag_without_title(
        #[case] src: &str,
        #[case] expected: Option<&str>,
    ) -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["marksafe", "--src", src])?;
        assert_eq!(convert(&iframe_from_flags(&cli.args)).as_deref(), expected);
        Ok(())
    }

    #[test]
    fn test_json_element() -> Result<(), Error> {
        let json = r#"{"tag": "iframe", "attributes": {"src": "https://www.youtube.com/embed/xyz", "title": "Talk"}}"#;
        let element = parse_element(json.as_bytes())?;
        assert_eq!(
            convert(&element).as_deref(),
            Some("[![Talk](https://img.youtube.com/vi/xyz/0.jpg)](https://www.youtube.com/watch?v=xyz)")
        );
        Ok(())
    }

    #[test]
    fn test_json_non_youtube_element_converts_to_nothing() -> Result<(), Error> {
        let element = parse_element(r#"{"tag": "iframe", "attributes": {"src": "https://example.com"}}"#.as_bytes())?;
        assert_eq!(convert(&element), None);
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_element("not json".as_bytes()),
            Err(Error::Element(_))
        ));
    }
}
