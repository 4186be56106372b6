use std::{io, path::PathBuf};

use miette::Diagnostic;

/// Errors surfaced by the `marksafe` binary.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub(crate) enum Error {
    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(marksafe::read), help("check that the file exists and is UTF-8 text"))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(marksafe::io))]
    Io(#[from] io::Error),

    #[error("invalid element JSON: {0}")]
    #[diagnostic(
        code(marksafe::element),
        help(r#"expected an object like {{"tag": "iframe", "attributes": {{"src": "..."}}}}"#)
    )]
    Element(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(marksafe::delimiter))]
    Markdown(#[from] marksafe_converters_markdown::Error),

    #[error("nothing to do: pass at least one file, or --stdin")]
    #[diagnostic(code(marksafe::usage))]
    NoInput,
}
