use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use clap::{ArgAction, Args as ClapArgs};
use marksafe_converters_markdown::{Delimiter, Options};
use rayon::prelude::*;

use crate::error::Error;

/// Escape text so it renders literally when placed in Markdown
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// List of files to escape
    #[arg(conflicts_with = "stdin")]
    pub files: Vec<PathBuf>,

    /// Input from stdin
    #[arg(long, conflicts_with = "files")]
    pub stdin: bool,

    /// Leave spans between START and END untouched
    ///
    /// May be repeated. When two spans begin at the same place, the one given first
    /// wins.
    #[arg(
        short = 'd',
        long = "delimiter",
        num_args = 2,
        value_names = ["START", "END"],
        action = ArgAction::Append
    )]
    pub delimiters: Vec<String>,

    /// Leave backtick code spans untouched (checked after any --delimiter)
    #[arg(long)]
    pub code_spans: bool,
}

/// Build escaping options from the command line.
fn build_options(args: &Args) -> Result<Options, Error> {
    let mut builder = Options::builder();

    for pair in args.delimiters.chunks(2) {
        let [start, end] = pair else {
            return Err(marksafe_converters_markdown::Error::MismatchedDelimiters {
                starts: args.delimiters.len().div_ceil(2),
                ends: args.delimiters.len() / 2,
            }
            .into());
        };
        builder = builder.delimiter(Delimiter::new(start.as_str(), end.as_str())?);
    }

    if args.code_spans {
        builder = builder.code_spans();
    }

    Ok(builder.build())
}

pub fn run(args: &Args) -> Result<(), Error> {
    let options = build_options(args)?;

    if args.stdin {
        let mut input = String::new();
        io::stdin().lock().read_to_string(&mut input)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(options.escape(&input).as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    if args.files.is_empty() {
        return Err(Error::NoInput);
    }

    // Escape in parallel, print in the order the files were given
    let results: Vec<Result<String, Error>> = args
        .files
        .par_iter()
        .map(|path| -> Result<String, Error> {
            let input = fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = input.len(), "escaping file");
            Ok(options.escape(&input).into_owned())
        })
        .collect();

    let mut stdout = io::stdout().lock();
    for result in results {
        stdout.write_all(result?.as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}
