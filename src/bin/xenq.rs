//! xenq - query markup files with slash or dot paths
//!
//! ```text
//! xenq customers.xml 'm:customer/email[1]/@addr'
//! xenq --text - .m:customer.name < customers.xml
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use xenpath::{to_xml, Document, Match, ParseOptions, WriterOptions, XenError};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// xenq - evaluate path queries against a markup document
#[derive(Parser, Debug)]
#[command(name = "xenq")]
#[command(version, about = "Evaluate XPath-like paths against a markup document")]
struct Args {
    /// Keep surrounding whitespace in element text
    #[arg(long)]
    no_trim: bool,

    /// Require exactly one match per path
    #[arg(long)]
    one: bool,

    /// Print only the text of each match
    #[arg(long)]
    text: bool,

    /// Write elements on a single line
    #[arg(long)]
    compact: bool,

    /// Input file, or '-' for stdin
    input: PathBuf,

    /// Paths to evaluate, in slash (a/b[1]) or dot (.a.b[0]) syntax
    #[arg(required = true)]
    paths: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xenq: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), XenError> {
    let options = ParseOptions {
        trim_whitespace: !args.no_trim,
    };
    let doc = if args.input.as_os_str() == "-" {
        Document::parse_reader_with(io::stdin().lock(), &options)?
    } else {
        Document::parse_reader_with(File::open(&args.input)?, &options)?
    };
    log::debug!("loaded {} ({} nodes)", args.input.display(), doc.node_count());

    let writer_options = if args.compact {
        WriterOptions::compact()
    } else {
        WriterOptions::default()
    };
    let root = doc.root();
    let mut out = BufWriter::new(io::stdout().lock());

    for path in &args.paths {
        let matches = if args.one {
            vec![root.one(path.as_str())?]
        } else {
            root.all(path.as_str())?
        };
        for m in matches {
            print_match(&mut out, m, args.text, &writer_options)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn print_match(
    out: &mut impl Write,
    m: Match<'_>,
    text_only: bool,
    options: &WriterOptions,
) -> io::Result<()> {
    match m {
        Match::Element(node) if !text_only => writeln!(out, "{}", to_xml(node, options)),
        _ => writeln!(out, "{}", m.text()),
    }
}
