//! Command-line wrapper around the `jbig2pdf` library.
//!
//! Collects the output of a multipage JBIG2 symbol compression (a shared
//! symbol table plus numbered page files, or standalone page files) and
//! writes the finished PDF to stdout. All diagnostics go to stderr so they
//! never interleave with the binary output stream.
//!
//! ```text
//! jbig2topdf <basename> > out.pdf      # <basename>.sym + <basename>.[0-9]*
//! jbig2topdf > out.pdf                 # symboltable + page-*
//! jbig2topdf -s <page file>... > out.pdf   # standalone, no symbol table
//! ```

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use jbig2pdf::{Document, Error, PageDescriptor, Result};
use log::{error, warn};

/// How page inputs and the symbol table were specified.
#[derive(Debug)]
enum Mode {
    /// Shared-globals mode: one symbol table referenced by every page.
    Shared {
        symbol_table: String,
        pages: Vec<String>,
    },
    /// Standalone mode: explicit page list, no symbol table.
    Standalone { pages: Vec<String> },
}

fn usage(program: &str, msg: &str) {
    if !msg.is_empty() {
        eprintln!("{}: {}", program, msg);
    }
    eprintln!("Usage: {} [file_basename] > out.pdf", program);
    eprintln!("       {} -s <page file>... > out.pdf", program);
}

/// Whether a fatal error should carry the usage text.
///
/// A missing symbol table or an empty page set usually means the operator
/// pointed the tool at the wrong files, so those get the same treatment as
/// bad arguments.
fn wants_usage(err: &Error) -> bool {
    matches!(err, Error::SymbolTable { .. } | Error::NoPages)
}

/// File names in `dir` that satisfy `matches`.
fn scan_dir(dir: &Path, matches: impl Fn(&str) -> bool) -> io::Result<Vec<String>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if matches(name) {
            found.push(name.to_string());
        }
    }
    Ok(found)
}

/// Page files following the encoder's `<basename>.<digits...>` convention.
///
/// The basename may carry a directory component (`out/scan`); matching
/// happens against file names in that directory, and the returned paths
/// keep the component so they stay readable from the working directory.
fn find_numbered_pages(basename: &str) -> io::Result<Vec<String>> {
    let base = Path::new(basename);
    let parent = base
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    let file_prefix = base
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(basename);
    let prefix = format!("{}.", file_prefix);

    let dir = parent.clone().unwrap_or_else(|| Path::new(".").to_path_buf());
    let names = scan_dir(&dir, |name| {
        name.strip_prefix(&prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    })?;

    Ok(names
        .into_iter()
        .map(|name| match &parent {
            Some(dir) => dir.join(&name).to_string_lossy().into_owned(),
            None => name,
        })
        .collect())
}

fn parse_args(args: &[String]) -> Result<Mode> {
    match args {
        [] => Ok(Mode::Shared {
            symbol_table: "symboltable".to_string(),
            pages: scan_dir(Path::new("."), |name| name.starts_with("page-"))?,
        }),
        [flag, rest @ ..] if flag.as_str() == "-s" => {
            if rest.is_empty() {
                Err(Error::Usage("no page files given".to_string()))
            } else {
                Ok(Mode::Standalone {
                    pages: rest.to_vec(),
                })
            }
        },
        [basename] => Ok(Mode::Shared {
            symbol_table: format!("{}.sym", basename),
            pages: find_numbered_pages(basename)?,
        }),
        _ => Err(Error::Usage("wrong number of arguments".to_string())),
    }
}

/// Build the complete document in memory.
///
/// Fatal errors (unreadable symbol table, no usable pages) surface before
/// anything is written; unreadable or malformed page files are skipped with
/// a diagnostic.
fn build(mode: Mode) -> Result<Vec<u8>> {
    let (symbol_table, mut pages) = match mode {
        Mode::Shared {
            symbol_table,
            pages,
        } => (Some(symbol_table), pages),
        Mode::Standalone { pages } => (None, pages),
    };

    if pages.is_empty() {
        return Err(Error::NoPages);
    }
    // Lexicographic order fixes the page viewing order independent of
    // filesystem enumeration.
    pages.sort();

    let mut doc = Document::new();

    let globals = match symbol_table {
        Some(path) => {
            let data = fs::read(&path).map_err(|source| Error::SymbolTable {
                path: path.clone(),
                source,
            })?;
            Some(doc.add_globals(data))
        },
        None => None,
    };

    for path in &pages {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(source) => {
                warn!(
                    "{}",
                    Error::PageRead {
                        path: path.clone(),
                        source,
                    }
                );
                continue;
            },
        };
        match PageDescriptor::parse(path.as_str(), data) {
            Ok(page) => doc.add_page(&page, globals),
            Err(err) => warn!("skipping page: {}", err),
        }
    }

    if doc.page_count() == 0 {
        return Err(Error::NoPages);
    }

    doc.render()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let program = env::args().next().unwrap_or_else(|| "jbig2topdf".to_string());
    let args: Vec<String> = env::args().skip(1).collect();

    let mode = match parse_args(&args) {
        Ok(mode) => mode,
        Err(err) => {
            usage(&program, &err.to_string());
            return ExitCode::from(2);
        },
    };

    let bytes = match build(mode) {
        Ok(bytes) => bytes,
        Err(err) => {
            if wants_usage(&err) {
                usage(&program, &err.to_string());
            } else {
                error!("{}", err);
            }
            return ExitCode::FAILURE;
        },
    };

    // The whole document is buffered; write it to stdout in one go.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = out.write_all(&bytes).and_then(|()| out.flush()) {
        error!("cannot write output: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
