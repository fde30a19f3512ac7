use std::{path::Path, process::exit, time::Instant};

use clap::Parser as ClapParser;

use nfa2dfa::{parse_instance, Instance, Options, PublicError, Traversal};

/// The command line interface for the converter
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Args {
    /// Expand discovered subsets in discovery order instead of most recent first
    #[arg(long)]
    breadth_first: bool,

    /// Add an explicit non-final sink state so that every state has a transition on every symbol
    #[arg(long)]
    total: bool,

    /// Do not print the constructed automaton, only the verdicts for the words
    #[arg(long, short = 'q')]
    quiet: bool,

    /// The automaton description, followed by the words to check
    file: String,
}

/// Loads the automaton, converts it, and checks the words listed in the file.
fn main() {
    env_logger::init();
    let ts = Instant::now();
    let cli = Args::parse();
    let file = Path::new(&cli.file);
    if !file.exists() {
        log::error!("File not found: {}", cli.file);
        exit(1);
    }

    let opts = convert_options(&cli);
    match run(file, &opts, cli.quiet) {
        Ok(_) => (),
        Err(err) => {
            log::error!("Error: {}", err);
            exit(1);
        }
    };

    log::info!("Done ({}ms).", ts.elapsed().as_millis());
}

fn run(file: &Path, opts: &Options, quiet: bool) -> Result<(), PublicError> {
    let reader = std::io::BufReader::new(std::fs::File::open(file)?);
    let Instance { nfa, words } = parse_instance(reader)?;
    let dfa = nfa.to_dfa_with(opts)?;
    if !quiet {
        println!("{}", dfa);
        println!();
    }
    for word in words {
        println!("{}", if dfa.accepts(&word) { "yes" } else { "no" });
    }
    Ok(())
}

fn convert_options(options: &Args) -> Options {
    let mut opts = Options::default();
    if options.breadth_first {
        opts.traversal = Traversal::BreadthFirst;
    }
    if options.total {
        opts.total = true;
    }
    opts
}
