#![deny(warnings)]

use arboles::{
    read_trees, Grammar, Model, ModelFiles, ParserConfig, SentenceParser, TrainConfig,
};
use color_eyre::eyre::Error;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
enum Args {
    /// Induce a grammar from a file with one bracketed tree per line
    Train {
        trees: PathBuf,

        /// Suffix of the generated grammar, terminals and vocabulary files
        label: String,

        #[structopt(short, long, default_value = ".")]
        output: PathBuf,

        /// Least frequent words collapsed into the sentinel
        #[structopt(long, default_value = "50")]
        uncommon: usize,

        /// Stand-in word for uncommon words, `parse` must be given the same one
        #[structopt(long, default_value = "_UNK_")]
        sentinel: String,
    },
    /// Parse a file with one sentence per line, or interactively
    Parse {
        #[structopt(short, long)]
        grammar: PathBuf,

        #[structopt(short, long)]
        terminals: PathBuf,

        #[structopt(short, long)]
        vocabulary: PathBuf,

        sentences: Option<PathBuf>,

        #[structopt(long, default_value = "S")]
        start: String,

        /// Stand-in word for unknown words, must match the one given to `train`
        #[structopt(long, default_value = "_UNK_")]
        sentinel: String,

        #[structopt(long)]
        max_steps: Option<usize>,

        #[structopt(long)]
        timeout_ms: Option<u64>,
    },
    /// Print a grammar grouped by symbol
    Show {
        grammar: PathBuf,
    },
}

impl Args {
    pub fn run(self) -> Result<(), Error> {
        match self {
            Self::Train { trees, label, output, uncommon, sentinel } => {
                let trees = read_trees(BufReader::new(File::open(trees)?))?;
                let model = Model::train(&trees, &TrainConfig { uncommon, sentinel })?;
                model.save(&ModelFiles::new(&output, &label))?;
            }
            Self::Parse {
                grammar, terminals, vocabulary, sentences,
                start, sentinel, max_steps, timeout_ms,
            } => {
                let files = ModelFiles { grammar, terminals, vocabulary };
                let config = ParserConfig {
                    start,
                    sentinel,
                    max_steps,
                    timeout: timeout_ms.map(Duration::from_millis),
                };
                let (parser, vocabulary) = Model::load(&files)?.into_parser(config)?;
                let parser = SentenceParser::new(parser, vocabulary);
                match sentences {
                    Some(path) => {
                        let report = parser.parse_file(&path)?;
                        println!("parsed: {} failed: {}", report.parsed, report.failed);
                    }
                    None => repl(&parser)?,
                }
            }
            Self::Show { grammar } => {
                let grammar = Grammar::from_reader(BufReader::new(File::open(grammar)?))?;
                print!("{:?}", grammar);
            }
        }

        Ok(())
    }
}

fn repl(parser: &SentenceParser) -> Result<(), Error> {
    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        match rl.readline("~> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match parser.analyze(&line) {
                    Ok((tree, json)) => {
                        tree.print();
                        println!("{}", json);
                    }
                    Err(e) => println!("Parse err: {}", e),
                }
            }
        }
    }
}

fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::from_args();
    args.run()?;

    Ok(())
}
