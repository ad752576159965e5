use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use regex_table::{ExecutorType, RegexBuilder};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Executor {
    Backtrack,
    Memoized,
}

impl From<Executor> for ExecutorType {
    fn from(value: Executor) -> Self {
        match value {
            Executor::Backtrack => ExecutorType::Backtrack,
            Executor::Memoized => ExecutorType::Memoized,
        }
    }
}

/// Checks whether each subject, as a whole, matches a pattern.
#[derive(Debug, Parser)]
#[command(name = "regex_table", version)]
struct Args {
    /// Pattern made of literals, `(`, `)`, `|`, `*`, `+` and `?`.
    pattern: String,

    /// Strings to match against the pattern.
    subjects: Vec<String>,

    #[arg(long, value_enum, default_value = "memoized")]
    executor: Executor,

    /// Steps the backtracking executor may take per subject.
    #[arg(long)]
    step_limit: Option<usize>,

    /// Print the syntax tree of the pattern.
    #[arg(long)]
    ast: bool,

    /// Print the transitions and final states of the automaton.
    #[arg(long)]
    nfa: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut builder = RegexBuilder::new(&args.pattern);
    builder.executor(args.executor.into());
    if let Some(limit) = args.step_limit {
        builder.step_limit(limit);
    }

    let regex = match builder.build() {
        Ok(regex) => regex,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if args.ast {
        println!("{}", regex.ast());
    }
    if args.nfa {
        println!("{}", regex.nfa());
    }
    for subject in &args.subjects {
        println!("{}: {}", subject, regex.is_match(subject));
    }
    ExitCode::SUCCESS
}
