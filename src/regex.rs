use log::warn;

use crate::ast::parser::Parser;
use crate::ast::Ast;
use crate::automata::compiler::Compiler;
use crate::automata::nfa::Nfa;
use crate::errors::Error;
use crate::executor::{Executor, ExecutorType, DEFAULT_STEP_LIMIT};

/// A compiled pattern. Matching borrows it immutably, so one `Regex` can be
/// shared between threads and reused for any number of subjects.
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    ast: Ast,
    nfa: Nfa,
    executor: Executor,
}

impl Regex {
    pub fn new(pat: &str) -> Result<Regex, Error> {
        RegexBuilder::new(pat).build()
    }

    /// Whether the whole of `s` is in the language of the pattern.
    ///
    /// A backtracking regex that runs out of steps answers with the memoized
    /// search instead.
    pub fn is_match(&self, s: &str) -> bool {
        match self.try_is_match(s) {
            Ok(is_match) => is_match,
            Err(err) => {
                warn!("`{}`: {}, retrying with memoization", self.pattern, err);
                Executor::new(ExecutorType::Memoized)
                    .matches(&self.nfa, s)
                    .unwrap_or(false)
            }
        }
    }

    pub fn try_is_match(&self, s: &str) -> Result<bool, Error> {
        self.executor.matches(&self.nfa, s)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }
}

/// Configures how a [`Regex`] is matched.
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    executor: ExecutorType,
    step_limit: usize,
}

impl RegexBuilder {
    pub fn new(pat: &str) -> RegexBuilder {
        RegexBuilder {
            pattern: pat.to_owned(),
            executor: ExecutorType::default(),
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    pub fn executor(&mut self, executor: ExecutorType) -> &mut RegexBuilder {
        self.executor = executor;
        self
    }

    /// Steps the backtracking executor may take per match.
    pub fn step_limit(&mut self, step_limit: usize) -> &mut RegexBuilder {
        self.step_limit = step_limit;
        self
    }

    pub fn build(&self) -> Result<Regex, Error> {
        let ast = Parser::new(self.pattern.clone()).parse()?;
        let nfa = Compiler::new().compile(&ast);
        Ok(Regex {
            pattern: self.pattern.clone(),
            ast,
            nfa,
            executor: Executor::new(self.executor).with_step_limit(self.step_limit),
        })
    }
}
