use std::collections::HashSet;

use log::warn;

use crate::automata::nfa::{Nfa, StatePtr};
use crate::errors::Error;

/// Backtracking budget used when none is configured.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutorType {
    /// Depth first search over `(state, position)` pairs without memory of
    /// the pairs already explored. Patterns with nested closures can take
    /// exponential time, so the search is bounded by a step budget.
    Backtrack,
    /// The same search, skipping pairs that were already explored.
    #[default]
    Memoized,
}

#[derive(Clone, Copy, Debug)]
pub struct Executor {
    typ: ExecutorType,
    step_limit: usize,
}

impl Executor {
    pub fn new(typ: ExecutorType) -> Executor {
        Executor {
            typ,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    pub fn with_step_limit(mut self, step_limit: usize) -> Executor {
        self.step_limit = step_limit;
        self
    }

    /// Whether `nfa` accepts the whole of `s`. Only the backtracking
    /// executor can fail, when it runs out of steps.
    pub fn matches(&self, nfa: &Nfa, s: &str) -> Result<bool, Error> {
        let chars: Vec<char> = s.chars().collect();
        match self.typ {
            ExecutorType::Backtrack => BacktrackExecutor::new(nfa, self.step_limit).matches(&chars),
            ExecutorType::Memoized => Ok(MemoizedExecutor::new(nfa).matches(&chars)),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Executor::new(ExecutorType::default())
    }
}

/// Pushes the successors of `(state, at)` onto `stack`.
fn step(nfa: &Nfa, s: &[char], state: StatePtr, at: usize, stack: &mut Vec<(StatePtr, usize)>) {
    for t in nfa.transitions_from(state) {
        match t.label {
            None => stack.push((t.dst, at)),
            Some(c) if s.get(at) == Some(&c) => stack.push((t.dst, at + 1)),
            Some(_) => {}
        }
    }
}

struct BacktrackExecutor<'a> {
    nfa: &'a Nfa,
    step_limit: usize,
    stack: Vec<(StatePtr, usize)>,
}

impl BacktrackExecutor<'_> {
    fn new(nfa: &Nfa, step_limit: usize) -> BacktrackExecutor<'_> {
        BacktrackExecutor {
            nfa,
            step_limit,
            stack: vec![],
        }
    }

    fn matches(&mut self, s: &[char]) -> Result<bool, Error> {
        self.stack.push((0, 0));
        let mut steps = 0;
        while let Some((state, at)) = self.stack.pop() {
            if at == s.len() && self.nfa.is_final(state) {
                return Ok(true);
            }
            steps += 1;
            if steps > self.step_limit {
                warn!("backtracking gave up after {} steps", self.step_limit);
                return Err(Error::StepLimitExceeded {
                    limit: self.step_limit,
                });
            }
            step(self.nfa, s, state, at, &mut self.stack);
        }
        Ok(false)
    }
}

struct MemoizedExecutor<'a> {
    nfa: &'a Nfa,
    stack: Vec<(StatePtr, usize)>,
    visited: HashSet<(StatePtr, usize)>,
}

impl MemoizedExecutor<'_> {
    fn new(nfa: &Nfa) -> MemoizedExecutor<'_> {
        MemoizedExecutor {
            nfa,
            stack: vec![],
            visited: HashSet::new(),
        }
    }

    fn matches(&mut self, s: &[char]) -> bool {
        self.stack.push((0, 0));
        while let Some((state, at)) = self.stack.pop() {
            if !self.visited.insert((state, at)) {
                continue;
            }
            if at == s.len() && self.nfa.is_final(state) {
                return true;
            }
            step(self.nfa, s, state, at, &mut self.stack);
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::{Executor, ExecutorType};
    use crate::ast::parser::Parser;
    use crate::automata::compiler::Compiler;
    use crate::automata::nfa::Nfa;
    use crate::errors::Error;

    fn c(s: &str) -> Nfa {
        let ast = Parser::new(s.to_string())
            .parse()
            .expect("should be valid ast");
        Compiler::new().compile(&ast)
    }

    #[test]
    fn backtrack() {
        executor(Executor::new(ExecutorType::Backtrack));
    }

    #[test]
    fn memoized() {
        executor(Executor::new(ExecutorType::Memoized));
    }

    fn executor(ex: Executor) {
        let m = |p: &Nfa, s: &str| ex.matches(p, s).expect("within budget");

        let p = &c("");
        assert_eq!(true, m(p, ""));
        assert_eq!(false, m(p, "a"));

        let p = &c("ab");
        assert_eq!(true, m(p, "ab"));
        assert_eq!(false, m(p, "abc"));
        assert_eq!(false, m(p, "a"));

        let p = &c("a|b");
        assert_eq!(true, m(p, "a"));
        assert_eq!(true, m(p, "b"));
        assert_eq!(false, m(p, "ab"));
        assert_eq!(false, m(p, ""));

        let p = &c("a*");
        assert_eq!(true, m(p, ""));
        assert_eq!(true, m(p, "a"));
        assert_eq!(true, m(p, "aaaa"));
        assert_eq!(false, m(p, "b"));
        assert_eq!(false, m(p, "ab"));

        let p = &c("a*b");
        assert_eq!(true, m(p, "b"));
        assert_eq!(true, m(p, "ab"));
        assert_eq!(true, m(p, "aaaaaaab"));
        assert_eq!(false, m(p, "abb"));

        let p = &c("a+b");
        assert_eq!(false, m(p, "b"));
        assert_eq!(true, m(p, "ab"));
        assert_eq!(true, m(p, "aaaaaaab"));
        assert_eq!(false, m(p, "abb"));

        let p = &c("a?b");
        assert_eq!(true, m(p, "b"));
        assert_eq!(true, m(p, "ab"));
        assert_eq!(false, m(p, "aab"));
        assert_eq!(false, m(p, "abb"));

        let p = &c("(ab)+");
        assert_eq!(true, m(p, "ab"));
        assert_eq!(true, m(p, "abab"));
        assert_eq!(false, m(p, "a"));
        assert_eq!(false, m(p, "aba"));
        assert_eq!(false, m(p, ""));

        let p = &c("a(bc|cd)*e");
        assert_eq!(true, m(p, "ae"));
        assert_eq!(true, m(p, "abce"));
        assert_eq!(true, m(p, "acde"));
        assert_eq!(true, m(p, "abccdbce"));
        assert_eq!(false, m(p, "abccd"));
        assert_eq!(false, m(p, "abccdef"));

        let p = &c("(a*b)*");
        assert_eq!(true, m(p, ""));
        assert_eq!(true, m(p, "aabab"));
        assert_eq!(false, m(p, "a"));
        assert_eq!(false, m(p, "aba"));

        let p = &c("a*|b");
        assert_eq!(true, m(p, "aaa"));
        assert_eq!(true, m(p, "b"));
        assert_eq!(false, m(p, "ab"));

        let p = &c("é+☃");
        assert_eq!(true, m(p, "éé☃"));
        assert_eq!(false, m(p, "☃"));
    }

    #[test]
    fn memoized_terminates_on_epsilon_cycles() {
        let p = &c("(a*b*)*");
        let ex = Executor::new(ExecutorType::Memoized);
        assert_eq!(Ok(true), ex.matches(p, "abba"));
        assert_eq!(Ok(false), ex.matches(p, "abc"));
    }

    #[test]
    fn backtrack_step_limit() {
        let p = &c("(a*b*)*");
        let ex = Executor::new(ExecutorType::Backtrack).with_step_limit(1_000);
        assert_eq!(
            Err(Error::StepLimitExceeded { limit: 1_000 }),
            ex.matches(p, "abc")
        );
        assert_eq!(Ok(true), ex.matches(p, ""));
    }
}
