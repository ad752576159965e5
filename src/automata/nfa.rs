use std::fmt;

pub type StatePtr = usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition {
    pub src: StatePtr,
    pub dst: StatePtr,
    /// `None` for an epsilon transition.
    pub label: Option<char>,
}

impl Transition {
    pub fn char(src: StatePtr, dst: StatePtr, c: char) -> Transition {
        Transition {
            src,
            dst,
            label: Some(c),
        }
    }

    pub fn epsilon(src: StatePtr, dst: StatePtr) -> Transition {
        Transition {
            src,
            dst,
            label: None,
        }
    }

    fn shift(self, by: usize) -> Transition {
        Transition {
            src: self.src + by,
            dst: self.dst + by,
            label: self.label,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(c) => write!(f, "{} --{}--> {}", self.src, c, self.dst),
            None => write!(f, "{} --epsilon--> {}", self.src, self.dst),
        }
    }
}

/// Nondeterministic automaton with start state `0` and states
/// `0..state_count`.
///
/// Transitions are kept sorted by `(src, dst)` and final states sorted and
/// deduplicated, so both can be searched with a binary search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Nfa {
    transitions: Vec<Transition>,
    finals: Vec<StatePtr>,
    state_count: usize,
}

impl Nfa {
    pub fn new(
        mut transitions: Vec<Transition>,
        mut finals: Vec<StatePtr>,
        state_count: usize,
    ) -> Nfa {
        transitions.sort_by_key(|t| (t.src, t.dst));
        finals.sort_unstable();
        finals.dedup();
        debug_assert!(transitions
            .iter()
            .all(|t| t.src < state_count && t.dst < state_count));
        debug_assert!(finals.iter().all(|&s| s < state_count));
        Nfa {
            transitions,
            finals,
            state_count,
        }
    }

    /// Single accepting state and no transitions.
    pub fn empty() -> Nfa {
        Nfa::new(vec![], vec![0], 1)
    }

    pub fn char(c: char) -> Nfa {
        Nfa::new(vec![Transition::char(0, 1, c)], vec![1], 2)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn finals(&self) -> &[StatePtr] {
        &self.finals
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn is_final(&self, state: StatePtr) -> bool {
        self.finals.binary_search(&state).is_ok()
    }

    /// All transitions leaving `state`.
    pub fn transitions_from(&self, state: StatePtr) -> &[Transition] {
        let lo = self.transitions.partition_point(|t| t.src < state);
        let len = self.transitions[lo..]
            .iter()
            .take_while(|t| t.src == state)
            .count();
        &self.transitions[lo..lo + len]
    }

    /// Transitions and finals renumbered by `by`.
    pub(crate) fn shifted(&self, by: usize) -> (Vec<Transition>, Vec<StatePtr>) {
        (
            self.transitions.iter().map(|t| t.shift(by)).collect(),
            self.finals.iter().map(|&s| s + by).collect(),
        )
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.transitions {
            writeln!(f, "{}", t)?;
        }
        write!(f, "Final States:")?;
        for s in &self.finals {
            write!(f, " {}", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Nfa, Transition};
    use pretty_assertions::assert_eq;

    fn sample() -> Nfa {
        Nfa::new(
            vec![
                Transition::char(2, 3, 'b'),
                Transition::epsilon(0, 2),
                Transition::char(0, 1, 'a'),
                Transition::epsilon(3, 1),
            ],
            vec![3, 1, 3],
            4,
        )
    }

    #[test]
    fn canonical_order() {
        let nfa = sample();
        assert_eq!(
            nfa.transitions(),
            &[
                Transition::char(0, 1, 'a'),
                Transition::epsilon(0, 2),
                Transition::char(2, 3, 'b'),
                Transition::epsilon(3, 1),
            ]
        );
        assert_eq!(nfa.finals(), &[1, 3]);
    }

    #[test]
    fn transitions_from() {
        let nfa = sample();
        assert_eq!(
            nfa.transitions_from(0),
            &[Transition::char(0, 1, 'a'), Transition::epsilon(0, 2)]
        );
        assert!(nfa.transitions_from(1).is_empty());
        assert_eq!(nfa.transitions_from(3), &[Transition::epsilon(3, 1)]);
        assert!(nfa.transitions_from(7).is_empty());
    }

    #[test]
    fn is_final() {
        let nfa = sample();
        assert!(nfa.is_final(1));
        assert!(nfa.is_final(3));
        assert!(!nfa.is_final(0));
        assert!(Nfa::empty().is_final(0));
    }

    #[test]
    fn display() {
        assert_eq!(
            sample().to_string(),
            "0 --a--> 1\n0 --epsilon--> 2\n2 --b--> 3\n3 --epsilon--> 1\nFinal States: 1 3"
        );
    }
}
