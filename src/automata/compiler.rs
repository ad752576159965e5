use log::debug;

use crate::{
    ast,
    automata::nfa::{Nfa, StatePtr, Transition},
};

/// Thompson style construction of an [`Nfa`] from an [`ast::Ast`].
///
/// Every fragment keeps its start at state `0` and no fragment has a
/// transition into state `0`. Composition relies on that: alternation merges
/// the starts of its branches, which is only sound when no branch can loop
/// back into its own start.
pub struct Compiler {}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler {}
    }

    pub fn compile(self, ast: &ast::Ast) -> Nfa {
        let nfa = self.c(ast);
        debug!(
            "compiled `{}` into {} states and {} transitions",
            ast,
            nfa.state_count(),
            nfa.transitions().len()
        );
        nfa
    }

    fn c(&self, ast: &ast::Ast) -> Nfa {
        match *ast {
            ast::Ast::Empty => Nfa::empty(),
            ast::Ast::Literal(ref literal) => Nfa::char(literal.char),
            ast::Ast::Concat(ref concat) => self.c_concat(concat.asts()),
            ast::Ast::Alternation(ref alt) => self.c_alternation(alt.asts()),
            ast::Ast::Star(ref star) => self.c_star(&star.ast),
        }
    }

    fn c_concat(&self, asts: &[ast::Ast]) -> Nfa {
        let mut iter = asts.iter().map(|ast| self.c(ast));
        let first = iter.next().unwrap_or_else(Nfa::empty);
        iter.fold(first, |lhs, rhs| concat(&lhs, &rhs))
    }

    fn c_alternation(&self, asts: &[ast::Ast]) -> Nfa {
        let mut iter = asts.iter().map(|ast| self.c(ast));
        let first = iter.next().unwrap_or_else(Nfa::empty);
        iter.fold(first, |lhs, rhs| alternate(&lhs, &rhs))
    }

    fn c_star(&self, ast: &ast::Ast) -> Nfa {
        star(&self.c(ast))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}

/// `rhs` is laid out after `lhs`, and every final state of `lhs` gets an
/// epsilon transition into the start of `rhs`.
pub fn concat(lhs: &Nfa, rhs: &Nfa) -> Nfa {
    let offset = lhs.state_count();
    let (rhs_transitions, finals) = rhs.shifted(offset);

    let mut transitions = lhs.transitions().to_vec();
    transitions.extend(rhs_transitions);
    transitions.extend(lhs.finals().iter().map(|&s| Transition::epsilon(s, offset)));

    Nfa::new(transitions, finals, offset + rhs.state_count())
}

/// The start of `rhs` is merged into the start of `lhs`; its remaining
/// states follow those of `lhs`.
pub fn alternate(lhs: &Nfa, rhs: &Nfa) -> Nfa {
    let offset = lhs.state_count() - 1;
    let renumber = |s: StatePtr| if s == 0 { 0 } else { s + offset };

    let mut transitions = lhs.transitions().to_vec();
    transitions.extend(rhs.transitions().iter().map(|t| Transition {
        src: renumber(t.src),
        dst: renumber(t.dst),
        label: t.label,
    }));

    let mut finals = lhs.finals().to_vec();
    finals.extend(rhs.finals().iter().map(|&s| renumber(s)));

    Nfa::new(transitions, finals, offset + rhs.state_count())
}

/// A fresh accepting start state leads into `nfa`, and every final state of
/// `nfa` loops back to the start of `nfa`.
pub fn star(nfa: &Nfa) -> Nfa {
    let (mut transitions, mut finals) = nfa.shifted(1);
    transitions.push(Transition::epsilon(0, 1));
    transitions.extend(
        finals
            .iter()
            .filter(|&&s| s != 1)
            .map(|&s| Transition::epsilon(s, 1)),
    );
    finals.push(0);

    Nfa::new(transitions, finals, nfa.state_count() + 1)
}
