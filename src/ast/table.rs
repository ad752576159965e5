//! LL(1) table for the pattern grammar.
//!
//! ```text
//! E     -> '(' alt0 ')' mod seq alt | char mod seq alt | ε
//! alt0  -> '(' alt0 ')' mod seq alt | char mod seq alt
//! alt   -> '|' seq0 alt | ε
//! seq0  -> '(' alt0 ')' mod seq     | char mod seq
//! seq   -> '(' alt0 ')' mod seq     | char mod seq | ε
//! mod   -> '*' | '+' | '?' | ε
//! ```
//!
//! Productions interleave [`Symbol::Reduce`] markers with grammar symbols so
//! that the parser builds the tree while it walks the grammar.

use crate::ast::Ast;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonTerminal {
    E,
    Alt0,
    Alt,
    Seq0,
    Seq,
    Mod,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(NonTerminal),
    Reduce(Reduction),
    /// Top of an empty symbol stack.
    Epsilon,
}

/// Tree building step queued on the symbol stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    Literal,
    Concat,
    Alternation,
    Star,
    Plus,
    Opt,
}

impl Reduction {
    /// Applies the reduction to the tree stack. `last` is the most recently
    /// consumed input character. Returns `None` when the stack holds fewer
    /// trees than the reduction needs.
    pub fn apply(self, asts: &mut Vec<Ast>, last: Option<char>) -> Option<()> {
        let ast = match self {
            Reduction::Literal => Ast::literal(last?),
            Reduction::Concat => {
                let a = asts.pop()?;
                let b = asts.pop()?;
                Ast::concat(b, a)
            }
            Reduction::Alternation => {
                let a = asts.pop()?;
                let b = asts.pop()?;
                Ast::alternation(b, a)
            }
            Reduction::Star => Ast::star(asts.pop()?),
            Reduction::Plus => Ast::plus(asts.pop()?),
            Reduction::Opt => Ast::opt(asts.pop()?),
        };
        asts.push(ast);
        Some(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    PopInput,
    Pass,
    /// Replace the stack top with these symbols, first one on top.
    Push(Vec<Symbol>),
    Accept,
    Reject,
    Reduce(Reduction),
}

pub fn is_literal(c: char) -> bool {
    !matches!(c, '(' | ')' | '|' | '*' | '+' | '?')
}

/// The table entry for `top` on `lookahead`, where `None` is the end of the
/// input. Every pair not listed is a [`Action::Reject`].
pub fn action(top: &Symbol, lookahead: Option<char>) -> Action {
    use self::NonTerminal::*;
    use self::Symbol::{NonTerminal as N, Reduce as R, Terminal as T};

    match (*top, lookahead) {
        (T(expected), Some(c)) if expected == c => Action::PopInput,

        (N(E | Alt0), Some('(')) => Action::Push(vec![T('('), N(Alt0), T(')'), N(Mod), N(Seq), N(Alt)]),
        (N(E | Alt0), Some(c)) if is_literal(c) => {
            Action::Push(vec![T(c), R(Reduction::Literal), N(Mod), N(Seq), N(Alt)])
        }
        (N(E), None) => Action::Pass,

        (N(Alt), Some('|')) => Action::Push(vec![T('|'), N(Seq0), R(Reduction::Alternation), N(Alt)]),
        (N(Alt), Some(')') | None) => Action::Pass,

        (N(Seq0), Some('(')) => Action::Push(vec![T('('), N(Alt0), T(')'), N(Mod), N(Seq)]),
        (N(Seq0), Some(c)) if is_literal(c) => {
            Action::Push(vec![T(c), R(Reduction::Literal), N(Mod), N(Seq)])
        }

        (N(Seq), Some('(')) => Action::Push(vec![
            T('('),
            N(Alt0),
            T(')'),
            N(Mod),
            R(Reduction::Concat),
            N(Seq),
        ]),
        (N(Seq), Some(c)) if is_literal(c) => Action::Push(vec![
            T(c),
            R(Reduction::Literal),
            N(Mod),
            R(Reduction::Concat),
            N(Seq),
        ]),
        (N(Seq), Some(')' | '|') | None) => Action::Pass,

        (N(Mod), Some('*')) => Action::Push(vec![T('*'), R(Reduction::Star)]),
        (N(Mod), Some('+')) => Action::Push(vec![T('+'), R(Reduction::Plus)]),
        (N(Mod), Some('?')) => Action::Push(vec![T('?'), R(Reduction::Opt)]),
        (N(Mod), _) => Action::Pass,

        (Symbol::Epsilon, None) => Action::Accept,

        _ => Action::Reject,
    }
}

#[cfg(test)]
mod tests {
    use super::{action, Action, NonTerminal, Reduction, Symbol};
    use crate::ast::Ast;
    use pretty_assertions::assert_eq;

    fn n(nt: NonTerminal) -> Symbol {
        Symbol::NonTerminal(nt)
    }

    #[test]
    fn matching_terminal_pops_input() {
        for c in ['a', '(', ')', '|', '*', '+', '?'] {
            assert_eq!(action(&Symbol::Terminal(c), Some(c)), Action::PopInput);
        }
        assert_eq!(action(&Symbol::Terminal(')'), Some('a')), Action::Reject);
        assert_eq!(action(&Symbol::Terminal(')'), None), Action::Reject);
    }

    #[test]
    fn start_symbol() {
        use NonTerminal::*;
        assert_eq!(
            action(&n(E), Some('x')),
            Action::Push(vec![
                Symbol::Terminal('x'),
                Symbol::Reduce(Reduction::Literal),
                n(Mod),
                n(Seq),
                n(Alt)
            ])
        );
        assert_eq!(action(&n(E), None), Action::Pass);
        for c in [')', '*', '+', '?', '|'] {
            assert_eq!(action(&n(E), Some(c)), Action::Reject);
        }
    }

    #[test]
    fn non_empty_heads_reject_end_of_input() {
        assert_eq!(action(&n(NonTerminal::Alt0), None), Action::Reject);
        assert_eq!(action(&n(NonTerminal::Seq0), None), Action::Reject);
        assert_eq!(action(&n(NonTerminal::Seq0), Some(')')), Action::Reject);
    }

    #[test]
    fn modifiers() {
        use NonTerminal::Mod;
        assert_eq!(
            action(&n(Mod), Some('+')),
            Action::Push(vec![Symbol::Terminal('+'), Symbol::Reduce(Reduction::Plus)])
        );
        for la in [Some('a'), Some('('), Some(')'), Some('|'), None] {
            assert_eq!(action(&n(Mod), la), Action::Pass);
        }
    }

    #[test]
    fn continuations() {
        use NonTerminal::*;
        assert_eq!(action(&n(Alt), Some('a')), Action::Reject);
        assert_eq!(action(&n(Alt), Some('*')), Action::Reject);
        assert_eq!(action(&n(Seq), Some('|')), Action::Pass);
        assert_eq!(action(&n(Seq), Some('?')), Action::Reject);
    }

    #[test]
    fn empty_stack() {
        assert_eq!(action(&Symbol::Epsilon, None), Action::Accept);
        assert_eq!(action(&Symbol::Epsilon, Some(')')), Action::Reject);
        assert_eq!(
            action(&Symbol::Reduce(Reduction::Star), Some('a')),
            Action::Reject
        );
    }

    #[test]
    fn reductions() {
        let mut asts = vec![];
        assert_eq!(Reduction::Literal.apply(&mut asts, Some('a')), Some(()));
        assert_eq!(Reduction::Literal.apply(&mut asts, Some('b')), Some(()));
        assert_eq!(Reduction::Concat.apply(&mut asts, None), Some(()));
        assert_eq!(
            asts,
            vec![Ast::concat(Ast::literal('a'), Ast::literal('b'))]
        );
        assert_eq!(Reduction::Alternation.apply(&mut asts, None), None);
        assert_eq!(Reduction::Literal.apply(&mut asts, None), None);
    }
}
