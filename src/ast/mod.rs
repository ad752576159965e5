use std::fmt;
use thiserror::Error as ThisError;

pub mod parser;
pub mod table;

/// Syntax tree produced by [`parser::Parser`].
///
/// `Concat` and `Alternation` always hold at least two children and never
/// hold an immediate child of their own kind. Use [`Ast::concat`] and
/// [`Ast::alternation`] to build them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ast {
    Empty,
    Literal(Literal),
    Concat(Concat),
    Alternation(Alternation),
    Star(Star),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub char: char,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Concat {
    pub asts: Vec<Ast>,
}

impl Concat {
    pub fn asts(&self) -> &[Ast] {
        self.asts.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alternation {
    pub asts: Vec<Ast>,
}

impl Alternation {
    pub fn asts(&self) -> &[Ast] {
        self.asts.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Star {
    pub ast: Box<Ast>,
}

impl Ast {
    pub fn literal(c: char) -> Ast {
        Ast::Literal(Literal { char: c })
    }

    /// `lhs` followed by `rhs`, splicing either side that is already a
    /// concatenation.
    pub fn concat(lhs: Ast, rhs: Ast) -> Ast {
        let mut asts = vec![];
        for ast in [lhs, rhs] {
            match ast {
                Ast::Concat(Concat { asts: children }) => asts.extend(children),
                other => asts.push(other),
            }
        }
        Ast::Concat(Concat { asts })
    }

    /// `lhs` or `rhs`, splicing either side that is already an alternation.
    pub fn alternation(lhs: Ast, rhs: Ast) -> Ast {
        let mut asts = vec![];
        for ast in [lhs, rhs] {
            match ast {
                Ast::Alternation(Alternation { asts: children }) => asts.extend(children),
                other => asts.push(other),
            }
        }
        Ast::Alternation(Alternation { asts })
    }

    pub fn star(ast: Ast) -> Ast {
        Ast::Star(Star { ast: Box::new(ast) })
    }

    /// `x+` is sugar for `x x*`.
    pub fn plus(ast: Ast) -> Ast {
        Ast::concat(ast.clone(), Ast::star(ast))
    }

    /// `x?` is sugar for `(|x)`.
    pub fn opt(ast: Ast) -> Ast {
        Ast::alternation(Ast::Empty, ast)
    }
}

/// Renders the tree back into a pattern that parses to the same tree.
///
/// An empty alternation branch only comes from `?`, so each run of them is
/// written as `?` on the branch that follows it.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Ast::Empty => Ok(()),
            Ast::Literal(ref literal) => write!(f, "{}", literal.char),
            Ast::Concat(ref concat) => {
                for ast in concat.asts() {
                    match *ast {
                        Ast::Alternation(_) => write!(f, "({})", ast)?,
                        _ => write!(f, "{}", ast)?,
                    }
                }
                Ok(())
            }
            Ast::Alternation(ref alt) => {
                let mut empties = 0;
                let mut first = true;
                for ast in alt.asts() {
                    if let Ast::Empty = *ast {
                        empties += 1;
                        continue;
                    }
                    if !first {
                        f.write_str("|")?;
                    }
                    first = false;
                    write_optional(f, ast, empties)?;
                    empties = 0;
                }
                Ok(())
            }
            Ast::Star(ref star) => write_operand(f, &star.ast, '*'),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, ast: &Ast, op: char) -> fmt::Result {
    match *ast {
        Ast::Literal(_) => write!(f, "{}{}", ast, op),
        _ => write!(f, "({}){}", ast, op),
    }
}

/// Writes `ast` made optional `depth` times, e.g. `(a?)?` for depth 2.
fn write_optional(f: &mut fmt::Formatter<'_>, ast: &Ast, depth: usize) -> fmt::Result {
    match depth {
        0 => write!(f, "{}", ast),
        1 => write_operand(f, ast, '?'),
        _ => {
            f.write_str("(")?;
            write_optional(f, ast, depth - 1)?;
            f.write_str(")?")
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Position {
    pub offset: usize,
}
impl Position {
    pub fn new(offset: usize) -> Position {
        Position { offset }
    }
}

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn point(pos: Position) -> Span {
        Span {
            start: pos,
            end: pos,
        }
    }

    pub(crate) fn new(start: Position, end: Position) -> Span {
        Span { start, end }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({:?}, {:?})", self.start, self.end)
    }
}

/// A pattern that is not part of the grammar.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{kind} at offset {} in pattern `{pattern}`", .span.start.offset)]
pub struct Error {
    kind: ErrorKind,
    pattern: String,
    span: Span,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, pattern: &str, span: Span) -> Error {
        Error {
            kind,
            pattern: pattern.to_string(),
            span,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ErrorKind {
    #[error("repetition operator without an operand")]
    RepetitionMissing,
    #[error("empty alternation branch")]
    AlternationMissing,
    #[error("unopened group")]
    GroupUnopened,
    #[error("unclosed group")]
    GroupUnclosed,
    #[error("empty group")]
    GroupEmpty,
    #[error("unexpected character")]
    Unexpected,
}
