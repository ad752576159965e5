use crate::ast::table::{self, Action, NonTerminal, Symbol};
use crate::ast::{self, Ast, ErrorKind, Position, Span};
use log::trace;
use std::result;

type Result<T> = result::Result<T, ast::Error>;

/// Table driven parser: a symbol stack walks the grammar in
/// [`table::action`] while a second stack collects the trees built by the
/// reductions queued between grammar symbols.
pub struct Parser {
    p: String,
    chars: Vec<(usize, char)>,
    cursor: usize,
    last: Option<char>,
    symbols: Vec<Symbol>,
    asts: Vec<Ast>,
    groups: Vec<Position>,
}

impl Parser {
    pub fn new(p: String) -> Self {
        let chars = p.char_indices().collect();
        Parser {
            p,
            chars,
            cursor: 0,
            last: None,
            symbols: vec![Symbol::NonTerminal(NonTerminal::E)],
            asts: vec![],
            groups: vec![],
        }
    }

    fn pattern(&self) -> &str {
        &self.p
    }

    fn lookahead(&self) -> Option<char> {
        self.chars.get(self.cursor).map(|&(_, c)| c)
    }

    fn pos(&self) -> Position {
        Position::new(
            self.chars
                .get(self.cursor)
                .map_or(self.p.len(), |&(offset, _)| offset),
        )
    }

    fn span_char(&self) -> Span {
        let start = self.pos();
        match self.lookahead() {
            Some(c) => Span::new(start, Position::new(start.offset + c.len_utf8())),
            None => Span::point(start),
        }
    }

    fn error(&self, span: Span, kind: ErrorKind) -> ast::Error {
        ast::Error::new(kind, self.pattern(), span)
    }

    fn top(&self) -> Symbol {
        self.symbols.last().copied().unwrap_or(Symbol::Epsilon)
    }

    pub fn parse(mut self) -> Result<Ast> {
        loop {
            let top = self.top();
            let action = match top {
                Symbol::Reduce(reduction) => Action::Reduce(reduction),
                _ => table::action(&top, self.lookahead()),
            };
            trace!("{:?} on {:?} at {}: {:?}", top, self.lookahead(), self.cursor, action);
            self.symbols.pop();

            match action {
                Action::PopInput => self.bump(),
                Action::Pass => {}
                Action::Push(symbols) => self.symbols.extend(symbols.into_iter().rev()),
                Action::Reduce(reduction) => {
                    if reduction.apply(&mut self.asts, self.last).is_none() {
                        return Err(self.error(self.span_char(), ErrorKind::Unexpected));
                    }
                }
                Action::Accept => return Ok(self.asts.pop().unwrap_or(Ast::Empty)),
                Action::Reject => return Err(self.reject(top)),
            }
        }
    }

    fn bump(&mut self) {
        match self.lookahead() {
            Some('(') => self.groups.push(self.pos()),
            Some(')') => {
                self.groups.pop();
            }
            _ => {}
        }
        self.last = self.lookahead();
        self.cursor += 1;
    }

    /// Names the reason `top` could not continue on the current lookahead.
    fn reject(&self, top: Symbol) -> ast::Error {
        use self::NonTerminal::{Alt0, Seq0};

        let kind = match (top, self.lookahead()) {
            (_, Some('*' | '+' | '?')) => ErrorKind::RepetitionMissing,
            (Symbol::NonTerminal(Seq0), _) | (_, Some('|')) => ErrorKind::AlternationMissing,
            (Symbol::NonTerminal(Alt0), Some(')')) => ErrorKind::GroupEmpty,
            (Symbol::Terminal(')') | Symbol::NonTerminal(Alt0), None) => {
                let open = self.groups.last().copied().unwrap_or(self.pos());
                let span = Span::new(open, Position::new(open.offset + 1));
                return self.error(span, ErrorKind::GroupUnclosed);
            }
            (_, Some(')')) => ErrorKind::GroupUnopened,
            _ => ErrorKind::Unexpected,
        };
        self.error(self.span_char(), kind)
    }
}
