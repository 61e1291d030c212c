//! Parsing of ASCII and LaTeX Boolean formulas.
//!
//! Parsing runs in stages:
//!
//! 1. [`normalize`] rewrites LaTeX commands and Unicode connectives into the
//!    canonical ASCII operator characters (`\overline{X}` becomes `!(X)`).
//! 2. [`tokenize`] splits the canonical string into tokens.
//! 3. Empty groups `()` collapse to the constant `0`.
//! 4. Every operator is checked for a left and right operand.
//! 5. Implicit multiplication: `AB`, `A(B+C)`, `(A)(B)`, `A!B` gain an explicit `*`.
//! 6. Parentheses are checked for balance.
//! 7. A precedence-climbing descent builds the [`Expr`].
//!
//! Canonical operators, loosest first:
//!
//! | Precedence | ASCII | Meaning |
//! |------------|-------|---------|
//! | 1 | `+` `#` | OR, NOR |
//! | 2 | `^` `=` | XOR, XNOR |
//! | 3 | `*` `@` | AND, NAND |
//! | 4 | `!` | NOT (prefix) |
//!
//! All binary operators associate to the left.

use std::fmt;

use crate::ast::{Expr, Op};
use crate::error::{ParseError, ParseResult};

const DISALLOWED_LITERALS: [&str; 2] = ["undefined", "null"];

/// Parse a formula into an expression.
///
/// ```
/// use boolmin::parse::parse;
///
/// let e = parse("\\overline{A \\land B} + C").unwrap();
/// assert_eq!(e.to_string(), "!(A*B)+C");
/// ```
pub fn parse(input: &str) -> ParseResult<Expr> {
    let normalized = normalize(input)?;
    let tokens = tokenize(&normalized)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let tokens = collapse_empty_groups(tokens);
    check_operands(&tokens)?;
    let tokens = insert_implicit_and(tokens);
    check_balance(&tokens)?;
    Parser::new(tokens).parse()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Rewrite LaTeX and Unicode notation into canonical ASCII operators.
///
/// Whitespace is preserved as a token separator.
pub fn normalize(input: &str) -> ParseResult<String> {
    for literal in DISALLOWED_LITERALS {
        if input.contains(literal) {
            return Err(ParseError::DisallowedLiteral {
                literal: literal.to_string(),
                input: input.to_string(),
            });
        }
    }
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    Normalizer { chars: &chars, pos: 0, input }.run(&mut out)?;
    Ok(out)
}

struct Normalizer<'a> {
    chars: &'a [char],
    pos: usize,
    input: &'a str,
}

impl Normalizer<'_> {
    fn run(&mut self, out: &mut String) -> ParseResult<()> {
        while let Some(c) = self.next() {
            match c {
                '\\' => self.command(out)?,
                '_' => self.subscript(out)?,
                '{' | '[' => out.push('('),
                '}' | ']' => out.push(')'),
                '&' | '∧' | '·' | '⋅' | '×' => out.push('*'),
                '|' | '∨' => out.push('+'),
                '~' | '¬' => out.push('!'),
                '⊕' | '⊻' => out.push('^'),
                '⊙' | '↔' | '≡' => out.push('='),
                '↑' | '⊼' => out.push('@'),
                '↓' | '⊽' => out.push('#'),
                c if c.is_whitespace() => out.push(' '),
                c => out.push(c),
            }
        }
        Ok(())
    }

    fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::UnexpectedEnd {
            processed: self.input.to_string(),
        }
    }

    fn command(&mut self, out: &mut String) -> ParseResult<()> {
        let Some(first) = self.next() else {
            return Err(self.unexpected_end());
        };
        if !first.is_ascii_alphabetic() {
            match first {
                ',' | ';' | ':' | '!' | ' ' => {}
                '{' | '(' => out.push('('),
                '}' | ')' => out.push(')'),
                '&' => out.push('*'),
                '|' => out.push('+'),
                _ => {
                    return Err(ParseError::UnrecognizedCommand {
                        command: first.to_string(),
                        input: self.input.to_string(),
                    })
                }
            }
            return Ok(());
        }

        let mut name = String::from(first);
        while let Some(c) = self.peek().filter(|c| c.is_ascii_alphabetic()) {
            name.push(c);
            self.pos += 1;
        }

        match name.as_str() {
            "land" | "wedge" | "cdot" | "times" | "and" => out.push('*'),
            "lor" | "vee" | "or" => out.push('+'),
            "lnot" | "neg" | "sim" => out.push('!'),
            "oplus" | "veebar" | "xor" => out.push('^'),
            "odot" | "equiv" | "leftrightarrow" | "Leftrightarrow" | "iff" | "xnor" => out.push('='),
            "uparrow" | "barwedge" | "nand" => out.push('@'),
            "downarrow" | "nor" => out.push('#'),
            "top" => out.push('1'),
            "bot" => out.push('0'),
            "quad" | "qquad" => out.push(' '),
            "left" | "right" => self.delimiter(out)?,
            "overline" | "bar" | "overbar" => {
                let argument = self.argument()?;
                out.push_str("!(");
                out.push_str(&normalize_nested(&argument, self.input)?);
                out.push(')');
            }
            "text" | "mathrm" | "mathit" | "mathbf" | "mathsf" | "operatorname" => {
                let argument = self.argument()?;
                out.push_str(&normalize_nested(&argument, self.input)?);
            }
            _ => {
                return Err(ParseError::UnrecognizedCommand {
                    command: name,
                    input: self.input.to_string(),
                })
            }
        }
        Ok(())
    }

    // `\left(`, `\right]`, `\left.`
    fn delimiter(&mut self, out: &mut String) -> ParseResult<()> {
        match self.next() {
            Some('(' | '[') => out.push('('),
            Some(')' | ']') => out.push(')'),
            Some('.') => {}
            Some('\\') => match self.next() {
                Some('{') => out.push('('),
                Some('}') => out.push(')'),
                Some(c) => {
                    return Err(ParseError::UnrecognizedCommand {
                        command: c.to_string(),
                        input: self.input.to_string(),
                    })
                }
                None => return Err(self.unexpected_end()),
            },
            Some(c) => out.push(c),
            None => return Err(self.unexpected_end()),
        }
        Ok(())
    }

    // A braced group `{...}` with nesting, or a single non-space character.
    fn argument(&mut self) -> ParseResult<String> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        match self.next() {
            Some('{') => {
                let mut depth = 1usize;
                let mut argument = String::new();
                loop {
                    let Some(c) = self.next() else {
                        return Err(ParseError::UnbalancedParentheses {
                            position: self.pos,
                            processed: self.input.to_string(),
                        });
                    };
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Ok(argument);
                            }
                        }
                        _ => {}
                    }
                    argument.push(c);
                }
            }
            Some('\\') => {
                // `\bar\top`: take the whole command as the argument.
                let mut argument = String::from('\\');
                while let Some(c) = self.peek().filter(|c| c.is_ascii_alphabetic()) {
                    argument.push(c);
                    self.pos += 1;
                }
                Ok(argument)
            }
            Some(c) => Ok(c.to_string()),
            None => Err(self.unexpected_end()),
        }
    }

    // `x_1`, `x_{12}` -> `x1`, `x12`
    fn subscript(&mut self, out: &mut String) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.pos += 1;
                out.push(c);
                Ok(())
            }
            Some('{') => {
                let start = self.pos;
                let argument = self.argument()?;
                if !argument.is_empty() && argument.chars().all(|c| c.is_ascii_digit()) {
                    out.push_str(&argument);
                    Ok(())
                } else {
                    Err(ParseError::IllegalToken {
                        token: format!("_{{{}}}", argument),
                        position: start,
                        processed: out.clone(),
                    })
                }
            }
            _ => Err(ParseError::IllegalToken {
                token: "_".to_string(),
                position: self.pos,
                processed: out.clone(),
            }),
        }
    }
}

fn normalize_nested(argument: &str, input: &str) -> ParseResult<String> {
    let chars: Vec<char> = argument.chars().collect();
    let mut out = String::with_capacity(argument.len());
    Normalizer {
        chars: &chars,
        pos: 0,
        input,
    }
    .run(&mut out)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Var(String),
    Const(bool),
    Not,
    Op(Op),
    LParen,
    RParen,
}

impl TokenKind {
    fn ends_operand(&self) -> bool {
        matches!(self, TokenKind::Var(_) | TokenKind::Const(_) | TokenKind::RParen)
    }

    fn starts_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Var(_) | TokenKind::Const(_) | TokenKind::LParen | TokenKind::Not
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Var(name) => f.write_str(name),
            TokenKind::Const(value) => f.write_str(if *value { "1" } else { "0" }),
            TokenKind::Not => f.write_str("!"),
            TokenKind::Op(op) => write!(f, "{}", op.symbol()),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset in the normalized string.
    pub pos: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.kind.to_string()).collect()
}

/// Split a normalized string into tokens.
///
/// A variable is an ASCII letter followed by any number of digits.
pub fn tokenize(normalized: &str) -> ParseResult<Vec<Token>> {
    let chars: Vec<char> = normalized.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        let kind = match c {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '!' => TokenKind::Not,
            '0' => TokenKind::Const(false),
            '1' => TokenKind::Const(true),
            c if c.is_ascii_alphabetic() => {
                let start = pos;
                let mut name = String::from(c);
                while let Some(&d) = chars.get(pos + 1).filter(|d| d.is_ascii_digit()) {
                    name.push(d);
                    pos += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Var(name),
                    pos: start,
                });
                pos += 1;
                continue;
            }
            c => match Op::ALL.into_iter().find(|op| op.symbol() == c) {
                Some(op) => TokenKind::Op(op),
                None => {
                    return Err(ParseError::IllegalToken {
                        token: c.to_string(),
                        position: pos,
                        processed: normalized.to_string(),
                    })
                }
            },
        };
        tokens.push(Token { kind, pos });
        pos += 1;
    }

    Ok(tokens)
}

fn collapse_empty_groups(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.kind == TokenKind::RParen && out.last().is_some_and(|t| t.kind == TokenKind::LParen) {
            let open = out.pop().map_or(token.pos, |t| t.pos);
            out.push(Token {
                kind: TokenKind::Const(false),
                pos: open,
            });
        } else {
            out.push(token);
        }
    }
    out
}

fn check_operands(tokens: &[Token]) -> ParseResult<()> {
    for (i, token) in tokens.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| &tokens[j]);
        let next = tokens.get(i + 1);
        let operator = match &token.kind {
            TokenKind::Op(op) => op.symbol(),
            TokenKind::Not => '!',
            _ => continue,
        };
        let left_ok = match token.kind {
            TokenKind::Not => true,
            _ => prev.is_some_and(|t| t.kind.ends_operand()),
        };
        let right_ok = next.is_some_and(|t| t.kind.starts_operand());
        if !left_ok || !right_ok {
            let from = if left_ok { i } else { i.saturating_sub(1) };
            let to = if right_ok { i + 1 } else { (i + 2).min(tokens.len()) };
            return Err(ParseError::MissingOperand {
                operator,
                fragment: tokens_to_string(&tokens[from..to]),
                processed: tokens_to_string(tokens),
            });
        }
    }
    Ok(())
}

fn insert_implicit_and(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        if out.last().is_some_and(|prev| prev.kind.ends_operand()) && token.kind.starts_operand() {
            out.push(Token {
                kind: TokenKind::Op(Op::And),
                pos: token.pos,
            });
        }
        out.push(token);
    }
    out
}

fn check_balance(tokens: &[Token]) -> ParseResult<()> {
    let mut open: Vec<usize> = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::LParen => open.push(token.pos),
            TokenKind::RParen => {
                if open.pop().is_none() {
                    return Err(ParseError::UnbalancedParentheses {
                        position: token.pos,
                        processed: tokens_to_string(tokens),
                    });
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(position) => Err(ParseError::UnbalancedParentheses {
            position,
            processed: tokens_to_string(tokens),
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Descent
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    fn parse(mut self) -> ParseResult<Expr> {
        let expr = self.parse_binary(1)?;
        match self.tokens.get(self.index) {
            Some(token) => Err(self.illegal(token)),
            None => Ok(expr),
        }
    }

    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.peek_op().filter(|op| op.precedence() >= min_precedence) {
            self.index += 1;
            let rhs = self.parse_binary(op.precedence() + 1)?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.tokens.get(self.index) else {
            return Err(ParseError::UnexpectedEnd {
                processed: tokens_to_string(&self.tokens),
            });
        };
        match &token.kind {
            TokenKind::Not => {
                self.index += 1;
                Ok(Expr::not(self.parse_unary()?))
            }
            TokenKind::LParen => {
                self.index += 1;
                let inner = self.parse_binary(1)?;
                match self.tokens.get(self.index) {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.index += 1;
                        Ok(inner)
                    }
                    Some(token) => Err(self.illegal(token)),
                    None => Err(ParseError::UnexpectedEnd {
                        processed: tokens_to_string(&self.tokens),
                    }),
                }
            }
            TokenKind::Var(name) => {
                let expr = Expr::var(name);
                self.index += 1;
                Ok(expr)
            }
            TokenKind::Const(value) => {
                let expr = Expr::constant(*value);
                self.index += 1;
                Ok(expr)
            }
            _ => Err(self.illegal(token)),
        }
    }

    fn peek_op(&self) -> Option<Op> {
        match self.tokens.get(self.index)?.kind {
            TokenKind::Op(op) => Some(op),
            _ => None,
        }
    }

    fn illegal(&self, token: &Token) -> ParseError {
        ParseError::IllegalToken {
            token: token.to_string(),
            position: token.pos,
            processed: tokens_to_string(&self.tokens),
        }
    }
}
