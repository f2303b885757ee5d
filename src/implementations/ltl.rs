use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{ BenchError, BenchResult };
use crate::models::formula::normalize;

/// Future-time LTL over propositional atoms
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ltl {
    True,
    False,
    Atom(String),
    Not(Box<Ltl>),
    And(Box<Ltl>, Box<Ltl>),
    Or(Box<Ltl>, Box<Ltl>),
    Implies(Box<Ltl>, Box<Ltl>),
    Iff(Box<Ltl>, Box<Ltl>),
    Next(Box<Ltl>),
    Finally(Box<Ltl>),
    Globally(Box<Ltl>),
    Until(Box<Ltl>, Box<Ltl>),
    Release(Box<Ltl>, Box<Ltl>),
    WeakUntil(Box<Ltl>, Box<Ltl>),
}

impl Ltl {
    pub fn atom(name: &str) -> Ltl {
        Ltl::Atom(name.to_string())
    }

    pub fn and(self, other: Ltl) -> Ltl {
        Ltl::And(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Ltl {
        Ltl::Not(Box::new(self))
    }
}

impl fmt::Display for Ltl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ltl::True => write!(f, "true"),
            Ltl::False => write!(f, "false"),
            Ltl::Atom(a) => write!(f, "{}", a),
            Ltl::Not(e) => write!(f, "!{}", e),
            Ltl::And(p, q) => write!(f, "({} & {})", p, q),
            Ltl::Or(p, q) => write!(f, "({} | {})", p, q),
            Ltl::Implies(p, q) => write!(f, "({} -> {})", p, q),
            Ltl::Iff(p, q) => write!(f, "({} <-> {})", p, q),
            Ltl::Next(e) => write!(f, "X {}", e),
            Ltl::Finally(e) => write!(f, "F {}", e),
            Ltl::Globally(e) => write!(f, "G {}", e),
            Ltl::Until(p, q) => write!(f, "({} U {})", p, q),
            Ltl::Release(p, q) => write!(f, "({} R {})", p, q),
            Ltl::WeakUntil(p, q) => write!(f, "({} W {})", p, q),
        }
    }
}

fn keyword_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"\bglobally\b", "G"),
            (r"\bfinally\b", "F"),
            (r"\buntil\b", "U"),
            (r"\bimply\b", "->"),
            (r"\bequal\b", "<->"),
            (r"\band\b", "&"),
            (r"\bor\b", "|"),
        ]
            .into_iter()
            .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
            .collect()
    })
}

/// Rewrite word operators into symbols and collapse whitespace
pub fn normalize_keywords(formula: &str) -> String {
    let mut out = formula.to_string();
    for (pattern, replacement) in keyword_rules() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    Not,
    And,
    Or,
    Implies,
    Iff,
    Next,
    Finally,
    Globally,
    Until,
    Release,
    WeakUntil,
    True,
    False,
    Ident(String),
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<Chars<'_>> = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c.is_ascii_alphabetic() || c == '_' {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                    word.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(match word.as_str() {
                "X" => Token::Next,
                "F" => Token::Finally,
                "G" => Token::Globally,
                "U" => Token::Until,
                "R" | "V" => Token::Release,
                "W" => Token::WeakUntil,
                "true" | "TRUE" | "True" => Token::True,
                "false" | "FALSE" | "False" => Token::False,
                _ => Token::Ident(word),
            });
            continue;
        }

        if c.is_ascii_digit() {
            let mut number = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    number.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(match number.as_str() {
                "1" => Token::True,
                "0" => Token::False,
                _ => {
                    return Err(format!("numeric literal `{}` is not a proposition", number));
                }
            });
            continue;
        }

        chars.next();
        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '!' | '~' => Token::Not,
            '&' => {
                if chars.peek() == Some(&'&') {
                    chars.next();
                }
                Token::And
            }
            '|' => {
                if chars.peek() == Some(&'|') {
                    chars.next();
                }
                Token::Or
            }
            '/' if chars.peek() == Some(&'\\') => {
                chars.next();
                Token::And
            }
            '\\' if chars.peek() == Some(&'/') => {
                chars.next();
                Token::Or
            }
            '-' | '=' if chars.peek() == Some(&'>') => {
                chars.next();
                Token::Implies
            }
            '[' if chars.peek() == Some(&']') => {
                chars.next();
                Token::Globally
            }
            '<' => {
                match chars.next() {
                    Some('>') => Token::Finally,
                    Some('-' | '=') if chars.peek() == Some(&'>') => {
                        chars.next();
                        Token::Iff
                    }
                    _ => {
                        return Err("expected `<->`, `<=>` or `<>`".to_string());
                    }
                }
            }
            other => {
                return Err(format!("unexpected character `{}`", other));
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn iff(&mut self) -> Result<Ltl, String> {
        let mut lhs = self.implies()?;
        while self.eat(&Token::Iff) {
            let rhs = self.implies()?;
            lhs = Ltl::Iff(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn implies(&mut self) -> Result<Ltl, String> {
        let lhs = self.or()?;
        if self.eat(&Token::Implies) {
            let rhs = self.implies()?;
            return Ok(Ltl::Implies(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn or(&mut self) -> Result<Ltl, String> {
        let mut lhs = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            lhs = Ltl::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Ltl, String> {
        let mut lhs = self.binary_temporal()?;
        while self.eat(&Token::And) {
            let rhs = self.binary_temporal()?;
            lhs = Ltl::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn binary_temporal(&mut self) -> Result<Ltl, String> {
        let lhs = self.unary()?;
        let build: fn(Box<Ltl>, Box<Ltl>) -> Ltl = match self.peek() {
            Some(Token::Until) => Ltl::Until,
            Some(Token::Release) => Ltl::Release,
            Some(Token::WeakUntil) => Ltl::WeakUntil,
            _ => {
                return Ok(lhs);
            }
        };
        self.advance();
        let rhs = self.binary_temporal()?;
        Ok(build(Box::new(lhs), Box::new(rhs)))
    }

    fn unary(&mut self) -> Result<Ltl, String> {
        let build: fn(Box<Ltl>) -> Ltl = match self.peek() {
            Some(Token::Not) => Ltl::Not,
            Some(Token::Next) => Ltl::Next,
            Some(Token::Finally) => Ltl::Finally,
            Some(Token::Globally) => Ltl::Globally,
            _ => {
                return self.primary();
            }
        };
        self.advance();
        let operand = self.unary()?;
        Ok(build(Box::new(operand)))
    }

    fn primary(&mut self) -> Result<Ltl, String> {
        match self.advance() {
            Some(Token::True) => Ok(Ltl::True),
            Some(Token::False) => Ok(Ltl::False),
            Some(Token::Ident(name)) => Ok(Ltl::Atom(name)),
            Some(Token::LParen) => {
                let inner = self.iff()?;
                if !self.eat(&Token::RParen) {
                    return Err("missing closing parenthesis".to_string());
                }
                Ok(inner)
            }
            Some(token) => Err(format!("unexpected token {:?}", token)),
            None => Err("unexpected end of formula".to_string()),
        }
    }
}

/// Parse an LTL formula after keyword and symbol normalization
pub fn parse(formula: &str) -> BenchResult<Ltl> {
    let prepared = normalize_keywords(&normalize(formula));
    let parse_error = |message: String| BenchError::FormulaParseError {
        formula: formula.to_string(),
        message,
    };

    let tokens = tokenize(&prepared).map_err(parse_error)?;
    if tokens.is_empty() {
        return Err(parse_error("empty formula".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let ltl = parser.iff().map_err(parse_error)?;
    if let Some(token) = parser.peek() {
        return Err(parse_error(format!("trailing input at {:?}", token)));
    }
    Ok(ltl)
}
