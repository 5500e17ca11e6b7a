//! Syntax tree for path expressions such as `$.store.book[0].title`
//!
//! The tree is produced by a small recursive descent parser and rendered back
//! in canonical form: identifiers use dot notation, anything else is quoted in
//! brackets. Re-parsing a rendered tree yields the same tree.

use crate::error::{Error, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// A single step of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `.name` or `['name']`
    Child(String),
    /// `[n]`, negative values count from the end
    Index(i64),
    /// `[start:end]`
    Slice { start: Option<i64>, end: Option<i64> },
    /// `.*` or `[*]`
    Wildcard,
    /// `..name`
    Descendant(String),
    /// `..*`
    DescendantWildcard,
}

/// A parsed path expression rooted at `$`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ast {
    segments: Vec<Segment>,
}

impl Ast {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn parse(input: &str) -> Result<Self> {
        Parser::new(input).parse()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Whether the expression selects at most one value
    pub fn is_definite(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Child(_) | Segment::Index(_)))
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Child(name) if is_identifier(name) => write!(f, ".{name}")?,
                Segment::Child(name) => write!(f, "['{}']", quote(name))?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Slice { start, end } => {
                    f.write_str("[")?;
                    if let Some(start) = start {
                        write!(f, "{start}")?;
                    }
                    f.write_str(":")?;
                    if let Some(end) = end {
                        write!(f, "{end}")?;
                    }
                    f.write_str("]")?;
                }
                Segment::Wildcard => f.write_str(".*")?,
                Segment::Descendant(name) if is_identifier(name) => write!(f, "..{name}")?,
                Segment::Descendant(name) => write!(f, "..['{}']", quote(name))?,
                Segment::DescendantWildcard => f.write_str("..*")?,
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn quote(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<Ast> {
        if self.input.trim().is_empty() {
            return Err(self.error("empty path expression", 0));
        }
        self.expect('$')?;
        let mut segments = Vec::new();
        while let Some((pos, ch)) = self.chars.next() {
            let segment = match ch {
                '.' => self.parse_dot()?,
                '[' => self.parse_bracket()?,
                other => {
                    return Err(self.error(format!("unexpected '{other}', expected '.' or '['"), pos))
                }
            };
            segments.push(segment);
        }
        Ok(Ast::new(segments))
    }

    fn parse_dot(&mut self) -> Result<Segment> {
        match self.peek() {
            Some('.') => {
                self.chars.next();
                match self.peek() {
                    Some('*') => {
                        self.chars.next();
                        Ok(Segment::DescendantWildcard)
                    }
                    Some('[') => {
                        let pos = self.position();
                        self.chars.next();
                        match self.parse_bracket()? {
                            Segment::Child(name) => Ok(Segment::Descendant(name)),
                            Segment::Wildcard => Ok(Segment::DescendantWildcard),
                            _ => Err(self.error("'..' must be followed by a name", pos)),
                        }
                    }
                    _ => Ok(Segment::Descendant(self.parse_identifier()?)),
                }
            }
            Some('*') => {
                self.chars.next();
                Ok(Segment::Wildcard)
            }
            _ => Ok(Segment::Child(self.parse_identifier()?)),
        }
    }

    fn parse_bracket(&mut self) -> Result<Segment> {
        let segment = match self.peek() {
            Some('\'') | Some('"') => Segment::Child(self.parse_quoted()?),
            Some('*') => {
                self.chars.next();
                Segment::Wildcard
            }
            _ => self.parse_index_or_slice()?,
        };
        self.expect(']')?;
        Ok(segment)
    }

    fn parse_index_or_slice(&mut self) -> Result<Segment> {
        let start = self.parse_integer()?;
        if self.peek() != Some(':') {
            let pos = self.position();
            return start
                .map(Segment::Index)
                .ok_or_else(|| self.error("expected index, slice, '*' or quoted name", pos));
        }
        self.chars.next();
        let end = self.parse_integer()?;
        Ok(Segment::Slice { start, end })
    }

    fn parse_integer(&mut self) -> Result<Option<i64>> {
        let begin = self.position();
        let mut digits = String::new();
        if self.peek() == Some('-') {
            digits.push('-');
            self.chars.next();
        }
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.chars.next();
        }
        if digits.is_empty() {
            return Ok(None);
        }
        digits
            .parse::<i64>()
            .map(Some)
            .map_err(|_| self.error(format!("invalid integer '{digits}'"), begin))
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let begin = self.position();
        let mut name = String::new();
        while let Some(c) = self
            .peek()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        {
            name.push(c);
            self.chars.next();
        }
        if name.is_empty() {
            return Err(self.error("expected a property name", begin));
        }
        Ok(name)
    }

    fn parse_quoted(&mut self) -> Result<String> {
        let (begin, quote) = self
            .chars
            .next()
            .ok_or_else(|| self.error("expected a quote", self.input.len()))?;
        let mut name = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => name.push(escaped),
                    None => break,
                },
                c if c == quote => return Ok(name),
                c => name.push(c),
            }
        }
        Err(self.error("unterminated quoted name", begin))
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((pos, c)) => Err(self.error(format!("expected '{expected}', found '{c}'"), pos)),
            None => Err(self.error(format!("expected '{expected}', found end of input"), self.input.len())),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn position(&mut self) -> usize {
        self.chars.peek().map(|&(pos, _)| pos).unwrap_or(self.input.len())
    }

    fn error(&self, message: impl Into<String>, position: usize) -> Error {
        Error::Ast {
            message: message.into(),
            position,
            input: self.input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_forms() {
        let ast = Ast::parse("$.store.book[0]['first name'][1:3]..price.*").unwrap();
        assert_eq!(
            ast.segments(),
            &[
                Segment::Child("store".to_string()),
                Segment::Child("book".to_string()),
                Segment::Index(0),
                Segment::Child("first name".to_string()),
                Segment::Slice { start: Some(1), end: Some(3) },
                Segment::Descendant("price".to_string()),
                Segment::Wildcard,
            ]
        );
    }

    #[test]
    fn test_canonical_rendering() {
        let ast = Ast::parse("$['store'][\"it's\"][-1][:2]..*[*]").unwrap();
        assert_eq!(ast.to_text(), "$.store['it\\'s'][-1][:2]..*.*");
        assert_eq!(Ast::parse(&ast.to_text()).unwrap(), ast);
    }

    #[test]
    fn test_root_only() {
        let ast = Ast::parse("$").unwrap();
        assert!(ast.segments().is_empty());
        assert!(ast.is_definite());
        assert_eq!(ast.to_text(), "$");
    }

    #[test]
    fn test_errors_report_position() {
        match Ast::parse("$.a[x]").unwrap_err() {
            Error::Ast { position, .. } => assert_eq!(position, 4),
            other => panic!("unexpected error: {other}"),
        }
        assert!(Ast::parse("a.b").is_err());
        assert!(Ast::parse("").is_err());
        assert!(Ast::parse("$.a['b").is_err());
        assert!(Ast::parse("$.").is_err());
    }
}
