// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! A parser for the parts of a Cadence program flowkit cares about: import
//! declarations and top level composite declarations.
//!
//! Everything else is only tokenized far enough to skip comments and strings and
//! to keep track of nesting, so declarations inside bodies are never mistaken for
//! top level ones.

use crate::address::Address;
use std::{fmt, ops::Range};

/// Where an import points
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImportLocation {
    /// `import "Foo"` or `import Foo from "./Foo.cdc"`
    String(String),
    /// `import Foo from 0x01`
    Address(Address),
    /// `import Crypto`
    Identifier(String),
}

impl fmt::Display for ImportLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportLocation::String(location) => write!(f, "{}", location),
            ImportLocation::Address(address) => write!(f, "{}", address.to_hex_literal()),
            ImportLocation::Identifier(identifier) => write!(f, "{}", identifier),
        }
    }
}

/// One imported name, `Foo` or `Foo as Bar`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportedIdentifier {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportedIdentifier {
    /// The name the import is bound to in the importing program
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for ImportedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} as {}", self.name, alias),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportDeclaration {
    pub identifiers: Vec<ImportedIdentifier>,
    pub location: ImportLocation,
    /// Byte range of the whole declaration in the source
    pub span: Range<usize>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompositeKind {
    Contract,
    Resource,
    Struct,
    Event,
    Enum,
    Attachment,
}

impl CompositeKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "contract" => CompositeKind::Contract,
            "resource" => CompositeKind::Resource,
            "struct" => CompositeKind::Struct,
            "event" => CompositeKind::Event,
            "enum" => CompositeKind::Enum,
            "attachment" => CompositeKind::Attachment,
            _ => return None,
        })
    }
}

/// A top level composite or interface declaration
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Declaration {
    pub kind: CompositeKind,
    pub is_interface: bool,
    pub name: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedProgram {
    pub imports: Vec<ImportDeclaration>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TokenKind {
    Identifier,
    String,
    Number,
    Symbol(char),
}

#[derive(Clone, Debug)]
struct Token<'a> {
    kind: TokenKind,
    /// Literal contents for strings, the raw text otherwise
    text: &'a str,
    span: Range<usize>,
}

impl Token<'_> {
    fn is_identifier(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }
}

fn tokenize(code: &str) -> Result<Vec<Token<'_>>, String> {
    let bytes = code.as_bytes();
    let mut tokens = Vec::new();
    let mut chars = code.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {},
            '/' if bytes.get(start + 1) == Some(&b'/') => {
                while chars.next_if(|&(_, c)| c != '\n').is_some() {}
            },
            '/' if bytes.get(start + 1) == Some(&b'*') => {
                chars.next();
                let mut depth = 1;
                while depth > 0 {
                    match chars.next() {
                        Some((i, '*')) if bytes.get(i + 1) == Some(&b'/') => {
                            chars.next();
                            depth -= 1;
                        },
                        Some((i, '/')) if bytes.get(i + 1) == Some(&b'*') => {
                            chars.next();
                            depth += 1;
                        },
                        Some(_) => {},
                        None => return Err("unterminated block comment".to_string()),
                    }
                }
            },
            '"' => {
                let end = loop {
                    match chars.next() {
                        Some((_, '\\')) => {
                            chars.next();
                        },
                        Some((i, '"')) => break i,
                        Some((_, '\n')) | None => {
                            return Err(format!("unterminated string literal at offset {}", start))
                        },
                        Some(_) => {},
                    }
                };
                tokens.push(Token {
                    kind: TokenKind::String,
                    text: &code[start + 1..end],
                    span: start..end + 1,
                });
            },
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some((i, c)) = chars.next_if(|&(_, c)| c.is_alphanumeric() || c == '_') {
                    end = i + c.len_utf8();
                }
                tokens.push(Token {
                    kind: TokenKind::Identifier,
                    text: &code[start..end],
                    span: start..end,
                });
            },
            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some((i, _)) = chars.next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_') {
                    end = i + 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Number,
                    text: &code[start..end],
                    span: start..end,
                });
            },
            c => tokens.push(Token {
                kind: TokenKind::Symbol(c),
                text: &code[start..start + c.len_utf8()],
                span: start..start + c.len_utf8(),
            }),
        }
    }

    Ok(tokens)
}

/// Parses the import and top level declarations of `code`, failing on
/// unterminated strings or comments, unbalanced delimiters and malformed imports.
pub(crate) fn parse(code: &str) -> Result<ParsedProgram, String> {
    let tokens = tokenize(code)?;
    let mut program = ParsedProgram::default();
    let mut delimiters: Vec<(char, usize)> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Symbol(open @ ('(' | '{' | '[')) => {
                delimiters.push((open, token.span.start));
            },
            TokenKind::Symbol(close @ (')' | '}' | ']')) => {
                let expected = match delimiters.pop() {
                    Some(('(', _)) => ')',
                    Some(('{', _)) => '}',
                    Some(_) => ']',
                    None => {
                        return Err(format!(
                            "unexpected `{}` at offset {}",
                            close, token.span.start
                        ))
                    },
                };
                if close != expected {
                    return Err(format!(
                        "expected `{}`, found `{}` at offset {}",
                        expected, close, token.span.start
                    ));
                }
            },
            TokenKind::Identifier if delimiters.is_empty() => {
                if token.text == "import" {
                    let (import, next) = parse_import(&tokens, i)?;
                    program.imports.push(import);
                    i = next;
                    continue;
                }
                if let Some(declaration) = parse_declaration(&tokens, i) {
                    program.declarations.push(declaration);
                }
            },
            _ => {},
        }
        i += 1;
    }

    match delimiters.last() {
        Some((open, offset)) => Err(format!("unclosed `{}` at offset {}", open, offset)),
        None => Ok(program),
    }
}

fn parse_import(tokens: &[Token], start: usize) -> Result<(ImportDeclaration, usize), String> {
    let span_start = tokens[start].span.start;
    let malformed = |message: &str| format!("malformed import at offset {}: {}", span_start, message);

    let mut i = start + 1;
    let first = tokens
        .get(i)
        .ok_or_else(|| malformed("expected a location or identifiers"))?;

    match first.kind {
        TokenKind::String => {
            let import = ImportDeclaration {
                identifiers: Vec::new(),
                location: ImportLocation::String(first.text.to_string()),
                span: span_start..first.span.end,
            };
            return Ok((import, i + 1));
        },
        TokenKind::Identifier => {},
        _ => return Err(malformed("expected a location or identifiers")),
    }

    let mut identifiers = Vec::new();
    loop {
        let name = match tokens.get(i) {
            Some(token) if token.kind == TokenKind::Identifier => token,
            _ => return Err(malformed("expected an identifier")),
        };
        i += 1;

        let alias = match tokens.get(i) {
            Some(token) if token.is_identifier("as") => match tokens.get(i + 1) {
                Some(alias) if alias.kind == TokenKind::Identifier => {
                    i += 2;
                    Some(alias.text.to_string())
                },
                _ => return Err(malformed("expected an identifier after `as`")),
            },
            _ => None,
        };
        identifiers.push(ImportedIdentifier {
            name: name.text.to_string(),
            alias,
        });

        match tokens.get(i) {
            Some(token) if token.kind == TokenKind::Symbol(',') => i += 1,
            _ => break,
        }
    }

    match tokens.get(i) {
        Some(token) if token.is_identifier("from") => {
            let location = tokens
                .get(i + 1)
                .ok_or_else(|| malformed("expected a location after `from`"))?;
            let parsed_location = match location.kind {
                TokenKind::String => ImportLocation::String(location.text.to_string()),
                TokenKind::Number if location.text.starts_with("0x") => ImportLocation::Address(
                    Address::from_hex(location.text).map_err(|err| malformed(&err.to_string()))?,
                ),
                TokenKind::Identifier => ImportLocation::Identifier(location.text.to_string()),
                _ => return Err(malformed("expected a location after `from`")),
            };
            let import = ImportDeclaration {
                identifiers,
                location: parsed_location,
                span: span_start..location.span.end,
            };
            Ok((import, i + 2))
        },
        _ if identifiers.len() == 1 && identifiers[0].alias.is_none() => {
            // `import Crypto`
            let identifier = identifiers.remove(0);
            let import = ImportDeclaration {
                identifiers: Vec::new(),
                location: ImportLocation::Identifier(identifier.name),
                span: span_start..tokens[i - 1].span.end,
            };
            Ok((import, i))
        },
        _ => Err(malformed("expected `from`")),
    }
}

fn parse_declaration(tokens: &[Token], start: usize) -> Option<Declaration> {
    let kind = CompositeKind::from_keyword(tokens[start].text)?;
    let mut i = start + 1;
    let is_interface = tokens.get(i).is_some_and(|token| token.is_identifier("interface"));
    if is_interface {
        i += 1;
    }
    let name = tokens.get(i).filter(|token| token.kind == TokenKind::Identifier)?;
    Some(Declaration {
        kind,
        is_interface,
        name: name.text.to_string(),
    })
}
