//! Scanner for the expression/predicate and verification-objective
//! surfaces: identifiers, integer literals, operator symbols, parentheses
//! and commas, with 1-based line/column spans.
//!
//! This stands in for the generated table-driven lexers of the full
//! modelling languages at the token-stream interface: everything downstream
//! (reclassification, expression building, the VO parser) consumes the
//! token shape produced here.

use crate::error::Diagnostic;
use crate::token::{Span, Token, TokenKind};

/// Operator symbols the scanner recognizes, longest first so that e.g.
/// `<=>` is never split into `<=` `>`.
const SYMBOLS: &[&str] = &[
    "<=>", "**", "=>", "<=", ">=", "/=", "..", "||", ";", "&", "+", "-", "*", "/", "=", "<", ">",
    ":", "|",
];

/// Scan `src` into a token stream terminated by a single `Eof` token.
pub fn lex(src: &str) -> Result<Vec<Token>, Diagnostic> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut col: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        // Line comment
        if c == '/' && pos + 1 < chars.len() && chars[pos + 1] == '/' {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
                col += 1;
            }
            continue;
        }

        // Block comment
        if c == '/' && pos + 1 < chars.len() && chars[pos + 1] == '*' {
            let open = Span::new(line, col, line, col + 2);
            pos += 2;
            col += 2;
            loop {
                if pos >= chars.len() {
                    return Err(Diagnostic::lex(open, "unterminated block comment"));
                }
                if chars[pos] == '*' && pos + 1 < chars.len() && chars[pos + 1] == '/' {
                    pos += 2;
                    col += 2;
                    break;
                }
                if chars[pos] == '\n' {
                    line += 1;
                    col = 1;
                } else {
                    col += 1;
                }
                pos += 1;
            }
            continue;
        }

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;
        let tok_col = col;

        // Identifier / word
        if c.is_ascii_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                pos += 1;
                col += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            tokens.push(Token::new(
                TokenKind::Ident,
                text,
                Span::new(tok_line, tok_col, line, col),
            ));
            continue;
        }

        // Integer literal
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
                col += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            tokens.push(Token::new(
                TokenKind::IntLit,
                text,
                Span::new(tok_line, tok_col, line, col),
            ));
            continue;
        }

        // Punctuation
        let punct = match c {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };
        if let Some(kind) = punct {
            pos += 1;
            col += 1;
            tokens.push(Token::new(
                kind,
                c.to_string(),
                Span::new(tok_line, tok_col, line, col),
            ));
            continue;
        }

        // Operator symbol, longest match first
        if let Some(sym) = SYMBOLS
            .iter()
            .find(|sym| chars[pos..].starts_with(&sym.chars().collect::<Vec<_>>()[..]))
        {
            let len = sym.chars().count() as u32;
            pos += len as usize;
            col += len;
            tokens.push(Token::new(
                TokenKind::Operator,
                *sym,
                Span::new(tok_line, tok_col, line, col),
            ));
            continue;
        }

        return Err(Diagnostic::lex(
            Span::new(tok_line, tok_col, line, col + 1),
            format!("unrecognized character '{}'", c),
        ));
    }

    tokens.push(Token::new(
        TokenKind::Eof,
        "",
        Span::new(line, col, line, col),
    ));
    Ok(tokens)
}
