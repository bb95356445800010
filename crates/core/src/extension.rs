//! Grammar extensions: contextual-keyword reclassification.
//!
//! A base grammar and its scanner stay fixed; a sub-language (the rules
//! language, for instance) selects its keyword set by supplying a
//! [`GrammarExtension`] that maps identifier text to specialized keyword
//! kinds. Reclassification happens token by token between scanning and
//! parsing, so no grammar regeneration is needed per sub-language.
//!
//! Extensions are explicit values passed into the classify/parse calls.
//! There is no process-wide registry: independent parses can use different
//! extensions concurrently, and tests need no global state reset.

use crate::token::{Span, Token, TokenKind};
use std::collections::HashMap;

/// Builds a keyword token of a fixed kind from the original token's text
/// and span.
type KeywordCtor = fn(String, Span) -> Token;

/// Errors raised while building a [`GrammarExtension`]. These are
/// configuration defects, not parse errors: a mapping that cannot be
/// honored fails here, when the extension is built, never mid-parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionError {
    #[error("'{text}' maps to {kind:?}, which is not a contextual-keyword kind")]
    Unconstructible { text: String, kind: TokenKind },

    #[error("duplicate keyword mapping for '{0}'")]
    DuplicateKeyword(String),
}

/// Constructor table, resolved once per mapping when the extension is
/// built. Only contextual-keyword kinds are constructible from (text,
/// span) alone; asking for any base kind is a configuration defect.
fn keyword_ctor(kind: TokenKind) -> Option<KeywordCtor> {
    match kind {
        TokenKind::KwRule => Some(|text, span| Token::new(TokenKind::KwRule, text, span)),
        TokenKind::KwConstraint => {
            Some(|text, span| Token::new(TokenKind::KwConstraint, text, span))
        }
        TokenKind::KwComputation => {
            Some(|text, span| Token::new(TokenKind::KwComputation, text, span))
        }
        TokenKind::KwDefine => Some(|text, span| Token::new(TokenKind::KwDefine, text, span)),
        TokenKind::KwExpect => Some(|text, span| Token::new(TokenKind::KwExpect, text, span)),
        TokenKind::KwCounterexample => {
            Some(|text, span| Token::new(TokenKind::KwCounterexample, text, span))
        }
        TokenKind::KwActivation => {
            Some(|text, span| Token::new(TokenKind::KwActivation, text, span))
        }
        TokenKind::KwErrorType => Some(|text, span| Token::new(TokenKind::KwErrorType, text, span)),
        TokenKind::KwClassification => {
            Some(|text, span| Token::new(TokenKind::KwClassification, text, span))
        }
        TokenKind::KwRuleid => Some(|text, span| Token::new(TokenKind::KwRuleid, text, span)),
        _ => None,
    }
}

/// A named set of contextual-keyword mappings, read-only once built.
///
/// The default value is the empty extension: no identifier is ever
/// reclassified.
#[derive(Debug, Clone, Default)]
pub struct GrammarExtension {
    name: String,
    keywords: HashMap<String, (TokenKind, KeywordCtor)>,
}

impl GrammarExtension {
    pub fn builder(name: &str) -> GrammarExtensionBuilder {
        GrammarExtensionBuilder {
            name: name.to_owned(),
            keywords: HashMap::new(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The keyword kind `text` would be reclassified to, if any.
    pub fn keyword_kind(&self, text: &str) -> Option<TokenKind> {
        self.keywords.get(text).map(|(kind, _)| *kind)
    }

    /// Reclassify one token.
    ///
    /// Only `Ident` tokens whose text is mapped are replaced; every other
    /// token -- including malformed tokens an upstream lexer produced --
    /// passes through unchanged. The replacement carries the original text
    /// and span exactly.
    pub fn classify(&self, token: Token) -> Token {
        if token.kind != TokenKind::Ident {
            return token;
        }
        match self.keywords.get(&token.text) {
            Some((_, ctor)) => {
                let Token { text, span, .. } = token;
                ctor(text, span)
            }
            None => token,
        }
    }

    /// Reclassify a whole stream.
    pub fn classify_all(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter().map(|t| self.classify(t)).collect()
    }

    /// The rules sub-language extension: its contextual keywords on top of
    /// the shared base grammar.
    pub fn rules() -> GrammarExtension {
        GrammarExtension::builder("rules")
            .keyword("RULE", TokenKind::KwRule)
            .keyword("CONSTRAINT", TokenKind::KwConstraint)
            .keyword("COMPUTATION", TokenKind::KwComputation)
            .keyword("DEFINE", TokenKind::KwDefine)
            .keyword("EXPECT", TokenKind::KwExpect)
            .keyword("COUNTEREXAMPLE", TokenKind::KwCounterexample)
            .keyword("ACTIVATION", TokenKind::KwActivation)
            .keyword("ERROR_TYPES", TokenKind::KwErrorType)
            .keyword("CLASSIFICATION", TokenKind::KwClassification)
            .keyword("RULEID", TokenKind::KwRuleid)
            .build()
            .expect("rules extension maps only contextual-keyword kinds")
    }
}

/// Accumulates keyword mappings, resolving each kind's constructor up
/// front; [`GrammarExtensionBuilder::build`] reports the first defect.
pub struct GrammarExtensionBuilder {
    name: String,
    keywords: HashMap<String, (TokenKind, KeywordCtor)>,
    error: Option<ExtensionError>,
}

impl GrammarExtensionBuilder {
    pub fn keyword(mut self, text: &str, kind: TokenKind) -> Self {
        if self.error.is_some() {
            return self;
        }
        let Some(ctor) = keyword_ctor(kind) else {
            self.error = Some(ExtensionError::Unconstructible {
                text: text.to_owned(),
                kind,
            });
            return self;
        };
        if self.keywords.insert(text.to_owned(), (kind, ctor)).is_some() {
            self.error = Some(ExtensionError::DuplicateKeyword(text.to_owned()));
        }
        self
    }

    pub fn build(self) -> Result<GrammarExtension, ExtensionError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(GrammarExtension {
                name: self.name,
                keywords: self.keywords,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str) -> Token {
        Token::new(TokenKind::Ident, text, Span::new(1, 1, 1, 1 + text.len() as u32))
    }

    #[test]
    fn unmapped_identifier_is_returned_unchanged() {
        let ext = GrammarExtension::rules();
        let tok = ident("counter");
        assert_eq!(ext.classify(tok.clone()), tok);
    }

    #[test]
    fn empty_extension_never_reclassifies() {
        let ext = GrammarExtension::default();
        let tok = ident("RULE");
        assert_eq!(ext.classify(tok.clone()), tok);
    }

    #[test]
    fn mapped_identifier_gets_keyword_kind_same_text_and_span() {
        let ext = GrammarExtension::rules();
        let tok = ident("RULE");
        let span = tok.span;
        let out = ext.classify(tok);
        assert_eq!(out.kind, TokenKind::KwRule);
        assert_eq!(out.text, "RULE");
        assert_eq!(out.span, span);
    }

    #[test]
    fn non_identifier_tokens_pass_through() {
        let ext = GrammarExtension::rules();
        // An operator whose text happens to collide with a mapping must not
        // be touched; only Ident tokens are candidates.
        let tok = Token::new(TokenKind::Operator, "RULE", Span::new(1, 1, 1, 5));
        assert_eq!(ext.classify(tok.clone()), tok);
    }

    #[test]
    fn mapping_to_a_base_kind_fails_at_build_time() {
        let err = GrammarExtension::builder("broken")
            .keyword("THING", TokenKind::Ident)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ExtensionError::Unconstructible {
                text: "THING".to_owned(),
                kind: TokenKind::Ident,
            }
        );
    }

    #[test]
    fn duplicate_mapping_fails_at_build_time() {
        let err = GrammarExtension::builder("broken")
            .keyword("RULE", TokenKind::KwRule)
            .keyword("RULE", TokenKind::KwConstraint)
            .build()
            .unwrap_err();
        assert_eq!(err, ExtensionError::DuplicateKeyword("RULE".to_owned()));
    }

    #[test]
    fn classify_all_runs_over_a_stream() {
        let ext = GrammarExtension::rules();
        let toks = vec![ident("RULE"), ident("x"), ident("EXPECT")];
        let out = ext.classify_all(toks);
        let kinds: Vec<TokenKind> = out.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::KwRule, TokenKind::Ident, TokenKind::KwExpect]
        );
    }
}
