//! End-to-end tests over the full front-end pipeline: scan, reclassify,
//! parse, traverse, emit terms.

use veris_core::walk::{self, AstVisitor};
use veris_core::{
    operators, parse_expression, parse_predicate, GrammarExtension, Pred, Span, TermBuilder,
    TokenKind,
};

fn parse_pred(src: &str) -> Pred {
    parse_predicate(src, &GrammarExtension::default(), &operators::classical_b())
        .unwrap_or_else(|e| panic!("parse failed for '{}': {}", src, e))
}

#[test]
fn reclassification_flows_into_the_parser() {
    // Under the rules extension, "RULE" is a keyword and cannot appear in
    // an expression; under the default extension it is a plain identifier.
    let ext = GrammarExtension::rules();
    assert!(parse_expression("RULE + 1", &ext, &operators::classical_b()).is_err());
    assert!(
        parse_expression("RULE + 1", &GrammarExtension::default(), &operators::classical_b())
            .is_ok()
    );
}

#[test]
fn reclassified_tokens_keep_their_spans() {
    let ext = GrammarExtension::rules();
    let tokens = ext.classify_all(veris_core::lexer::lex("x RULE y").unwrap());
    let rule = tokens.iter().find(|t| t.kind == TokenKind::KwRule).unwrap();
    assert_eq!(rule.text, "RULE");
    assert_eq!(rule.span, Span::new(1, 3, 1, 7));
}

#[test]
fn parsed_predicate_round_trips_into_terms() {
    let p = parse_pred("x < 1 & y < 2 => z = 3");
    let t = TermBuilder::pred_term(&p);
    assert_eq!(
        t.to_string(),
        "implication(conjunct('<'(identifier(x),integer(1)),\
         '<'(identifier(y),integer(2))),'='(identifier(z),integer(3)))"
    );
}

#[derive(Default)]
struct ConjunctCounter {
    links: usize,
    atoms: usize,
}

impl AstVisitor for ConjunctCounter {
    fn visit_chain_link(&mut self, _p: &Pred) {
        self.links += 1;
    }
    fn visit_comparison(&mut self, _p: &Pred) {
        self.atoms += 1;
    }
}

#[test]
fn flattened_traversal_survives_a_generated_size_conjunction() {
    // One conjunct per constraint of a generated machine: build the source
    // text with 20_000 conjuncts, parse it, then traverse flattened. The
    // parser itself builds left-deep chains iteratively (climbing loops,
    // not one recursion level per conjunct), and the flattened walk keeps
    // stack depth independent of chain length.
    let n = 20_000usize;
    let mut src = String::from("c0 = 0");
    for i in 1..n {
        src.push_str(&format!(" & c{} = {}", i, i));
    }
    let p = parse_pred(&src);
    let mut counter = ConjunctCounter::default();
    walk::walk_pred_flattened(&mut counter, &p);
    assert_eq!(counter.links, n - 1);
    assert_eq!(counter.atoms, n);
}

#[test]
fn predicate_spans_cover_the_full_region() {
    let p = parse_pred("x < 1 & y < 22");
    assert_eq!(p.span(), Span::new(1, 1, 1, 15));
}
