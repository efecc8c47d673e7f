//! Behavioural tests for the parser as a whole: rule ordering, rendering and
//! the structural invariants every parse must keep.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Parser,
    entity::{Content, Entity, ListChild},
    parse_document,
    rules::{Rule, RuleKind},
    snapshot,
    span::Span,
    to_html,
};

fn spans(content: &Content<'_>) -> Vec<(usize, usize)> {
    content.iter().map(|e| (e.start(), e.end())).collect()
}

fn kinds(content: &Content<'_>) -> Vec<&'static str> {
    content.iter().map(Entity::kind_name).collect()
}

// Identity and ordering

#[rstest]
#[case::words("just some words")]
#[case::two_lines("line one\nline two\n")]
#[case::lone_star("3 * 4 = 12")]
#[case::snake_case("call snake_case here")]
#[case::hash_mid_line("issue #42 is fixed")]
fn unmatched_text_renders_verbatim(#[case] text: &str) {
    let content = parse_document(text);
    assert!(content.iter().all(Entity::is_raw));
    assert_eq!(content.to_html(), text);
}

#[rstest]
#[case::empty("")]
#[case::blank_lines("\n\n\n")]
#[case::spaces_and_tabs("  \t \n ")]
fn whitespace_only_document_renders_nothing(#[case] text: &str) {
    assert!(parse_document(text).is_empty());
    assert_eq!(to_html(text), "");
}

#[rstest]
#[case::mixed("# Title\n\nSome *em* text.\n\n- one\n- two\n")]
#[case::quote_then_list("\n\n> a\n> b\n\n\n1. x\n2. y\n")]
#[case::fence_then_em("\n```\n_raw_\n```\n\nthen _em_ here")]
#[case::nested_list("\n\n- a\n\t- b\n\t\t- c\n- d\n")]
fn entities_are_ordered_and_within_bounds(#[case] text: &str) {
    let content = parse_document(text);
    snapshot::invariants(&content);

    let starts: Vec<usize> = content.iter().map(Entity::start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

// Precedence

#[test]
fn earlier_rule_claims_text_first() {
    let text = "\n```\n# not a header *nor em*\n```\n";
    let content = parse_document(text);
    assert_eq!(kinds(&content), ["FencedPre"]);
    assert_eq!(
        content.to_html(),
        "\n<pre><code># not a header *nor em*\n</code></pre>\n"
    );
}

#[test]
fn rule_order_decides_overlaps() {
    let text = "\n```\n# not a header *nor em*\n```\n";
    let em_first = Parser::from_kinds(&[RuleKind::Em, RuleKind::FencedPre]).parse(text);
    assert!(em_first.iter().any(|e| e.kind_name() == "Em"));
    assert!(em_first.iter().all(|e| e.kind_name() != "FencedPre"));
}

#[test]
fn fenced_body_is_verbatim() {
    let text = "\n```python\nthis\ttext\nis _pre-formatted_```\n";
    let content = parse_document(text);
    let [Entity::FencedPre(pre)] = content.entities() else {
        panic!("expected a single fenced block, got {:?}", kinds(&content));
    };
    assert_eq!(pre.lang(), Some("python"));
    assert_eq!(pre.body(), "this\ttext\nis _pre-formatted_");
}

// Rendering

#[test]
fn header_at_start_of_buffer_omits_leading_newline() {
    assert_eq!(to_html("## this is a header\n"), "<h2>this is a header</h2>\n");
}

#[test]
fn header_after_newline_keeps_it() {
    assert_eq!(to_html("\n## this is a header\n"), "\n<h2>this is a header</h2>\n");
}

#[test]
fn emphasis_round_trip() {
    assert_eq!(to_html("_emphasized text_"), "<em>emphasized text</em>");
}

#[test]
fn strong_and_strong_em() {
    assert_eq!(
        to_html("a **b** c ***d*** e"),
        "a <strong>b</strong> c <strong><em>d</em></strong> e"
    );
}

#[test]
fn mixed_document_html() {
    assert_eq!(
        to_html("# Title\n\nSome *em* text.\n\n- one\n- two\n"),
        "<h1>Title</h1>\n\n\nSome <em>em</em> text.\n<ul>\n<li>one</li>\n\n<li>two</li>\n</ul>\n"
    );
}

// Lists

#[test]
fn ordered_list_with_one_nested_level() {
    let text = "\n\n1. one\n2. two\n\t1. in one\n3. three\n";
    let content = parse_document(text);
    let [Entity::List(list)] = content.entities() else {
        panic!("expected a single list, got {:?}", kinds(&content));
    };
    assert_eq!(list.span(), Span::new(0, 35));

    let children: Vec<Span> = list.items().iter().map(ListChild::span).collect();
    assert_eq!(
        children,
        [Span::new(1, 8), Span::new(8, 15), Span::new(15, 26), Span::new(26, 35)]
    );

    let ListChild::List(nested) = &list.items()[2] else {
        panic!("third child should be a nested list");
    };
    assert_eq!(nested.items().len(), 1);
    assert_eq!(nested.span().end, nested.items()[0].span().end);
    assert_eq!(list.span().end, list.items()[3].span().end);
}

// Headers

const HEADERS: &str = "this is a eq header\n===\n\n### this header has hashes\n\nand this has dashes\n---\n\n";

fn header_parser() -> Parser {
    Parser::from_kinds(&[
        RuleKind::HashHeader,
        RuleKind::EqualsHeader,
        RuleKind::DashHeader,
    ])
}

#[test]
fn parse_header_variants() {
    let content = header_parser().parse(HEADERS);
    assert_eq!(spans(&content), [(0, 24), (24, 51), (52, 77)]);

    let headers: Vec<(u8, bool, (usize, usize))> = content
        .iter()
        .map(|e| match e {
            Entity::Header(h) => (h.level, h.is_bof, (h.content.start().unwrap(), h.content.end().unwrap())),
            other => panic!("expected header, got {other}"),
        })
        .collect();
    assert_eq!(
        headers,
        [(1, true, (0, 19)), (3, false, (29, 51)), (2, false, (53, 72))]
    );
}

#[test]
fn parse_headers_keeps_text_between_them() {
    let text = "# one\nplain words\n\n## two\n";
    let content = header_parser().parse(text);
    assert_eq!(kinds(&content), ["Header", "Raw", "Header"]);
    assert_eq!(spans(&content), [(0, 5), (5, 18), (18, 25)]);
    assert_eq!(
        content.to_html(),
        "<h1>one</h1>\n\nplain words\n\n<h2>two</h2>\n"
    );
}

// Parser plumbing

#[test]
fn reparse_is_a_no_op() {
    let text = "# Title\n\nSome *em* text.\n\n- one\n- two\n\n\n> quote\n";
    let parser = Parser::standard();
    let once = parser.parse(text);
    let twice = parser.reparse(once.clone());
    assert_eq!(twice, once);
}

#[test]
fn apply_rule_passes_non_raw_entities_through() {
    let text = "*a* b";
    let em = RuleKind::Em.build();
    let first = Parser::apply_rule(em.as_ref(), parse_with(&[], text));
    assert_eq!(kinds(&first), ["Em", "Raw"]);

    let second = Parser::apply_rule(em.as_ref(), first.clone());
    assert_eq!(second, first);
}

#[test]
fn parser_without_rules_returns_the_seed() {
    let content = parse_with(&[], "anything at all");
    assert_eq!(spans(&content), [(0, 15)]);
}

#[test]
fn standard_parser_runs_every_rule_in_order() {
    let names = Parser::default().rule_names();
    let expected: Vec<&str> = RuleKind::STANDARD.iter().map(|k| k.name()).collect();
    assert_eq!(names, expected);
}

#[test]
fn custom_rule_objects_are_accepted() {
    let rules: Vec<Box<dyn Rule>> = vec![RuleKind::Bold.build()];
    let content = Parser::new(rules).parse("**x** and *y*");
    assert_eq!(kinds(&content), ["Bold", "Raw"]);
}

fn parse_with<'a>(kinds: &[RuleKind], text: &'a str) -> Content<'a> {
    Parser::from_kinds(kinds).parse(text)
}

// Snapshots

#[test]
fn snapshot_mixed_document() {
    let content = parse_document("# Title\n\nSome *em* text.\n\n- one\n- two\n");
    snapshot::invariants(&content);
    insta::assert_debug_snapshot!(snapshot::normalize(&content), @r##"
    Snap {
        entities: [
            EntitySnap {
                kind: "Header(1, bof)",
                span: "0..7",
                text: "# Title",
                children: [
                    EntitySnap {
                        kind: "Raw",
                        span: "2..7",
                        text: "Title",
                        children: [],
                    },
                ],
            },
            EntitySnap {
                kind: "Raw",
                span: "7..14",
                text: "\n\nSome ",
                children: [],
            },
            EntitySnap {
                kind: "Em",
                span: "14..18",
                text: "*em*",
                children: [
                    EntitySnap {
                        kind: "Raw",
                        span: "15..17",
                        text: "em",
                        children: [],
                    },
                ],
            },
            EntitySnap {
                kind: "Raw",
                span: "18..24",
                text: " text.",
                children: [],
            },
            EntitySnap {
                kind: "UnorderedList",
                span: "24..37",
                text: "\n\n- one\n- two",
                children: [
                    EntitySnap {
                        kind: "ListItem",
                        span: "25..31",
                        text: "\n- one",
                        children: [
                            EntitySnap {
                                kind: "Raw",
                                span: "28..31",
                                text: "one",
                                children: [],
                            },
                        ],
                    },
                    EntitySnap {
                        kind: "ListItem",
                        span: "31..37",
                        text: "\n- two",
                        children: [
                            EntitySnap {
                                kind: "Raw",
                                span: "34..37",
                                text: "two",
                                children: [],
                            },
                        ],
                    },
                ],
            },
        ],
    }
    "##);
}
