use crate::parsing::{
    entity::{Content, Entity, List, ListChild},
    span::Span,
};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All entity spans are ordered and within buffer bounds
/// - Children are contained within their parents
/// - Top-level entities appear in order and do not overlap
/// - Every list ends where its last child ends
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(content: &Content<'_>) {
    let mut prev_end = 0;
    for entity in content {
        assert!(
            entity.start() >= prev_end,
            "entities out of order or overlapping: {entity} starts before {prev_end}"
        );
        prev_end = entity.end();
        check_entity(entity, entity.span());
    }
}

fn check_span(sp: Span, parent: Span, len: usize, what: &str) {
    assert!(
        sp.start <= sp.end && sp.end <= len,
        "{what} span out of bounds: {sp:?} (buffer len: {len})"
    );
    assert!(
        parent.contains(sp),
        "{what} span not contained in parent: {sp:?}, parent {parent:?}"
    );
}

fn check_entity(entity: &Entity<'_>, parent: Span) {
    let len = entity.buffer().len();
    let sp = entity.span();
    check_span(sp, parent, len, entity.kind_name());

    match entity {
        Entity::Raw(_) => {}
        Entity::Wrapping(w) => check_children(&w.content, sp),
        Entity::Header(h) => check_children(&h.content, sp),
        Entity::List(list) => check_list(list, sp),
        Entity::FencedPre(pre) => {
            check_span(pre.fence, sp, len, "fence");
            check_span(pre.body, sp, len, "fenced body");
            if let Some(lang) = pre.lang {
                check_span(lang, sp, len, "fence language");
            }
        }
        Entity::Lines(block) => {
            for line in &block.lines {
                check_span(line.span, sp, len, "line");
            }
        }
    }
}

fn check_children(content: &Content<'_>, parent: Span) {
    for child in content {
        check_entity(child, parent);
    }
}

fn check_list(list: &List<'_>, parent: Span) {
    let len = list.buffer().len();
    check_span(list.span(), parent, len, list.kind.name());
    if let Some(last) = list.items().last() {
        assert_eq!(
            list.span().end,
            last.span().end,
            "list {:?} does not end at its last child",
            list.span()
        );
    }
    for child in list.items() {
        match child {
            ListChild::Item(item) => {
                check_span(item.span, list.span(), len, "list item");
                check_children(&item.content, item.span);
            }
            ListChild::List(nested) => check_list(nested, list.span()),
        }
    }
}
