use serde::Serialize;

use crate::parsing::{
    entity::{Content, Entity, List, ListChild, Wrapping},
    rules::fence::FenceKind,
    span::{Buffer, Span, preview},
};

const PREVIEW_LEN: usize = 40;

/// Snapshot of a parsed document for testing with `insta`.
#[derive(Debug, Serialize)]
pub struct Snap {
    /// Top-level entities in document order.
    pub entities: Vec<EntitySnap>,
}

/// Snapshot of one entity and everything it contains.
#[derive(Debug, Serialize)]
pub struct EntitySnap {
    /// Entity kind (e.g. "Raw", "Header(2)", "FencedPre(Backticks, rust)").
    pub kind: String,
    /// Byte span as `start..end`.
    pub span: String,
    /// Preview of the spanned text (truncated for readability).
    pub text: String,
    /// Child entities, list children or lines.
    pub children: Vec<EntitySnap>,
}

impl EntitySnap {
    fn leaf(kind: impl Into<String>, buf: Buffer<'_>, sp: Span) -> Self {
        Self::node(kind, buf, sp, vec![])
    }

    fn node(kind: impl Into<String>, buf: Buffer<'_>, sp: Span, children: Vec<EntitySnap>) -> Self {
        Self {
            kind: kind.into(),
            span: format!("{}..{}", sp.start, sp.end),
            text: preview(buf, sp, PREVIEW_LEN),
            children,
        }
    }
}

/// Converts parsed content into a serializable snapshot for testing.
pub fn normalize(content: &Content<'_>) -> Snap {
    Snap {
        entities: content_snaps(content),
    }
}

fn content_snaps(content: &Content<'_>) -> Vec<EntitySnap> {
    content.iter().map(entity_snap).collect()
}

fn entity_snap(entity: &Entity<'_>) -> EntitySnap {
    let buf = entity.buffer();
    let sp = entity.span();
    match entity {
        Entity::Raw(_) => EntitySnap::leaf("Raw", buf, sp),
        Entity::Wrapping(w) => wrapping_snap(w),
        Entity::Header(h) => {
            let kind = if h.is_bof {
                format!("Header({}, bof)", h.level)
            } else {
                format!("Header({})", h.level)
            };
            EntitySnap::node(kind, buf, sp, content_snaps(&h.content))
        }
        Entity::List(list) => list_snap(list),
        Entity::FencedPre(pre) => {
            let fence = FenceKind::of(buf.slice(pre.fence)).map_or_else(String::new, |k| format!("{k:?}"));
            let kind = match pre.lang() {
                Some(lang) => format!("FencedPre({fence}, {lang})"),
                None => format!("FencedPre({fence})"),
            };
            EntitySnap::node(kind, buf, sp, vec![EntitySnap::leaf("Body", buf, pre.body)])
        }
        Entity::Lines(block) => {
            let lines = block
                .lines
                .iter()
                .map(|line| EntitySnap::leaf("Line", buf, line.span))
                .collect();
            EntitySnap::node(block.kind.name(), buf, sp, lines)
        }
    }
}

fn wrapping_snap(w: &Wrapping<'_>) -> EntitySnap {
    EntitySnap::node(w.kind.name(), w.buf, w.span, content_snaps(&w.content))
}

fn list_snap(list: &List<'_>) -> EntitySnap {
    let children = list
        .items()
        .iter()
        .map(|child| match child {
            ListChild::Item(item) => wrapping_snap(item),
            ListChild::List(nested) => list_snap(nested),
        })
        .collect();
    EntitySnap::node(list.kind.name(), list.buffer(), list.span(), children)
}
