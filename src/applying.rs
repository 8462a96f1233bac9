use crate::model::{Document, Hunk, MatchSpan, OpKind};
use crate::text::with_terminator;

/// Splice a located hunk into the document.
///
/// Context and added lines contribute their declared text in op order;
/// removals contribute nothing. Every contributed line is normalized to
/// exactly one trailing newline so concatenation cannot produce run-on
/// lines. Lines outside the span keep their original terminators.
pub fn apply_hunk(doc: &Document, hunk: &Hunk, span: MatchSpan) -> Document {
    let replacement: Vec<String> = hunk
        .ops
        .iter()
        .filter(|op| op.kind != OpKind::Remove)
        .map(|op| with_terminator(&op.text))
        .collect();

    let mut out = Vec::with_capacity(doc.len() - span.len + replacement.len());
    out.extend_from_slice(&doc[..span.start]);
    out.extend(replacement);
    out.extend_from_slice(&doc[span.start + span.len..]);
    out
}
