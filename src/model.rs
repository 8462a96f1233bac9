//! Data model shared by the parser, locator, applier, and session.

/// A document is an ordered sequence of lines, each keeping its original
/// terminator. The final line may lack one.
pub type Document = Vec<String>;

/// How a single patch line relates to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Unchanged line; must exist in the document.
    Context,
    /// Line to delete; must exist in the document.
    Remove,
    /// New line; has no counterpart in the document.
    Add,
}

/// One classified body line of a hunk. The text carries no terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkOp {
    pub kind: OpKind,
    pub text: String,
}

/// One localized edit: an optional anchor plus classified body lines.
#[derive(Debug, Default)]
pub struct Hunk {
    /// Free text after the hunk's `@@` marker; empty when none was declared.
    pub anchor: String,
    pub ops: Vec<HunkOp>,
}

impl Hunk {
    pub fn has_anchor(&self) -> bool {
        !self.anchor.is_empty()
    }

    /// Number of document lines the hunk occupies once located.
    pub fn span_len(&self) -> usize {
        self.ops.iter().filter(|op| op.kind != OpKind::Add).count()
    }

    /// Ordered context/removal texts: the contiguous region the hunk must
    /// match, in op order.
    pub fn match_run(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| op.kind != OpKind::Add)
            .map(|op| op.text.as_str())
            .collect()
    }

    /// Text of the first removal, if any.
    pub fn first_remove(&self) -> Option<&str> {
        self.ops
            .iter()
            .find(|op| op.kind == OpKind::Remove)
            .map(|op| op.text.as_str())
    }
}

/// An ordered set of hunks, applied strictly in sequence.
#[derive(Debug, Default)]
pub struct Patch {
    pub hunks: Vec<Hunk>,
}

/// Resolved document region a hunk occupies: start index plus the number of
/// lines it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub len: usize,
}

/// How thoroughly a candidate position must verify before splicing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Verify every context/removal line at consecutive offsets.
    #[default]
    FullRun,
    /// Trust the first removal line alone. Reproduces the old applier's
    /// behavior; misfires when that line recurs. Kept for regression
    /// comparison, never the default.
    FirstLineOnly,
}

/// What a locate failure does to the rest of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Skip the failing hunk, record it, keep going.
    #[default]
    Lenient,
    /// Abort on the first failing hunk, keeping earlier edits.
    Strict,
}

/// Session-wide knobs, fixed once at construction and passed to every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub mode: MatchMode,
    pub policy: FailurePolicy,
}
