use crate::model::{Hunk, HunkOp, OpKind, Patch};
use crate::text::normalize_eol;

/// No `@@` hunk delimiters were recognized in the diff text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError;

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no hunks found in patch text")
    }
}

impl std::error::Error for ParseError {}

/// Split raw diff text into an ordered list of hunks.
///
/// A hunk opens at each line starting with `@@`; the rest of that line,
/// trimmed of whitespace and trailing colons, becomes the anchor. Body lines
/// classify by their first character (`+` add, `-` remove, space context);
/// `---`/`+++` file headers and anything else (prose, fences, blank lines)
/// are dropped. Lines before the first delimiter are ignored.
pub fn parse_patch(raw: &str) -> Result<Patch, ParseError> {
    let src = normalize_eol(raw);
    let mut hunks: Vec<Hunk> = Vec::new();

    for line in src.lines() {
        if let Some(rest) = line.strip_prefix("@@") {
            hunks.push(Hunk {
                anchor: rest.trim().trim_end_matches(':').to_string(),
                ops: Vec::new(),
            });
            continue;
        }
        let Some(current) = hunks.last_mut() else {
            continue;
        };
        // File headers would otherwise classify as removals/additions.
        if line.starts_with("---") || line.starts_with("+++") {
            continue;
        }
        let mut chars = line.chars();
        let kind = match chars.next() {
            Some('+') => OpKind::Add,
            Some('-') => OpKind::Remove,
            Some(' ') => OpKind::Context,
            _ => continue,
        };
        current.ops.push(HunkOp {
            kind,
            text: chars.as_str().to_string(),
        });
    }

    if hunks.is_empty() {
        return Err(ParseError);
    }
    Ok(Patch { hunks })
}
