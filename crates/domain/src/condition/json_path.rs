//! Minimal JSON path lookup used by body conditions.
//!
//! Supported forms: `$`, `$.a.b`, `a.b`, `items[0].id`, `[2]`, `$.a[0][1]`.
//! An empty path addresses the document root.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'p> {
    Key(&'p str),
    Index(usize),
}

fn parse(path: &str) -> DomainResult<Vec<Segment<'_>>> {
    let invalid = || DomainError::InvalidJsonPath(path.to_string());
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);

    let mut segments = Vec::new();
    for piece in trimmed.split('.').filter(|p| !p.is_empty()) {
        let (key, mut rest) = piece.find('[').map_or((piece, ""), |i| piece.split_at(i));
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }
        while !rest.is_empty() {
            let close = rest.find(']').ok_or_else(invalid)?;
            let index = rest[1..close].trim().parse().map_err(|_| invalid())?;
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(invalid());
            }
        }
    }
    Ok(segments)
}

/// Looks up `path` in `json`.
///
/// Returns `Ok(None)` when any segment is missing.
///
/// # Errors
///
/// Returns [`DomainError::InvalidJsonPath`] if the path cannot be parsed.
pub fn query<'a>(json: &'a Value, path: &str) -> DomainResult<Option<&'a Value>> {
    let mut current = json;
    for segment in parse(path)? {
        let next = match segment {
            Segment::Key(key) => current.get(key),
            Segment::Index(index) => current.get(index),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}
