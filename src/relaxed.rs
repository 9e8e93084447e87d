//! Reader for the compiler's relaxed JSON
//!
//! Cello writes JSON-like files that are not always valid JSON: tab
//! characters are sprinkled through the structure and some files (the output
//! netlist in particular) carry one stray comma after the last value. Repair
//! is a pipeline of independent stages so that format drift only touches one
//! of them:
//!
//! 1. [`strip_tabs`] removes every tab character
//! 2. [`excise_final_comma`] removes the trailing comma, when the caller says
//!    the file has one
//! 3. [`parse`] reads strict JSON, falling back to the YAML flow grammar
//!    (a JSON superset that tolerates unquoted keys and trailing commas)

use crate::error::{CelloError, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Untyped tree produced by the reader.
///
/// Mappings, sequences and scalars. Callers interpret the shape themselves.
pub type RawDocument = serde_json::Value;

/// Remove every tab character. Borrows when there is nothing to remove.
pub fn strip_tabs(text: &str) -> Cow<'_, str> {
    if text.contains('\t') {
        Cow::Owned(text.replace('\t', ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Remove the last comma in `text`, keeping everything after it.
///
/// Only closing delimiters and whitespace may follow the comma; anything else
/// means the comma is structural and removing it would corrupt the document,
/// so the text is rejected instead.
pub fn excise_final_comma(text: &str, origin: &str) -> Result<String> {
    let idx = text.rfind(',').ok_or_else(|| {
        CelloError::malformed(origin, None, "expected a trailing comma but found none")
    })?;

    let tail = &text[idx + 1..];
    if let Some(pos) = tail.find(|c: char| !c.is_whitespace() && c != ']' && c != '}') {
        return Err(CelloError::malformed(
            origin,
            Some(idx + 1 + pos),
            "last comma is followed by a value, not a trailing comma",
        ));
    }

    let mut repaired = String::with_capacity(text.len() - 1);
    repaired.push_str(&text[..idx]);
    repaired.push_str(tail);
    Ok(repaired)
}

/// Parse repaired text into a [`RawDocument`].
pub fn parse(text: &str, origin: &str) -> Result<RawDocument> {
    // Strict JSON covers most files and gives exact number handling
    if let Ok(doc) = serde_json::from_str::<RawDocument>(text) {
        return Ok(doc);
    }

    debug!("{} is not strict JSON, retrying with the relaxed grammar", origin);
    serde_yaml::from_str::<RawDocument>(text).map_err(|e| {
        let offset = e.location().map(|loc| loc.index());
        CelloError::malformed(origin, offset, e.to_string())
    })
}

/// Run the whole repair pipeline over in-memory text.
///
/// Error offsets point into `text` as given, before any repair.
pub fn read_str(text: &str, final_trailing_comma: bool, origin: &str) -> Result<RawDocument> {
    let stripped = strip_tabs(text);
    let result = if final_trailing_comma {
        let comma = stripped.rfind(',');
        excise_final_comma(&stripped, origin).and_then(|repaired| {
            parse(&repaired, origin).map_err(|e| {
                e.map_offset(|o| match comma {
                    Some(c) if o >= c => o + 1,
                    _ => o,
                })
            })
        })
    } else {
        parse(&stripped, origin)
    };
    result.map_err(|e| e.map_offset(|o| offset_before_tab_strip(text, o)))
}

/// Map a byte offset in tab-stripped text back to `source`.
fn offset_before_tab_strip(source: &str, stripped_offset: usize) -> usize {
    let mut kept = 0;
    for (i, byte) in source.bytes().enumerate() {
        if byte == b'\t' {
            continue;
        }
        if kept == stripped_offset {
            return i;
        }
        kept += 1;
    }
    source.len()
}

/// Read and repair a file. The handle is closed before parsing starts.
pub fn read_file(path: &Path, final_trailing_comma: bool) -> Result<RawDocument> {
    let text = std::fs::read_to_string(path).map_err(|e| CelloError::io(path, e))?;
    debug!(
        "Read {} bytes from {} (trailing comma: {})",
        text.len(),
        path.display(),
        final_trailing_comma
    );
    read_str(&text, final_trailing_comma, &path.display().to_string())
}
