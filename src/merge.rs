//! JSON package merge
//!
//! The document-merge collaborator used by the orchestrator: combines two
//! JSON package documents additively. The destination (module) document
//! keeps every field it already has; fields from the source (base) document
//! that the destination lacks are appended after the destination's own keys,
//! in source order. Nested objects present on both sides are merged the same
//! way, recursively. On any other collision the destination value wins.
//!
//! Output is tab-indented pretty JSON terminated with a single newline, the
//! convention the merged package files are written back in. Key order is
//! preserved end to end, which is what keeps module-specific keys ahead of
//! the appended base keys (serde_json's `preserve_order` feature).

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// Merge the `src` package document into the `dest` package document.
///
/// Both buffers must parse as JSON. Returns the merged document serialized
/// with tab indentation and a trailing newline; the caller writes it back
/// verbatim over the destination file.
///
/// Merging an already-merged destination is a no-op on content, so re-runs
/// of a batch are idempotent.
///
/// # Errors
///
/// Returns `Error::Merge` naming the side that failed when either buffer is
/// not valid JSON or the result cannot be serialized.
pub fn merge_packages(dest: &[u8], src: &[u8]) -> Result<Vec<u8>> {
    let mut dest_value: JsonValue = serde_json::from_slice(dest).map_err(|err| Error::Merge {
        context: "destination".to_string(),
        source: err,
    })?;
    let src_value: JsonValue = serde_json::from_slice(src).map_err(|err| Error::Merge {
        context: "source".to_string(),
        source: err,
    })?;

    merge_values(&mut dest_value, &src_value);
    to_tab_indented(&dest_value)
}

/// Recursively merge source fields into the destination value.
///
/// Only object/object pairs merge; everything else leaves the destination
/// untouched (the module document wins every tie).
fn merge_values(dest: &mut JsonValue, src: &JsonValue) {
    let (Some(dest_map), Some(src_map)) = (dest.as_object_mut(), src.as_object()) else {
        return;
    };

    for (key, value) in src_map {
        match dest_map.get_mut(key) {
            Some(existing) if existing.is_object() && value.is_object() => {
                merge_values(existing, value);
            }
            Some(_) => {}
            None => {
                dest_map.insert(key.clone(), value.clone());
            }
        }
    }
}

fn to_tab_indented(value: &JsonValue) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(|err| Error::Merge {
        context: "serialization".to_string(),
        source: err,
    })?;
    buf.push(b'\n');
    Ok(buf)
}
