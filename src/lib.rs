//! # flatten-children
//!
//! Normalizes a UI tree's heterogeneous children value (nested sequences,
//! conditionally rendered `null`/booleans, fragments, keyed elements, text
//! and numbers) into one flat ordered list of leaves. Every element leaf is
//! given a deterministic key composed from its position and the keys of the
//! fragments that enclosed it.
//!
//! ## Quick Start
//!
//! ```rust
//! use flatten_children::{flatten_children, Child, Element, Fragment};
//!
//! # fn main() -> Result<(), flatten_children::FlattenError> {
//! let children = Child::List(vec![
//!     Element::new("span").into(),
//!     Fragment::new(Element::new("span").with_key("one")).with_key("apple").into(),
//!     Child::text("tail"),
//! ]);
//!
//! let leaves = flatten_children(&children)?;
//!
//! assert_eq!(leaves[0].key(), Some(".0"));
//! assert_eq!(leaves[1].key(), Some(".$apple..$one"));
//! assert_eq!(leaves[2], Child::text("tail"));
//! # Ok(())
//! # }
//! ```
//!
//! Children can also be read from JSON, see [`children::json`].

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read, Write};

pub mod children;

// Re-export commonly used types for convenience
pub use children::{
    flatten_children, Child, ChildrenModel, Element, FlattenConfig, FlattenError, Flattener,
    Fragment, KeyPath, LeafWriter, OutputMode, StandardModel,
};

/// Flatten a stream of JSON children values, one per line, into `writer`
pub fn flatten_json_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut LeafWriter<W>,
    config: FlattenConfig,
) -> Result<()> {
    let flattener = Flattener::new(config);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let children: Child = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse children on line {}", line_no + 1))?;
        let leaves = flattener
            .flatten(&children)
            .with_context(|| format!("Failed to flatten children on line {}", line_no + 1))?;
        writer.write_leaves(leaves)?;
    }

    Ok(())
}

/// Read children values from `reader`.
///
/// Without `ndjson` the whole input must be a single JSON document; it is
/// parsed with SIMD JSON, falling back to serde_json for the error report.
/// With `ndjson` every non-empty line is one value.
pub fn read_children<R: Read>(reader: R, ndjson: bool) -> Result<Vec<Child>> {
    let mut content = Vec::new();
    BufReader::new(reader)
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    if ndjson {
        let mut values = Vec::new();
        for (line_no, line) in content.as_slice().lines().enumerate() {
            let line = line.context("Failed to read line")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let child: Child = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse children on line {}", line_no + 1))?;
            values.push(child);
        }
        return Ok(values);
    }

    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = match simd_json::to_owned_value(&mut content.clone()) {
        Ok(owned) => {
            let json_str = simd_json::to_string(&owned)?;
            serde_json::from_str(&json_str)?
        }
        Err(_) => serde_json::from_slice(&content).context(
            "Failed to parse input as a single JSON document (use --ndjson for one value per line)",
        )?,
    };
    let child = Child::try_from(value).context("Input is not a children value")?;
    Ok(vec![child])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_flattening() {
        let input = concat!(
            r##"[{"type": "span"}, false, {"type": "span", "key": "x"}]"##,
            "\n\n",
            r##"{"type": "#fragment", "key": "apple", "children": [{"type": "b"}, "hi"]}"##,
            "\n",
        );

        let mut writer = LeafWriter::new(Vec::new(), OutputMode::Keys);
        flatten_json_stream(input.as_bytes(), &mut writer, FlattenConfig::default()).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, ".0\n.$x\n.$apple..0\n\"hi\"\n");
    }

    #[test]
    fn test_stream_reports_bad_line() {
        let input = "[1, 2]\n{\"children\": []}\n";

        let mut writer = LeafWriter::new(Vec::new(), OutputMode::Lines);
        let err = flatten_json_stream(input.as_bytes(), &mut writer, FlattenConfig::default())
            .unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_single_document() {
        let input = "[\n  {\"type\": \"span\"},\n  \"two\"\n]\n";

        let values = read_children(input.as_bytes(), false).unwrap();

        assert_eq!(values.len(), 1);
        assert_eq!(flatten_children(&values[0]).unwrap()[0].key(), Some(".0"));
        assert!(read_children("  \n".as_bytes(), false).unwrap().is_empty());
    }

    #[test]
    fn test_read_rejects_trailing_documents() {
        let input = "[1]\n[{\"type\": \"span\"}]\n";

        let err = read_children(input.as_bytes(), false).unwrap_err();
        assert!(err.to_string().contains("--ndjson"));

        let values = read_children(input.as_bytes(), true).unwrap();
        assert_eq!(values.len(), 2);
    }
}
