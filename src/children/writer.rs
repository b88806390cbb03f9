use crate::children::types::Child;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

/// How flattened leaves are laid out in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One JSON leaf per line
    #[default]
    Lines,
    /// One JSON array of leaves per flattened value
    Array { pretty: bool },
    /// One line per leaf: the element key, or the JSON primitive
    Keys,
}

/// Writes flattened leaves to a single output
pub struct LeafWriter<W: Write> {
    writer: W,
    mode: OutputMode,
}

impl<W: Write> LeafWriter<W> {
    pub fn new(writer: W, mode: OutputMode) -> Self {
        LeafWriter { writer, mode }
    }

    pub fn write_leaves(&mut self, leaves: Vec<Child>) -> Result<()> {
        match self.mode {
            OutputMode::Lines => {
                for leaf in leaves {
                    let json = serde_json::to_string(&leaf)
                        .context("Failed to serialize leaf")?;
                    writeln!(self.writer, "{}", json).context("Failed to write leaf")?;
                }
            }
            OutputMode::Array { pretty } => {
                let array = Value::Array(leaves.into_iter().map(Value::from).collect());
                let json = if pretty {
                    serde_json::to_string_pretty(&array)
                } else {
                    serde_json::to_string(&array)
                }
                .context("Failed to serialize leaves")?;
                writeln!(self.writer, "{}", json).context("Failed to write leaves")?;
            }
            OutputMode::Keys => {
                for leaf in leaves {
                    let line = match leaf {
                        Child::Element(element) => element.key.unwrap_or_default(),
                        primitive => serde_json::to_string(&primitive)
                            .context("Failed to serialize leaf")?,
                    };
                    writeln!(self.writer, "{}", line).context("Failed to write key")?;
                }
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
