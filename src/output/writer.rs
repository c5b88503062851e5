//! Serialization of ordered groups to the output artifact.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, RowGroupError};
use crate::grouping::group::Group;

/// Prefix of the header line that opens each group block.
pub const GROUP_HEADER: &str = "Group ";

/// Writes groups as numbered text blocks.
///
/// Each group becomes a `Group <n>` header, one line per member row with
/// fields joined by `;` and no quotes, and a blank separator line. Numbering
/// starts at 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupWriter;

impl GroupWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        GroupWriter
    }

    /// Write groups to any writer, returning the number of groups written.
    pub fn write_groups<W: Write>(&self, groups: &[Group], writer: W) -> Result<usize> {
        let mut writer = BufWriter::new(writer);
        for (i, group) in groups.iter().enumerate() {
            writeln!(writer, "{GROUP_HEADER}{}", i + 1)?;
            for row in group.members() {
                writeln!(writer, "{row}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(groups.len())
    }

    /// Write groups to a file, replacing it only once everything is written.
    ///
    /// The groups go to a temporary file in the destination directory which
    /// is then renamed over `path`. If anything fails, the existing file at
    /// `path` is left as it was.
    pub fn write_to_path(&self, groups: &[Group], path: &Path) -> Result<usize> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            fs::create_dir_all(dir)?;
        }

        let mut temp = NamedTempFile::new_in(dir)?;
        let written = self.write_groups(groups, temp.as_file_mut())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| {
            RowGroupError::output(format!("Failed to replace {}: {}", path.display(), e.error))
        })?;

        log::info!("Wrote {} groups to {}", written, path.display());
        Ok(written)
    }
}
