//! Human-readable duplicate report.
//!
//! Each group is printed as a block naming the original and new locations
//! and the files on each side. Color is applied with `yansi` and is a no-op
//! once `yansi::disable()` has been called (see `--no-color`).

use std::io::{self, Write};

use yansi::Paint;

use crate::duplicates::DuplicateGroup;
use crate::engine::IndexSummary;

/// Text renderer for duplicate groups.
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a IndexSummary,
}

impl<'a> TextOutput<'a> {
    /// Create a renderer over the groups and counters of one run.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a IndexSummary) -> Self {
        Self { groups, summary }
    }

    /// Write every group followed by the run summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for group in self.groups {
            write_group(writer, group)?;
        }
        self.write_summary(writer)
    }

    /// Write the one-paragraph run summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let s = self.summary;
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} files in {:.2?}",
            "Indexed".bold(),
            s.visited,
            s.duration
        )?;
        writeln!(
            writer,
            "  new: {}, moved: {}, unchanged: {}, duplicates: {} in {} group(s)",
            s.new_files,
            s.moved,
            s.unchanged,
            s.duplicates,
            self.groups.len()
        )?;
        if s.errors > 0 {
            writeln!(writer, "  {} {} file(s) skipped", "warning:".yellow(), s.errors)?;
        }
        Ok(())
    }
}

/// Write one duplicate group block.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_group<W: Write>(writer: &mut W, group: &DuplicateGroup) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=== Duplicate Found ===".bold().yellow())?;
    write_side(writer, "Original Location:", &group.original_folder, &group.original_files)?;
    writeln!(writer)?;
    write_side(writer, "New Location:", &group.new_folder, &group.new_files)?;
    writeln!(writer, "=======================")
}

fn write_side<W: Write>(
    writer: &mut W,
    title: &str,
    folder: &str,
    files: &[String],
) -> io::Result<()> {
    writeln!(writer, "{}", title.bold())?;
    let folder = if folder.is_empty() { "." } else { folder };
    writeln!(writer, "  Folder: {}", folder.cyan())?;
    writeln!(writer, "  Files:")?;
    for file in files {
        writeln!(writer, "    - {file}")?;
    }
    Ok(())
}

/// Write the delete prompt shown after each group.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_delete_prompt<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Options:")?;
    writeln!(writer, "o - Delete original files")?;
    writeln!(writer, "n - Delete new files")?;
    writeln!(writer, "s - Skip (default)")?;
    write!(writer, "Enter your choice (o/n/s): ")?;
    writer.flush()
}
