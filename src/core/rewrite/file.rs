//! Rewriting source files on disk.

use std::path::Path;

use super::{rewrite, RewriteOptions};
use crate::error::{Error, Result};
use crate::io;
use crate::output::FileReport;

/// Rewrite one file in place.
///
/// The file is only written when the rewritten text differs, so files without
/// matches stay byte-identical. With `dry_run` nothing is written.
pub fn rewrite_file(path: &Path, options: &RewriteOptions, dry_run: bool) -> Result<FileReport> {
    if !path.is_file() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let content = io::read_file(path, &format!("read {}", path.display()))?;
    let outcome = rewrite(&content, options);
    let changed = outcome.changed(&content);

    if changed && dry_run {
        log_status!("rewrite", "Dry run: {} not written", path.display());
    } else if changed {
        io::write_file(path, &outcome.text, &format!("write {}", path.display()))?;
        if outcome.import_added {
            log_status!("rewrite", "Added logger import to {}", path.display());
        }
    }

    Ok(FileReport {
        file: path.display().to_string(),
        name: io::display_name(path),
        replacements: outcome.replacements,
        modified: changed && !dry_run,
        import_added: outcome.import_added,
    })
}
