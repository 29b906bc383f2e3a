use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info};
use std::path::Path;

/// Check that `path` may be (over)written.
///
/// - missing file: ok
/// - existing file with `force`: ok
/// - existing file otherwise: ask; a refusal cancels the operation.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if confirm(format!("The file '{}' already exists. Overwrite?", path.display())) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "cancelled, '{}' was not overwritten",
            path.display()
        )))
    }
}
