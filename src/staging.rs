use crate::filesystem::FileSystem;
use crate::ui::Reporter;
use std::path::Path;

/// remove `<working_path>/<staging_dir>`; failures are reported, never returned.
/// returns whether the folder is gone afterwards.
pub fn clear(working_path: &Path, staging_dir: &str, reporter: &dyn Reporter) -> bool {
    let files = FileSystem::new(working_path);
    match files.remove_directory(Path::new(staging_dir)) {
        Ok(()) => true,
        Err(e) => {
            reporter.error(&format!("Failed to clear folder: {e}"));
            false
        }
    }
}
