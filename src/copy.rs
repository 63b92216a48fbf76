use crate::changeset::{ChangeSet, ChangeSetCollector};
use crate::filesystem::FileSystem;
use crate::git::Mode;
use crate::progress::ProgressSink;
use crate::selection::{FileTypeFilter, Selection, choose_files};
use crate::ui::{Prompter, Reporter};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// what one copy pass did, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyResult {
    pub copied: Vec<String>,
    /// path and error message
    pub failed: Vec<(String, String)>,
    pub elapsed_secs: f64,
}

/// how a copy operation ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NoChanges,
    NoFilesForFilter(FileTypeFilter),
    NothingSelected,
    Cancelled,
    Copied(CopyResult),
}

/// copies change sets into the staging folder
pub struct CopyOrchestrator<'a> {
    files: FileSystem,
    staging: PathBuf,
    collector: ChangeSetCollector<'a>,
    reporter: &'a dyn Reporter,
}

impl<'a> CopyOrchestrator<'a> {
    pub fn new(
        working_path: &Path,
        staging_dir: &str,
        collector: ChangeSetCollector<'a>,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            files: FileSystem::new(working_path),
            staging: PathBuf::from(staging_dir),
            collector,
            reporter,
        }
    }

    /// copy every changed file for `mode`
    pub fn copy_changes(&self, mode: Mode, progress: &mut dyn ProgressSink) -> Result<Outcome> {
        let Some(change_set) = self.prepare(mode)? else {
            return Ok(Outcome::NoChanges);
        };
        self.copy_all(&change_set, progress)
    }

    /// let the user narrow the changed files for `mode` before copying
    pub fn copy_selective(
        &self,
        mode: Mode,
        prompter: &dyn Prompter,
        progress: &mut dyn ProgressSink,
    ) -> Result<Outcome> {
        let Some(change_set) = self.prepare(mode)? else {
            return Ok(Outcome::NoChanges);
        };

        let selection = choose_files(&change_set, prompter)?;
        self.finish_selection(selection, progress)
    }

    /// copy what the user picked, or report why nothing will be copied
    fn finish_selection(
        &self,
        selection: Selection,
        progress: &mut dyn ProgressSink,
    ) -> Result<Outcome> {
        match selection {
            Selection::Files(selected) => self.copy_all(&selected, progress),
            Selection::NoFilesForFilter(filter) => {
                self.reporter
                    .info(&format!("No files found for filter: {filter}"));
                Ok(Outcome::NoFilesForFilter(filter))
            }
            Selection::NothingSelected => {
                self.reporter.info("No files selected.");
                Ok(Outcome::NothingSelected)
            }
            Selection::Cancelled => {
                self.reporter.info("Selection cancelled.");
                Ok(Outcome::Cancelled)
            }
        }
    }

    /// copy an already resolved change set into a freshly cleared staging folder
    pub fn copy_all(
        &self,
        change_set: &ChangeSet,
        progress: &mut dyn ProgressSink,
    ) -> Result<Outcome> {
        if change_set.is_empty() {
            self.reporter.info("No changes found.");
            return Ok(Outcome::NoChanges);
        }
        self.clear_staging()?;
        Ok(Outcome::Copied(self.copy_files(change_set, progress)))
    }

    /// clear the staging folder, then list changes; `None` once "no changes" is reported.
    /// clearing first keeps a stale staging folder out of the listing.
    fn prepare(&self, mode: Mode) -> Result<Option<ChangeSet>> {
        self.clear_staging()?;
        let collected = self
            .collector
            .collect(mode, self.files.root())
            .context("failed to list changed files")?;
        match collected.into_change_set() {
            Some(change_set) => Ok(Some(change_set)),
            None => {
                self.reporter.info("No changes found.");
                Ok(None)
            }
        }
    }

    fn clear_staging(&self) -> Result<()> {
        self.files
            .remove_directory(&self.staging)
            .context("failed to clear upload folder")
    }

    /// copy each file in order; a failed file is reported and the loop carries on
    fn copy_files(&self, change_set: &ChangeSet, progress: &mut dyn ProgressSink) -> CopyResult {
        let mut result = CopyResult::default();

        progress.start(change_set.len());
        for path in change_set.files() {
            let destination = self.staging.join(path);
            match self.files.copy_file(Path::new(path), &destination) {
                Ok(()) => result.copied.push(path.clone()),
                Err(e) => {
                    let message = format!("Failed to copy file: {e}");
                    progress.suspend(&mut || self.reporter.warn(&message));
                    result.failed.push((path.clone(), e.to_string()));
                }
            }
            progress.advance(path);
        }
        progress.stop();
        result.elapsed_secs = progress.elapsed_secs();

        self.report(&result);
        result
    }

    fn report(&self, result: &CopyResult) {
        if !result.copied.is_empty() {
            let count = result.copied.len();
            let elapsed = result.elapsed_secs;
            self.reporter.summary(
                &format!("Copied the following {count} file(s) in {elapsed:.2}s:"),
                &result.copied,
            );
            self.reporter
                .success(&format!("Copied {count} file(s) in {elapsed:.2}s."));
        }
        if !result.failed.is_empty() {
            self.reporter
                .warn(&format!("{} file(s) failed to copy.", result.failed.len()));
        }
    }
}
