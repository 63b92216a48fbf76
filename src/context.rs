use crate::changeset::ChangeSetCollector;
use crate::config::Config;
use crate::git::{build_ignore_clause, resolve_main_branch};
use crate::shell::CommandRunner;
use std::path::PathBuf;

/// settings resolved once at startup and shared by every menu action
pub struct AppContext {
    /// project folder the diff runs in and the upload folder lives under
    pub working_path: PathBuf,

    pub config: Config,

    /// branch compared against in branch mode
    pub main_branch: String,

    /// `| grep -v` chain built from the effective ignore list
    pub ignore_clause: String,
}

impl AppContext {
    pub fn new(working_path: PathBuf, config: Config) -> Self {
        let main_branch = if config.resolve_main_branch {
            resolve_main_branch(&working_path, &config.main_branch)
        } else {
            config.main_branch.clone()
        };
        let ignore_clause = build_ignore_clause(&config.effective_ignore_list());

        Self {
            working_path,
            config,
            main_branch,
            ignore_clause,
        }
    }

    pub fn collector<'a>(&self, runner: &'a dyn CommandRunner) -> ChangeSetCollector<'a> {
        let ignore_clause = self.ignore_clause.clone();
        ChangeSetCollector::new(runner, ignore_clause, self.main_branch.clone())
    }
}
