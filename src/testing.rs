//! fakes for the terminal, shell and progress bar, plus throwaway git repositories

use crate::progress::ProgressSink;
use crate::shell::{CommandOutput, CommandRunner};
use crate::ui::{Prompter, Reporter};
use anyhow::{Result, anyhow, bail};
use git2::Repository;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// helper to initialise a test git repository
pub fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    // configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (temp_dir, repo)
}

/// helper to commit all changes, returning the new commit id
pub fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = repo.signature().unwrap();

    let parent_commit = repo.head().ok().and_then(|h| h.peel_to_commit().ok());

    if let Some(parent) = parent_commit {
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )
        .unwrap()
    } else {
        // first commit
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])
            .unwrap()
    }
}

/// returns a canned result and remembers every call
pub struct FakeRunner {
    result: std::result::Result<CommandOutput, String>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeRunner {
    pub fn succeeding(stdout: &str) -> Self {
        Self::with(Ok(CommandOutput {
            success: true,
            stdout: stdout.to_string(),
        }))
    }

    pub fn failing(stdout: &str) -> Self {
        Self::with(Ok(CommandOutput {
            success: false,
            stdout: stdout.to_string(),
        }))
    }

    pub fn erroring(message: &str) -> Self {
        Self::with(Err(message.to_string()))
    }

    fn with(result: std::result::Result<CommandOutput, String>) -> Self {
        Self {
            result,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, dir: &Path) -> Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), dir.to_path_buf()));
        self.result.clone().map_err(|e| anyhow!(e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
    Summary,
}

/// keeps every message for later assertions
#[derive(Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn summary(&self, heading: &str, items: &[String]) {
        let mut text = heading.to_string();
        for item in items {
            text.push_str("\n- ");
            text.push_str(item);
        }
        self.push(Level::Summary, &text);
    }
}

/// scripted answer to the next prompt
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    Pick(Vec<usize>),
    /// confirm the multi-select with the preselection untouched
    KeepAll,
    Cancel,
}

/// answers prompts from a script, failing the test when it runs dry
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    prompts: RefCell<Vec<Vec<String>>>,
    preselected: RefCell<Vec<Vec<usize>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            prompts: RefCell::new(Vec::new()),
            preselected: RefCell::new(Vec::new()),
        }
    }

    /// the options offered by each prompt so far
    pub fn prompts(&self) -> Vec<Vec<String>> {
        self.prompts.borrow().clone()
    }

    /// the preselection of each multi-select so far
    pub fn preselected(&self) -> Vec<Vec<usize>> {
        self.preselected.borrow().clone()
    }

    fn next(&self, options: &[String]) -> Result<Answer> {
        self.prompts.borrow_mut().push(options.to_vec());
        match self.answers.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no scripted answer for prompt {options:?}"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, _message: &str, options: &[String]) -> Result<Option<usize>> {
        match self.next(options)? {
            Answer::Select(index) => Ok(Some(index)),
            Answer::Cancel => Ok(None),
            other => bail!("expected a select answer, got {other:?}"),
        }
    }

    fn multi_select(
        &self,
        _message: &str,
        options: &[String],
        preselected: &[usize],
    ) -> Result<Option<Vec<usize>>> {
        self.preselected.borrow_mut().push(preselected.to_vec());
        match self.next(options)? {
            Answer::Pick(indices) => Ok(Some(indices)),
            Answer::KeepAll => Ok(Some(preselected.to_vec())),
            Answer::Cancel => Ok(None),
            other => bail!("expected a multi-select answer, got {other:?}"),
        }
    }
}

/// discards updates, remembers labels
#[derive(Default)]
pub struct SilentProgress {
    pub total: Option<usize>,
    pub advanced: Vec<String>,
    pub stopped: bool,
    /// how many times output was written around the bar
    pub suspended: usize,
}

impl ProgressSink for SilentProgress {
    fn start(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn advance(&mut self, label: &str) {
        self.advanced.push(label.to_string());
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn suspend(&mut self, write: &mut dyn FnMut()) {
        self.suspended += 1;
        write();
    }

    fn elapsed_secs(&self) -> f64 {
        0.5
    }
}
