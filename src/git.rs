use crate::constants::{REMOTE_HEAD_REF, REMOTE_NAME};
use anyhow::{Result, bail};
use git2::Repository;
use std::path::Path;

/// what the working tree is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// the last commit
    Commit,
    /// the remote tracking ref of the main branch
    Branch,
}

// `add -N` records untracked files as intent-to-add so the diff lists them too
const STAGE_COMMAND: &str = "git add -N .";
// paths are listed relative to the working path and non-ASCII names are printed as is;
// lowercase `d` excludes deletions
const DIFF_COMMAND: &str =
    "git -c core.quotePath=false diff --name-only --relative --diff-filter=d";

/// build a `| grep -v` chain that drops every line starting with one of `patterns`.
///
/// patterns are matched literally from the start of the line, so `node_modules/`
/// only drops paths inside that folder and `*.log` only a path that begins with `*.log`.
pub fn build_ignore_clause(patterns: &[String]) -> String {
    patterns
        .iter()
        .map(|pattern| {
            let term = format!("^{}", escape_pattern(pattern));
            // nul bytes are stripped above, so quoting can't fail
            let quoted = shlex::try_quote(&term).map(|q| q.into_owned()).unwrap_or(term);
            format!(" | grep -v {quoted}")
        })
        .collect()
}

/// escape basic regex metacharacters so grep matches the pattern as written
fn escape_pattern(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '\0' => {}
            '\\' | '.' | '[' | ']' | '*' | '^' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// build the shell command listing changed, non-deleted files for `mode`
pub fn build_command(mode: Mode, ignore_clause: &str, main_branch: &str) -> String {
    let reference = match mode {
        Mode::Commit => String::new(),
        Mode::Branch => {
            let remote_ref = format!("{REMOTE_NAME}/{main_branch}");
            let quoted = shlex::try_quote(&remote_ref)
                .map(|q| q.into_owned())
                .unwrap_or(remote_ref);
            format!(" {quoted}")
        }
    };
    format!("{STAGE_COMMAND} && {DIFF_COMMAND}{reference}{ignore_clause}")
}

/// the remote's default branch, or `fallback` when it can't be determined
pub fn resolve_main_branch(path: &Path, fallback: &str) -> String {
    remote_default_branch(path).unwrap_or_else(|| fallback.to_string())
}

/// read `refs/remotes/origin/HEAD`, which points at e.g. `refs/remotes/origin/main`
fn remote_default_branch(path: &Path) -> Option<String> {
    let repo = Repository::discover(path).ok()?;
    let reference = repo.find_reference(REMOTE_HEAD_REF).ok()?;
    let target = reference.symbolic_target()?;
    let prefix = format!("refs/remotes/{REMOTE_NAME}/");
    let name = target.strip_prefix(&prefix)?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// sanity check that `path` is inside a git repository with a working tree
pub fn sanity_check(path: &Path) -> Result<()> {
    let repo = match Repository::discover(path) {
        Ok(repo) => repo,
        Err(e) => bail!("not in a git repository: {}", e.message()),
    };

    if repo.is_bare() {
        bail!("repository has no working tree");
    }

    Ok(())
}
