use crate::git::{Mode, build_command};
use crate::shell::CommandRunner;
use anyhow::Result;
use std::borrow::Cow;
use std::path::Path;

/// relative paths of changed files, in the order git listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    files: Vec<String>,
}

impl ChangeSet {
    /// parse `git diff --name-only` output, dropping blank lines
    pub fn parse(output: &str) -> Self {
        Self::from_paths(
            output
                .split('\n')
                .map(|line| unquote(line.trim_end_matches('\r'))),
        )
    }

    /// keep only usable entries: non-blank and relative
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files = paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref();
                if path.trim().is_empty() || Path::new(path).is_absolute() {
                    None
                } else {
                    Some(path.to_string())
                }
            })
            .collect();
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// decode a path git printed as a C string.
/// names with `"`, `\` or control characters stay quoted even with `core.quotePath=false`.
fn unquote(line: &str) -> Cow<'_, str> {
    let Some(inner) = line.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) else {
        return Cow::Borrowed(line);
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut rest = inner.bytes().peekable();
    while let Some(byte) = rest.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match rest.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'v') => bytes.push(0x0b),
            Some(digit @ b'0'..=b'7') => {
                // three octal digits per byte
                let mut value = digit - b'0';
                for _ in 0..2 {
                    if let Some(next @ b'0'..=b'7') = rest.peek().copied() {
                        value = value.wrapping_mul(8).wrapping_add(next - b'0');
                        rest.next();
                    }
                }
                bytes.push(value);
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// outcome of listing changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected {
    /// the command exited non-zero (including grep filtering out every line)
    NoChanges,
    /// the command succeeded but printed no paths
    Empty,
    Files(ChangeSet),
}

impl Collected {
    /// both "no changes" outcomes collapse to `None`
    pub fn into_change_set(self) -> Option<ChangeSet> {
        match self {
            Collected::Files(change_set) => Some(change_set),
            Collected::NoChanges | Collected::Empty => None,
        }
    }
}

/// runs the diff command and turns its output into a `ChangeSet`
pub struct ChangeSetCollector<'a> {
    runner: &'a dyn CommandRunner,
    ignore_clause: String,
    main_branch: String,
}

impl<'a> ChangeSetCollector<'a> {
    pub fn new(runner: &'a dyn CommandRunner, ignore_clause: String, main_branch: String) -> Self {
        Self {
            runner,
            ignore_clause,
            main_branch,
        }
    }

    pub fn command(&self, mode: Mode) -> String {
        build_command(mode, &self.ignore_clause, &self.main_branch)
    }

    /// list changes in `working_path`; only a failure to run the command is an error
    pub fn collect(&self, mode: Mode, working_path: &Path) -> Result<Collected> {
        let output = self.runner.run(&self.command(mode), working_path)?;
        if !output.success {
            return Ok(Collected::NoChanges);
        }

        let change_set = ChangeSet::parse(&output.stdout);
        if change_set.is_empty() {
            Ok(Collected::Empty)
        } else {
            Ok(Collected::Files(change_set))
        }
    }
}
