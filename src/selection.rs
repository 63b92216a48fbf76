use crate::changeset::ChangeSet;
use crate::ui::Prompter;
use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// which files of a change set to offer for copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTypeFilter {
    All,
    /// lowercase, with a leading `.`
    Extension(String),
}

impl FileTypeFilter {
    /// `all` (any case) or an extension with or without its leading dot
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return FileTypeFilter::All;
        }
        let lower = value.to_lowercase();
        if lower.starts_with('.') {
            FileTypeFilter::Extension(lower)
        } else {
            FileTypeFilter::Extension(format!(".{lower}"))
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            FileTypeFilter::All => true,
            FileTypeFilter::Extension(ext) => extension_of(path).as_deref() == Some(ext.as_str()),
        }
    }

    /// label shown in the filter prompt
    pub fn label(&self) -> String {
        match self {
            FileTypeFilter::All => "All files".to_string(),
            FileTypeFilter::Extension(ext) => format!("{ext} files"),
        }
    }
}

impl fmt::Display for FileTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTypeFilter::All => write!(f, "all"),
            FileTypeFilter::Extension(ext) => write!(f, "{ext}"),
        }
    }
}

/// lowercase extension with its dot; dotfiles like `.gitignore` have none
pub fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

/// sorted, deduplicated extensions present in `change_set`
pub fn list_distinct_extensions(change_set: &ChangeSet) -> Vec<String> {
    change_set
        .files()
        .iter()
        .filter_map(|path| extension_of(path))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn filter_by_type(change_set: &ChangeSet, filter: &FileTypeFilter) -> ChangeSet {
    match filter {
        FileTypeFilter::All => change_set.clone(),
        FileTypeFilter::Extension(_) => ChangeSet::from_paths(
            change_set
                .files()
                .iter()
                .filter(|path| filter.matches(path)),
        ),
    }
}

/// outcome of the interactive narrowing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Files(ChangeSet),
    NoFilesForFilter(FileTypeFilter),
    NothingSelected,
    Cancelled,
}

/// ask for a file type, then let the user untick files from the filtered list
pub fn choose_files(change_set: &ChangeSet, prompter: &dyn Prompter) -> Result<Selection> {
    let mut filters = vec![FileTypeFilter::All];
    filters.extend(
        list_distinct_extensions(change_set)
            .iter()
            .map(|ext| FileTypeFilter::parse(ext)),
    );
    let labels: Vec<String> = filters.iter().map(FileTypeFilter::label).collect();

    let Some(index) = prompter.select("Select a file type filter:", &labels)? else {
        return Ok(Selection::Cancelled);
    };
    let Some(filter) = filters.get(index) else {
        return Ok(Selection::Cancelled);
    };

    let filtered = filter_by_type(change_set, filter);
    if filtered.is_empty() {
        return Ok(Selection::NoFilesForFilter(filter.clone()));
    }

    let message = format!("Select files to copy ({} available):", filtered.len());
    let everything: Vec<usize> = (0..filtered.len()).collect();
    let Some(picked) = prompter.multi_select(&message, filtered.files(), &everything)? else {
        return Ok(Selection::Cancelled);
    };

    let picked: BTreeSet<usize> = picked.into_iter().collect();
    let selected = ChangeSet::from_paths(
        filtered
            .files()
            .iter()
            .enumerate()
            .filter(|(i, _)| picked.contains(i))
            .map(|(_, path)| path),
    );
    if selected.is_empty() {
        Ok(Selection::NothingSelected)
    } else {
        Ok(Selection::Files(selected))
    }
}
