use crate::constants::{
    APP_NAME, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_IGNORED_FILES, DEFAULT_MAIN_BRANCH,
    DEFAULT_UPLOAD_FOLDER, PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// settings loaded once at startup and never changed afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// branch compared against in branch mode (when it can't be resolved from the remote)
    pub main_branch: String,

    /// staging folder, relative to the working path
    pub upload_folder_name: String,

    /// path prefixes removed from every change set
    pub ignored_files: Vec<String>,

    /// look up the remote's default branch before falling back to `main_branch`
    pub resolve_main_branch: bool,

    /// how long the diff command may run
    pub command_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_branch: DEFAULT_MAIN_BRANCH.to_string(),
            upload_folder_name: DEFAULT_UPLOAD_FOLDER.to_string(),
            ignored_files: DEFAULT_IGNORED_FILES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            resolve_main_branch: true,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// load settings, first match wins: explicit file, project file, user file, defaults
    pub fn load(explicit: Option<&Path>, working_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let project_file = working_path.join(PROJECT_CONFIG_FILE);
        if project_file.is_file() {
            return Self::from_file(&project_file);
        }

        if let Some(user_file) = user_config_path()
            && user_file.is_file()
        {
            return Self::from_file(&user_file);
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.main_branch.trim().is_empty() {
            bail!("main-branch must not be empty");
        }
        let folder = self.upload_folder_name.trim();
        if folder.is_empty() {
            bail!("upload-folder-name must not be empty");
        }
        let parts: Vec<&str> = folder.split('/').collect();
        if Path::new(folder).is_absolute()
            || parts.contains(&"..")
            || parts.iter().all(|part| part.is_empty() || *part == ".")
        {
            bail!("upload-folder-name must be a relative path inside the project");
        }
        if let Some(pattern) = self
            .ignored_files
            .iter()
            .find(|p| p.is_empty() || p.contains('\0'))
        {
            bail!("invalid ignored-files entry: {pattern:?}");
        }
        if self.command_timeout_secs == 0 {
            bail!("command-timeout-secs must be greater than zero");
        }
        Ok(())
    }

    /// apply command line overrides; an explicit branch skips the remote lookup
    pub fn apply_overrides(
        &mut self,
        branch: Option<&str>,
        upload_folder: Option<&str>,
    ) -> Result<()> {
        if let Some(branch) = branch {
            self.main_branch = branch.to_string();
            self.resolve_main_branch = false;
        }
        if let Some(folder) = upload_folder {
            self.upload_folder_name = folder.trim_end_matches('/').to_string();
        }
        self.validate()
    }

    /// ignore list plus the staging folder itself, so stale uploads never list themselves
    pub fn effective_ignore_list(&self) -> Vec<String> {
        let mut list = self.ignored_files.clone();
        let folder = format!("{}/", self.upload_folder_name.trim_end_matches('/'));
        if !list.contains(&folder) {
            list.push(folder);
        }
        list
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialise config")
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(USER_CONFIG_FILE))
}
