use clap::Parser;
use std::path::{Path, PathBuf};

/// git-upload-changes: collect changed files into a folder for manual upload
#[derive(Parser, Debug)]
#[command(
    name = "git-upload-changes",
    about,
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// project directory, relative to the current directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// read settings from this JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// main branch to compare against (skips remote HEAD lookup)
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// name of the folder the changes are copied into
    #[arg(long, value_name = "NAME")]
    pub upload_folder: Option<String>,

    /// print the effective settings as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// resolve the working path against `base` (normally the current directory)
    pub fn working_path(&self, base: &Path) -> PathBuf {
        match &self.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_path(path: Option<&str>) -> Cli {
        let mut args = vec!["git-upload-changes"];
        args.extend(path);
        Cli::parse_from(args)
    }

    #[test]
    fn test_working_path_defaults_to_base() {
        let cli = cli_with_path(None);
        assert_eq!(
            cli.working_path(Path::new("/home/dev")),
            PathBuf::from("/home/dev")
        );
    }

    #[test]
    fn test_working_path_joins_relative_argument() {
        let cli = cli_with_path(Some("project/web"));
        assert_eq!(
            cli.working_path(Path::new("/home/dev")),
            PathBuf::from("/home/dev/project/web")
        );
    }

    #[test]
    fn test_working_path_keeps_absolute_argument() {
        let cli = cli_with_path(Some("/srv/site"));
        assert_eq!(
            cli.working_path(Path::new("/home/dev")),
            PathBuf::from("/srv/site")
        );
    }

    #[test]
    fn test_flags_are_parsed() {
        let cli = Cli::parse_from([
            "git-upload-changes",
            "--branch",
            "main",
            "--upload-folder",
            "UPLOAD",
            "--print-config",
        ]);
        assert_eq!(cli.branch.as_deref(), Some("main"));
        assert_eq!(cli.upload_folder.as_deref(), Some("UPLOAD"));
        assert!(cli.print_config);
        assert!(cli.config.is_none());
    }
}
