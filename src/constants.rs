// config defaults
pub const DEFAULT_MAIN_BRANCH: &str = "master";
pub const DEFAULT_UPLOAD_FOLDER: &str = "___CHANGES_TO_UPLOAD___";
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    ".git/",
    ".gitignore",
    ".idea/",
    ".vscode/",
    "_copyChangesToDirectoryForUpload.py",
    "composer.json",
    "composer.lock",
    "copyChangesToDirectoryForUpload.py",
    "cypress/",
    "LICENSE",
    "package.json",
    "package-lock.json",
    "README.md",
    "node_modules/",
    "dist/",
    "build/",
    ".cache/",
    ".editorconfig",
    ".eslintignore",
    ".eslintrc",
    ".prettierrc",
    ".prettierignore",
    "coverage/",
    ".nyc_output/",
    ".DS_Store",
    "Thumbs.db",
    "*.log",
    "*.tmp",
    "*.swp",
    "*.bak",
    "*.old",
    "*.orig",
    "public/",
    "webpack.config.js",
    "vite.config.js",
    "rollup.config.js",
    ".parcel-cache/",
    "vendor/",
];

// config files
pub const APP_NAME: &str = "git-upload-changes";
pub const PROJECT_CONFIG_FILE: &str = ".git-upload-changes.json";
pub const USER_CONFIG_FILE: &str = "config.json";

// git
pub const REMOTE_NAME: &str = "origin";
pub const REMOTE_HEAD_REF: &str = "refs/remotes/origin/HEAD";

// ui
pub const MAX_VISIBLE_CHOICES: usize = 10;
