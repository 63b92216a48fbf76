use crate::constants::MAX_VISIBLE_CHOICES;
use anyhow::{Context, Result};
use console::measure_text_width;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{InquireError, MultiSelect, Select};

#[macro_export]
macro_rules! warning {
    // format string literal (with or without inline formatting)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!($fmt $(, $($arg)*)?).yellow());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!("{}", $expr).yellow());
    }};
}

#[macro_export]
macro_rules! error {
    // format string literal (with or without inline formatting)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!($fmt $(, $($arg)*)?).red());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "{}", format!("{}", $expr).red());
    }};
}

#[macro_export]
macro_rules! success {
    // format string literal (with or without inline formatting)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!($fmt $(, $($arg)*)?).green());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!("{}", $expr).green());
    }};
}

#[macro_export]
macro_rules! info {
    () => {{
        use std::io::{self, Write};
        let _ = writeln!(io::stdout());
    }};
    // format string literal (with or without inline formatting or args)
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!($fmt $(, $($arg)*)?).cyan());
    }};
    // arbitrary expression (non-literal)
    ($expr:expr) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::stdout(), "{}", format!("{}", $expr).cyan());
    }};
}

/// where operations send their user-facing messages
pub trait Reporter {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);

    /// a framed block: heading, blank line, one line per item
    fn summary(&self, heading: &str, items: &[String]);
}

/// writes to the terminal through the logging macros
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        info!(message);
    }

    fn success(&self, message: &str) {
        success!(message);
    }

    fn warn(&self, message: &str) {
        warning!(message);
    }

    fn error(&self, message: &str) {
        error!(message);
    }

    fn summary(&self, heading: &str, items: &[String]) {
        use colored::Colorize;
        use std::io::{self, Write};

        let mut lines = vec![heading.to_string(), String::new()];
        lines.extend(items.iter().map(|item| format!("- {item}")));
        let _ = writeln!(io::stdout(), "{}", render_box(&lines).cyan());
    }
}

/// draw `lines` inside a rounded border with one column of padding.
/// widths are terminal columns, so wide characters take two.
pub fn render_box(lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0);
    let horizontal = "─".repeat(width + 2);

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("╭{horizontal}╮\n"));
    for line in lines {
        let pad = width - measure_text_width(line);
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("╰{horizontal}╯"));
    out
}

/// interactive choices; `None` means the user cancelled the prompt
pub trait Prompter {
    fn select(&self, message: &str, options: &[String]) -> Result<Option<usize>>;

    fn multi_select(
        &self,
        message: &str,
        options: &[String],
        preselected: &[usize],
    ) -> Result<Option<Vec<usize>>>;
}

pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(&self, message: &str, options: &[String]) -> Result<Option<usize>> {
        let answer = Select::new(message, options.to_vec())
            .with_page_size(page_size(options.len()))
            .raw_prompt();
        match answer {
            Ok(choice) => Ok(Some(choice.index)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e).context("failed to read selection"),
        }
    }

    fn multi_select(
        &self,
        message: &str,
        options: &[String],
        preselected: &[usize],
    ) -> Result<Option<Vec<usize>>> {
        let answer = MultiSelect::new(message, options.to_vec())
            .with_default(preselected)
            .with_page_size(page_size(options.len()))
            .with_help_message("space to select/deselect files, enter to confirm")
            .raw_prompt();
        match answer {
            Ok(choices) => Ok(Some(choices.into_iter().map(|c| c.index).collect())),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e).context("failed to read selection"),
        }
    }
}

fn page_size(len: usize) -> usize {
    len.clamp(1, MAX_VISIBLE_CHOICES)
}

pub fn theme() -> RenderConfig<'static> {
    RenderConfig {
        prompt_prefix: Styled::new("?").with_fg(Color::LightCyan),
        highlighted_option_prefix: Styled::new("❯").with_fg(Color::LightCyan),
        selected_checkbox: Styled::new("◉").with_fg(Color::LightGreen),
        unselected_checkbox: Styled::new("○").with_fg(Color::DarkGrey),
        answer: StyleSheet::new().with_fg(Color::LightCyan),
        help_message: StyleSheet::new()
            .with_fg(Color::DarkGrey)
            .with_attr(Attributes::ITALIC),
        ..Default::default()
    }
}

pub fn print_welcome() {
    use colored::Colorize;

    let lines = vec![
        "git-upload-changes".to_string(),
        String::new(),
        "collects your git changes in one folder, ready for upload".to_string(),
    ];
    println!("{}", render_box(&lines).yellow());
    println!();
}
