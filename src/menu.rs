use crate::context::AppContext;
use crate::copy::CopyOrchestrator;
use crate::git::Mode;
use crate::progress::ProgressSink;
use crate::shell::CommandRunner;
use crate::staging;
use crate::ui::{Prompter, Reporter};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CopyChanges(Mode),
    SelectChanges(Mode),
    ClearUploadFolder,
    Exit,
}

impl Action {
    /// menu order
    pub const ALL: [Action; 6] = [
        Action::CopyChanges(Mode::Commit),
        Action::CopyChanges(Mode::Branch),
        Action::SelectChanges(Mode::Commit),
        Action::SelectChanges(Mode::Branch),
        Action::ClearUploadFolder,
        Action::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::CopyChanges(Mode::Commit) => "Copy current changes to directory for upload",
            Action::CopyChanges(Mode::Branch) => {
                "Copy changes from main branch to directory for upload"
            }
            Action::SelectChanges(Mode::Commit) => "Select current changes to copy",
            Action::SelectChanges(Mode::Branch) => "Select changes from main branch to copy",
            Action::ClearUploadFolder => "Delete all files in upload-directory",
            Action::Exit => "Exit",
        }
    }

    fn intro(self) -> &'static str {
        match self {
            Action::CopyChanges(Mode::Commit) => "Copying current changes...",
            Action::CopyChanges(Mode::Branch) => "Copying changes from main branch...",
            Action::SelectChanges(Mode::Commit) => "Selecting current changes...",
            Action::SelectChanges(Mode::Branch) => "Selecting changes from main branch...",
            Action::ClearUploadFolder => "Deleting files and folder...",
            Action::Exit => "Bye!",
        }
    }
}

/// show the menu until the user exits; failed actions are reported and the menu comes back
pub fn run(
    ctx: &AppContext,
    prompter: &dyn Prompter,
    reporter: &dyn Reporter,
    runner: &dyn CommandRunner,
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    let labels: Vec<String> = Action::ALL
        .iter()
        .map(|action| action.label().to_string())
        .collect();

    loop {
        let Some(index) = prompter.select("What can I do for you?", &labels)? else {
            return Ok(());
        };
        let Some(&action) = Action::ALL.get(index) else {
            continue;
        };

        reporter.info(action.intro());
        if action == Action::Exit {
            return Ok(());
        }

        if let Err(e) = perform(ctx, action, prompter, reporter, runner, progress) {
            reporter.error(&format!("{e:#}"));
        }
    }
}

fn perform(
    ctx: &AppContext,
    action: Action,
    prompter: &dyn Prompter,
    reporter: &dyn Reporter,
    runner: &dyn CommandRunner,
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    let folder = ctx.config.upload_folder_name.as_str();
    let orchestrator = || {
        let collector = ctx.collector(runner);
        CopyOrchestrator::new(&ctx.working_path, folder, collector, reporter)
    };

    match action {
        Action::CopyChanges(mode) => {
            orchestrator().copy_changes(mode, progress)?;
        }
        Action::SelectChanges(mode) => {
            orchestrator().copy_selective(mode, prompter, progress)?;
        }
        Action::ClearUploadFolder => {
            if staging::clear(&ctx.working_path, folder, reporter) {
                reporter.success("Folder cleared successfully.");
            }
        }
        Action::Exit => {}
    }
    Ok(())
}
