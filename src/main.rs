mod changeset;
mod cli;
mod config;
mod constants;
mod context;
mod copy;
mod filesystem;
mod git;
mod menu;
mod progress;
mod selection;
mod shell;
mod staging;
#[cfg(test)]
mod testing;
mod ui;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::AppContext;
use crate::progress::BarProgress;
use crate::shell::ShellRunner;
use crate::ui::{ConsoleReporter, InquirePrompter};
use anyhow::{Context, Result, bail};
use std::io::IsTerminal;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let working_path = cli.working_path(&cwd);
    if !working_path.is_dir() {
        bail!("{} is not a directory", working_path.display());
    }

    let mut config = Config::load(cli.config.as_deref(), &working_path)?;
    config.apply_overrides(cli.branch.as_deref(), cli.upload_folder.as_deref())?;

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    // sanity checks
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        bail!("interactive terminal required");
    }
    git::sanity_check(&working_path)?;

    // main
    let ctx = AppContext::new(working_path, config);
    let runner = ShellRunner::new(Duration::from_secs(ctx.config.command_timeout_secs));
    let mut progress = BarProgress::default();

    inquire::set_global_render_config(ui::theme());
    ui::print_welcome();

    menu::run(
        &ctx,
        &InquirePrompter,
        &ConsoleReporter,
        &runner,
        &mut progress,
    )
}
