use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// result of a finished shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

/// runs a shell command line inside a directory
pub trait CommandRunner {
    fn run(&self, command: &str, dir: &Path) -> Result<CommandOutput>;
}

/// runs commands through `sh -c`, killing them after `timeout`
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, dir: &Path) -> Result<CommandOutput> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run command in {}", dir.display()))?;

        // drain stdout while waiting so a large listing can't fill the pipe
        let mut stdout = child
            .stdout
            .take()
            .context("failed to capture command output")?;
        let reader = thread::spawn(move || {
            let mut data = Vec::new();
            stdout.read_to_end(&mut data).map(|_| data)
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                // timeout occurred, kill the process; the reader thread is left to
                // finish on its own since grandchildren may still hold the pipe
                let _ = child.kill();
                let _ = child.wait();
                bail!(
                    "command did not finish within {}s: {command}",
                    self.timeout.as_secs()
                );
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                bail!("failed to wait for command: {e}");
            }
        };

        let data = match reader.join() {
            Ok(Ok(data)) => data,
            Ok(Err(e)) => bail!("failed to read command output: {e}"),
            Err(_) => bail!("failed to read command output"),
        };

        Ok(CommandOutput {
            success: status.success(),
            stdout: String::from_utf8_lossy(&data).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn runner() -> ShellRunner {
        ShellRunner::new(Duration::from_secs(10))
    }

    #[test]
    fn test_captures_stdout_and_status() {
        let temp_dir = TempDir::new().unwrap();

        let output = runner()
            .run("printf 'src/a.js\\nsrc/b.js\\n'", temp_dir.path())
            .unwrap();

        assert!(output.success);
        assert_eq!(output.stdout, "src/a.js\nsrc/b.js\n");
    }

    #[test]
    fn test_runs_in_given_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "").unwrap();

        let output = runner().run("ls", temp_dir.path()).unwrap();

        assert!(output.stdout.lines().any(|line| line == "marker.txt"));
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();

        // grep exits 1 when every line is filtered out
        let output = runner()
            .run("printf 'vendor/x.php\\n' | grep -v '^vendor/'", temp_dir.path())
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.stdout, "");
    }

    #[test]
    fn test_timeout_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ShellRunner::new(Duration::from_millis(200));

        assert!(runner.run("sleep 5", temp_dir.path()).is_err());
    }
}
