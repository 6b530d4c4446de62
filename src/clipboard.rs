use anyhow::{Context, Result, anyhow};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Programs tried in order when no clipboard command is configured
fn default_commands() -> Vec<Vec<String>> {
    let candidates: &[&[&str]] = if cfg!(target_os = "macos") {
        &[&["pbcopy"]]
    } else if cfg!(target_os = "windows") {
        &[&["clip"]]
    } else {
        &[
            &["wl-copy"],
            &["xclip", "-selection", "clipboard"],
            &["xsel", "--clipboard", "--input"],
        ]
    };

    candidates
        .iter()
        .map(|args| args.iter().map(|arg| arg.to_string()).collect())
        .collect()
}

/// Pipes `text` into a clipboard program
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    command: Option<Vec<String>>,
}

impl Clipboard {
    /// `command` is a shell-style word list such as `"xclip -selection clipboard"`
    pub fn new(command: Option<&str>) -> Self {
        let command = command
            .map(|cmd| cmd.split_whitespace().map(String::from).collect::<Vec<_>>())
            .filter(|words| !words.is_empty());
        Self { command }
    }

    pub fn try_copy(&self, text: &str) -> Result<()> {
        let commands = match &self.command {
            Some(command) => vec![command.clone()],
            None => default_commands(),
        };

        let mut last_error = anyhow!("No clipboard command available");
        for command in &commands {
            match run(command, text) {
                Ok(()) => {
                    debug!(program = %command[0], "copied to clipboard");
                    return Ok(());
                }
                Err(err) => last_error = err,
            }
        }
        Err(last_error)
    }

    /// Copies `text`, logging failures instead of returning them
    pub fn copy(&self, text: &str) -> bool {
        match self.try_copy(text) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to copy to clipboard: {err:#}");
                false
            }
        }
    }
}

fn run(command: &[String], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("Empty clipboard command")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {program}"))?;

    let written = child
        .stdin
        .take()
        .context("Clipboard program has no stdin")
        .and_then(|mut stdin| {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write to {program}"))
        });
    if let Err(err) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(err);
    }

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for {program}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{program} exited with {status}"))
    }
}
