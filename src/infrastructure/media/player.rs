use super::MediaError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Hands an audio file to something that can play it
pub trait AudioPlayer: Send + Sync {
    fn play(&self, path: &Path) -> Result<(), MediaError>;
}

#[derive(Debug, Clone, PartialEq)]
struct PlayerCommand {
    program: String,
    args: Vec<String>,
}

impl PlayerCommand {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn platform_default() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "windows") {
            ("cmd", &["/C", "start", ""])
        } else if cfg!(target_os = "macos") {
            ("open", &[])
        } else {
            ("xdg-open", &[])
        };
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Plays through the desktop's default handler, or through an explicit command line
/// such as `ffplay -nodisp -autoexit`.
///
/// `play` returns as soon as the player has started. The child is reaped on a
/// background thread so repeated plays from a long-lived session leave no zombies.
pub struct SystemPlayer {
    command: PlayerCommand,
}

impl SystemPlayer {
    pub fn new(command: Option<String>) -> Self {
        let command = command
            .as_deref()
            .and_then(PlayerCommand::parse)
            .unwrap_or_else(PlayerCommand::platform_default);
        Self { command }
    }
}

impl AudioPlayer for SystemPlayer {
    fn play(&self, path: &Path) -> Result<(), MediaError> {
        if !path.is_file() {
            return Err(MediaError::MissingFile(path.to_path_buf()));
        }

        let program = &self.command.program;
        let mut child = Command::new(program)
            .args(&self.command.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| MediaError::Spawn {
                program: program.clone(),
                source,
            })?;

        tracing::info!(file = %path.display(), player = %program, pid = child.id(), "Playing audio");

        let player = program.clone();
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::debug!(player = %player, status = %status, "Player exited with an error")
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(player = %player, error = %e, "Failed to wait for player"),
        });

        Ok(())
    }
}
