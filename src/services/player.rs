//! External media player.
//!
//! The player is a child process with its output discarded. Its progress is
//! approximated by wall time since spawn.

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::sync::{Playback, SyncOutcome};

/// Command line for playing `file` with `player`, audio only.
pub fn player_command(player: &str, file: &Path) -> Vec<String> {
    let file = file.to_string_lossy().into_owned();
    match player {
        "ffplay" => vec!["ffplay".into(), "-nodisp".into(), "-autoexit".into(), file],
        "mpv" => vec!["mpv".into(), "--no-video".into(), file],
        other => vec![other.into(), file],
    }
}

/// A running player.
#[derive(Debug)]
pub struct PlayerProcess {
    name: String,
    child: Child,
    started: Instant,
    finished: bool,
}

impl PlayerProcess {
    /// Start playing `file`.
    pub fn spawn(player: &str, file: &Path) -> Result<Self> {
        let argv = player_command(player, file);
        let (program, args) = argv.split_first().ok_or_else(|| Error::player(player, "empty command"))?;
        tracing::info!("Starting {program} for {}", file.display());

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::player(player, e.to_string()))?;

        Ok(Self {
            name: player.to_string(),
            child,
            started: Instant::now(),
            finished: false,
        })
    }
}

impl Playback for PlayerProcess {
    fn is_finished(&mut self) -> bool {
        if !self.finished {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    tracing::debug!("{} exited with {status}", self.name);
                    self.finished = true;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Lost track of {}: {e}", self.name);
                    self.finished = true;
                }
            }
        }
        self.finished
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn stop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.child.kill() {
            tracing::debug!("Kill {} failed: {e}", self.name);
        }
        let _ = self.child.wait();
        self.finished = true;
    }
}

impl Drop for PlayerProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Play `file` to the end without lyrics. Ctrl+C stops the player.
pub async fn play_blocking(player: &str, file: &Path) -> Result<SyncOutcome> {
    let argv = player_command(player, file);
    let (program, args) = argv.split_first().ok_or_else(|| Error::player(player, "empty command"))?;
    tracing::info!("Playing {} with {program}", file.display());

    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::player(player, e.to_string()))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|e| Error::player(player, e.to_string()))?;
            tracing::info!("{program} exited with {status}");
            Ok(SyncOutcome::Finished)
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Playback interrupted");
            if let Err(e) = child.kill().await {
                tracing::debug!("Kill {program} failed: {e}");
            }
            Ok(SyncOutcome::Stopped)
        }
    }
}
