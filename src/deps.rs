//! External tool checks.
//!
//! `yt-dlp` comes from pip, players from the Termux package manager.

use std::process::{Command, Stdio};

use crate::config::Settings;
use crate::error::{Error, Result};

/// Whether `program` resolves on `PATH`.
pub fn is_installed(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Package providing a player binary.
pub fn player_package(player: &str) -> &str {
    if player == "ffplay" {
        "ffmpeg"
    } else {
        player
    }
}

/// How a tool gets installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installer {
    /// `python3 -m pip install <package>`
    Pip,
    /// `pkg install <package> -y`
    Pkg,
}

impl Installer {
    /// Command line installing `package`.
    pub fn command(self, package: &str) -> Vec<String> {
        match self {
            Self::Pip => ["python3", "-m", "pip", "install", package].map(String::from).to_vec(),
            Self::Pkg => ["pkg", "install", package, "-y"].map(String::from).to_vec(),
        }
    }

    /// Run the installer quietly.
    pub fn install(self, package: &str) -> Result<()> {
        let argv = self.command(package);
        let Some((program, args)) = argv.split_first() else {
            return Err(Error::MissingTool(package.to_string()));
        };
        tracing::info!("Installing {package} via {program}");

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| Error::MissingTool(program.clone()))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Msg(format!("installing {package} failed with {status}")))
        }
    }
}

/// Package installs that set up the downloader and `player`, in order.
pub fn install_steps(player: &str) -> [(Installer, &str); 2] {
    [(Installer::Pip, "yt-dlp"), (Installer::Pkg, player_package(player))]
}

/// Make sure the downloader and the configured player are available.
///
/// Missing tools are announced; they are installed only with `auto_install`.
pub fn check_dependencies(settings: &Settings) {
    if !is_installed("yt-dlp") {
        println!("📦 Installing yt-dlp...");
        if settings.auto_install {
            if let Err(e) = Installer::Pip.install("yt-dlp") {
                tracing::warn!("{e}");
            }
        }
    }

    let player = settings.media_player.as_str();
    if !is_installed(player) {
        println!("📦 Installing {player}...");
        if settings.auto_install {
            if let Err(e) = Installer::Pkg.install(player_package(player)) {
                tracing::warn!("{e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn ffplay_comes_from_ffmpeg() {
        assert_eq!(player_package("ffplay"), "ffmpeg");
        assert_eq!(player_package("mpv"), "mpv");
    }

    #[test]
    fn installer_commands() {
        assert_eq!(Installer::Pip.command("yt-dlp"), ["python3", "-m", "pip", "install", "yt-dlp"]);
        assert_eq!(Installer::Pkg.command("ffmpeg"), ["pkg", "install", "ffmpeg", "-y"]);
    }

    #[test]
    fn install_steps_cover_downloader_then_player() {
        let commands: Vec<_> = install_steps("ffplay").iter().map(|(i, p)| i.command(p)).collect();
        assert_eq!(commands[0], ["python3", "-m", "pip", "install", "yt-dlp"]);
        assert_eq!(commands[1], ["pkg", "install", "ffmpeg", "-y"]);
    }

    #[test]
    fn path_lookup() {
        assert!(is_installed("sh"));
        assert!(!is_installed("lyrics-shower-definitely-missing"));
    }
}
