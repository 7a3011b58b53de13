//! Install, update and uninstall.
//!
//! Every step is an idempotent file replacement: running install twice leaves
//! the command and the shell rc files exactly as running it once.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Paths;
use crate::constants::{paths, timing, urls};
use crate::deps::{self, Installer};
use crate::error::{Error, Result};
use crate::lrclib::api::http_client;
use crate::prompt::Prompt;

/// Shebang added to scripts that lack one.
pub const SHEBANG: &str = "#!/usr/bin/env bash";

/// Line added to shell rc files.
pub const PATH_EXPORT: &str = "export PATH=\"$HOME/bin:$PATH\"";

/// Shell rc files patched by install.
const RC_FILES: &[&str] = &[".bashrc", ".zshrc"];

/// `script` with a shebang as its first line.
pub fn ensure_shebang(script: &str) -> String {
    if script.starts_with("#!") {
        script.to_string()
    } else {
        format!("{SHEBANG}\n{script}")
    }
}

/// `rc` with the PATH export appended, unless it already mentions `~/bin`.
pub fn ensure_path_export(rc: &str) -> String {
    if rc.contains("$HOME/bin") || rc.contains("~/bin") {
        return rc.to_string();
    }
    let mut out = rc.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(PATH_EXPORT);
    out.push('\n');
    out
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs_err::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Write `path` only when its content would change.
fn replace_file(path: &Path, content: &str) -> Result<bool> {
    let current = if path.exists() { Some(fs_err::read_to_string(path)?) } else { None };
    if current.as_deref() == Some(content) {
        return Ok(false);
    }
    fs_err::write(path, content)?;
    Ok(true)
}

/// Result of [`install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// Where the command now lives.
    pub command: PathBuf,
    /// Packages whose install step failed.
    pub failed: Vec<String>,
}

/// Copy `binary` to `~/bin/lyrics`, put `~/bin` on the shell's PATH and
/// install yt-dlp plus the package providing `player`.
///
/// Only rc files that already exist are patched. A failed package install is
/// reported in the result and does not abort.
pub fn install(paths: &Paths, binary: &Path, player: &str) -> Result<Installed> {
    install_with(paths, binary, player, |installer, package| installer.install(package))
}

/// [`install`] with the package manager invocation supplied by the caller.
pub fn install_with<F>(paths: &Paths, binary: &Path, player: &str, mut run: F) -> Result<Installed>
where
    F: FnMut(Installer, &str) -> Result<()>,
{
    let command = place_command(paths, binary)?;

    let mut failed = Vec::new();
    for (installer, package) in deps::install_steps(player) {
        if let Err(e) = run(installer, package) {
            tracing::warn!("Installing {package} failed: {e}");
            failed.push(package.to_string());
        }
    }
    Ok(Installed { command, failed })
}

fn place_command(paths: &Paths, binary: &Path) -> Result<PathBuf> {
    let target = paths.command_path();
    fs_err::create_dir_all(paths.bin_dir())?;

    if binary != target {
        fs_err::copy(binary, &target)?;
    }
    make_executable(&target)?;
    tracing::info!("Installed {}", target.display());

    for rc in RC_FILES {
        let rc_path = paths.home.join(rc);
        if !rc_path.exists() {
            continue;
        }
        let content = fs_err::read_to_string(&rc_path)?;
        if replace_file(&rc_path, &ensure_path_export(&content))? {
            tracing::info!("Added ~/bin to PATH in {}", rc_path.display());
        }
    }
    Ok(target)
}

/// Download the updater script, run it with bash, then delete it.
pub async fn update(paths: &Paths) -> Result<()> {
    update_from(paths, urls::UPDATE_SCRIPT).await
}

/// [`update`] against an arbitrary script URL.
pub async fn update_from(paths: &Paths, url: &str) -> Result<()> {
    let resp = http_client(timing::UPDATE_TIMEOUT)
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Downloading update script failed: {e}")))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Network(format!("Failed to download update script ({status})")));
    }
    let script = ensure_shebang(&resp.text().await?);

    let script_path = paths.home.join(paths::UPDATE_SCRIPT_NAME);
    fs_err::write(&script_path, script)?;
    make_executable(&script_path)?;

    tracing::info!("Running {}", script_path.display());
    let status = Command::new("bash").arg(&script_path).status();
    fs_err::remove_file(&script_path)?;

    let status = status.map_err(|_| Error::MissingTool("bash".into()))?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Msg(format!("update script exited with {status}")))
    }
}

/// Remove the installed command after a `yes` confirmation. Caches and
/// configuration stay. Returns whether anything was removed.
pub fn uninstall<R: BufRead, W: Write>(paths: &Paths, prompt: &mut Prompt<R, W>) -> Result<bool> {
    let rule = "=".repeat(crate::constants::render::RULE_WIDTH);
    prompt.say(format!("{rule}\n🗑️  UNINSTALL LYRICS SHOWER\n{rule}\n"))?;
    prompt.say("This will:")?;
    prompt.say("  - Remove the lyrics command from ~/bin")?;
    prompt.say("  - Keep your cached music and lyrics")?;
    prompt.say("  - Keep your configuration\n")?;

    if !prompt.confirm("Are you sure you want to uninstall? (yes/N): ", "yes")? {
        prompt.say("Cancelled")?;
        return Ok(false);
    }

    let command = paths.command_path();
    if !command.exists() {
        prompt.say("❌ lyrics command not found in ~/bin")?;
        return Ok(false);
    }

    fs_err::remove_file(&command)?;
    tracing::info!("Removed {}", command.display());
    prompt.say("✅ Uninstalled successfully!\n")?;
    prompt.say("To reinstall, run the install script again.\n")?;
    prompt.say("To remove cached data:")?;
    for dir in [&paths.music_dir, &paths.lyrics_dir, &paths.config_dir] {
        prompt.say(format!("  rm -rf {}", dir.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Cursor;

    #[test]
    fn shebang_added_once() {
        let once = ensure_shebang("echo hi\n");
        assert_eq!(once, "#!/usr/bin/env bash\necho hi\n");
        assert_eq!(ensure_shebang(&once), once);
        assert_eq!(ensure_shebang("#!/bin/sh\nx"), "#!/bin/sh\nx");
    }

    #[test]
    fn path_export_is_idempotent() {
        let once = ensure_path_export("alias ll='ls -l'");
        assert_eq!(once, "alias ll='ls -l'\nexport PATH=\"$HOME/bin:$PATH\"\n");
        assert_eq!(ensure_path_export(&once), once);
        assert_eq!(ensure_path_export(""), "export PATH=\"$HOME/bin:$PATH\"\n");
    }

    #[test]
    fn install_twice_matches_install_once() {
        let home = tempfile::tempdir().unwrap();
        let paths = Paths::with_home(home.path());
        let binary = home.path().join("build-output");
        std::fs::write(&binary, b"binary").unwrap();
        std::fs::write(home.path().join(".bashrc"), "# rc\n").unwrap();

        let mut ran = Vec::new();
        let mut record = |installer: Installer, package: &str| -> Result<()> {
            ran.push(installer.command(package));
            Ok(())
        };
        let target = install_with(&paths, &binary, "mpv", &mut record).unwrap().command;
        let rc_once = std::fs::read_to_string(home.path().join(".bashrc")).unwrap();
        install_with(&paths, &binary, "mpv", &mut record).unwrap();
        let rc_twice = std::fs::read_to_string(home.path().join(".bashrc")).unwrap();

        assert_eq!(rc_once, rc_twice);
        assert_eq!(rc_once.matches("$HOME/bin").count(), 1);
        assert_eq!(std::fs::read(&target).unwrap(), b"binary");
        assert!(!home.path().join(".zshrc").exists());
        assert_eq!(ran.len(), 4);
        assert_eq!(ran[1], ["pkg", "install", "mpv", "-y"]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&target).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn failed_package_install_is_reported_not_fatal() {
        let home = tempfile::tempdir().unwrap();
        let paths = Paths::with_home(home.path());
        let binary = home.path().join("build-output");
        std::fs::write(&binary, b"binary").unwrap();

        let mut ran = Vec::new();
        let installed = install_with(&paths, &binary, "ffplay", |installer, package| {
            ran.push(installer.command(package));
            match installer {
                Installer::Pip => Err(Error::MissingTool("python3".into())),
                Installer::Pkg => Ok(()),
            }
        })
        .unwrap();

        assert_eq!(
            ran,
            [
                vec!["python3", "-m", "pip", "install", "yt-dlp"],
                vec!["pkg", "install", "ffmpeg", "-y"],
            ]
        );
        assert_eq!(installed.failed, ["yt-dlp"]);
        assert!(installed.command.exists());
    }

    #[test]
    fn uninstall_needs_full_yes() {
        let home = tempfile::tempdir().unwrap();
        let paths = Paths::with_home(home.path());
        std::fs::create_dir_all(paths.bin_dir()).unwrap();
        std::fs::write(paths.command_path(), b"x").unwrap();

        let mut prompt = Prompt::new(Cursor::new("y\n"), Vec::new());
        assert!(!uninstall(&paths, &mut prompt).unwrap());
        assert!(paths.command_path().exists());

        let mut prompt = Prompt::new(Cursor::new("YES\n"), Vec::new());
        assert!(uninstall(&paths, &mut prompt).unwrap());
        assert!(!paths.command_path().exists());
        let out = String::from_utf8(prompt.into_output()).unwrap();
        assert!(out.contains("rm -rf"));
    }

    #[tokio::test]
    async fn failed_download_aborts_update() {
        let home = tempfile::tempdir().unwrap();
        let paths = Paths::with_home(home.path());
        let result = update_from(&paths, "http://127.0.0.1:9/update.sh").await;
        assert!(result.is_err());
        assert!(!home.path().join(paths::UPDATE_SCRIPT_NAME).exists());
    }
}
