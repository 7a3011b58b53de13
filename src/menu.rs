//! Interactive settings menu.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::constants::render::RULE_WIDTH;
use crate::deps::{self, Installer};
use crate::error::Result;
use crate::prompt::Prompt;
use crate::types::{DisplayMode, Platform};

/// Show the menu until the user saves with `0`.
///
/// Returns `true` when the settings were saved, `false` when input ended first.
pub fn settings_menu<R: BufRead, W: Write>(config: &mut Config, prompt: &mut Prompt<R, W>) -> Result<bool> {
    let rule = "=".repeat(RULE_WIDTH);

    loop {
        let s = &config.settings;
        prompt.clear_screen()?;
        prompt.say(format!("{rule}\n⚙️  SETTINGS MENU\n{rule}\n"))?;
        prompt.say(format!("1. Platform: {}", s.platform))?;
        prompt.say(format!("2. Media Player: {}", s.media_player))?;
        prompt.say(format!("3. Display Mode: {}", s.display_mode))?;
        prompt.say(format!("4. Use Graph: {}", s.use_graph))?;
        prompt.say(format!("5. Glitch Effect: {}", s.effects.glitch))?;
        prompt.say(format!("6. Flash Effect: {}", s.effects.flash))?;
        prompt.say(format!("7. Auto Install Dependencies: {}", s.auto_install))?;
        prompt.say(format!("8. Check for Updates: {}", s.check_updates))?;
        prompt.say("\n0. Save and Exit\n")?;

        let Some(choice) = prompt.ask("Select option: ")? else {
            return Ok(false);
        };

        let s = &mut config.settings;
        match choice.as_str() {
            "0" => {
                config.save()?;
                prompt.say("✅ Settings saved!")?;
                return Ok(true);
            }
            "1" => {
                prompt.say("\nPlatform options: youtube, soundcloud, spotify")?;
                if let Some(answer) = prompt.ask("Enter platform: ")?.filter(|a| !a.is_empty()) {
                    match answer.parse::<Platform>() {
                        Ok(platform) => s.platform = platform,
                        Err(e) => tracing::debug!("Ignoring platform: {e}"),
                    }
                }
            }
            "2" => {
                prompt.say("\nMedia player options: ffplay, mpv")?;
                if let Some(player) = prompt.ask("Enter player: ")?.filter(|a| !a.is_empty()) {
                    if !deps::is_installed(&player)
                        && prompt.confirm(&format!("{player} not found. Install? (y/N): "), "y")?
                    {
                        if let Err(e) = Installer::Pkg.install(deps::player_package(&player)) {
                            prompt.say(format!("❌ {e}"))?;
                        }
                    }
                    s.media_player = player;
                }
            }
            "3" => {
                prompt.say("\nDisplay modes: scrolling, centered, list")?;
                if let Some(mode) = prompt.ask("Enter mode: ")? {
                    if let Ok(mode) = mode.parse::<DisplayMode>() {
                        s.display_mode = mode;
                    }
                }
            }
            "4" => s.use_graph = !s.use_graph,
            "5" => s.effects.glitch = !s.effects.glitch,
            "6" => s.effects.flash = !s.effects.flash,
            "7" => s.auto_install = !s.auto_install,
            "8" => s.check_updates = !s.check_updates,
            other => tracing::debug!("Unknown settings option {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::config::{Paths, Settings};
    use std::io::Cursor;

    fn config(home: &std::path::Path) -> Config {
        Config { paths: Paths::with_home(home), settings: Settings::default() }
    }

    #[test]
    fn toggles_and_saves() {
        let home = tempfile::tempdir().unwrap();
        let mut config = config(home.path());
        let input = "5\n3\nlist\n3\nfancy\n1\nsoundcloud\n0\n";
        let mut prompt = Prompt::new(Cursor::new(input), Vec::new());

        assert!(settings_menu(&mut config, &mut prompt).unwrap());

        let saved = Settings::load(&config.paths.config_file()).unwrap();
        assert!(saved.effects.glitch);
        assert_eq!(saved.display_mode, DisplayMode::List);
        assert_eq!(saved.platform, Platform::Soundcloud);
    }

    #[test]
    fn missing_player_offers_install() {
        let home = tempfile::tempdir().unwrap();
        let mut config = config(home.path());
        let input = "2\nlyrics-shower-missing-player\nn\n0\n";
        let mut prompt = Prompt::new(Cursor::new(input), Vec::new());

        settings_menu(&mut config, &mut prompt).unwrap();
        assert_eq!(config.settings.media_player, "lyrics-shower-missing-player");
        let out = String::from_utf8(prompt.into_output()).unwrap();
        assert!(out.contains("not found. Install?"));
    }

    #[test]
    fn end_of_input_leaves_file_untouched() {
        let home = tempfile::tempdir().unwrap();
        let mut config = config(home.path());
        let mut prompt = Prompt::new(Cursor::new("4\n"), Vec::new());

        assert!(!settings_menu(&mut config, &mut prompt).unwrap());
        assert!(config.settings.use_graph);
        assert!(!config.paths.config_file().exists());
    }
}
