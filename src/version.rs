//! Version information and the update check.
//!
//! The published `version.json` is compared with the running build. Being
//! behind or ahead produces a banner; any failure to check is silent.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::constants::{timing, urls, version};
use crate::error::{Error, Result};
use crate::lrclib::api::http_client;

/// A release description as published in `version.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Display version, e.g. `1.0.0-alpha`.
    pub version: String,
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
    /// Release status label.
    #[serde(default)]
    pub status: String,
    /// Build number, 0 when absent.
    #[serde(default)]
    pub build: u32,
    /// Release date.
    pub last_updated: NaiveDate,
}

impl VersionInfo {
    /// The running build.
    pub fn current() -> Self {
        Self {
            version: version::VERSION.to_string(),
            major: version::MAJOR,
            minor: version::MINOR,
            patch: version::PATCH,
            status: version::STATUS.to_string(),
            build: version::BUILD,
            last_updated: NaiveDate::parse_from_str(version::LAST_UPDATED, "%Y-%m-%d").unwrap_or_default(),
        }
    }

    /// Text for `--version`.
    pub fn describe(&self) -> String {
        format!(
            "Lyrics Shower v{}\nBuild: {}\nStatus: {}\nLast Updated: {}",
            self.version, self.build, self.status, self.last_updated
        )
    }
}

/// Order two releases by major, minor, patch, then build.
pub fn compare_versions(a: &VersionInfo, b: &VersionInfo) -> Ordering {
    (a.major, a.minor, a.patch, a.build).cmp(&(b.major, b.minor, b.patch, b.build))
}

/// Banner for running `current` while `remote` is published, if they differ.
pub fn banner(current: &VersionInfo, remote: &VersionInfo) -> Option<String> {
    match compare_versions(current, remote) {
        Ordering::Equal => None,
        Ordering::Less => Some(format!(
            "\n╔══════════════════════════════════════════════════════════════╗\n\
             ║  ⚠️  WARNING: OUTDATED VERSION                               ║\n\
             ╟──────────────────────────────────────────────────────────────╢\n\
             ║  Current Version: {:<15} (from {})  ║\n\
             ║  Latest Version:  {:<15} (from {})  ║\n\
             ║                                                              ║\n\
             ║  Please update using: lyrics --update                        ║\n\
             ╚══════════════════════════════════════════════════════════════╝\n",
            current.version, current.last_updated, remote.version, remote.last_updated,
        )),
        Ordering::Greater => Some(format!(
            "\n╔══════════════════════════════════════════════════════════════╗\n\
             ║  ⚠️  WARNING: UNRELEASED/DEVELOPER VERSION                   ║\n\
             ╟──────────────────────────────────────────────────────────────╢\n\
             ║  You are using version {} which is ahead of        ║\n\
             ║  the official release ({}).                          ║\n\
             ║                                                              ║\n\
             ║  This version may contain severe bugs and untested features. ║\n\
             ║  The developers are not responsible for any outcomes.        ║\n\
             ╚══════════════════════════════════════════════════════════════╝\n",
            current.version, remote.version,
        )),
    }
}

/// Fetch the published release description.
pub async fn fetch_remote(url: &str) -> Result<VersionInfo> {
    let resp = http_client(timing::VERSION_TIMEOUT)
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Version check failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Network(format!("Version check returned {status}")));
    }

    resp.json()
        .await
        .map_err(|e| Error::parse(format!("Invalid version.json: {e}"), None))
}

/// Banner to show for this run, if update checks are enabled and one applies.
pub async fn check(settings: &Settings) -> Option<String> {
    if !settings.check_updates {
        return None;
    }
    match fetch_remote(urls::VERSION_CHECK).await {
        Ok(remote) => banner(&VersionInfo::current(), &remote),
        Err(e) => {
            tracing::debug!("Skipping version banner: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn release(major: u32, minor: u32, patch: u32, build: u32) -> VersionInfo {
        VersionInfo {
            version: format!("{major}.{minor}.{patch}"),
            major,
            minor,
            patch,
            status: "stable".into(),
            build,
            last_updated: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    #[test]
    fn ordering_is_lexicographic_over_components() {
        assert_eq!(compare_versions(&release(1, 0, 0, 9), &release(1, 1, 0, 0)), Ordering::Less);
        assert_eq!(compare_versions(&release(2, 0, 0, 0), &release(1, 9, 9, 9)), Ordering::Greater);
        assert_eq!(compare_versions(&release(1, 0, 0, 2), &release(1, 0, 0, 1)), Ordering::Greater);
        assert_eq!(compare_versions(&release(1, 0, 0, 1), &release(1, 0, 0, 1)), Ordering::Equal);
    }

    #[test]
    fn missing_build_counts_as_zero() {
        let json = r#"{"version":"1.0.0","major":1,"minor":0,"patch":0,"last_updated":"2026-02-01"}"#;
        let remote: VersionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(remote.build, 0);
        assert_eq!(remote.last_updated, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn banners_follow_ordering() {
        let old = release(1, 0, 0, 0);
        let new = release(1, 2, 0, 0);
        assert!(banner(&old, &new).unwrap().contains("OUTDATED VERSION"));
        assert!(banner(&new, &old).unwrap().contains("UNRELEASED/DEVELOPER VERSION"));
        assert!(banner(&old, &old).is_none());
    }

    #[test]
    fn current_build_matches_constants() {
        let current = VersionInfo::current();
        assert_eq!(current.major, version::MAJOR);
        assert!(current.describe().contains("Build: 1"));
        assert!(current.describe().contains("Last Updated: 2026-01-30"));
    }

    #[tokio::test]
    async fn disabled_check_is_silent() {
        let settings = Settings { check_updates: false, ..Settings::default() };
        assert!(check(&settings).await.is_none());
    }
}
