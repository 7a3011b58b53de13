//! LRCLIB data types.
//!
//! These types represent the records returned by the LRCLIB search endpoint.

use serde::Deserialize;

/// A track record from `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrclibTrack {
    /// LRCLIB record id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Song title.
    #[serde(default)]
    pub track_name: Option<String>,
    /// Performing artist.
    #[serde(default)]
    pub artist_name: Option<String>,
    /// Album title.
    #[serde(default)]
    pub album_name: Option<String>,
    /// Track length in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Whether the track has no vocals.
    #[serde(default)]
    pub instrumental: bool,
    /// Unsynchronized lyrics.
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    /// LRC lyrics.
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}

impl LrclibTrack {
    /// Best lyrics this record offers, as LRC.
    ///
    /// Synced lyrics win; plain lyrics are stamped at `00:00.00`.
    pub fn lrc(&self) -> Option<String> {
        if let Some(synced) = non_empty(self.synced_lyrics.as_deref()) {
            return Some(synced.to_string());
        }
        non_empty(self.plain_lyrics.as_deref()).map(crate::lyrics::plain_to_lrc)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn deserializes_search_record() {
        let json = r#"{
            "id": 3396226, "trackName": "I Want to Live", "artistName": "Borislav Slavov",
            "albumName": "Baldur's Gate 3", "duration": 233, "instrumental": false,
            "plainLyrics": "I feel your breath", "syncedLyrics": "[00:17.12] I feel your breath"
        }"#;
        let track: LrclibTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.track_name.as_deref(), Some("I Want to Live"));
        assert_eq!(track.lrc().as_deref(), Some("[00:17.12] I feel your breath"));
    }

    #[test]
    fn falls_back_to_plain_lyrics() {
        let track = LrclibTrack {
            synced_lyrics: Some(String::new()),
            plain_lyrics: Some("one\ntwo".to_string()),
            ..LrclibTrack::default()
        };
        assert_eq!(track.lrc().as_deref(), Some("[00:00.00] one\n[00:00.00] two"));
    }

    #[test]
    fn null_lyrics_give_nothing() {
        let track: LrclibTrack =
            serde_json::from_str(r#"{"instrumental": true, "plainLyrics": null, "syncedLyrics": null}"#).unwrap();
        assert!(track.lrc().is_none());
    }
}
