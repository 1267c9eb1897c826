//! Splits video titles into artist and song.
//!
//! Music uploads mostly follow a handful of shapes ("Artist - Song (Official
//! Video)", "Artist: Song", `Artist "Song"`). The rules below are tried in
//! order and the first one that matches decides the split.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::track::ParsedCandidate;

/// Title rules in priority order. Group 1 is the artist, group 2 the song.
pub static TITLE_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Artist - Song, with dash family and trailing (...) / [...] annotations
        Regex::new(r"(?i)^(.+?)\s*[-–—]\s*(.+?)(?:\s*\(.*\))?(?:\s*\[.*\])?$").unwrap(),
        // Artist : Song, Artist | Song
        Regex::new(r"(?i)^(.+?)\s*[:|]\s*(.+?)(?:\s*\(.*\))?(?:\s*\[.*\])?$").unwrap(),
        // Artist "Song"
        Regex::new(r#"(?i)^(.+?)\s*"(.+?)""#).unwrap(),
        // Artist 'Song', straight or curly quotes
        Regex::new(r"(?i)^(.+?)\s*['‘’](.+?)['‘’]").unwrap(),
    ]
});

/// Guess artist and song from a video title.
///
/// Never fails: a title with no recognizable structure comes back with an
/// empty artist and the full title as the song.
pub fn parse(title: &str) -> ParsedCandidate {
    for rule in TITLE_RULES.iter() {
        if let Some(caps) = rule.captures(title) {
            return ParsedCandidate {
                artist: caps[1].trim().to_string(),
                song: caps[2].trim().to_string(),
            };
        }
    }

    ParsedCandidate {
        artist: String::new(),
        song: title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(title: &str) -> (String, String) {
        let parsed = parse(title);
        (parsed.artist, parsed.song)
    }

    fn pair(artist: &str, song: &str) -> (String, String) {
        (artist.to_string(), song.to_string())
    }

    #[test]
    fn test_hyphen_separator() {
        assert_eq!(split("Daft Punk - One More Time"), pair("Daft Punk", "One More Time"));
    }

    #[test]
    fn test_hyphen_strips_official_video() {
        assert_eq!(
            split("Daft Punk - One More Time (Official Video)"),
            pair("Daft Punk", "One More Time")
        );
    }

    #[test]
    fn test_hyphen_strips_brackets() {
        assert_eq!(split("Adele - Hello [HD]"), pair("Adele", "Hello"));
        assert_eq!(
            split("Adele - Hello (Live at the NRJ Awards) [HD]"),
            pair("Adele", "Hello")
        );
    }

    #[test]
    fn test_dash_family() {
        assert_eq!(split("Björk – Army of Me"), pair("Björk", "Army of Me"));
        assert_eq!(split("Björk—Army of Me"), pair("Björk", "Army of Me"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(split("  Artist  -   Song  "), pair("Artist", "Song"));
    }

    #[test]
    fn test_colon_and_pipe_separators() {
        assert_eq!(split("Radiohead: Creep"), pair("Radiohead", "Creep"));
        assert_eq!(
            split("Radiohead | Creep (Acoustic)"),
            pair("Radiohead", "Creep")
        );
    }

    #[test]
    fn test_hyphen_wins_over_colon() {
        // both rules would match, the first one decides
        assert_eq!(
            split("Live: Artist - Song"),
            pair("Live: Artist", "Song")
        );
    }

    #[test]
    fn test_double_quoted_song() {
        assert_eq!(
            split(r#"Artist "Song Name" (Live)"#),
            pair("Artist", "Song Name")
        );
    }

    #[test]
    fn test_single_and_curly_quoted_song() {
        assert_eq!(split("Queen 'Bohemian Rhapsody'"), pair("Queen", "Bohemian Rhapsody"));
        assert_eq!(split("Queen ‘Bohemian Rhapsody’"), pair("Queen", "Bohemian Rhapsody"));
    }

    #[test]
    fn test_no_structure_falls_back_to_title() {
        assert_eq!(
            split("Random Title With No Separator"),
            pair("", "Random Title With No Separator")
        );
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(split(""), pair("", ""));
    }
}
