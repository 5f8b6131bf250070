//! Engine symbol decoding.
//!
//! The engine's display feed encodes planet identity with glyph-suffixed
//! labels, retrograde state with a `℞` mark, and signs with zodiac glyphs
//! embedded in formatted position strings. Everything here decodes those
//! symbols into the fixed vocabularies; no glyph survives past this
//! module.

use crate::domain::value_objects::body::Body;
use crate::domain::value_objects::sign::{Sign, ALL_SIGNS};

/// Retrograde mark embedded in display strings.
pub const RETROGRADE_MARK: char = '℞';

/// Engine display labels in engine order. The node labels follow the
/// engine's own spelling.
pub const PLANET_LABELS: [(&str, Body); 10] = [
    ("Sun☉", Body::Sun),
    ("Moon☾", Body::Moon),
    ("Mars♂", Body::Mars),
    ("Mercury☿", Body::Mercury),
    ("Jupiter♃", Body::Jupiter),
    ("Venus♀", Body::Venus),
    ("Saturn♄", Body::Saturn),
    ("Raagu☊", Body::Rahu),
    ("Kethu☋", Body::Ketu),
    ("Ascendantℒ", Body::Ascendant),
];

/// Zodiac glyphs in sign order.
const SIGN_GLYPHS: [&str; 12] = [
    "♈︎", "♉︎", "♊︎", "♋︎", "♌︎", "♍︎", "♎︎", "♏︎", "♐︎", "♑︎", "♒︎", "♓︎",
];

/// Resolve an engine display label to a body.
pub fn decode_planet_label(label: &str) -> Option<Body> {
    PLANET_LABELS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, body)| *body)
}

/// Resolve a sign from a display string containing either a glyph or a
/// sign name.
pub fn detect_sign(text: &str) -> Option<Sign> {
    for (i, sign) in ALL_SIGNS.iter().enumerate() {
        if text.contains(SIGN_GLYPHS[i]) || text.contains(sign.name()) {
            return Some(*sign);
        }
    }
    None
}

/// Canonicalize one occupant token from the engine's per-house listing:
/// strip the retrograde mark and map glyph-suffixed labels to canonical
/// names. Already-canonical names pass through.
pub fn canonicalize_occupant(token: &str) -> String {
    let cleaned: String = token
        .chars()
        .filter(|c| *c != RETROGRADE_MARK)
        .collect::<String>()
        .trim()
        .to_string();
    match decode_planet_label(&cleaned) {
        Some(body) => body.name().to_string(),
        None => cleaned,
    }
}

/// A position string decoded into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPosition {
    pub sign: Sign,
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
    pub retrograde: bool,
    pub karaka: Option<String>,
}

fn digit_runs(text: &str) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(current.parse().unwrap_or(0));
            current.clear();
        }
    }
    if !current.is_empty() {
        runs.push(current.parse().unwrap_or(0));
    }
    runs
}

fn extract_karaka(text: &str) -> Option<String> {
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(')') {
            Some(close) => {
                let inner = &after[..close];
                if inner.ends_with("Karaka") {
                    return Some(inner.to_string());
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    None
}

/// Decode a display position string like `♑︎Capricorn 1° 3' 56"` into its
/// parts. Returns `None` when no sign can be resolved; the degree triple
/// defaults to zero when absent.
pub fn parse_position_string(raw: &str) -> Option<ParsedPosition> {
    let sign = detect_sign(raw)?;
    let runs = digit_runs(raw);
    Some(ParsedPosition {
        sign,
        degree: runs.first().copied().unwrap_or(0),
        minute: runs.get(1).copied().unwrap_or(0),
        second: runs.get(2).copied().unwrap_or(0),
        retrograde: raw.contains(RETROGRADE_MARK),
        karaka: extract_karaka(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_planet_labels() {
        assert_eq!(decode_planet_label("Sun☉"), Some(Body::Sun));
        assert_eq!(decode_planet_label("Raagu☊"), Some(Body::Rahu));
        assert_eq!(decode_planet_label("Ascendantℒ"), Some(Body::Ascendant));
        assert_eq!(decode_planet_label("Pluto"), None);
    }

    #[test]
    fn test_parse_position_string_with_glyph() {
        let parsed = parse_position_string("♑︎Capricorn 1° 3' 56\"").unwrap();
        assert_eq!(parsed.sign, Sign::Capricorn);
        assert_eq!((parsed.degree, parsed.minute, parsed.second), (1, 3, 56));
        assert!(!parsed.retrograde);
        assert_eq!(parsed.karaka, None);
    }

    #[test]
    fn test_parse_position_string_retrograde_and_karaka() {
        let parsed =
            parse_position_string("♏︎Scorpio 22° 10' 5\" ℞ (Atmakaraka)").unwrap();
        assert_eq!(parsed.sign, Sign::Scorpio);
        assert!(parsed.retrograde);
        assert_eq!(parsed.karaka.as_deref(), Some("Atmakaraka"));
    }

    #[test]
    fn test_parse_position_string_without_sign_fails() {
        assert_eq!(parse_position_string("12° 30' 0\""), None);
    }

    #[test]
    fn test_parse_position_string_name_only() {
        let parsed = parse_position_string("Aries 0° 0' 0\"").unwrap();
        assert_eq!(parsed.sign, Sign::Aries);
        assert_eq!(parsed.degree, 0);
    }

    #[test]
    fn test_canonicalize_occupant_strips_mark_and_glyph() {
        assert_eq!(canonicalize_occupant("Saturn♄℞"), "Saturn");
        assert_eq!(canonicalize_occupant("Saturn℞"), "Saturn");
        assert_eq!(canonicalize_occupant(" Moon☾ "), "Moon");
        assert_eq!(canonicalize_occupant("Gulika"), "Gulika");
    }

    #[test]
    fn test_karaka_ignores_non_karaka_parens() {
        let parsed =
            parse_position_string("♌︎Leo 5° 0' 0\" (combust) (Darakaraka)").unwrap();
        assert_eq!(parsed.karaka.as_deref(), Some("Darakaraka"));
    }
}
