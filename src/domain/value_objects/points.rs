//! Abbreviation dictionaries for engine-native point labels.
//!
//! The engine reports chara karakas and special lagnas as short
//! abbreviation codes; responses carry the expanded names. Unknown codes
//! pass through unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub static KARAKA_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("AK", "Atmakaraka"),
        ("AmK", "Amatyakaraka"),
        ("BK", "Bhratrikaraka"),
        ("MK", "Matrikaraka"),
        ("PuK", "Putrakaraka"),
        ("GK", "Gnatikaraka"),
        ("DK", "Darakaraka"),
        ("PiK", "Pitrikaraka"),
        ("JK", "Jaimini Karaka"),
    ])
});

pub static SPECIAL_LAGNA_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("BL", "Bhava Lagna"),
        ("HL", "Hora Lagna"),
        ("GL", "Ghati Lagna"),
        ("VL", "Varnada Lagna"),
        ("SL", "Shree Lagna"),
        ("PL", "Pranapada Lagna"),
        ("IL", "Indu Lagna"),
        ("KL", "Karakamsha Lagna"),
        ("BB", "Bhrigu Bindu"),
    ])
});

pub fn expand_karaka(abbreviation: &str) -> &str {
    KARAKA_NAMES.get(abbreviation).copied().unwrap_or(abbreviation)
}

pub fn expand_special_lagna(abbreviation: &str) -> &str {
    SPECIAL_LAGNA_NAMES
        .get(abbreviation)
        .copied()
        .unwrap_or(abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_karaka_expands() {
        assert_eq!(expand_karaka("AK"), "Atmakaraka");
        assert_eq!(expand_karaka("DK"), "Darakaraka");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(expand_karaka("XY"), "XY");
        assert_eq!(expand_special_lagna("ZL"), "ZL");
    }

    #[test]
    fn test_special_lagna_expands() {
        assert_eq!(expand_special_lagna("HL"), "Hora Lagna");
        assert_eq!(expand_special_lagna("BB"), "Bhrigu Bindu");
    }
}
