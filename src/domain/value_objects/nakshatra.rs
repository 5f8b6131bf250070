//! Nakshatra (lunar mansion) derivation.
//!
//! The ecliptic divides into 27 equal nakshatras of 13 deg 20' each, and
//! each nakshatra into 4 padas of 3 deg 20'. Both are pure functions of
//! absolute sidereal longitude, independent of which chart the longitude
//! came from.

/// Span of one nakshatra: 360/27 degrees.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Span of one pada: a quarter nakshatra.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// The 27 nakshatras from Ashwini to Revati.
pub const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

/// Nakshatra name and pada (1-4) for an absolute longitude in degrees.
pub fn nakshatra_pada(longitude: f64) -> (&'static str, u8) {
    let nak_index = ((longitude / NAKSHATRA_SPAN) as usize) % 27;
    let pada = ((longitude % NAKSHATRA_SPAN) / PADA_SPAN) as u8 + 1;
    (NAKSHATRA_NAMES[nak_index], pada)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_longitude_is_ashwini_pada_one() {
        assert_eq!(nakshatra_pada(0.0), ("Ashwini", 1));
    }

    #[test]
    fn test_end_of_circle_is_revati_pada_four() {
        assert_eq!(nakshatra_pada(359.99), ("Revati", 4));
    }

    #[test]
    fn test_one_span_is_bharani_pada_one() {
        assert_eq!(nakshatra_pada(NAKSHATRA_SPAN), ("Bharani", 1));
    }

    #[test]
    fn test_every_sign_degree_combination_is_covered() {
        for sign_idx in 0..12u32 {
            let mut degree = 0.0;
            while degree < 30.0 {
                let longitude = sign_idx as f64 * 30.0 + degree;
                let (name, pada) = nakshatra_pada(longitude);
                assert!(NAKSHATRA_NAMES.contains(&name));
                assert!((1..=4).contains(&pada), "pada {} at {}", pada, longitude);
                degree += 0.0625;
            }
        }
    }

    #[test]
    fn test_pada_boundaries_within_ashwini() {
        assert_eq!(nakshatra_pada(PADA_SPAN - 0.001).1, 1);
        assert_eq!(nakshatra_pada(PADA_SPAN).1, 2);
        assert_eq!(nakshatra_pada(3.0 * PADA_SPAN).1, 4);
    }
}
