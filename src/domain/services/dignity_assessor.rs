//! Planetary dignity and combustion, derived from the rasi chart.
//!
//! Both are pure functions over resolved sign indices and absolute
//! longitudes; the engine supplies neither directly.

use std::collections::BTreeMap;

use crate::domain::entities::dignity::{Dignity, DignityRecord};
use crate::domain::repositories::ephemeris_engine::{RawBodyId, RawChartRow};
use crate::domain::value_objects::body::Body;

/// Exaltation sign per classical planet (Sun=Aries, Moon=Taurus, ...).
const EXALTATION_SIGNS: [u8; 7] = [0, 1, 9, 5, 3, 11, 6];

/// Debilitation sign, always opposite the exaltation sign.
const DEBILITATION_SIGNS: [u8; 7] = [6, 7, 3, 11, 9, 5, 0];

/// Owned signs; Mars through Saturn own two signs each.
const OWN_SIGNS: [&[u8]; 7] = [&[4], &[3], &[0, 7], &[2, 5], &[8, 11], &[1, 6], &[9, 10]];

/// Moolatrikona sign per classical planet.
const MOOLATRIKONA_SIGNS: [u8; 7] = [4, 1, 0, 5, 8, 6, 10];

/// Combustion threshold in degrees from the Sun, indexed by planet
/// (Moon through Saturn; index 0 is the Sun and has no threshold).
const COMBUSTION_THRESHOLDS: [f64; 7] = [0.0, 12.0, 17.0, 14.0, 11.0, 10.0, 15.0];

/// Classify dignity for a classical planet by its rasi sign index.
/// Priority: Exalted > Debilitated > Own Sign > Moolatrikona > Neutral.
pub fn classify_dignity(planet_index: u8, sign_index: u8) -> Dignity {
    let p = planet_index as usize;
    if p >= 7 {
        return Dignity::Neutral;
    }
    if sign_index == EXALTATION_SIGNS[p] {
        Dignity::Exalted
    } else if sign_index == DEBILITATION_SIGNS[p] {
        Dignity::Debilitated
    } else if OWN_SIGNS[p].contains(&sign_index) {
        Dignity::OwnSign
    } else if sign_index == MOOLATRIKONA_SIGNS[p] {
        Dignity::Moolatrikona
    } else {
        Dignity::Neutral
    }
}

/// Shortest-arc angular separation between two ecliptic longitudes.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Combustion threshold for a classical planet; `None` for the Sun.
pub fn combustion_threshold(planet_index: u8) -> Option<f64> {
    if (1..=6).contains(&planet_index) {
        Some(COMBUSTION_THRESHOLDS[planet_index as usize])
    } else {
        None
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assess dignity and combustion for every classical planet in the rasi
/// chart. A planet is combust when its separation from the Sun is strictly
/// below its threshold; the Sun is never evaluated against itself.
pub fn assess_chart(rasi: &[RawChartRow]) -> BTreeMap<String, DignityRecord> {
    let sun_longitude = rasi
        .iter()
        .find(|row| row.body == RawBodyId::Index(0))
        .map(|row| row.absolute_longitude());

    let mut result = BTreeMap::new();
    for row in rasi {
        let planet_index = match row.body.classical_index() {
            Some(index) => index,
            None => continue,
        };
        let sign_index = (row.sign_index() % 12) as u8;
        let dignity = classify_dignity(planet_index, sign_index);

        let (is_combust, sun_distance) = match (combustion_threshold(planet_index), sun_longitude)
        {
            (Some(threshold), Some(sun_lon)) => {
                let separation = angular_separation(row.absolute_longitude(), sun_lon);
                (separation < threshold, Some(round2(separation)))
            }
            _ => (false, None),
        };

        let name = Body::from_index(planet_index)
            .map(|body| body.name().to_string())
            .unwrap_or_else(|| planet_index.to_string());
        result.insert(
            name,
            DignityRecord {
                dignity,
                is_combust,
                sun_distance,
            },
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasi_row(planet: u8, sign: f64, degree: f64) -> RawChartRow {
        RawChartRow {
            body: RawBodyId::Index(planet),
            position: vec![sign, degree],
        }
    }

    #[test]
    fn test_sun_dignity_table() {
        assert_eq!(classify_dignity(0, 0), Dignity::Exalted);
        assert_eq!(classify_dignity(0, 6), Dignity::Debilitated);
        assert_eq!(classify_dignity(0, 4), Dignity::OwnSign);
        for sign in [1u8, 2, 3, 5, 7, 8, 9, 10, 11] {
            assert_eq!(classify_dignity(0, sign), Dignity::Neutral, "sign {}", sign);
        }
    }

    #[test]
    fn test_mercury_own_signs() {
        assert_eq!(classify_dignity(3, 2), Dignity::OwnSign);
        assert_eq!(classify_dignity(3, 5), Dignity::Exalted);
        assert_eq!(classify_dignity(3, 11), Dignity::Debilitated);
    }

    #[test]
    fn test_saturn_moolatrikona() {
        assert_eq!(classify_dignity(6, 10), Dignity::Moolatrikona);
        assert_eq!(classify_dignity(6, 9), Dignity::OwnSign);
    }

    #[test]
    fn test_angular_separation_wraparound_symmetry() {
        assert_eq!(angular_separation(350.0, 10.0), 20.0);
        assert_eq!(angular_separation(10.0, 350.0), 20.0);
    }

    #[test]
    fn test_combustion_threshold_bounds() {
        assert_eq!(combustion_threshold(0), None);
        assert_eq!(combustion_threshold(1), Some(12.0));
        assert_eq!(combustion_threshold(6), Some(15.0));
        assert_eq!(combustion_threshold(7), None);
    }

    #[test]
    fn test_combust_is_strictly_below_threshold() {
        // Mercury 10 deg from the Sun: threshold 14, combust.
        let rasi = vec![rasi_row(0, 0.0, 5.0), rasi_row(3, 0.0, 15.0)];
        let records = assess_chart(&rasi);
        assert!(records["Mercury"].is_combust);
        assert_eq!(records["Mercury"].sun_distance, Some(10.0));

        // Moon exactly at its 12 deg threshold: not combust.
        let rasi = vec![rasi_row(0, 0.0, 5.0), rasi_row(1, 0.0, 17.0)];
        let records = assess_chart(&rasi);
        assert!(!records["Moon"].is_combust);
        assert_eq!(records["Moon"].sun_distance, Some(12.0));
    }

    #[test]
    fn test_sun_has_no_combustion_or_distance() {
        let rasi = vec![rasi_row(0, 0.0, 5.0)];
        let records = assess_chart(&rasi);
        assert!(!records["Sun"].is_combust);
        assert_eq!(records["Sun"].sun_distance, None);
        assert_eq!(records["Sun"].dignity, Dignity::Exalted);
    }

    #[test]
    fn test_nodes_and_ascendant_excluded() {
        let rasi = vec![
            rasi_row(0, 0.0, 5.0),
            rasi_row(7, 3.0, 10.0),
            RawChartRow {
                body: RawBodyId::Ascendant,
                position: vec![1.0, 2.0],
            },
        ];
        let records = assess_chart(&rasi);
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("Sun"));
    }

    #[test]
    fn test_combustion_across_sign_wrap() {
        // Sun at 355 deg, Venus at 3 deg: separation 8, threshold 10.
        let rasi = vec![rasi_row(0, 11.0, 25.0), rasi_row(5, 0.0, 3.0)];
        let records = assess_chart(&rasi);
        assert!(records["Venus"].is_combust);
        assert_eq!(records["Venus"].sun_distance, Some(8.0));
    }
}
