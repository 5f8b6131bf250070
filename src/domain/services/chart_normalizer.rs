//! Chart normalization: raw engine rows to canonical planet positions.

use std::collections::HashMap;

use crate::domain::entities::planet_position::PlanetPosition;
use crate::domain::repositories::ephemeris_engine::{RawBhavaRow, RawChartRow};
use crate::domain::value_objects::nakshatra::nakshatra_pada;
use crate::domain::value_objects::sign::Sign;

/// House numbering policy when a chart has no cusp data (all divisional
/// charts other than rasi). The legacy behavior silently falls back to
/// sign-based numbering; the explicit policy surfaces the gap as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseNumbering {
    SignBased,
    ExplicitNull,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Map each occupant to its 1-based house number.
pub fn build_house_lookup(rows: &[RawBhavaRow]) -> HashMap<String, u8> {
    let mut lookup = HashMap::new();
    for row in rows {
        let house = row.house_index + 1;
        for occupant in &row.occupants {
            lookup.insert(occupant.resolve_name(), house);
        }
    }
    lookup
}

/// Normalize one chart result into planet positions.
///
/// `house_lookup` comes from cusp data when the chart has any; `speeds`
/// holds per-body daily motion and drives the retrograde flag for the
/// seven classical planets. Retrograde depends only on daily motion, never
/// on the chart or divisional factor.
pub fn normalize_chart(
    rows: &[RawChartRow],
    house_lookup: Option<&HashMap<String, u8>>,
    speeds: Option<&HashMap<u8, f64>>,
    numbering: HouseNumbering,
) -> Vec<PlanetPosition> {
    rows.iter()
        .map(|row| {
            let planet = row.body.resolve_name();
            let sign_index = (row.sign_index() % 12) as u8;
            let (nakshatra, pada) = nakshatra_pada(row.absolute_longitude());

            let house = match house_lookup.and_then(|lookup| lookup.get(&planet).copied()) {
                Some(house) => Some(house),
                None => match numbering {
                    HouseNumbering::SignBased => Some(sign_index + 1),
                    HouseNumbering::ExplicitNull => None,
                },
            };

            let is_retrograde = row
                .body
                .classical_index()
                .and_then(|index| speeds.and_then(|s| s.get(&index)))
                .map(|motion| *motion < 0.0)
                .unwrap_or(false);

            PlanetPosition {
                planet,
                sign: Sign::from_index(sign_index as usize).name().to_string(),
                sign_index,
                degree: round4(row.degree()),
                nakshatra: nakshatra.to_string(),
                pada,
                house,
                is_retrograde,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::ephemeris_engine::RawBodyId;

    fn row(body: RawBodyId, sign: f64, degree: f64) -> RawChartRow {
        RawChartRow {
            body,
            position: vec![sign, degree],
        }
    }

    #[test]
    fn test_sign_and_degree_resolution() {
        let rows = vec![row(RawBodyId::Index(0), 9.0, 1.06556)];
        let positions = normalize_chart(&rows, None, None, HouseNumbering::SignBased);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].planet, "Sun");
        assert_eq!(positions[0].sign, "Capricorn");
        assert_eq!(positions[0].sign_index, 9);
        assert_eq!(positions[0].degree, 1.0656);
    }

    #[test]
    fn test_house_fallback_is_sign_based() {
        let rows = vec![
            row(RawBodyId::Index(2), 7.0, 10.0),
            row(RawBodyId::Ascendant, 0.0, 5.0),
        ];
        let positions = normalize_chart(&rows, None, None, HouseNumbering::SignBased);
        assert_eq!(positions[0].house, Some(8));
        assert_eq!(positions[1].house, Some(1));
    }

    #[test]
    fn test_house_explicit_null_policy() {
        let rows = vec![row(RawBodyId::Index(2), 7.0, 10.0)];
        let positions = normalize_chart(&rows, None, None, HouseNumbering::ExplicitNull);
        assert_eq!(positions[0].house, None);
    }

    #[test]
    fn test_house_lookup_overrides_fallback() {
        let bhava = vec![RawBhavaRow {
            house_index: 3,
            start_degree: 0.0,
            mid_degree: 15.0,
            end_degree: 30.0,
            occupants: vec![RawBodyId::Index(4)],
        }];
        let lookup = build_house_lookup(&bhava);
        let rows = vec![row(RawBodyId::Index(4), 11.0, 2.0)];
        let positions =
            normalize_chart(&rows, Some(&lookup), None, HouseNumbering::SignBased);
        assert_eq!(positions[0].house, Some(4));
    }

    #[test]
    fn test_retrograde_from_negative_motion_classical_only() {
        let mut speeds = HashMap::new();
        speeds.insert(3u8, -0.8);
        speeds.insert(7u8, -0.05);
        let rows = vec![
            row(RawBodyId::Index(3), 2.0, 12.0),
            row(RawBodyId::Index(7), 2.0, 12.0),
            row(RawBodyId::Ascendant, 2.0, 12.0),
        ];
        let positions =
            normalize_chart(&rows, None, Some(&speeds), HouseNumbering::SignBased);
        assert!(positions[0].is_retrograde);
        assert!(!positions[1].is_retrograde);
        assert!(!positions[2].is_retrograde);
    }

    #[test]
    fn test_nakshatra_follows_absolute_longitude() {
        // 9 * 30 + 1.0656 = 271.0656 deg -> Uttara Ashadha pada 2
        let rows = vec![row(RawBodyId::Index(0), 9.0, 1.0656)];
        let positions = normalize_chart(&rows, None, None, HouseNumbering::SignBased);
        assert_eq!(positions[0].nakshatra, "Uttara Ashadha");
        assert_eq!(positions[0].pada, 2);
    }

    #[test]
    fn test_sign_index_wraps_modulo_twelve() {
        let rows = vec![row(RawBodyId::Index(1), 14.0, 3.0)];
        let positions = normalize_chart(&rows, None, None, HouseNumbering::SignBased);
        assert_eq!(positions[0].sign_index, 2);
        assert_eq!(positions[0].sign, "Gemini");
    }
}
