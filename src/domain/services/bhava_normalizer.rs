use crate::domain::entities::bhava_house::BhavaHouse;
use crate::domain::repositories::ephemeris_engine::RawBhavaRow;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert raw house cusp rows into bhava-chalit records.
pub fn normalize_bhava(rows: &[RawBhavaRow]) -> Vec<BhavaHouse> {
    rows.iter()
        .map(|row| BhavaHouse {
            house: row.house_index + 1,
            start_degree: round2(row.start_degree),
            mid_degree: round2(row.mid_degree),
            end_degree: round2(row.end_degree),
            planets: row
                .occupants
                .iter()
                .map(|occupant| occupant.resolve_name())
                .collect(),
        })
        .collect()
}
