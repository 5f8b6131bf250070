//! Ashtakavarga table assembly.
//!
//! Builds the house-occupancy string table the engine's bindu computation
//! expects, then reshapes the returned point arrays into the response
//! structures.

use serde_json::{json, Map, Value};

use crate::domain::repositories::ephemeris_engine::{RawBodyId, RawChartRow};
use crate::domain::value_objects::sign::ALL_SIGNS;

/// Contributing bodies in engine order, Ascendant last.
const BAV_BODY_ORDER: [&str; 8] = [
    "Sun",
    "Moon",
    "Mars",
    "Mercury",
    "Jupiter",
    "Venus",
    "Saturn",
    "Ascendant",
];

/// Build the 12-slot occupancy table from the rasi chart, one slot per
/// sign position, multiple occupants joined with `/`. Tokens use the
/// engine's own identifiers (`L` for the ascendant, body index otherwise).
pub fn occupancy_table(rasi: &[RawChartRow]) -> [String; 12] {
    let mut table: [String; 12] = std::array::from_fn(|_| String::new());
    for row in rasi {
        let slot = row.sign_index() % 12;
        let token = match &row.body {
            RawBodyId::Ascendant => "L".to_string(),
            RawBodyId::Index(i) => i.to_string(),
            RawBodyId::Other(s) => s.clone(),
        };
        if table[slot].is_empty() {
            table[slot] = token;
        } else {
            table[slot] = format!("{}/{}", table[slot], token);
        }
    }
    table
}

fn by_sign_map(points: &[i64]) -> Value {
    let mut map = Map::new();
    for (i, sign) in ALL_SIGNS.iter().enumerate() {
        map.insert(sign.name().to_string(), json!(points.get(i).copied().unwrap_or(0)));
    }
    Value::Object(map)
}

/// Bhinnashtakavarga tables keyed by body name. The detailed form (the
/// dedicated endpoint) includes the Ascendant table and a per-sign map;
/// the comprehensive endpoint keeps the seven planets with points and
/// total only.
pub fn bhinnashtakavarga_json(bhinna: &[Vec<i64>], detailed: bool) -> Value {
    let count = if detailed { 8 } else { 7 };
    let mut out = Map::new();
    for (i, name) in BAV_BODY_ORDER.iter().take(count).enumerate() {
        let points = match bhinna.get(i) {
            Some(points) => points,
            None => break,
        };
        let total: i64 = points.iter().sum();
        let mut entry = Map::new();
        entry.insert("points".to_string(), json!(points));
        entry.insert("total".to_string(), json!(total));
        if detailed {
            entry.insert("bySign".to_string(), by_sign_map(points));
        }
        out.insert(name.to_string(), Value::Object(entry));
    }
    Value::Object(out)
}

/// Sarvashtakavarga aggregate table.
pub fn sarvashtakavarga_json(sarva: &[i64], detailed: bool) -> Value {
    let total: i64 = sarva.iter().sum();
    let mut entry = Map::new();
    entry.insert("points".to_string(), json!(sarva));
    entry.insert("total".to_string(), json!(total));
    if detailed {
        entry.insert("bySign".to_string(), by_sign_map(sarva));
    }
    Value::Object(entry)
}
