use serde::Serialize;

/// One house of the bhava-chalit chart: cusp degrees plus occupants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BhavaHouse {
    pub house: u8,
    pub start_degree: f64,
    pub mid_degree: f64,
    pub end_degree: f64,
    pub planets: Vec<String>,
}
