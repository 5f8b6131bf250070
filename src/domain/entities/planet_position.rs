use serde::Serialize;

/// Canonical position of one body within one chart.
///
/// `house` is `None` only under the explicit-null house policy when no
/// cusp data exists for the chart; the legacy policy falls back to
/// sign-based numbering instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: String,
    pub sign: String,
    pub sign_index: u8,
    pub degree: f64,
    pub nakshatra: String,
    pub pada: u8,
    pub house: Option<u8>,
    pub is_retrograde: bool,
}
