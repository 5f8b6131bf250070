use serde::Serialize;

/// Dignity classification by sign placement. First matching rule wins, in
/// this priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dignity {
    Exalted,
    Debilitated,
    #[serde(rename = "Own Sign")]
    OwnSign,
    Moolatrikona,
    Neutral,
}

impl Dignity {
    pub fn label(&self) -> &'static str {
        match self {
            Dignity::Exalted => "Exalted",
            Dignity::Debilitated => "Debilitated",
            Dignity::OwnSign => "Own Sign",
            Dignity::Moolatrikona => "Moolatrikona",
            Dignity::Neutral => "Neutral",
        }
    }
}

/// Dignity and combustion status of one classical planet in the rasi
/// chart. `sun_distance` is absent for the Sun itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DignityRecord {
    pub dignity: Dignity,
    pub is_combust: bool,
    pub sun_distance: Option<f64>,
}
