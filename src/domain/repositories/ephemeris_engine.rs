//! Ephemeris Engine Trait
//!
//! This module defines the `EphemerisEngine` trait, the only seam through
//! which the external astrological computation engine is reached. Every
//! distinct query type gets its own narrow operation, each idempotent and
//! pure for a given birth record.
//!
//! ## Benefits
//! - Decouples chart normalization from the engine wire format
//! - Enables easy mocking for testing
//! - Keeps engine symbols and tuple shapes out of the rest of the crate
//!
//! Engine failures are never retried: ephemeris computation is
//! deterministic, so a retry with unchanged input cannot succeed where the
//! first call failed.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::birth_record::BirthRecord;
use crate::domain::value_objects::body::Body;
use crate::domain::value_objects::sign::Sign;

/// Common result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while querying the engine
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// The engine could not be reached
    #[error("Engine request failed: {0}")]
    Transport(String),

    /// The engine rejected the input (unsupported ayanamsa, date outside
    /// ephemeris range, internal numerical failure)
    #[error("Engine rejected input: {0}")]
    Rejected(String),

    /// The engine answered with a payload the gateway cannot decode
    #[error("Unexpected engine payload: {0}")]
    UnexpectedShape(String),
}

/// Body identifier as the engine emits it: the ascendant sentinel, a
/// 0-based body index, or (defensively) any other string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawBodyId {
    Ascendant,
    Index(u8),
    Other(String),
}

impl RawBodyId {
    /// Canonical display name. Index values beyond the known bodies and
    /// `Other` identifiers pass through as their string form; this should
    /// not occur with a conformant engine.
    pub fn resolve_name(&self) -> String {
        match self {
            RawBodyId::Ascendant => Body::Ascendant.name().to_string(),
            RawBodyId::Index(i) => match Body::from_index(*i) {
                Some(body) => body.name().to_string(),
                None => i.to_string(),
            },
            RawBodyId::Other(s) => s.clone(),
        }
    }

    /// Index of the body if it is one of the seven classical planets.
    pub fn classical_index(&self) -> Option<u8> {
        match self {
            RawBodyId::Index(i) if *i <= 6 => Some(*i),
            _ => None,
        }
    }
}

/// One row of a chart result.
#[derive(Debug, Clone)]
pub struct RawChartRow {
    pub body: RawBodyId,
    /// Positional payload. The engine sometimes sends a pair and sometimes
    /// a longer sequence: the first element is the sign index, the second
    /// the degree within the sign, and any remainder is ignored.
    pub position: Vec<f64>,
}

impl RawChartRow {
    pub fn sign_index(&self) -> usize {
        self.position.first().copied().unwrap_or(0.0) as usize
    }

    pub fn degree(&self) -> f64 {
        self.position.get(1).copied().unwrap_or(0.0)
    }

    /// Absolute ecliptic longitude in degrees.
    pub fn absolute_longitude(&self) -> f64 {
        (self.sign_index() % 12) as f64 * 30.0 + self.degree()
    }
}

/// One row of a bhava (house cusp) result.
#[derive(Debug, Clone)]
pub struct RawBhavaRow {
    /// 0-based house index
    pub house_index: u8,
    pub start_degree: f64,
    pub mid_degree: f64,
    pub end_degree: f64,
    pub occupants: Vec<RawBodyId>,
}

/// A rasi position decoded from the engine's display feed, used by the
/// legacy endpoints. Glyph decoding happens at the gateway; nothing past
/// this type carries engine symbols.
#[derive(Debug, Clone)]
pub struct LabeledPosition {
    pub body: Body,
    pub sign: Sign,
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
    pub retrograde: bool,
    pub karaka: Option<String>,
    /// Engine display string, passed through for legacy clients
    pub raw: String,
}

impl LabeledPosition {
    /// Decimal degrees within the sign, 4-decimal precision.
    pub fn total_degree(&self) -> f64 {
        let total =
            self.degree as f64 + self.minute as f64 / 60.0 + self.second as f64 / 3600.0;
        (total * 10_000.0).round() / 10_000.0
    }
}

/// Ashtakavarga bindu arrays as the engine returns them.
#[derive(Debug, Clone)]
pub struct RawAshtakavarga {
    /// Per-planet arrays of 12 bindu values, Ascendant last (8 rows)
    pub bhinna: Vec<Vec<i64>>,
    /// Aggregate array of 12 values
    pub sarva: Vec<i64>,
}

/// Bhava bala rows: total strengths plus normalized ratios.
#[derive(Debug, Clone)]
pub struct RawBhavaBala {
    pub strengths: Vec<f64>,
    pub ratios: Vec<f64>,
}

/// Gateway to the external astrological computation engine.
#[async_trait]
pub trait EphemerisEngine: Send + Sync {
    /// Chart positions for a divisional factor (1 = rasi, 3 = drekkana,
    /// 9 = navamsa, ...).
    async fn chart_positions(
        &self,
        birth: &BirthRecord,
        factor: u8,
    ) -> EngineResult<Vec<RawChartRow>>;

    /// House cusp degrees and occupancy for the birth chart.
    async fn house_cusps(&self, birth: &BirthRecord) -> EngineResult<Vec<RawBhavaRow>>;

    /// Instantaneous daily motion per body index. Negative motion means
    /// retrograde.
    async fn planet_speeds(&self, birth: &BirthRecord) -> EngineResult<HashMap<u8, f64>>;

    /// Composite strength totals for the seven classical planets.
    async fn shadbala(&self, birth: &BirthRecord) -> EngineResult<Vec<f64>>;

    /// House strength totals and normalized ratios.
    async fn bhava_bala(&self, birth: &BirthRecord) -> EngineResult<RawBhavaBala>;

    /// Ashtakavarga bindu computation for a house occupancy table.
    async fn ashtakavarga(&self, occupancy: &[String; 12]) -> EngineResult<RawAshtakavarga>;

    /// Display-formatted rasi positions for the legacy endpoints, decoded
    /// into typed records at the gateway boundary.
    async fn labeled_positions(&self, birth: &BirthRecord)
        -> EngineResult<Vec<LabeledPosition>>;

    /// Occupant names per house (12 entries) for the legacy kundali shape.
    async fn house_occupants(&self, birth: &BirthRecord) -> EngineResult<Vec<Vec<String>>>;

    /// Panchanga and dasha key-value table, passed through to clients.
    async fn calendar_info(
        &self,
        birth: &BirthRecord,
    ) -> EngineResult<serde_json::Map<String, serde_json::Value>>;

    /// Engine-native ascendant descriptor, passed through to clients.
    async fn ascendant_info(&self, birth: &BirthRecord)
        -> EngineResult<Option<serde_json::Value>>;

    /// Chara karaka abbreviations per house (12 newline-joined strings).
    async fn chara_karakas(&self, birth: &BirthRecord) -> EngineResult<Vec<String>>;

    /// Special lagna abbreviations per house (12 newline-joined strings).
    async fn special_lagnas(&self, birth: &BirthRecord) -> EngineResult<Vec<String>>;

    /// Sphuta names per house (12 newline-joined strings).
    async fn sphutas(&self, birth: &BirthRecord) -> EngineResult<Vec<String>>;
}
