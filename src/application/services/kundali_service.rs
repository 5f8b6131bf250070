//! Per-endpoint pipelines: validate, query the engine, normalize, derive,
//! assemble.
//!
//! Every request runs the same stateless sequence; nothing is cached or
//! shared between requests. Sub-sections of the comprehensive snapshot
//! degrade to `null` individually instead of failing the whole request.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::domain::entities::birth_record::BirthRecord;
use crate::domain::errors::KundaliError;
use crate::domain::repositories::ephemeris_engine::{EphemerisEngine, LabeledPosition};
use crate::domain::services::ashtakavarga::{
    bhinnashtakavarga_json, occupancy_table, sarvashtakavarga_json,
};
use crate::domain::services::bhava_normalizer::normalize_bhava;
use crate::domain::services::chart_normalizer::{
    build_house_lookup, normalize_chart, HouseNumbering,
};
use crate::domain::services::dignity_assessor::assess_chart;
use crate::domain::value_objects::points::{expand_karaka, expand_special_lagna};

const SHADBALA_PLANETS: [&str; 7] =
    ["Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn"];

/// Divisional charts in the comprehensive snapshot: factor and response key.
const DIVISIONAL_CHARTS: [(u8, &str); 5] = [
    (3, "d3_drekkana"),
    (9, "d9_navamsa"),
    (12, "d12_dwadashamsha"),
    (45, "d45_akshavedamsha"),
    (60, "d60_shashtiamsha"),
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct KundaliService {
    engine: Arc<dyn EphemerisEngine>,
    house_numbering: HouseNumbering,
}

impl KundaliService {
    pub fn new(engine: Arc<dyn EphemerisEngine>, house_numbering: HouseNumbering) -> Self {
        Self {
            engine,
            house_numbering,
        }
    }

    fn birth_data_json(birth: &BirthRecord, include_name: bool) -> Value {
        let mut data = Map::new();
        if include_name {
            data.insert("name".to_string(), json!(birth.name));
        }
        data.insert("date".to_string(), json!(birth.date_string()));
        data.insert("time".to_string(), json!(birth.time_string()));
        data.insert("latitude".to_string(), json!(birth.latitude));
        data.insert("longitude".to_string(), json!(birth.longitude));
        data.insert("timezone".to_string(), json!(birth.timezone));
        data.insert("ayanamsa".to_string(), json!(birth.ayanamsa));
        Value::Object(data)
    }

    fn legacy_planet_json(position: &LabeledPosition) -> Value {
        let mut entry = Map::new();
        entry.insert("name".to_string(), json!(position.body.name()));
        entry.insert("sign".to_string(), json!(position.sign.name()));
        entry.insert("degree".to_string(), json!(position.degree));
        entry.insert("minute".to_string(), json!(position.minute));
        entry.insert("second".to_string(), json!(position.second));
        entry.insert("totalDegree".to_string(), json!(position.total_degree()));
        // The retrograde mark is only meaningful for the classical planets.
        entry.insert(
            "isRetrograde".to_string(),
            json!(position.retrograde && position.body.is_classical()),
        );
        if let Some(karaka) = &position.karaka {
            entry.insert("karaka".to_string(), json!(karaka));
        }
        entry.insert("raw".to_string(), json!(position.raw));
        Value::Object(entry)
    }

    /// `POST /api/planets` — rasi positions in the legacy shape.
    pub async fn planets(&self, birth: &BirthRecord) -> Result<Value, KundaliError> {
        birth.validate()?;
        let positions = self.engine.labeled_positions(birth).await?;
        let planets: Vec<Value> = positions.iter().map(Self::legacy_planet_json).collect();
        Ok(json!({ "status": "success", "planets": planets }))
    }

    /// `POST /api/kundali` — the legacy full-chart snapshot.
    pub async fn kundali(&self, birth: &BirthRecord) -> Result<Value, KundaliError> {
        birth.validate()?;
        let positions = self.engine.labeled_positions(birth).await?;
        let houses = self.engine.house_occupants(birth).await?;
        let calendar = self.engine.calendar_info(birth).await?;
        let ascendant = self.engine.ascendant_info(birth).await?;

        let planets: Vec<Value> = positions.iter().map(Self::legacy_planet_json).collect();
        let house_rows: Vec<Value> = houses
            .iter()
            .enumerate()
            .map(|(i, occupants)| json!({ "house": i + 1, "planets": occupants }))
            .collect();

        Ok(json!({
            "status": "success",
            "data": {
                "name": birth.name,
                "birthData": Self::birth_data_json(birth, false),
                "planets": planets,
                "houses": house_rows,
                "calendar": calendar,
                "ascendant": ascendant,
            }
        }))
    }

    /// `POST /api/ashtakavarga` — bindu tables with per-sign detail.
    pub async fn ashtakavarga(&self, birth: &BirthRecord) -> Result<Value, KundaliError> {
        birth.validate()?;
        let rasi = self.engine.chart_positions(birth, 1).await?;
        let occupancy = occupancy_table(&rasi);
        let raw = self.engine.ashtakavarga(&occupancy).await?;
        Ok(json!({
            "status": "success",
            "ashtakavarga": {
                "bhinnashtakavarga": bhinnashtakavarga_json(&raw.bhinna, true),
                "sarvashtakavarga": sarvashtakavarga_json(&raw.sarva, true),
            }
        }))
    }

    fn shadbala_table(totals: &[f64]) -> Value {
        let mut table = Map::new();
        for (i, name) in SHADBALA_PLANETS.iter().enumerate() {
            if let Some(total) = totals.get(i) {
                table.insert(name.to_string(), json!({ "total": round2(*total) }));
            }
        }
        Value::Object(table)
    }

    /// `POST /api/shadbala` — planetary strength totals.
    pub async fn shadbala(&self, birth: &BirthRecord) -> Result<Value, KundaliError> {
        birth.validate()?;
        let totals = self.engine.shadbala(birth).await?;
        Ok(json!({ "status": "success", "shadbala": Self::shadbala_table(&totals) }))
    }

    /// `POST /api/dasha` — the period-table subset of the calendar info.
    pub async fn dasha(&self, birth: &BirthRecord) -> Result<Value, KundaliError> {
        birth.validate()?;
        let calendar = self.engine.calendar_info(birth).await?;
        let dasha: Map<String, Value> = calendar
            .iter()
            .filter(|(key, _)| {
                let key = key.to_lowercase();
                key.contains("dasha") || key.contains("dhasa")
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(json!({ "status": "success", "dasha": dasha, "calendar": calendar }))
    }

    async fn divisional_or_null(
        &self,
        birth: &BirthRecord,
        factor: u8,
        key: &str,
        speeds: &HashMap<u8, f64>,
    ) -> Value {
        match self.engine.chart_positions(birth, factor).await {
            Ok(rows) if !rows.is_empty() => {
                json!(normalize_chart(&rows, None, Some(speeds), self.house_numbering))
            }
            Ok(_) => {
                warn!("engine returned no rows for {}", key);
                Value::Null
            }
            Err(e) => {
                warn!("divisional chart {} unavailable: {}", key, e);
                Value::Null
            }
        }
    }

    fn bhava_bala_table(strengths: &[f64], ratios: &[f64]) -> Value {
        let mut table = Map::new();
        for i in 0..12 {
            table.insert(
                format!("House {}", i + 1),
                json!({
                    "strength": round2(strengths.get(i).copied().unwrap_or(0.0)),
                    "ratio": round2(ratios.get(i).copied().unwrap_or(0.0)),
                }),
            );
        }
        Value::Object(table)
    }

    fn point_table(rows: &[String], expand: fn(&str) -> &str, with_abbreviation: bool) -> Value {
        let mut table = Map::new();
        for (i, row) in rows.iter().enumerate() {
            for token in row.lines().map(str::trim).filter(|t| !t.is_empty()) {
                let entry = if with_abbreviation {
                    json!({ "house": i + 1, "abbreviation": token })
                } else {
                    json!({ "house": i + 1 })
                };
                table.insert(expand(token).to_string(), entry);
            }
        }
        Value::Object(table)
    }

    /// `POST /api/complete` — every chart and table at once.
    ///
    /// The rasi chart, house cusps, and speed table are load-bearing;
    /// everything else degrades to `null` on its own without aborting the
    /// other sections.
    pub async fn complete(&self, birth: &BirthRecord) -> Result<Value, KundaliError> {
        birth.validate()?;

        let rasi = self.engine.chart_positions(birth, 1).await?;
        let bhava = self.engine.house_cusps(birth).await?;
        let speeds = self.engine.planet_speeds(birth).await?;

        let house_lookup = build_house_lookup(&bhava);
        let rasi_positions =
            normalize_chart(&rasi, Some(&house_lookup), Some(&speeds), self.house_numbering);
        let bhava_houses = normalize_bhava(&bhava);

        let mut charts = Map::new();
        charts.insert("rasi".to_string(), json!(rasi_positions));
        charts.insert("bhavaChalit".to_string(), json!(bhava_houses));
        for (factor, key) in DIVISIONAL_CHARTS {
            let chart = self.divisional_or_null(birth, factor, key, &speeds).await;
            charts.insert(key.to_string(), chart);
        }

        let occupancy = occupancy_table(&rasi);
        let ashtakavarga = match self.engine.ashtakavarga(&occupancy).await {
            Ok(raw) => json!({
                "bhinnashtakavarga": bhinnashtakavarga_json(&raw.bhinna, false),
                "sarvashtakavarga": sarvashtakavarga_json(&raw.sarva, false),
            }),
            Err(e) => {
                warn!("ashtakavarga unavailable: {}", e);
                Value::Null
            }
        };

        let shadbala = match self.engine.shadbala(birth).await {
            Ok(totals) => Self::shadbala_table(&totals),
            Err(e) => {
                warn!("shadbala unavailable: {}", e);
                Value::Null
            }
        };

        let bhava_bala = match self.engine.bhava_bala(birth).await {
            Ok(raw) => Self::bhava_bala_table(&raw.strengths, &raw.ratios),
            Err(e) => {
                warn!("bhava bala unavailable: {}", e);
                Value::Null
            }
        };

        let dignity = assess_chart(&rasi);

        let chara_karakas = match self.engine.chara_karakas(birth).await {
            Ok(rows) => Self::point_table(&rows, expand_karaka, true),
            Err(e) => {
                warn!("chara karakas unavailable: {}", e);
                Value::Null
            }
        };

        let special_lagnas = match self.engine.special_lagnas(birth).await {
            Ok(rows) => Self::point_table(&rows, expand_special_lagna, true),
            Err(e) => {
                warn!("special lagnas unavailable: {}", e);
                Value::Null
            }
        };

        let sphutas = match self.engine.sphutas(birth).await {
            Ok(rows) => Self::point_table(&rows, |name| name, false),
            Err(e) => {
                warn!("sphutas unavailable: {}", e);
                Value::Null
            }
        };

        Ok(json!({
            "status": "success",
            "data": {
                "birthData": Self::birth_data_json(birth, true),
                "charts": charts,
                "ashtakavarga": ashtakavarga,
                "shadbala": shadbala,
                "bhavaBala": bhava_bala,
                "dignity": dignity,
                "charaKarakas": chara_karakas,
                "specialLagnas": special_lagnas,
                "sphutas": sphutas,
            }
        }))
    }
}
