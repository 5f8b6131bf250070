//! # JHora Engine Client
//!
//! HTTP client for the astrological computation engine sidecar. The
//! sidecar wraps the ephemeris library behind a small JSON API; this
//! client is the production implementation of `EphemerisEngine`.
//!
//! ## Wire format
//!
//! Every query POSTs the birth payload (plus query-specific fields) and
//! receives a JSON object. Chart rows arrive as loosely-shaped pairs
//! `[body_id, [sign_index, degree, ...]]` where `body_id` is an integer
//! index or the ascendant sentinel `"L"`; the display feed carries
//! glyph-labeled strings. All of it is decoded here, at the boundary, and
//! unmapped symbols are logged and skipped.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::warn;
use url::Url;

use crate::domain::entities::birth_record::BirthRecord;
use crate::domain::repositories::ephemeris_engine::{
    EngineError, EngineResult, EphemerisEngine, LabeledPosition, RawAshtakavarga, RawBhavaBala,
    RawBhavaRow, RawBodyId, RawChartRow,
};
use crate::infrastructure::symbols::{
    canonicalize_occupant, parse_position_string, PLANET_LABELS,
};

/// Engine sidecar configuration
#[derive(Debug, Clone)]
pub struct JhoraEngineConfig {
    /// Base URL of the sidecar, e.g. `http://127.0.0.1:8800/`
    pub base_url: Url,
    pub timeout: Duration,
}

/// HTTP client for the engine sidecar
#[derive(Debug, Clone)]
pub struct JhoraEngineClient {
    client: Client,
    config: JhoraEngineConfig,
}

impl JhoraEngineClient {
    pub fn new(config: JhoraEngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn birth_payload(&self, birth: &BirthRecord) -> Value {
        json!({
            "name": birth.name,
            "year": birth.year,
            "month": birth.month,
            "day": birth.day,
            "hour": birth.hour,
            "minute": birth.minute,
            "second": birth.second,
            "latitude": birth.latitude,
            "longitude": birth.longitude,
            "timezone": birth.timezone,
            "ayanamsa": birth.ayanamsa_mode(),
        })
    }

    async fn post(&self, path: &str, body: Value) -> EngineResult<Value> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| EngineError::Transport(format!("bad engine url: {}", e)))?;
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EngineError::Rejected(format!("{}: {}", status, detail)));
        }
        response
            .json()
            .await
            .map_err(|e| EngineError::UnexpectedShape(e.to_string()))
    }

    async fn horoscope(&self, birth: &BirthRecord) -> EngineResult<Value> {
        self.post("horoscope", self.birth_payload(birth)).await
    }

    fn field<'a>(value: &'a Value, name: &str) -> EngineResult<&'a Value> {
        value
            .get(name)
            .ok_or_else(|| EngineError::UnexpectedShape(format!("missing field `{}`", name)))
    }

    fn string_rows(value: &Value, name: &str) -> EngineResult<Vec<String>> {
        let rows = Self::field(value, name)?
            .as_array()
            .ok_or_else(|| EngineError::UnexpectedShape(format!("`{}` is not an array", name)))?;
        Ok(rows
            .iter()
            .map(|row| row.as_str().unwrap_or_default().to_string())
            .collect())
    }

    fn number_rows(value: &Value, name: &str) -> EngineResult<Vec<f64>> {
        let rows = Self::field(value, name)?
            .as_array()
            .ok_or_else(|| EngineError::UnexpectedShape(format!("`{}` is not an array", name)))?;
        Ok(rows.iter().filter_map(Value::as_f64).collect())
    }
}

fn decode_body_id(value: &Value) -> RawBodyId {
    if let Some(n) = value.as_u64() {
        if n <= u8::MAX as u64 {
            return RawBodyId::Index(n as u8);
        }
        return RawBodyId::Other(n.to_string());
    }
    if let Some(s) = value.as_str() {
        if s == "L" {
            return RawBodyId::Ascendant;
        }
        if let Ok(n) = s.parse::<u8>() {
            return RawBodyId::Index(n);
        }
        return RawBodyId::Other(s.to_string());
    }
    RawBodyId::Other(value.to_string())
}

fn decode_position_payload(value: Option<&Value>) -> Vec<f64> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_f64).collect(),
        Some(Value::Number(n)) => vec![n.as_f64().unwrap_or(0.0)],
        _ => Vec::new(),
    }
}

fn decode_chart_rows(value: &Value) -> EngineResult<Vec<RawChartRow>> {
    let rows = value
        .as_array()
        .ok_or_else(|| EngineError::UnexpectedShape("chart rows are not an array".to_string()))?;
    rows.iter()
        .map(|item| {
            let pair = item.as_array().ok_or_else(|| {
                EngineError::UnexpectedShape("chart row is not a sequence".to_string())
            })?;
            let body = pair
                .first()
                .map(decode_body_id)
                .ok_or_else(|| EngineError::UnexpectedShape("empty chart row".to_string()))?;
            Ok(RawChartRow {
                body,
                position: decode_position_payload(pair.get(1)),
            })
        })
        .collect()
}

fn decode_bhava_rows(value: &Value) -> EngineResult<Vec<RawBhavaRow>> {
    let rows = value
        .as_array()
        .ok_or_else(|| EngineError::UnexpectedShape("bhava rows are not an array".to_string()))?;
    rows.iter()
        .enumerate()
        .map(|(i, item)| {
            let parts = item.as_array().ok_or_else(|| {
                EngineError::UnexpectedShape("bhava row is not a sequence".to_string())
            })?;
            let house_index = parts
                .first()
                .and_then(Value::as_u64)
                .unwrap_or(i as u64) as u8;
            let cusps = decode_position_payload(parts.get(1));
            let occupants = parts
                .get(2)
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_body_id).collect())
                .unwrap_or_default();
            Ok(RawBhavaRow {
                house_index,
                start_degree: cusps.first().copied().unwrap_or(0.0),
                mid_degree: cusps.get(1).copied().unwrap_or(0.0),
                end_degree: cusps.get(2).copied().unwrap_or(0.0),
                occupants,
            })
        })
        .collect()
}

#[async_trait]
impl EphemerisEngine for JhoraEngineClient {
    async fn chart_positions(
        &self,
        birth: &BirthRecord,
        factor: u8,
    ) -> EngineResult<Vec<RawChartRow>> {
        let mut payload = self.birth_payload(birth);
        payload["factor"] = json!(factor);
        let response = self.post("chart", payload).await?;
        decode_chart_rows(Self::field(&response, "chart")?)
    }

    async fn house_cusps(&self, birth: &BirthRecord) -> EngineResult<Vec<RawBhavaRow>> {
        let response = self.post("bhava", self.birth_payload(birth)).await?;
        decode_bhava_rows(Self::field(&response, "bhava")?)
    }

    async fn planet_speeds(&self, birth: &BirthRecord) -> EngineResult<HashMap<u8, f64>> {
        let response = self.post("speeds", self.birth_payload(birth)).await?;
        let table = Self::field(&response, "speeds")?
            .as_object()
            .ok_or_else(|| EngineError::UnexpectedShape("`speeds` is not an object".to_string()))?;
        let mut speeds = HashMap::new();
        for (key, row) in table {
            let index = match key.parse::<u8>() {
                Ok(index) => index,
                Err(_) => {
                    warn!("skipping speed entry with unmapped body key `{}`", key);
                    continue;
                }
            };
            // Daily motion sits at element 3 of the engine's speed tuple.
            if let Some(motion) = row.as_array().and_then(|r| r.get(3)).and_then(Value::as_f64) {
                speeds.insert(index, motion);
            }
        }
        Ok(speeds)
    }

    async fn shadbala(&self, birth: &BirthRecord) -> EngineResult<Vec<f64>> {
        let response = self.post("strength/shadbala", self.birth_payload(birth)).await?;
        Self::number_rows(&response, "shadbala")
    }

    async fn bhava_bala(&self, birth: &BirthRecord) -> EngineResult<RawBhavaBala> {
        let response = self
            .post("strength/bhava-bala", self.birth_payload(birth))
            .await?;
        let rows = Self::field(&response, "bhava_bala")?
            .as_array()
            .ok_or_else(|| {
                EngineError::UnexpectedShape("`bhava_bala` is not an array".to_string())
            })?;
        let numbers = |row: Option<&Value>| -> Vec<f64> {
            row.and_then(Value::as_array)
                .map(|items| items.iter().filter_map(Value::as_f64).collect())
                .unwrap_or_default()
        };
        Ok(RawBhavaBala {
            strengths: numbers(rows.first()),
            ratios: numbers(rows.get(2)),
        })
    }

    async fn ashtakavarga(&self, occupancy: &[String; 12]) -> EngineResult<RawAshtakavarga> {
        let response = self
            .post("ashtakavarga", json!({ "occupancy": occupancy }))
            .await?;
        let bhinna = Self::field(&response, "bav")?
            .as_array()
            .ok_or_else(|| EngineError::UnexpectedShape("`bav` is not an array".to_string()))?
            .iter()
            .map(|row| {
                row.as_array()
                    .map(|items| items.iter().filter_map(Value::as_i64).collect())
                    .unwrap_or_default()
            })
            .collect();
        let sarva = Self::field(&response, "sav")?
            .as_array()
            .ok_or_else(|| EngineError::UnexpectedShape("`sav` is not an array".to_string()))?
            .iter()
            .filter_map(Value::as_i64)
            .collect();
        Ok(RawAshtakavarga { bhinna, sarva })
    }

    async fn labeled_positions(
        &self,
        birth: &BirthRecord,
    ) -> EngineResult<Vec<LabeledPosition>> {
        let response = self.horoscope(birth).await?;
        let info = Self::field(&response, "info")?
            .as_object()
            .ok_or_else(|| EngineError::UnexpectedShape("`info` is not an object".to_string()))?;

        let mut positions = Vec::new();
        for (label, body) in PLANET_LABELS {
            let key = format!("Raasi-{}", label);
            let raw = match info.get(&key).and_then(Value::as_str) {
                Some(raw) => raw,
                None => continue,
            };
            match parse_position_string(raw) {
                Some(parsed) => positions.push(LabeledPosition {
                    body,
                    sign: parsed.sign,
                    degree: parsed.degree,
                    minute: parsed.minute,
                    second: parsed.second,
                    retrograde: parsed.retrograde,
                    karaka: parsed.karaka,
                    raw: raw.to_string(),
                }),
                None => warn!("could not decode position string for {}: `{}`", label, raw),
            }
        }

        let known: Vec<String> = PLANET_LABELS
            .iter()
            .map(|(label, _)| format!("Raasi-{}", label))
            .collect();
        for key in info.keys() {
            if key.starts_with("Raasi-") && !known.contains(key) {
                warn!("unmapped engine symbol in display feed: `{}`", key);
            }
        }
        Ok(positions)
    }

    async fn house_occupants(&self, birth: &BirthRecord) -> EngineResult<Vec<Vec<String>>> {
        let response = self.horoscope(birth).await?;
        let houses = Self::string_rows(&response, "houses")?;
        Ok(houses
            .iter()
            .map(|entry| {
                entry
                    .lines()
                    .map(canonicalize_occupant)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .collect())
    }

    async fn calendar_info(
        &self,
        birth: &BirthRecord,
    ) -> EngineResult<Map<String, Value>> {
        let response = self.horoscope(birth).await?;
        Self::field(&response, "calendar")?
            .as_object()
            .cloned()
            .ok_or_else(|| EngineError::UnexpectedShape("`calendar` is not an object".to_string()))
    }

    async fn ascendant_info(&self, birth: &BirthRecord) -> EngineResult<Option<Value>> {
        let response = self.horoscope(birth).await?;
        Ok(match response.get("ascendant") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        })
    }

    async fn chara_karakas(&self, birth: &BirthRecord) -> EngineResult<Vec<String>> {
        let response = self.post("points/karakas", self.birth_payload(birth)).await?;
        Self::string_rows(&response, "karakas")
    }

    async fn special_lagnas(&self, birth: &BirthRecord) -> EngineResult<Vec<String>> {
        let response = self
            .post("points/special-lagnas", self.birth_payload(birth))
            .await?;
        Self::string_rows(&response, "special_lagnas")
    }

    async fn sphutas(&self, birth: &BirthRecord) -> EngineResult<Vec<String>> {
        let response = self.post("points/sphutas", self.birth_payload(birth)).await?;
        Self::string_rows(&response, "sphutas")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body_id_variants() {
        assert_eq!(decode_body_id(&json!(0)), RawBodyId::Index(0));
        assert_eq!(decode_body_id(&json!("L")), RawBodyId::Ascendant);
        assert_eq!(decode_body_id(&json!("7")), RawBodyId::Index(7));
        assert_eq!(
            decode_body_id(&json!("Gulika")),
            RawBodyId::Other("Gulika".to_string())
        );
        assert_eq!(
            decode_body_id(&json!(1000)),
            RawBodyId::Other("1000".to_string())
        );
    }

    #[test]
    fn test_decode_chart_rows_tolerates_shapes() {
        let value = json!([
            ["L", [9, 1.0656]],
            [0, [9, 1.0656, 271.0656]],
            [1, 4]
        ]);
        let rows = decode_chart_rows(&value).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].body, RawBodyId::Ascendant);
        assert_eq!(rows[1].position.len(), 3);
        assert_eq!(rows[1].degree(), 1.0656);
        assert_eq!(rows[2].position, vec![4.0]);
    }

    #[test]
    fn test_decode_chart_rows_rejects_non_array() {
        assert!(decode_chart_rows(&json!({"not": "rows"})).is_err());
    }

    #[test]
    fn test_decode_bhava_rows() {
        let value = json!([
            [0, [263.45, 278.5, 293.54], ["L", 0]],
            [1, [293.54, 308.5, 323.5], []]
        ]);
        let rows = decode_bhava_rows(&value).unwrap();
        assert_eq!(rows[0].house_index, 0);
        assert_eq!(rows[0].occupants.len(), 2);
        assert_eq!(rows[0].start_degree, 263.45);
        assert_eq!(rows[1].occupants.len(), 0);
    }
}
