//! Serde adapters for the NaN undefined marker.
//!
//! JSON has no NaN. Undefined positions are written as `null` and read back
//! as `f64::NAN`, so every derived series survives a JSON round trip.
//!
//! ```ignore
//! #[serde(with = "crate::domain::undefined::nan_as_null")]
//! values: Vec<f64>,
//! ```

use std::collections::BTreeMap;

use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};

struct NullForNan<'a>(&'a [f64]);

impl Serialize for NullForNan<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|v| (!v.is_nan()).then_some(*v)))
    }
}

fn nan_for_null(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// `Vec<f64>` with NaN as `null`.
pub mod nan_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        NullForNan(values).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Option<f64>>::deserialize(deserializer).map(nan_for_null)
    }
}

/// Named series map with NaN as `null`.
pub mod nan_map_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, Vec<f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(map.iter().map(|(name, values)| (name, NullForNan(values))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<f64>>, D::Error> {
        let raw = BTreeMap::<String, Vec<Option<f64>>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(name, values)| (name, nan_for_null(values)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapped {
        #[serde(with = "nan_as_null")]
        values: Vec<f64>,
        #[serde(with = "nan_map_as_null")]
        named: BTreeMap<String, Vec<f64>>,
    }

    #[test]
    fn nan_round_trips_through_null() {
        let mut named = BTreeMap::new();
        named.insert("sma_3".to_string(), vec![f64::NAN, 2.0]);
        let wrapped = Wrapped {
            values: vec![f64::NAN, f64::NAN, 1.5],
            named,
        };

        let json = serde_json::to_string(&wrapped).unwrap();
        assert_eq!(json, r#"{"values":[null,null,1.5],"named":{"sma_3":[null,2.0]}}"#);

        let back: Wrapped = serde_json::from_str(&json).unwrap();
        assert!(back.values[0].is_nan() && back.values[1].is_nan());
        assert_eq!(back.values[2], 1.5);
        assert!(back.named["sma_3"][0].is_nan());
        assert_eq!(back.named["sma_3"][1], 2.0);
    }
}
