/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/

//! Serde helpers shared by the wire models

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, mapping empty or whitespace-only values
/// to `None`.
///
/// The export CSV represents absent values as empty cells, which would
/// otherwise surface as `Some("")` and leak into payee and memo fields.
pub fn option_string_empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "option_string_empty_as_none")]
        field: Option<String>,
    }

    #[test]
    fn test_empty_string_becomes_none() {
        let probe: Probe = serde_json::from_str(r#"{"field": ""}"#).unwrap();
        assert_eq!(probe.field, None);

        let probe: Probe = serde_json::from_str(r#"{"field": "  "}"#).unwrap();
        assert_eq!(probe.field, None);
    }

    #[test]
    fn test_value_is_preserved() {
        let probe: Probe = serde_json::from_str(r#"{"field": "AAPL"}"#).unwrap();
        assert_eq!(probe.field.as_deref(), Some("AAPL"));
    }
}
