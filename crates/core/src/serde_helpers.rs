//! custom serde helper functions for JSON-RPC parameters

/// Deserializes a JSON number or string into its decimal text.
pub mod numeric_string {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(serde_json::Number),
        String(String),
    }

    pub fn deserialize<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(d)? {
            NumberOrString::Number(n) => Ok(n.to_string()),
            NumberOrString::String(s) if s.trim().is_empty() => {
                Err(D::Error::custom("expected a numeric string, got an empty string"))
            }
            NumberOrString::String(s) => Ok(s),
        }
    }
}

/// Deserializes a non-negative integer given as a JSON number or decimal string.
pub mod uint {
    use crate::clarity::parse_uint;
    use serde::{Deserializer, de::Error};

    pub fn deserialize<'de, D>(d: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = super::numeric_string::deserialize(d)?;
        parse_uint(&s).map_err(D::Error::custom)
    }
}

/// Accepts a missing parameter set: `null`, `[]` or `{}`.
pub mod empty_params {
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(d: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(d)? {
            serde_json::Value::Null => Ok(()),
            serde_json::Value::Array(seq) if seq.is_empty() => Ok(()),
            serde_json::Value::Object(map) if map.is_empty() => Ok(()),
            other => Err(D::Error::custom(format!("expected no params but got {other}"))),
        }
    }
}

/// Accepts a parameter object either bare or wrapped in a single-element array.
pub mod object_or_sequence {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::Error};

    pub fn deserialize<'de, T, D>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = match serde_json::Value::deserialize(d)? {
            serde_json::Value::Array(mut seq) => {
                if seq.len() != 1 {
                    return Err(D::Error::custom(format!(
                        "expected params sequence with length 1 but got {}",
                        seq.len()
                    )));
                }
                seq.remove(0)
            }
            value => value,
        };
        serde_json::from_value(value).map_err(D::Error::custom)
    }
}
