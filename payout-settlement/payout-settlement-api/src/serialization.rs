//! Serialization helpers for the payout settlement API

/// A module for serializing and deserializing U256 as decimal strings
pub mod u256_string_serialization {
    use alloy_primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// Serialize a U256 to a decimal string
    pub fn serialize<S: Serializer>(value: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_string())
    }

    /// Deserialize a decimal (or `0x`-prefixed hex) string to a U256
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        let s = String::deserialize(d)?;
        let parsed = match s.strip_prefix("0x") {
            Some(hex) => U256::from_str_radix(hex, 16),
            None => U256::from_str_radix(&s, 10),
        };

        parsed.map_err(|_| D::Error::custom("Invalid U256 value"))
    }
}

/// A module for serializing chain ids as decimal strings, accepting either a
/// string or a number when deserializing
pub mod chain_id_string_serialization {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// A chain id as it may appear on the wire
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawChainId {
        /// A numeric chain id
        Number(u64),
        /// A stringified chain id
        String(String),
    }

    /// Serialize a chain id to a string
    pub fn serialize<S: Serializer>(chain_id: &u64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&chain_id.to_string())
    }

    /// Deserialize a chain id from a string or a number
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        match RawChainId::deserialize(d)? {
            RawChainId::Number(n) => Ok(n),
            RawChainId::String(s) => s.parse().map_err(|_| D::Error::custom("Invalid chain id")),
        }
    }
}

/// A module for (de)serializing display amounts as exact decimals.
///
/// The backend emits amounts as JSON numbers. These are read through their
/// shortest round-trip representation, so `1000.50` becomes the decimal
/// `1000.5` rather than the nearest binary float expansion
pub mod decimal_amount_serialization {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// An amount as it may appear on the wire
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        /// A JSON number
        Number(f64),
        /// A decimal string
        String(String),
    }

    /// Serialize a decimal amount to a string
    pub fn serialize<S: Serializer>(value: &BigDecimal, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.normalized().to_string())
    }

    /// Deserialize a decimal amount from a number or a string
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BigDecimal, D::Error> {
        let repr = match RawAmount::deserialize(d)? {
            RawAmount::Number(n) if n.is_finite() => n.to_string(),
            RawAmount::Number(_) => return Err(D::Error::custom("Amount is not finite")),
            RawAmount::String(s) => s,
        };

        BigDecimal::from_str(repr.trim()).map_err(|_| D::Error::custom("Invalid decimal amount"))
    }
}
