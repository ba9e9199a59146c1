use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::TypesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usdc,
    Usdt,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usdc => "USDC",
            Self::Usdt => "USDT",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USDC" => Ok(Self::Usdc),
            "USDT" => Ok(Self::Usdt),
            _ => Err(TypesError::UnknownCurrency(s.to_string())),
        }
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Price an agent charges for one execution.
///
/// `amount` travels as a decimal string on the wire so large values survive
/// JSON consumers limited to doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoriqCost {
    #[serde(serialize_with = "amount_as_string", deserialize_with = "amount_from_any")]
    pub amount: u64,
    pub currency: Currency,
}

impl TheoriqCost {
    pub fn new(amount: u64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for TheoriqCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.as_str())
    }
}

fn amount_as_string<S: Serializer>(amount: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&amount.to_string())
}

fn amount_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| serde::de::Error::custom(TypesError::InvalidAmount(raw.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_serialized_as_string() {
        let cost = TheoriqCost::new(1, Currency::Usdc);
        assert_eq!(
            serde_json::to_value(cost).unwrap(),
            json!({"amount": "1", "currency": "USDC"})
        );
    }

    #[test]
    fn test_amount_accepts_number() {
        let cost: TheoriqCost =
            serde_json::from_value(json!({"amount": 25, "currency": "usdt"})).unwrap();
        assert_eq!(cost, TheoriqCost::new(25, Currency::Usdt));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let res: Result<TheoriqCost, _> =
            serde_json::from_value(json!({"amount": "-3", "currency": "USDC"}));
        assert!(res.unwrap_err().to_string().contains("invalid cost amount"));
    }

    #[test]
    fn test_display() {
        assert_eq!(TheoriqCost::new(1, Currency::Usdc).to_string(), "1 USDC");
    }
}
