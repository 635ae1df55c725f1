use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "scalar_answer")]
    pub answer: Option<String>,
}

/// Accepts any scalar `answer`. Falsy scalars (`null`, `false`, `0`, `""`)
/// count as no answer; arrays and objects keep their JSON text.
fn scalar_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<AttributeValue>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_falsy()).map(|value| value.to_string()))
}

impl QueryResponse {
    /// The answer text, or `None` when the backend sent nothing usable.
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|answer| !answer.is_empty())
    }
}

/// Coordinate bounds. Non-numeric bounds (ISO timestamps, `null` for an
/// all-NaN axis) are kept as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordRange {
    #[serde(default)]
    pub min: AttributeValue,
    #[serde(default)]
    pub max: AttributeValue,
}

/// Scalar dataset attribute as reported by the backend.
///
/// Arrays and objects are folded into [`AttributeValue::Text`] holding their
/// compact JSON encoding, so the panel can always render something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum AttributeValue {
    Text(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => Self::Number(number),
            Value::Bool(flag) => Self::Boolean(flag),
            Value::Null => Self::Null,
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

impl Default for AttributeValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl AttributeValue {
    fn is_falsy(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(number) => number.as_f64() == Some(0.0),
            Self::Boolean(flag) => !flag,
            Self::Null => true,
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Text(text) => Value::String(text),
            AttributeValue::Number(number) => Value::Number(number),
            AttributeValue::Boolean(flag) => Value::Bool(flag),
            AttributeValue::Null => Value::Null,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            // `2000.0` prints as `2000`.
            Self::Number(number) => match number.as_f64() {
                Some(float) if number.is_f64() => write!(f, "{float}"),
                _ => write!(f, "{number}"),
            },
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Null => f.write_str("null"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub dimensions: IndexMap<String, u64>,
    #[serde(default)]
    pub coords: IndexMap<String, CoordRange>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeValue>,
}

/// Raw `/dataset/info` body: either metadata or an `error` field.
#[derive(Debug, Deserialize)]
struct DatasetInfoBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    info: DatasetInfo,
}

/// Decoded `/dataset/info` reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "DatasetInfoBody")]
pub enum DatasetInfoReply {
    Snapshot(DatasetInfo),
    /// The backend answered, but reported a failure of its own.
    Failed(String),
}

impl From<DatasetInfoBody> for DatasetInfoReply {
    fn from(body: DatasetInfoBody) -> Self {
        match body.error {
            Some(error) if !error.is_empty() => Self::Failed(error),
            _ => Self::Snapshot(body.info),
        }
    }
}
