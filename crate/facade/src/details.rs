use std::fmt;

use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{error::result::FacadeResult, FacadeError};

/// A serializable value attached to an error or failure record.
///
/// There is no null variant: absent context is expressed by
/// leaving the key out. Nulls met while deserializing are skipped, whether
/// they are map values or list elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<DetailValue>),
    Map(Details),
}

impl From<bool> for DetailValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for DetailValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for DetailValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for DetailValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for DetailValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<f64> for DetailValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for DetailValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for DetailValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<V: Into<DetailValue>> From<Vec<V>> for DetailValue {
    fn from(v: Vec<V>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<Details> for DetailValue {
    fn from(v: Details) -> Self {
        Self::Map(v)
    }
}

/// Insertion-ordered mapping of unique text keys to [`DetailValue`]s.
///
/// Inserting a key twice keeps the first position and the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details {
    entries: Vec<(String, DetailValue)>,
}

impl Details {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DetailValue>,
    ) -> Option<DetailValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Builder-style [`Details::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a JSON object. `null` members are skipped; any other top-level
    /// JSON value is rejected.
    pub fn from_json_str(json: &str) -> FacadeResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                FacadeError::InvalidDetails(e.to_string())
            } else {
                FacadeError::Parsing(e.to_string())
            }
        })
    }

    /// Compact JSON rendering, keys in insertion order.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // a map of strings to plain values cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}

// key order follows the `serde_json::Map` iteration order
impl TryFrom<serde_json::Value> for Details {
    type Error = FacadeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| FacadeError::InvalidDetails(e.to_string())),
            other => Err(FacadeError::InvalidDetails(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Details
where
    K: Into<String>,
    V: Into<DetailValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut details = Self::new();
        for (k, v) in iter {
            details.insert(k, v);
        }
        details
    }
}

impl IntoIterator for Details {
    type IntoIter = std::vec::IntoIter<(String, DetailValue)>;
    type Item = (String, DetailValue);

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

fn collect_details<'de, A: MapAccess<'de>>(mut access: A) -> Result<Details, A::Error> {
    let mut details = Details::new();
    while let Some((key, value)) = access.next_entry::<String, Option<DetailValue>>()? {
        if let Some(value) = value {
            details.insert(key, value);
        }
    }
    Ok(details)
}

impl<'de> Deserialize<'de> for Details {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DetailsVisitor;

        impl<'de> Visitor<'de> for DetailsVisitor {
            type Value = Details;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of text keys to detail values")
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Details, A::Error> {
                collect_details(access)
            }
        }

        deserializer.deserialize_map(DetailsVisitor)
    }
}

impl<'de> Deserialize<'de> for DetailValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DetailValueVisitor;

        impl<'de> Visitor<'de> for DetailValueVisitor {
            type Value = DetailValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean, number, string, list or map")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<DetailValue, E> {
                Ok(DetailValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DetailValue, E> {
                Ok(DetailValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DetailValue, E> {
                Ok(DetailValue::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<DetailValue, E> {
                Ok(DetailValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DetailValue, E> {
                Ok(DetailValue::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<DetailValue, E> {
                Ok(DetailValue::Text(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<DetailValue, A::Error> {
                let mut values = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(value) = access.next_element::<Option<DetailValue>>()? {
                    values.extend(value);
                }
                Ok(DetailValue::List(values))
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<DetailValue, A::Error> {
                collect_details(access).map(DetailValue::Map)
            }
        }

        deserializer.deserialize_any(DetailValueVisitor)
    }
}

/// Build [`Details`] from `key => value` pairs.
#[macro_export]
macro_rules! details {
    () => {
        $crate::Details::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut details = $crate::Details::new();
        $(details.insert($key, $value);)+
        details
    }};
}
