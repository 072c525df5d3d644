//! Argument and property values.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::object::EaObject;

/// A value held by an object property or passed as a call argument.
///
/// `Json` carries anything that needs no interpretation. `Object` and `List`
/// appear once a value has been matched against a property that expects a
/// nested object or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Json(serde_json::Value),
    Object(EaObject),
    List(Vec<Value>),
}

impl Value {
    /// JSON `null`, which means "unset" everywhere it is accepted.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Json(serde_json::Value::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Json(json) => json.as_str(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Json(json) => json.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Json(json) => json.as_bool(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&EaObject> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Json(json) => json.clone(),
            Value::Object(object) => object.to_json(),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    /// Form used for a query string: strings verbatim, everything else as JSON text.
    pub fn to_query_string(&self) -> String {
        match self {
            Value::Json(serde_json::Value::String(s)) => s.clone(),
            other => other.to_json().to_string(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Json(json) => json.serialize(serializer),
            Value::Object(object) => object.serialize(serializer),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

macro_rules! json_from {
    ($($ty:ty),+) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Json(serde_json::Value::from(value))
            }
        })+
    };
}

json_from!(bool, i32, i64, u32, u64, f64, String, &str);

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl From<EaObject> for Value {
    fn from(value: EaObject) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// The single positional value an object can be built from.
///
/// A number populates the type's id property; a string populates its name
/// property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    Id(i64),
    Name(String),
}

impl From<i64> for Primary {
    fn from(id: i64) -> Self {
        Primary::Id(id)
    }
}

impl From<i32> for Primary {
    fn from(id: i32) -> Self {
        Primary::Id(id.into())
    }
}

impl From<u32> for Primary {
    fn from(id: u32) -> Self {
        Primary::Id(id.into())
    }
}

impl From<&str> for Primary {
    fn from(name: &str) -> Self {
        Primary::Name(name.to_string())
    }
}

impl From<String> for Primary {
    fn from(name: String) -> Self {
        Primary::Name(name)
    }
}
