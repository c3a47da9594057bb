//! Runtime-typed SQL parameters and binding utilities.
//!
//! Query methods take a `&[SqlParam]` slice so callers can pass heterogeneous
//! argument lists without spelling out driver types. The [`params!`] macro
//! builds the slice from anything with a `From` conversion.

use chrono::{DateTime, Utc};
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::types::Json;

/// A parameter value for parameterized queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// JSON value (bound as jsonb)
    Json(serde_json::Value),
    /// UUID value
    Uuid(uuid::Uuid),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
}

impl SqlParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Json(_) => "json",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for SqlParam {
    fn from(v: i16) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for SqlParam {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for SqlParam {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for SqlParam {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<serde_json::Value> for SqlParam {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<uuid::Uuid> for SqlParam {
    fn from(v: uuid::Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T> From<Option<T>> for SqlParam
where
    T: Into<SqlParam>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Build a `Vec<SqlParam>` from values convertible into [`SqlParam`].
///
/// ```
/// use pg_storage::params;
///
/// let args = params!["alice", 42i64, true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::SqlParam>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::SqlParam::from($value)),+]
    };
}

/// Bind a single parameter to a query.
fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &'q SqlParam,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        SqlParam::Null => query.bind(None::<String>),
        SqlParam::Bool(v) => query.bind(*v),
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::Float(v) => query.bind(*v),
        SqlParam::Text(v) => query.bind(v.as_str()),
        SqlParam::Bytes(v) => query.bind(v.as_slice()),
        SqlParam::Json(v) => query.bind(Json(v)),
        SqlParam::Uuid(v) => query.bind(*v),
        SqlParam::Timestamp(v) => query.bind(*v),
    }
}

/// Bind a parameter slice to a query.
pub(crate) fn bind_params<'q>(
    query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    params.iter().fold(query, bind_param)
}

/// Bind a parameter slice to a typed (row-scanning) query.
pub(crate) fn bind_params_as<'q, T>(
    query: QueryAs<'q, Postgres, T, PgArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, T, PgArguments> {
    params.iter().fold(query, |query, param| match param {
        SqlParam::Null => query.bind(None::<String>),
        SqlParam::Bool(v) => query.bind(*v),
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::Float(v) => query.bind(*v),
        SqlParam::Text(v) => query.bind(v.as_str()),
        SqlParam::Bytes(v) => query.bind(v.as_slice()),
        SqlParam::Json(v) => query.bind(Json(v)),
        SqlParam::Uuid(v) => query.bind(*v),
        SqlParam::Timestamp(v) => query.bind(*v),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(SqlParam::from(true), SqlParam::Bool(true));
        assert_eq!(SqlParam::from(7i32), SqlParam::Int(7));
        assert_eq!(SqlParam::from(7i64), SqlParam::Int(7));
        assert_eq!(SqlParam::from(1.5f64), SqlParam::Float(1.5));
        assert_eq!(
            SqlParam::from("hello"),
            SqlParam::Text("hello".to_string())
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(SqlParam::from(None::<i64>), SqlParam::Null);
        assert_eq!(SqlParam::from(Some(3i64)), SqlParam::Int(3));
        assert_eq!(
            SqlParam::from(Some("x".to_string())),
            SqlParam::Text("x".to_string())
        );
    }

    #[test]
    fn test_is_null() {
        assert!(SqlParam::Null.is_null());
        assert!(!SqlParam::Int(0).is_null());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(SqlParam::Null.type_name(), "null");
        assert_eq!(SqlParam::Bool(true).type_name(), "bool");
        assert_eq!(SqlParam::Bytes(vec![1]).type_name(), "bytes");
        assert_eq!(
            SqlParam::Json(serde_json::json!({"k": 1})).type_name(),
            "json"
        );
    }

    #[test]
    fn test_params_macro() {
        let args = params!["alice", 42i64, true, None::<i64>];
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], SqlParam::Text("alice".to_string()));
        assert_eq!(args[3], SqlParam::Null);
    }

    #[test]
    fn test_params_macro_empty() {
        let args = params![];
        assert!(args.is_empty());
    }
}
