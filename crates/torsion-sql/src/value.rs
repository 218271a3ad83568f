//! Placeholder replacement values.
//!
//! Every `?` placeholder emitted into a statement has a matching [`Value`]
//! in the replacement list returned by
//! [`Query::prepared_statement_replacements`](crate::Query::prepared_statement_replacements).

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A database enum whose SQL representation is obtained through an accessor.
///
/// Criteria may carry domain enums directly; the where-clause chain unwraps
/// them to their underlying value before rendering, so the enum's SQL value
/// is bound as a parameter rather than the enum itself.
pub trait SqlEnum: fmt::Debug + Send + Sync {
    /// Returns the value stored in the database for this enum constant.
    fn sql_value(&self) -> Value;
}

/// A value bound to a prepared statement placeholder.
#[derive(Debug, Clone)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Calendar date value.
    Date(NaiveDate),
    /// Time-of-day value.
    Time(NaiveTime),
    /// Date-time value.
    Timestamp(NaiveDateTime),
    /// Sentinel for the database's CURRENT_DATE function.
    CurrentDate,
    /// Sentinel for the database's CURRENT_TIME function.
    CurrentTime,
    /// Sentinel for the database's CURRENT_TIMESTAMP function.
    CurrentTimestamp,
    /// A domain enum; rendered via its [`SqlEnum::sql_value`] accessor.
    Enum(Arc<dyn SqlEnum>),
}

impl Value {
    /// Returns true for the CURRENT_DATE/CURRENT_TIME/CURRENT_TIMESTAMP sentinels.
    #[must_use]
    pub const fn is_current_date_time(&self) -> bool {
        matches!(
            self,
            Self::CurrentDate | Self::CurrentTime | Self::CurrentTimestamp
        )
    }

    /// Returns the SQL keyword for a date/time sentinel, or `None` otherwise.
    #[must_use]
    pub const fn current_date_time_keyword(&self) -> Option<&'static str> {
        match self {
            Self::CurrentDate => Some("CURRENT_DATE"),
            Self::CurrentTime => Some("CURRENT_TIME"),
            Self::CurrentTimestamp => Some("CURRENT_TIMESTAMP"),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null)
            | (Self::CurrentDate, Self::CurrentDate)
            | (Self::CurrentTime, Self::CurrentTime)
            | (Self::CurrentTimestamp, Self::CurrentTimestamp) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Blob(a), Self::Blob(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            // Enums compare through their accessor, like the values they bind as.
            (Self::Enum(a), Self::Enum(b)) => a.sql_value() == b.sql_value(),
            (Self::Enum(a), b) => a.sql_value() == *b,
            (a, Self::Enum(b)) => *a == b.sql_value(),
            _ => false,
        }
    }
}

/// Trait for types that convert into a [`Value`].
pub trait ToValue {
    /// Converts the value into a [`Value`].
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToValue for f32 {
    fn to_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self) -> Value {
        Value::Blob(self)
    }
}

impl ToValue for NaiveDate {
    fn to_value(self) -> Value {
        Value::Date(self)
    }
}

impl ToValue for NaiveTime {
    fn to_value(self) -> Value {
        Value::Time(self)
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(self) -> Value {
        Value::Timestamp(self)
    }
}

impl ToValue for Arc<dyn SqlEnum> {
    fn to_value(self) -> Value {
        Value::Enum(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}
