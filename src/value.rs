//! Typed PQL values and coercion from native values.
//!
//! Every bound parameter crosses into the remote interface as a tagged
//! value: a type discriminator plus the schema namespace, alongside the
//! payload itself. On the wire this looks like:
//!
//! ```json
//! {
//!   "attributes": { "xsi_type": { "type": "NumberValue", "xmlns": "https://…/v202108" } },
//!   "value": 5
//! }
//! ```

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{PqlError, PqlResult};

/// Namespace prefix for the publisher API; the API version is appended.
pub const NAMESPACE_BASE: &str = "https://www.google.com/apis/ads/publisher/";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v202108";

/// Namespace attached to values when none is configured.
pub const DEFAULT_NAMESPACE: &str = "https://www.google.com/apis/ads/publisher/v202108";

/// Time zone stamped on every date-time value. No conversion is performed.
pub const TIME_ZONE_ID: &str = "GMT";

/// Largest integer an f64 holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Type discriminator of a [`TypedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    #[serde(rename = "TextValue")]
    Text,
    #[serde(rename = "BooleanValue")]
    Boolean,
    #[serde(rename = "NumberValue")]
    Number,
    #[serde(rename = "DateValue")]
    Date,
    #[serde(rename = "DateTimeValue")]
    DateTime,
    #[serde(rename = "SetValue")]
    Set,
}

impl TypeTag {
    /// Wire name of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Text => "TextValue",
            TypeTag::Boolean => "BooleanValue",
            TypeTag::Number => "NumberValue",
            TypeTag::Date => "DateValue",
            TypeTag::DateTime => "DateTimeValue",
            TypeTag::Set => "SetValue",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar date without a time component.
///
/// No range validation is done here; out-of-range fields pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateValue {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl DateValue {
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }
}

/// A date plus wall-clock time, with an opaque time zone id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeValue {
    pub date: DateValue,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub time_zone_id: String,
}

/// Payload carried by a [`TypedValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Boolean(bool),
    Number(f64),
    Date(DateValue),
    DateTime(DateTimeValue),
    Set(Vec<TypedValue>),
}

impl Payload {
    /// Tag matching this payload's shape.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Payload::Text(_) => TypeTag::Text,
            Payload::Boolean(_) => TypeTag::Boolean,
            Payload::Number(_) => TypeTag::Number,
            Payload::Date(_) => TypeTag::Date,
            Payload::DateTime(_) => TypeTag::DateTime,
            Payload::Set(_) => TypeTag::Set,
        }
    }

    /// Read a wire payload according to its tag.
    fn from_wire(tag: TypeTag, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            TypeTag::Text => Payload::Text(serde_json::from_value(value)?),
            TypeTag::Boolean => Payload::Boolean(serde_json::from_value(value)?),
            TypeTag::Number => Payload::Number(serde_json::from_value(value)?),
            TypeTag::Date => Payload::Date(serde_json::from_value(value)?),
            TypeTag::DateTime => Payload::DateTime(serde_json::from_value(value)?),
            TypeTag::Set => Payload::Set(serde_json::from_value(value)?),
        })
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Text(s) => serializer.serialize_str(s),
            Payload::Boolean(b) => serializer.serialize_bool(*b),
            // Integral numbers go out without a fraction, as `5` rather than `5.0`
            Payload::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Payload::Number(n) => serializer.serialize_f64(*n),
            Payload::Date(d) => d.serialize(serializer),
            Payload::DateTime(dt) => dt.serialize(serializer),
            Payload::Set(items) => items.serialize(serializer),
        }
    }
}

/// A coerced value ready for the remote interface.
///
/// The type tag is not stored; it always follows the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub namespace: String,
    pub payload: Payload,
}

impl TypedValue {
    pub fn type_tag(&self) -> TypeTag {
        self.payload.type_tag()
    }

    /// Turn the payload back into a native value.
    ///
    /// Returns `None` for a date-time whose fields do not form a real
    /// calendar instant, which only happens for values read off the wire.
    pub fn to_native(&self) -> Option<NativeValue> {
        Some(match &self.payload {
            Payload::Text(s) => NativeValue::Text(s.clone()),
            Payload::Boolean(b) => NativeValue::Boolean(*b),
            Payload::Number(n) => NativeValue::Number(*n),
            Payload::Date(d) => NativeValue::Date {
                year: d.year,
                month: d.month,
                day: d.day,
            },
            Payload::DateTime(dt) => {
                let month = u32::try_from(dt.date.month).ok()? + 1;
                let day = u32::try_from(dt.date.day).ok()?;
                let date = NaiveDate::from_ymd_opt(dt.date.year, month, day)?;
                NativeValue::DateTime(date.and_hms_opt(dt.hour, dt.minute, dt.second)?)
            }
            Payload::Set(items) => NativeValue::Set(
                items
                    .iter()
                    .map(TypedValue::to_native)
                    .collect::<Option<Vec<_>>>()?,
            ),
        })
    }
}

#[derive(Serialize, Deserialize)]
struct XsiType {
    #[serde(rename = "type")]
    type_tag: TypeTag,
    xmlns: String,
}

#[derive(Serialize, Deserialize)]
struct Attributes {
    xsi_type: XsiType,
}

#[derive(Deserialize)]
struct WireValue {
    attributes: Attributes,
    value: serde_json::Value,
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = Attributes {
            xsi_type: XsiType {
                type_tag: self.type_tag(),
                xmlns: self.namespace.clone(),
            },
        };
        let mut state = serializer.serialize_struct("TypedValue", 2)?;
        state.serialize_field("attributes", &attributes)?;
        state.serialize_field("value", &self.payload)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireValue::deserialize(deserializer)?;
        let XsiType { type_tag, xmlns } = wire.attributes.xsi_type;
        let payload = Payload::from_wire(type_tag, wire.value).map_err(de::Error::custom)?;
        if let Payload::Set(elements) = &payload {
            check_homogeneous(elements).map_err(de::Error::custom)?;
        }
        Ok(TypedValue {
            namespace: xmlns,
            payload,
        })
    }
}

/// A native value offered for coercion.
///
/// This is the closed set of shapes a caller can hand to [`Coercer::coerce`].
/// `Object` and `Null` exist so that loosely-typed input (JSON) can be
/// represented; both are rejected by coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Text(String),
    Boolean(bool),
    Number(f64),
    Set(Vec<NativeValue>),
    /// A structural date-only record.
    Date { year: i32, month: i32, day: i32 },
    /// Local wall-clock fields of a calendar instant.
    DateTime(NaiveDateTime),
    Object(serde_json::Map<String, serde_json::Value>),
    Null,
}

impl NativeValue {
    /// Runtime type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Text(_) => "string",
            NativeValue::Boolean(_) => "boolean",
            NativeValue::Number(_) => "number",
            NativeValue::Null => "null",
            NativeValue::Set(_)
            | NativeValue::Date { .. }
            | NativeValue::DateTime(_)
            | NativeValue::Object(_) => "object",
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Text(s) => write!(f, "{}", s),
            NativeValue::Boolean(b) => write!(f, "{}", b),
            NativeValue::Number(n) => write!(f, "{}", n),
            NativeValue::Set(items) => {
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
            NativeValue::Date { year, month, day } => {
                write!(f, "{{ year: {}, month: {}, day: {} }}", year, month, day)
            }
            NativeValue::DateTime(dt) => write!(f, "{}", dt),
            NativeValue::Object(map) => write!(f, "{}", serde_json::Value::Object(map.clone())),
            NativeValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::Text(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::Text(s)
    }
}

impl From<&String> for NativeValue {
    fn from(s: &String) -> Self {
        NativeValue::Text(s.clone())
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Boolean(b)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NativeValue {
                fn from(n: $t) -> Self {
                    NativeValue::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<NativeValue>> From<Vec<T>> for NativeValue {
    fn from(items: Vec<T>) -> Self {
        NativeValue::Set(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<NativeValue>, const N: usize> From<[T; N]> for NativeValue {
    fn from(items: [T; N]) -> Self {
        NativeValue::Set(items.into_iter().map(Into::into).collect())
    }
}

impl From<DateValue> for NativeValue {
    fn from(d: DateValue) -> Self {
        NativeValue::Date {
            year: d.year,
            month: d.month,
            day: d.day,
        }
    }
}

/// A date-only value keeps chrono's one-based month.
impl From<NaiveDate> for NativeValue {
    fn from(d: NaiveDate) -> Self {
        NativeValue::Date {
            year: d.year(),
            month: d.month() as i32,
            day: d.day() as i32,
        }
    }
}

impl From<NaiveDateTime> for NativeValue {
    fn from(dt: NaiveDateTime) -> Self {
        NativeValue::DateTime(dt)
    }
}

/// Uses the instant's local wall clock in its own offset.
impl<Tz: TimeZone> From<DateTime<Tz>> for NativeValue {
    fn from(dt: DateTime<Tz>) -> Self {
        NativeValue::DateTime(dt.naive_local())
    }
}

impl From<serde_json::Value> for NativeValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => NativeValue::Null,
            Value::Bool(b) => NativeValue::Boolean(b),
            // Every JSON number fits an f64, possibly with rounding
            Value::Number(n) => NativeValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => NativeValue::Text(s),
            Value::Array(items) => NativeValue::Set(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => match date_fields(&map) {
                Some((year, month, day)) => NativeValue::Date { year, month, day },
                None => NativeValue::Object(map),
            },
        }
    }
}

/// Pull integral `year`/`month`/`day` out of a JSON object.
///
/// `2002` and `2002.0` both qualify; fractional and non-numeric fields do not.
fn date_fields(map: &serde_json::Map<String, serde_json::Value>) -> Option<(i32, i32, i32)> {
    let field = |name: &str| {
        map.get(name)
            .and_then(serde_json::Value::as_f64)
            .filter(|n| n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64)
            .map(|n| n as i32)
    };
    Some((field("year")?, field("month")?, field("day")?))
}

/// Coerces native values into [`TypedValue`]s stamped with one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coercer {
    namespace: String,
}

impl Default for Coercer {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Coercer {
    /// Create a coercer that stamps values with `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Create a coercer for a publisher API version such as `v202108`.
    pub fn for_api_version(api_version: &str) -> Self {
        Self::new(format!("{}{}", NAMESPACE_BASE, api_version))
    }

    /// The namespace attached to every coerced value.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Coerce a native value into its typed representation.
    ///
    /// # Example
    ///
    /// ```
    /// use pql::value::{Coercer, TypeTag};
    ///
    /// let value = Coercer::default().coerce(5).unwrap();
    /// assert_eq!(value.type_tag(), TypeTag::Number);
    /// ```
    pub fn coerce(&self, value: impl Into<NativeValue>) -> PqlResult<TypedValue> {
        self.coerce_native(value.into())
    }

    fn coerce_native(&self, value: NativeValue) -> PqlResult<TypedValue> {
        match value {
            NativeValue::Text(s) => Ok(self.wrap(Payload::Text(s))),
            NativeValue::Boolean(b) => Ok(self.wrap(Payload::Boolean(b))),
            NativeValue::Number(n) if n.is_finite() => Ok(self.wrap(Payload::Number(n))),
            NativeValue::Number(n) => Err(PqlError::unsupported("number", n)),
            NativeValue::Set(items) => {
                let elements = items
                    .into_iter()
                    .map(|item| self.coerce_native(item))
                    .collect::<PqlResult<Vec<_>>>()?;
                check_homogeneous(&elements)?;
                Ok(self.wrap(Payload::Set(elements)))
            }
            // A zero field does not count as a date
            NativeValue::Date { year, month, day } if year != 0 && month != 0 && day != 0 => {
                Ok(self.wrap(Payload::Date(DateValue { year, month, day })))
            }
            NativeValue::DateTime(dt) => Ok(self.wrap(Payload::DateTime(DateTimeValue {
                date: DateValue {
                    year: dt.year(),
                    month: dt.month0() as i32,
                    day: dt.day() as i32,
                },
                hour: dt.hour(),
                minute: dt.minute(),
                second: dt.second(),
                time_zone_id: TIME_ZONE_ID.to_string(),
            }))),
            other => Err(PqlError::unsupported(other.type_name(), &other)),
        }
    }

    fn wrap(&self, payload: Payload) -> TypedValue {
        TypedValue {
            namespace: self.namespace.clone(),
            payload,
        }
    }
}

fn check_homogeneous(elements: &[TypedValue]) -> PqlResult<()> {
    let Some(first) = elements.first() else {
        return Ok(());
    };
    let expected = first.type_tag();
    match elements.iter().find(|e| e.type_tag() != expected) {
        Some(odd) => Err(PqlError::HeterogeneousSet {
            expected,
            found: odd.type_tag(),
        }),
        None => Ok(()),
    }
}

/// Coerce a value with the default namespace.
pub fn coerce(value: impl Into<NativeValue>) -> PqlResult<TypedValue> {
    Coercer::default().coerce(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_coerce_text() {
        let v = coerce("x").unwrap();
        assert_eq!(v.type_tag(), TypeTag::Text);
        assert_eq!(v.payload, Payload::Text("x".into()));
        assert_eq!(v.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_coerce_boolean() {
        let v = coerce(false).unwrap();
        assert_eq!(v.type_tag(), TypeTag::Boolean);
        assert_eq!(v.payload, Payload::Boolean(false));
    }

    #[test]
    fn test_coerce_number() {
        let v = coerce(5).unwrap();
        assert_eq!(v.type_tag(), TypeTag::Number);
        assert_eq!(v.payload, Payload::Number(5.0));
    }

    #[test]
    fn test_non_finite_number_rejected() {
        let err = coerce(f64::NAN).unwrap_err();
        assert!(matches!(err, PqlError::UnsupportedType { type_name: "number", .. }));
    }

    #[test]
    fn test_empty_set() {
        let v = coerce(Vec::<String>::new()).unwrap();
        assert_eq!(v.type_tag(), TypeTag::Set);
        assert_eq!(v.payload, Payload::Set(vec![]));
    }

    #[test]
    fn test_heterogeneous_set() {
        let mixed = NativeValue::Set(vec!["a".into(), 5.into()]);
        let err = coerce(mixed).unwrap_err();
        assert!(matches!(
            err,
            PqlError::HeterogeneousSet {
                expected: TypeTag::Text,
                found: TypeTag::Number
            }
        ));
    }

    #[test]
    fn test_nested_sets_only_compare_outer_tag() {
        let nested = NativeValue::Set(vec![
            NativeValue::from(vec![1, 2]),
            NativeValue::from(vec!["a"]),
        ]);
        let v = coerce(nested).unwrap();
        assert_eq!(v.type_tag(), TypeTag::Set);
    }

    #[test]
    fn test_date_value() {
        let v = coerce(DateValue::new(2002, 12, 19)).unwrap();
        assert_eq!(v.type_tag(), TypeTag::Date);
        assert_eq!(v.payload, Payload::Date(DateValue::new(2002, 12, 19)));
    }

    #[test]
    fn test_date_with_zero_field_is_unsupported() {
        for date in [
            DateValue::new(0, 12, 19),
            DateValue::new(2002, 0, 19),
            DateValue::new(2002, 12, 0),
        ] {
            let err = coerce(date).unwrap_err();
            assert!(matches!(err, PqlError::UnsupportedType { type_name: "object", .. }));
        }
    }

    #[test]
    fn test_out_of_range_date_passes_through() {
        let v = coerce(DateValue::new(2002, 14, 40)).unwrap();
        assert_eq!(v.payload, Payload::Date(DateValue::new(2002, 14, 40)));
    }

    #[test]
    fn test_naive_date_keeps_one_based_month() {
        let date = NaiveDate::from_ymd_opt(2002, 12, 19).unwrap();
        let v = coerce(date).unwrap();
        assert_eq!(v.payload, Payload::Date(DateValue::new(2002, 12, 19)));
    }

    #[test]
    fn test_date_time_uses_zero_based_month() {
        let dt = NaiveDate::from_ymd_opt(2001, 2, 28)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let v = coerce(dt).unwrap();
        assert_eq!(v.type_tag(), TypeTag::DateTime);
        assert_eq!(
            v.payload,
            Payload::DateTime(DateTimeValue {
                date: DateValue::new(2001, 1, 28),
                hour: 18,
                minute: 30,
                second: 0,
                time_zone_id: "GMT".into(),
            })
        );
    }

    #[test]
    fn test_date_time_ignores_offset() {
        let offset = chrono::FixedOffset::east_opt(5 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2001, 2, 28, 18, 30, 0).unwrap();
        let v = coerce(dt).unwrap();
        match v.payload {
            Payload::DateTime(dt) => {
                assert_eq!(dt.hour, 18);
                assert_eq!(dt.time_zone_id, "GMT");
            }
            other => panic!("expected date-time, got {:?}", other),
        }
    }

    #[test]
    fn test_null_and_object_unsupported() {
        let err = coerce(json!(null)).unwrap_err();
        assert!(err.to_string().contains("Type null"));

        let err = coerce(json!({"name": "x"})).unwrap_err();
        assert!(err.to_string().contains("Type object"));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            NativeValue::from(json!({"year": 2002, "month": 12, "day": 19})),
            NativeValue::Date {
                year: 2002,
                month: 12,
                day: 19
            }
        );
        assert_eq!(
            NativeValue::from(json!(["a", true])),
            NativeValue::Set(vec!["a".into(), true.into()])
        );
    }

    #[test]
    fn test_from_json_integral_float_date() {
        assert_eq!(
            NativeValue::from(json!({"year": 2002.0, "month": 12, "day": 19.0})),
            NativeValue::Date {
                year: 2002,
                month: 12,
                day: 19
            }
        );
        assert!(matches!(
            NativeValue::from(json!({"year": 2002.5, "month": 12, "day": 19})),
            NativeValue::Object(_)
        ));
        assert!(matches!(
            NativeValue::from(json!({"year": "2002", "month": "12", "day": "19"})),
            NativeValue::Object(_)
        ));
    }

    #[test]
    fn test_mixed_set_rejected_on_read() {
        let wire = json!({
            "attributes": { "xsi_type": { "type": "SetValue", "xmlns": DEFAULT_NAMESPACE } },
            "value": [
                serde_json::to_value(coerce("a").unwrap()).unwrap(),
                serde_json::to_value(coerce(5).unwrap()).unwrap()
            ]
        });
        let err = serde_json::from_value::<TypedValue>(wire).unwrap_err();
        assert!(err.to_string().contains("All set elements must have the same type"));
    }

    #[test]
    fn test_tag_follows_payload() {
        let v = TypedValue {
            namespace: DEFAULT_NAMESPACE.to_string(),
            payload: Payload::Number(5.0),
        };
        assert_eq!(v.type_tag(), TypeTag::Number);
        assert_eq!(
            serde_json::to_value(&v).unwrap()["attributes"]["xsi_type"]["type"],
            json!("NumberValue")
        );
    }

    #[test]
    fn test_custom_namespace() {
        let coercer = Coercer::for_api_version("v202405");
        let v = coercer.coerce("x").unwrap();
        assert_eq!(v.namespace, "https://www.google.com/apis/ads/publisher/v202405");
    }

    #[test]
    fn test_wire_format() {
        let v = coerce(5).unwrap();
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({
                "attributes": {
                    "xsi_type": { "type": "NumberValue", "xmlns": DEFAULT_NAMESPACE }
                },
                "value": 5
            })
        );
    }

    #[test]
    fn test_fractional_number_on_wire() {
        let v = coerce(2.5).unwrap();
        assert_eq!(serde_json::to_value(&v).unwrap()["value"], json!(2.5));
    }

    #[test]
    fn test_date_time_wire_field_names() {
        let dt = NaiveDate::from_ymd_opt(2001, 2, 28)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let v = coerce(dt).unwrap();
        assert_eq!(
            serde_json::to_value(&v).unwrap()["value"],
            json!({
                "date": { "year": 2001, "month": 1, "day": 28 },
                "hour": 18,
                "minute": 30,
                "second": 0,
                "timeZoneId": "GMT"
            })
        );
    }

    #[test]
    fn test_read_back_from_wire() {
        let v = coerce(vec!["foo", "bar"]).unwrap();
        let text = serde_json::to_string(&v).unwrap();
        let back: TypedValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_tag_stable_under_recoercion() {
        let dt = NaiveDate::from_ymd_opt(2001, 2, 28)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let inputs: Vec<NativeValue> = vec![
            "x".into(),
            true.into(),
            7.into(),
            DateValue::new(2002, 12, 19).into(),
            dt.into(),
            vec![1, 2, 3].into(),
        ];
        for input in inputs {
            let first = coerce(input).unwrap();
            let again = coerce(first.to_native().unwrap()).unwrap();
            assert_eq!(again, first);
        }
    }
}
