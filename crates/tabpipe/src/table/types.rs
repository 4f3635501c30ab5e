//! The `table::types` module defines the restricted set of cell data types
//! supported in Table columns and the `Scalar` value used to pass single
//! cells in and out of tables.
//! - Integer: `Option<i64>`
//! - Float:   `Option<f64>`
//! - Boolean: `Option<bool>`
//! - Date:    `Option<chrono::NaiveDate>`
//! - String:  `Option<String>`
//!
//! All column types are wrapped in `Option<T>`, where `None` is the missing
//! marker, i.e., a value distinct from every valid value of the type.

// dependencies
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/* -----------------------------------------------------------------------------
DataType
----------------------------------------------------------------------------- */
/// The `DataType` enum names the type shared by all cells of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    Boolean,
    Date,
    String,
}
impl DataType {
    /// Whether arithmetic and numeric reductions apply to this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}
impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Integer => "i64",
            DataType::Float   => "f64",
            DataType::Boolean => "bool",
            DataType::Date    => "date",
            DataType::String  => "str",
        };
        f.write_str(name)
    }
}

/* -----------------------------------------------------------------------------
Scalar
----------------------------------------------------------------------------- */
/// A `Scalar` is one cell value, or the missing marker.
///
/// Scalars carry a total order so they can key groups, joins and sorts:
/// booleans < numbers < dates < strings < missing, with integers and floats
/// compared numerically and floats ordered by `f64::total_cmp`. An integer and
/// a float of equal numeric value are ordered integer first, so that `Eq`
/// and `Hash` remain strict per variant.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    String(String),
}
impl Scalar {
    /// Whether the value is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Scalar::Missing)
    }
    /// The data type of the value, or None for the missing marker.
    pub fn dtype(&self) -> Option<DataType> {
        match self {
            Scalar::Missing    => None,
            Scalar::Integer(_) => Some(DataType::Integer),
            Scalar::Float(_)   => Some(DataType::Float),
            Scalar::Boolean(_) => Some(DataType::Boolean),
            Scalar::Date(_)    => Some(DataType::Date),
            Scalar::String(_)  => Some(DataType::String),
        }
    }
    /// The value as f64, for Integer and Float scalars only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(v) => Some(*v as f64),
            Scalar::Float(v)   => Some(*v),
            _ => None,
        }
    }
    /// The value as i64, for Integer scalars only.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(v) => Some(*v),
            _ => None,
        }
    }
    /// The value as &str, for String scalars only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(v) => Some(v),
            _ => None,
        }
    }
    /// The value as a date, for Date scalars only.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Scalar::Date(v) => Some(*v),
            _ => None,
        }
    }
    /// Compare two values the way a row predicate does: numbers compare across
    /// Integer and Float, values of unrelated types are incomparable, and the
    /// missing marker is incomparable to everything, including itself.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Missing, _) | (_, Scalar::Missing) => None,
            (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
            (Scalar::Boolean(a), Scalar::Boolean(b)) => Some(a.cmp(b)),
            (Scalar::Date(a),    Scalar::Date(b))    => Some(a.cmp(b)),
            (Scalar::String(a),  Scalar::String(b))  => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
    // sort rank of each variant when values of different types meet
    fn rank(&self) -> u8 {
        match self {
            Scalar::Boolean(_) => 0,
            Scalar::Integer(_) | Scalar::Float(_) => 1,
            Scalar::Date(_)    => 2,
            Scalar::String(_)  => 3,
            Scalar::Missing    => 4,
        }
    }
}
// -0.0 and 0.0 are one key for sorting, grouping and hashing
fn zero_signless(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}
impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => a.cmp(b),
            (Scalar::Float(a),   Scalar::Float(b))   => zero_signless(*a).total_cmp(&zero_signless(*b)),
            (Scalar::Integer(a), Scalar::Float(b))   => (*a as f64).total_cmp(&zero_signless(*b)).then(Ordering::Less),
            (Scalar::Float(a),   Scalar::Integer(b)) => zero_signless(*a).total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a.cmp(b),
            (Scalar::Date(a),    Scalar::Date(b))    => a.cmp(b),
            (Scalar::String(a),  Scalar::String(b))  => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}
impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Scalar {}
impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Missing    => {}
            Scalar::Integer(v) => v.hash(state),
            Scalar::Float(v)   => zero_signless(*v).to_bits().hash(state),
            Scalar::Boolean(v) => v.hash(state),
            Scalar::Date(v)    => v.hash(state),
            Scalar::String(v)  => v.hash(state),
        }
    }
}
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Missing    => f.write_str("NA"),
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Float(v)   => f.write_str(&format_float(*v)),
            Scalar::Boolean(v) => write!(f, "{v}"),
            Scalar::Date(v)    => write!(f, "{}", v.format(DATE_OUT_FORMAT)),
            Scalar::String(v)  => f.write_str(v),
        }
    }
}

/* -----------------------------------------------------------------------------
Scalar conversions from Rust primitives
----------------------------------------------------------------------------- */
macro_rules! impl_scalar_from {
    ($($prim:ty => $variant:ident $(as $cast:ty)?),+ $(,)?) => {
        $(
            impl From<$prim> for Scalar {
                fn from(value: $prim) -> Self { Scalar::$variant(value $(as $cast)?) }
            }
        )+
    };
}
impl_scalar_from!(
    i64       => Integer,
    i32       => Integer as i64,
    u32       => Integer as i64,
    f64       => Float,
    bool      => Boolean,
    NaiveDate => Date,
    String    => String,
);
impl From<&str> for Scalar {
    fn from(value: &str) -> Self { Scalar::String(value.to_string()) }
}
impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Missing, Into::into)
    }
}

/* -----------------------------------------------------------------------------
cell text formatting and parsing helpers
----------------------------------------------------------------------------- */
/// Output format for dates in display and export.
pub const DATE_OUT_FORMAT: &str = "%Y-%m-%d";

/// Format a float so that integral values keep a decimal point, which keeps
/// exported float columns from re-inferring as integers.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Parse an integer cell.
pub fn parse_integer(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

/// Parse a float cell. Infinities are accepted as `inf` or `infinity`, in
/// any case and with an optional sign; other text without a digit (e.g.,
/// "nan") is not numeric.
pub fn parse_float(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        let word = s.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if word != "inf" && word != "infinity" {
            return None;
        }
    }
    s.parse::<f64>().ok()
}

/// Parse a boolean cell; only the words true and false are accepted, in any case.
pub fn parse_boolean(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a date cell against a list of chrono formats. Date-time text with a
/// space or `T` separator is accepted and truncated to its date.
pub fn parse_date(s: &str, formats: &[String]) -> Option<NaiveDate> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
