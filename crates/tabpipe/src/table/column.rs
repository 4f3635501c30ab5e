//! `table::column::Column` defines the column type enumeration
//! and methods for matching types and dispatching actions on column data.
//!
//! Column methods generally all entail `match` statements to dispatch
//! column operations to the correct typed action. These create little
//! overhead since they are only called once per column per operation.

// dependencies
use std::cmp::Ordering;
use chrono::NaiveDate;
use paste::paste;
use rayon::prelude::*;
use super::types::{
    DataType, Scalar, DATE_OUT_FORMAT,
    format_float, parse_boolean, parse_date, parse_float, parse_integer,
};
use super::io::ReadOptions;
use crate::error::{Error, Result};

/* -----------------------------------------------------------------------------
Column data type enumeration, i.e., all row values for a column as Vec<Option<T>>
----------------------------------------------------------------------------- */
/// The `Column` enum holds the cells of one column, `None` marking missing cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Date(Vec<Option<NaiveDate>>),
    String(Vec<Option<String>>),
}

// apply the same expression to the typed vector of any column variant
macro_rules! with_data {
    ($col:expr, $v:ident => $body:expr) => {
        match $col {
            Column::Integer($v) => $body,
            Column::Float($v)   => $body,
            Column::Boolean($v) => $body,
            Column::Date($v)    => $body,
            Column::String($v)  => $body,
        }
    };
}
// map any column variant to a new column of the same variant
macro_rules! map_data {
    ($col:expr, $v:ident => $body:expr) => {
        match $col {
            Column::Integer($v) => Column::Integer($body),
            Column::Float($v)   => Column::Float($body),
            Column::Boolean($v) => Column::Boolean($body),
            Column::Date($v)    => Column::Date($body),
            Column::String($v)  => Column::String($body),
        }
    };
}
pub(crate) use map_data;

/* -----------------------------------------------------------------------------
typed accessors and constructors, one set per variant
----------------------------------------------------------------------------- */
macro_rules! impl_column_access {
    ($($variant:ident, $prim:ty),+ $(,)?) => {
        paste! {
            impl Column {
                $(
                    /// Return the typed cells if the column holds this type.
                    pub fn [<as_ $variant:snake>](&self) -> Option<&[Option<$prim>]> {
                        match self {
                            Column::$variant(v) => Some(v),
                            _ => None,
                        }
                    }
                )+
            }
        }
        $(
            impl From<Vec<Option<$prim>>> for Column {
                fn from(v: Vec<Option<$prim>>) -> Self { Column::$variant(v) }
            }
            impl From<Vec<$prim>> for Column {
                fn from(v: Vec<$prim>) -> Self { Column::$variant(v.into_iter().map(Some).collect()) }
            }
        )+
    };
}
impl_column_access!(
    Integer, i64,
    Float,   f64,
    Boolean, bool,
    Date,    NaiveDate,
    String,  String,
);
impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Column::String(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}
impl From<Vec<Option<&str>>> for Column {
    fn from(v: Vec<Option<&str>>) -> Self {
        Column::String(v.into_iter().map(|s| s.map(str::to_string)).collect())
    }
}

/* -----------------------------------------------------------------------------
implement column
----------------------------------------------------------------------------- */
impl Column {
    /* -----------------------------------------------------------------------------
    column metadata
    ----------------------------------------------------------------------------- */
    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        with_data!(self, v => v.len())
    }
    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// The data type shared by all cells.
    pub fn dtype(&self) -> DataType {
        match self {
            Column::Integer(_) => DataType::Integer,
            Column::Float(_)   => DataType::Float,
            Column::Boolean(_) => DataType::Boolean,
            Column::Date(_)    => DataType::Date,
            Column::String(_)  => DataType::String,
        }
    }
    /// A column of `n_row` missing cells of the given type.
    pub fn missing(dtype: DataType, n_row: usize) -> Self {
        match dtype {
            DataType::Integer => Column::Integer(vec![None; n_row]),
            DataType::Float   => Column::Float(vec![None; n_row]),
            DataType::Boolean => Column::Boolean(vec![None; n_row]),
            DataType::Date    => Column::Date(vec![None; n_row]),
            DataType::String  => Column::String(vec![None; n_row]),
        }
    }
    /* -----------------------------------------------------------------------------
    cell getters
    ----------------------------------------------------------------------------- */
    /// Return cell `row_i` as a Scalar; out-of-range positions read as missing.
    pub fn get(&self, row_i: usize) -> Scalar {
        match self {
            Column::Integer(v) => v.get(row_i).copied().flatten().into(),
            Column::Float(v)   => v.get(row_i).copied().flatten().into(),
            Column::Boolean(v) => v.get(row_i).copied().flatten().into(),
            Column::Date(v)    => v.get(row_i).copied().flatten().into(),
            Column::String(v)  => v.get(row_i).cloned().flatten().into(),
        }
    }
    /// Whether cell `row_i` holds the missing marker.
    pub fn is_missing(&self, row_i: usize) -> bool {
        with_data!(self, v => v.get(row_i).is_none_or(|x| x.is_none()))
    }
    /// One bool per cell, true where the cell is missing.
    pub fn missing_mask(&self) -> Vec<bool> {
        with_data!(self, v => v.iter().map(Option::is_none).collect())
    }
    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        with_data!(self, v => v.iter().filter(|x| x.is_none()).count())
    }
    /// Iterate the cells as Scalars.
    pub fn scalars(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.len()).map(|i| self.get(i))
    }
    /// Return the string representation of a specific cell, with `na` for missing cells.
    pub fn cell_string(&self, row_i: usize, na: &str) -> String {
        macro_rules! __cell_string {
            ($v:expr, $x:ident => $fmt:expr) => {
                match $v.get(row_i) {
                    Some(Some($x)) => $fmt,
                    _ => na.to_string(),
                }
            };
        }
        match self {
            Column::Integer(v) => __cell_string!(v, x => x.to_string()),
            Column::Float(v)   => __cell_string!(v, x => format_float(*x)),
            Column::Boolean(v) => __cell_string!(v, x => x.to_string()),
            Column::Date(v)    => __cell_string!(v, x => x.format(DATE_OUT_FORMAT).to_string()),
            Column::String(v)  => __cell_string!(v, x => x.clone()),
        }
    }
    /* -----------------------------------------------------------------------------
    row gathering, used by every row-changing operation
    ----------------------------------------------------------------------------- */
    /// Copy the cells at the listed row positions into a new column, in order.
    pub fn take(&self, rows: &[usize]) -> Column {
        map_data!(self, v => rows.par_iter().map(|&i| v.get(i).cloned().flatten()).collect())
    }
    /// Like `take`, but a None position yields a missing cell (unmatched join rows).
    pub fn take_opt(&self, rows: &[Option<usize>]) -> Column {
        map_data!(self, v => rows
            .par_iter()
            .map(|opt_i| opt_i.and_then(|i| v.get(i).cloned().flatten()))
            .collect()
        )
    }
    /// Order two cells of this column; missing cells sort after all values in
    /// both directions.
    pub fn cmp_rows(&self, i: usize, j: usize, ascending: bool) -> Ordering {
        fn __cmp<T>(a: Option<&T>, b: Option<&T>, ascending: bool, f: impl Fn(&T, &T) -> Ordering) -> Ordering {
            match (a, b) {
                (None, None)       => Ordering::Equal,
                (None, Some(_))    => Ordering::Greater,
                (Some(_), None)    => Ordering::Less,
                (Some(a), Some(b)) => if ascending { f(a, b) } else { f(b, a) },
            }
        }
        match self {
            Column::Integer(v) => __cmp(v[i].as_ref(), v[j].as_ref(), ascending, Ord::cmp),
            Column::Float(v)   => __cmp(v[i].as_ref(), v[j].as_ref(), ascending, f64::total_cmp),
            Column::Boolean(v) => __cmp(v[i].as_ref(), v[j].as_ref(), ascending, Ord::cmp),
            Column::Date(v)    => __cmp(v[i].as_ref(), v[j].as_ref(), ascending, Ord::cmp),
            Column::String(v)  => __cmp(v[i].as_ref(), v[j].as_ref(), ascending, Ord::cmp),
        }
    }
    /* -----------------------------------------------------------------------------
    column construction from Scalars, e.g., for aggregation output
    ----------------------------------------------------------------------------- */
    /// Build a column of type `dtype` from Scalars. Integers are accepted into
    /// Float columns; any other type disagreement fails.
    pub fn from_scalars(dtype: DataType, values: Vec<Scalar>, col_name: &str) -> Result<Column> {
        let mismatch = |found: &Scalar| Error::TypeMismatch {
            caller:   "from_scalars",
            column:   col_name.to_string(),
            expected: dtype.to_string(),
            found:    found.dtype().map_or("NA".to_string(), |t| t.to_string()),
        };
        macro_rules! __collect {
            ($variant:ident, $x:ident => $conv:expr) => {
                values.into_iter().map(|s| match s {
                    Scalar::Missing => Ok(None),
                    $x => match $conv { Some(v) => Ok(Some(v)), None => Err(mismatch(&$x)) },
                }).collect::<Result<Vec<_>>>().map(Column::$variant)
            };
        }
        match dtype {
            DataType::Integer => __collect!(Integer, s => s.as_i64()),
            DataType::Float   => __collect!(Float,   s => s.as_f64()),
            DataType::Boolean => __collect!(Boolean, s => match &s { Scalar::Boolean(b) => Some(*b), _ => None }),
            DataType::Date    => __collect!(Date,    s => s.as_date()),
            DataType::String  => __collect!(String,  s => match &s { Scalar::String(v) => Some(v.clone()), _ => None }),
        }
    }
    /// Build a column from Scalars, taking the type from the first non-missing
    /// value; Integer and Float mixtures become Float. All-missing input
    /// yields a Float column.
    pub fn infer_from_scalars(values: Vec<Scalar>, col_name: &str) -> Result<Column> {
        let mut dtype: Option<DataType> = None;
        for value in &values {
            dtype = match (dtype, value.dtype()) {
                (None, t) => t,
                (Some(DataType::Integer), Some(DataType::Float)) => Some(DataType::Float),
                (t, _) => t,
            };
        }
        Column::from_scalars(dtype.unwrap_or(DataType::Float), values, col_name)
    }
    /* -----------------------------------------------------------------------------
    column deserialization from delimited text
    ----------------------------------------------------------------------------- */
    /// Infer the column type from text cells: integer, then float, then date,
    /// then boolean, else string. Missing markers do not vote; a column with
    /// no values at all is a float column.
    pub fn infer_dtype(cells: &[String], opts: &ReadOptions) -> DataType {
        let mut values = cells.iter().map(String::as_str).filter(|s| !opts.is_na(s)).peekable();
        if values.peek().is_none() {
            return DataType::Float;
        }
        let values: Vec<&str> = values.collect();
        if values.iter().all(|s| parse_integer(s).is_some()) {
            DataType::Integer
        } else if values.iter().all(|s| parse_float(s).is_some()) {
            DataType::Float
        } else if values.iter().all(|s| parse_date(s, &opts.date_formats).is_some()) {
            DataType::Date
        } else if values.iter().all(|s| parse_boolean(s).is_some()) {
            DataType::Boolean
        } else {
            DataType::String
        }
    }
    /// Parse text cells into a column of an inferred type.
    pub fn parse(cells: &[String], opts: &ReadOptions) -> Column {
        let dtype = Column::infer_dtype(cells, opts);
        Column::parse_as(cells, dtype, opts)
    }
    /// Parse text cells into a column of a given type; cells that are missing
    /// markers or do not parse as the type become missing.
    pub fn parse_as(cells: &[String], dtype: DataType, opts: &ReadOptions) -> Column {
        macro_rules! __parse {
            ($variant:ident, $s:ident => $conv:expr) => {
                Column::$variant(cells.iter().map(|$s| {
                    if opts.is_na($s) { None } else { $conv }
                }).collect())
            };
        }
        match dtype {
            DataType::Integer => __parse!(Integer, s => parse_integer(s)),
            DataType::Float   => __parse!(Float,   s => parse_float(s)),
            DataType::Boolean => __parse!(Boolean, s => parse_boolean(s)),
            DataType::Date    => __parse!(Date,    s => parse_date(s, &opts.date_formats)),
            DataType::String  => __parse!(String,  s => Some(s.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn inference_order() {
        let opts = ReadOptions::default();
        assert_eq!(Column::infer_dtype(&cells(&["1", "2", ""]), &opts), DataType::Integer);
        assert_eq!(Column::infer_dtype(&cells(&["1", "2.5"]), &opts), DataType::Float);
        assert_eq!(Column::infer_dtype(&cells(&["2010-06-01", "NA"]), &opts), DataType::Date);
        assert_eq!(Column::infer_dtype(&cells(&["true", "FALSE"]), &opts), DataType::Boolean);
        assert_eq!(Column::infer_dtype(&cells(&["f", "t"]), &opts), DataType::String);
        assert_eq!(Column::infer_dtype(&cells(&["12", "Sunny"]), &opts), DataType::String);
        assert_eq!(Column::infer_dtype(&cells(&["", "NaN"]), &opts), DataType::Float);
    }

    #[test]
    fn parse_marks_missing() {
        let opts = ReadOptions::default();
        let col = Column::parse(&cells(&["46000.0", "", "57700.5"]), &opts);
        assert_eq!(col, Column::Float(vec![Some(46000.0), None, Some(57700.5)]));
        assert_eq!(col.missing_count(), 1);
        assert!(col.is_missing(1));
    }

    #[test]
    fn take_gathers_rows_in_order() {
        let col = Column::from(vec!["a", "b", "c"]);
        assert_eq!(col.take(&[2, 0]), Column::from(vec!["c", "a"]));
        assert_eq!(
            col.take_opt(&[Some(1), None]),
            Column::String(vec![Some("b".to_string()), None])
        );
    }

    #[test]
    fn missing_sorts_last_both_ways() {
        let col = Column::Integer(vec![Some(2), None, Some(1)]);
        assert_eq!(col.cmp_rows(1, 0, true), Ordering::Greater);
        assert_eq!(col.cmp_rows(1, 0, false), Ordering::Greater);
        assert_eq!(col.cmp_rows(0, 2, false), Ordering::Less);
    }

    #[test]
    fn from_scalars_promotes_integers_into_floats() {
        let col = Column::infer_from_scalars(
            vec![Scalar::from(1), Scalar::Missing, Scalar::from(2.5)], "x"
        ).expect("numeric scalars");
        assert_eq!(col, Column::Float(vec![Some(1.0), None, Some(2.5)]));
        let err = Column::from_scalars(DataType::Integer, vec![Scalar::from("a")], "x");
        assert!(matches!(err, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn typed_accessors() {
        let col = Column::from(vec![1_i64, 2]);
        assert_eq!(col.as_integer(), Some(&[Some(1), Some(2)][..]));
        assert!(col.as_float().is_none());
    }
}
