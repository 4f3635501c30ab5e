//! Elementwise arithmetic between aligned Series, and placement of derived
//! Series into Tables as new columns.
//!
//! A missing cell in either operand gives a missing result cell; that is
//! propagation, not an error. Integer operands stay Integer except under
//! division, or when a result would overflow i64, which give Float.

// dependencies
use super::Table;
use super::column::Column;
use super::series::Series;
use super::types::{DataType, Scalar};
use crate::error::{Error, Result};

/// Binary elementwise operators supported between numeric Series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}
impl ArithOp {
    fn apply_f64(self, a: f64, b: f64) -> f64 {
        match self {
            ArithOp::Add      => a + b,
            ArithOp::Subtract => a - b,
            ArithOp::Multiply => a * b,
            ArithOp::Divide   => a / b,
        }
    }
    // None on overflow, and always None for division
    fn apply_i64(self, a: i64, b: i64) -> Option<i64> {
        match self {
            ArithOp::Add      => a.checked_add(b),
            ArithOp::Subtract => a.checked_sub(b),
            ArithOp::Multiply => a.checked_mul(b),
            ArithOp::Divide   => None,
        }
    }
}

/* -----------------------------------------------------------------------------
Series arithmetic
----------------------------------------------------------------------------- */
impl Series {
    /// Combine two aligned numeric Series elementwise. The result carries the
    /// left operand's name and row index.
    pub fn binary(&self, other: &Series, op: ArithOp) -> Result<Series> {
        let caller = "Series::binary";
        if self.len() != other.len() {
            return Err(Error::LengthMismatch { caller, expected: self.len(), found: other.len() });
        }
        if self.index() != other.index() {
            return Err(Error::IndexMismatch { caller });
        }
        for s in [self, other] {
            if !s.dtype().is_numeric() {
                return Err(Error::TypeMismatch {
                    caller,
                    column:   s.name().to_string(),
                    expected: "numeric".to_string(),
                    found:    s.dtype().to_string(),
                });
            }
        }
        let data = match (self.column(), other.column()) {
            (Column::Integer(a), Column::Integer(b)) if op != ArithOp::Divide => {
                integer_op(a, b, op).unwrap_or_else(|| float_op(self.column(), other.column(), op))
            }
            (a, b) => float_op(a, b, op),
        };
        Series::with_index(self.name(), data, self.index().to_vec())
    }
    pub fn add(&self, other: &Series) -> Result<Series> {
        self.binary(other, ArithOp::Add)
    }
    pub fn subtract(&self, other: &Series) -> Result<Series> {
        self.binary(other, ArithOp::Subtract)
    }
    pub fn multiply(&self, other: &Series) -> Result<Series> {
        self.binary(other, ArithOp::Multiply)
    }
    pub fn divide(&self, other: &Series) -> Result<Series> {
        self.binary(other, ArithOp::Divide)
    }
    /// Combine every cell with one scalar value; a missing scalar gives an
    /// all-missing result.
    pub fn binary_scalar(&self, value: impl Into<Scalar>, op: ArithOp) -> Result<Series> {
        let value: Scalar = value.into();
        let dtype = value.dtype().unwrap_or(DataType::Float);
        let data = Column::from_scalars(dtype, vec![value; self.len()], "scalar")?;
        let other = Series::with_index("scalar", data, self.index().to_vec())?;
        self.binary(&other, op)
    }
    pub fn add_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.binary_scalar(value, ArithOp::Add)
    }
    pub fn subtract_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.binary_scalar(value, ArithOp::Subtract)
    }
    pub fn multiply_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.binary_scalar(value, ArithOp::Multiply)
    }
    pub fn divide_scalar(&self, value: impl Into<Scalar>) -> Result<Series> {
        self.binary_scalar(value, ArithOp::Divide)
    }
}

// integer arithmetic; None if any cell overflows
fn integer_op(a: &[Option<i64>], b: &[Option<i64>], op: ArithOp) -> Option<Column> {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => op.apply_i64(*x, *y).map(Some),
            _ => Some(None),
        })
        .collect::<Option<Vec<Option<i64>>>>()
        .map(Column::Integer)
}

// float arithmetic over any numeric pair; NaN results are missing
fn float_op(a: &Column, b: &Column, op: ArithOp) -> Column {
    Column::Float(
        a.scalars()
            .zip(b.scalars())
            .map(|(x, y)| match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => Some(op.apply_f64(x, y)).filter(|v| !v.is_nan()),
                _ => None,
            })
            .collect()
    )
}

/* -----------------------------------------------------------------------------
placing derived Series into Tables
----------------------------------------------------------------------------- */
impl Table {
    // a Series may join a Table only if it has the same rows in the same order
    fn check_aligned(&self, caller: &'static str, series: &Series) -> Result<()> {
        if self.col_names.is_empty() {
            return Ok(());
        }
        if series.len() != self.n_row() {
            return Err(Error::LengthMismatch { caller, expected: self.n_row(), found: series.len() });
        }
        if series.index() != self.index() {
            return Err(Error::IndexMismatch { caller });
        }
        Ok(())
    }
    /// Return a Table with the Series inserted as a column at position `pos`,
    /// shifting the column previously at `pos`, and all after it, right.
    pub fn insert(&self, pos: usize, series: Series) -> Result<Table> {
        self.check_aligned("Table::insert", &series)?;
        let mut df = self.clone();
        let name = series.name().to_string();
        let index = series.index().to_vec();
        df.insert_column("Table::insert", pos, &name, series.into_column())?;
        if self.col_names.is_empty() {
            df.index = index;
        }
        Ok(df)
    }
    /// Return a Table with the Series appended as the last column.
    pub fn with_column(&self, series: Series) -> Result<Table> {
        self.insert(self.n_col(), series)
    }
    /// Return a Table whose existing column of the Series' name is replaced.
    pub fn replace_column(&self, series: Series) -> Result<Table> {
        self.check_aligned("Table::replace_column", &series)?;
        let mut df = self.clone();
        let name = series.name().to_string();
        *df.get_column_mut("Table::replace_column", &name)? = series.into_column();
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_propagates() {
        let a = Series::new("high", vec![Some(10_i64), None, Some(7)]);
        let b = Series::new("low", vec![Some(4_i64), Some(1), None]);
        let diff = a.subtract(&b).expect("aligned integers");
        assert_eq!(diff.column(), &Column::Integer(vec![Some(6), None, None]));
    }

    #[test]
    fn result_types() {
        let a = Series::new("a", vec![6_i64, 3]);
        let b = Series::new("b", vec![4_i64, 2]);
        assert_eq!(a.divide(&b).expect("divide").column(), &Column::Float(vec![Some(1.5), Some(1.5)]));
        let f = Series::new("f", vec![0.5_f64, 1.0]);
        assert_eq!(a.multiply(&f).expect("multiply").column(), &Column::Float(vec![Some(3.0), Some(3.0)]));
        let big = Series::new("big", vec![i64::MAX]);
        let sum = big.add_scalar(1).expect("promoted");
        assert_eq!(sum.dtype(), DataType::Float);
    }

    #[test]
    fn misaligned_and_non_numeric_operands_fail() {
        let a = Series::new("a", vec![1_i64, 2]);
        let short = Series::new("b", vec![1_i64]);
        assert!(matches!(a.add(&short), Err(Error::LengthMismatch { .. })));
        let shifted = Series::with_index("c", vec![1_i64, 2], vec![1, 2]).expect("aligned");
        assert!(matches!(a.add(&shifted), Err(Error::IndexMismatch { .. })));
        let text = Series::new("d", vec!["x", "y"]);
        assert!(matches!(a.add(&text), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn insert_shifts_columns_right() {
        let df = Table::from_columns(vec![
            ("major", Column::from(vec!["Art", "Physics"])),
            ("high",  Column::from(vec![90.0_f64, 120.0])),
            ("low",   Column::from(vec![40.0_f64, 70.0])),
        ]).expect("table");
        let spread = df.column("high").expect("col")
            .subtract(&df.column("low").expect("col")).expect("aligned")
            .renamed("Salary Diff");
        let out = df.insert(1, spread).expect("new name");
        assert_eq!(out.columns(), &["major", "Salary Diff", "high", "low"]);
        assert_eq!(out.cell("Salary Diff", 1).expect("cell"), Scalar::from(50.0));
        assert_eq!(df.n_col(), 3, "input is not mutated");
        let again = out.column("high").expect("col");
        assert!(matches!(out.insert(0, again.clone()), Err(Error::DuplicateColumn { .. })));
        assert!(matches!(df.insert(9, again.renamed("x")), Err(Error::PositionOutOfRange { pos: 9, n_col: 3 })));
    }

    #[test]
    fn with_and_replace_column() {
        let df = Table::from_columns(vec![("a", Column::from(vec![1_i64, 2]))]).expect("table");
        let doubled = df.column("a").expect("col").multiply_scalar(2).expect("numeric");
        let replaced = df.replace_column(doubled.clone()).expect("existing column");
        assert_eq!(replaced.cell("a", 1).expect("cell"), Scalar::from(4));
        let appended = df.with_column(doubled.renamed("b")).expect("new column");
        assert_eq!(appended.columns(), &["a", "b"]);
    }
}
