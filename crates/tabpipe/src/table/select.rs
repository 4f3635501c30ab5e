//! Row filtering by predicates over named columns, and column, row and
//! cell selection.
//!
//! Filtered tables keep the original row index labels and column order.
//! A missing cell never satisfies a comparison, so filtering twice with the
//! same predicate gives the same rows as filtering once.

// dependencies
use std::cmp::Ordering;
use super::Table;
use super::series::Series;
use super::types::Scalar;
use crate::error::{Error, Result};

/* -----------------------------------------------------------------------------
Predicate definition
----------------------------------------------------------------------------- */
/// A row predicate evaluated against named columns of a Table.
#[derive(Debug, Clone)]
pub enum Predicate {
    Eq(String, Scalar),
    Ne(String, Scalar),
    Lt(String, Scalar),
    Le(String, Scalar),
    Gt(String, Scalar),
    Ge(String, Scalar),
    /// True where the cell equals the column's maximum non-missing value.
    IsMax(String),
    /// True where the cell equals the column's minimum non-missing value.
    IsMin(String),
    /// True where the cell equals any of the listed values.
    In(String, Vec<Scalar>),
    IsMissing(String),
    NotMissing(String),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}
impl Predicate {
    /* -----------------------------------------------------------------------------
    Predicate constructors
    ----------------------------------------------------------------------------- */
    pub fn equals(col_name: &str, value: impl Into<Scalar>) -> Self {
        Predicate::Eq(col_name.to_string(), value.into())
    }
    pub fn not_equals(col_name: &str, value: impl Into<Scalar>) -> Self {
        Predicate::Ne(col_name.to_string(), value.into())
    }
    pub fn lt(col_name: &str, value: impl Into<Scalar>) -> Self {
        Predicate::Lt(col_name.to_string(), value.into())
    }
    pub fn le(col_name: &str, value: impl Into<Scalar>) -> Self {
        Predicate::Le(col_name.to_string(), value.into())
    }
    pub fn gt(col_name: &str, value: impl Into<Scalar>) -> Self {
        Predicate::Gt(col_name.to_string(), value.into())
    }
    pub fn ge(col_name: &str, value: impl Into<Scalar>) -> Self {
        Predicate::Ge(col_name.to_string(), value.into())
    }
    pub fn is_max(col_name: &str) -> Self {
        Predicate::IsMax(col_name.to_string())
    }
    pub fn is_min(col_name: &str) -> Self {
        Predicate::IsMin(col_name.to_string())
    }
    pub fn is_in<T: Into<Scalar>>(col_name: &str, values: impl IntoIterator<Item = T>) -> Self {
        Predicate::In(col_name.to_string(), values.into_iter().map(Into::into).collect())
    }
    pub fn is_missing(col_name: &str) -> Self {
        Predicate::IsMissing(col_name.to_string())
    }
    pub fn not_missing(col_name: &str) -> Self {
        Predicate::NotMissing(col_name.to_string())
    }
    /// Both predicates hold.
    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }
    /// Either predicate holds.
    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }
    /// The predicate does not hold.
    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }
    /* -----------------------------------------------------------------------------
    Predicate evaluation
    ----------------------------------------------------------------------------- */
    /// Evaluate the predicate on every row, returning one bool per row.
    pub fn evaluate(&self, df: &Table) -> Result<Vec<bool>> {
        let compare = |col_name: &str, value: &Scalar, accept: fn(Ordering) -> bool| -> Result<Vec<bool>> {
            let col = df.get_column("Table::filter", col_name)?;
            Ok(col.scalars().map(|x| x.compare(value).is_some_and(accept)).collect())
        };
        match self {
            Predicate::Eq(c, v) => compare(c, v, |o| o == Ordering::Equal),
            Predicate::Ne(c, v) => compare(c, v, |o| o != Ordering::Equal),
            Predicate::Lt(c, v) => compare(c, v, |o| o == Ordering::Less),
            Predicate::Le(c, v) => compare(c, v, |o| o != Ordering::Greater),
            Predicate::Gt(c, v) => compare(c, v, |o| o == Ordering::Greater),
            Predicate::Ge(c, v) => compare(c, v, |o| o != Ordering::Less),
            Predicate::IsMax(c) | Predicate::IsMin(c) => {
                let col = df.get_column("Table::filter", c)?;
                let want_max = matches!(self, Predicate::IsMax(_));
                let extreme = col.scalars().filter(|x| !x.is_missing()).reduce(|a, b| {
                    match (a.compare(&b), want_max) {
                        (Some(Ordering::Less), true) | (Some(Ordering::Greater), false) => b,
                        _ => a,
                    }
                });
                Ok(match extreme {
                    Some(extreme) => col.scalars().map(|x| x.compare(&extreme) == Some(Ordering::Equal)).collect(),
                    None => vec![false; df.n_row()],
                })
            }
            Predicate::In(c, values) => {
                let col = df.get_column("Table::filter", c)?;
                Ok(col.scalars().map(|x| {
                    values.iter().any(|v| x.compare(v) == Some(Ordering::Equal))
                }).collect())
            }
            Predicate::IsMissing(c) => Ok(df.get_column("Table::filter", c)?.missing_mask()),
            Predicate::NotMissing(c) => {
                Ok(df.get_column("Table::filter", c)?.missing_mask().into_iter().map(|m| !m).collect())
            }
            Predicate::And(a, b) => Ok(a.evaluate(df)?.into_iter().zip(b.evaluate(df)?).map(|(a, b)| a && b).collect()),
            Predicate::Or(a, b)  => Ok(a.evaluate(df)?.into_iter().zip(b.evaluate(df)?).map(|(a, b)| a || b).collect()),
            Predicate::Not(a)    => Ok(a.evaluate(df)?.into_iter().map(|m| !m).collect()),
        }
    }
}

/* -----------------------------------------------------------------------------
Table selection methods
----------------------------------------------------------------------------- */
impl Table {
    /* -----------------------------------------------------------------------------
    row filtering
    ----------------------------------------------------------------------------- */
    /// Return the rows for which the predicate holds.
    pub fn filter(&self, predicate: &Predicate) -> Result<Table> {
        let mask = predicate.evaluate(self)?;
        let rows: Vec<usize> = mask.iter().enumerate().filter_map(|(i, m)| m.then_some(i)).collect();
        Ok(self.from_rows(&rows))
    }
    /// Return the rows where a boolean Series is true; missing mask cells
    /// count as false. The mask must carry the Table's row index.
    pub fn filter_mask(&self, mask: &Series) -> Result<Table> {
        let rows = mask.true_positions("Table::filter_mask", self.n_row)?;
        if mask.index() != self.index() {
            return Err(Error::IndexMismatch { caller: "Table::filter_mask" });
        }
        Ok(self.from_rows(&rows))
    }
    /* -----------------------------------------------------------------------------
    column selection
    ----------------------------------------------------------------------------- */
    /// Return one column as a Series carrying the Table's row index.
    pub fn column(&self, col_name: &str) -> Result<Series> {
        let col = self.get_column("Table::column", col_name)?;
        Series::with_index(col_name, col.clone(), self.index.clone())
    }
    /// Return a Table with only the named columns, in the requested order.
    pub fn select(&self, col_names: &[&str]) -> Result<Table> {
        let mut df = Table::new();
        for name in col_names {
            let col = self.get_column("Table::select", name)?;
            df.push_column("Table::select", name, col.clone())?;
        }
        df.n_row = self.n_row;
        df.index = self.index.clone();
        df.print_max_rows = self.print_max_rows;
        df.print_max_col_width = self.print_max_col_width;
        Ok(df)
    }
    /// Return a Table without the named columns.
    pub fn drop_columns(&self, col_names: &[&str]) -> Result<Table> {
        let mut df = self.clone();
        for name in col_names {
            df.columns
                .remove(*name)
                .ok_or_else(|| Error::ColumnNotFound { caller: "Table::drop_columns", column: name.to_string() })?;
            df.col_names.retain(|n| n != name);
        }
        Ok(df)
    }
    /// Return a Table with columns renamed by (old, new) pairs.
    pub fn rename(&self, pairs: &[(&str, &str)]) -> Result<Table> {
        let mut df = self.clone();
        df.rename_in_place(pairs)?;
        Ok(df)
    }
    /// Rename columns in place by (old, new) pairs. All renames are checked
    /// before any is applied.
    pub fn rename_in_place(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut names = self.col_names.clone();
        for (old, new) in pairs {
            let pos = names
                .iter()
                .position(|n| n == old)
                .ok_or_else(|| Error::ColumnNotFound { caller: "Table::rename", column: old.to_string() })?;
            if old != new && names.iter().any(|n| n == new) {
                return Err(Error::DuplicateColumn { caller: "Table::rename", column: new.to_string() });
            }
            names[pos] = new.to_string();
        }
        let mut columns = std::mem::take(&mut self.columns);
        for (old_name, new_name) in self.col_names.iter().zip(&names) {
            if let Some(col) = columns.remove(old_name) {
                self.columns.insert(new_name.clone(), col);
            }
        }
        self.col_names = names;
        Ok(())
    }
    /* -----------------------------------------------------------------------------
    row and cell selection
    ----------------------------------------------------------------------------- */
    /// Return the cell at (column name, row index label).
    pub fn cell(&self, col_name: &str, label: usize) -> Result<Scalar> {
        let col = self.get_column("Table::cell", col_name)?;
        let i = self.position_of(label).ok_or(Error::RowNotFound { caller: "Table::cell", label })?;
        Ok(col.get(i))
    }
    /// Return the row at a row index label as (column name, value) pairs.
    pub fn row(&self, label: usize) -> Result<Vec<(String, Scalar)>> {
        let i = self.position_of(label).ok_or(Error::RowNotFound { caller: "Table::row", label })?;
        Ok(self.iter_columns().map(|(name, col)| (name.clone(), col.get(i))).collect())
    }
    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        self.slice(0, n)
    }
    /// The last `n` rows.
    pub fn tail(&self, n: usize) -> Table {
        let n = n.min(self.n_row);
        self.slice(self.n_row - n, n)
    }
    /// Up to `len` rows starting at row position `start`.
    pub fn slice(&self, start: usize, len: usize) -> Table {
        let start = start.min(self.n_row);
        let end = start.saturating_add(len).min(self.n_row);
        let rows: Vec<usize> = (start..end).collect();
        self.from_rows(&rows)
    }
    /* -----------------------------------------------------------------------------
    shape
    ----------------------------------------------------------------------------- */
    /// (number of rows, number of columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_row, self.n_col())
    }
    /// Column names in column order.
    pub fn columns(&self) -> &[String] {
        &self.col_names
    }
}

/* -----------------------------------------------------------------------------
Series comparison helpers, returning boolean mask Series
----------------------------------------------------------------------------- */
impl Series {
    fn compare_mask(&self, value: &Scalar, accept: fn(Ordering) -> bool) -> Series {
        self.map_mask(self.column().scalars().map(|x| x.compare(value).is_some_and(accept)).collect())
    }
    pub fn eq_mask(&self, value: impl Into<Scalar>) -> Series {
        self.compare_mask(&value.into(), |o| o == Ordering::Equal)
    }
    pub fn gt_mask(&self, value: impl Into<Scalar>) -> Series {
        self.compare_mask(&value.into(), |o| o == Ordering::Greater)
    }
    pub fn lt_mask(&self, value: impl Into<Scalar>) -> Series {
        self.compare_mask(&value.into(), |o| o == Ordering::Less)
    }
    pub fn ge_mask(&self, value: impl Into<Scalar>) -> Series {
        self.compare_mask(&value.into(), |o| o != Ordering::Less)
    }
    pub fn le_mask(&self, value: impl Into<Scalar>) -> Series {
        self.compare_mask(&value.into(), |o| o != Ordering::Greater)
    }
}

/// Combine boolean mask Series elementwise with AND; missing cells count as false.
pub fn mask_and(a: &Series, b: &Series) -> Result<Series> {
    combine_masks(a, b, |x, y| x && y)
}
/// Combine boolean mask Series elementwise with OR; missing cells count as false.
pub fn mask_or(a: &Series, b: &Series) -> Result<Series> {
    combine_masks(a, b, |x, y| x || y)
}
fn combine_masks(a: &Series, b: &Series, f: fn(bool, bool) -> bool) -> Result<Series> {
    let n = a.len();
    let a_rows = a.true_positions("mask_combine", n)?;
    let b_rows = b.true_positions("mask_combine", n)?;
    Ok(a.map_mask((0..n).map(|i| f(a_rows.binary_search(&i).is_ok(), b_rows.binary_search(&i).is_ok())).collect()))
}
