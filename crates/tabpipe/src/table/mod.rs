//! `tabpipe::table` offers a labeled, columnar in-memory table stored as a
//! HashMap of named columns plus an ordered list of column names, where the
//! data of each column are one typed vector, e.g., `Vec<Option<i64>>`.
//!
//! Every row-changing operation (filter, sort, clean, join, group) builds a
//! new Table by gathering rows from its input; inputs are never mutated
//! except by the few explicitly named in-place methods.
//!
//! # Quick Start
//! ```rust
//! use tabpipe::table::prelude::*;
//!
//! let df = Table::from_columns(vec![
//!     ("day",  Column::from(vec!["Monday", "Sunday"])),
//!     ("temp", Column::from(vec![12_i64, 24])),
//! ]).unwrap();
//! let hottest = df.filter(&Predicate::is_max("temp")).unwrap();
//! assert_eq!(hottest.cell("day", 1).unwrap(), Scalar::from("Sunday"));
//! eprintln!("{}", hottest);
//! ```

// modules
pub mod types;
pub mod column;
pub mod series;
pub mod io;
pub mod display;
pub mod clean;
pub mod select;
pub mod derive;
pub mod reduce;
pub mod group;
pub mod sort;
pub mod join;
pub mod resample;
pub mod prelude;

// dependencies
use std::collections::HashMap;
use rayon::prelude::*;
use column::Column;
use series::Series;
use crate::error::{Error, Result};

/* -----------------------------------------------------------------------------
Table structure definition; metadata, row index labels and named Columns.
----------------------------------------------------------------------------- */
/// A Table is a columnar data structure stored as a HashMap of named Columns
/// that all share one length and one set of row index labels.
#[derive(Debug, Clone)]
pub struct Table {
    n_row:     usize,
    columns:   HashMap<String, Column>,
    col_names: Vec<String>,
    index:     Vec<usize>,
    pub print_max_rows:      usize,
    pub print_max_col_width: usize,
}
impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
impl PartialEq for Table {
    // display limits are presentation settings, not table content
    fn eq(&self, other: &Self) -> bool {
        self.n_row == other.n_row &&
        self.col_names == other.col_names &&
        self.index == other.index &&
        self.columns == other.columns
    }
}
impl Table {
    /* -----------------------------------------------------------------------------
    Table constructors
    ----------------------------------------------------------------------------- */
    /// Create a new, empty Table, to which you subsequently add Columns.
    pub fn new() -> Self {
        Self {
            n_row:     0,
            columns:   HashMap::new(),
            col_names: Vec::new(),
            index:     Vec::new(),
            print_max_rows:      20,
            print_max_col_width: 25,
        }
    }
    /// Create a Table from (name, Column) pairs in output order, with a
    /// positional row index. Fails if column lengths differ or a name repeats.
    pub fn from_columns<S: AsRef<str>>(cols: Vec<(S, Column)>) -> Result<Self> {
        let mut df = Table::new();
        for (name, col) in cols {
            df.push_column("Table::from_columns", name.as_ref(), col)?;
        }
        Ok(df)
    }
    /// Create a Table from Series that share one row index, which the Table keeps.
    pub fn from_series(series: Vec<Series>) -> Result<Self> {
        let index = series.first().map(|s| s.index().to_vec());
        let mut df = Table::new();
        for s in series {
            let name = s.name().to_string();
            let aligned = index.as_deref().is_none_or(|index| s.index() == index);
            df.push_column("Table::from_series", &name, s.into_column())?;
            if !aligned {
                return Err(Error::IndexMismatch { caller: "Table::from_series" });
            }
        }
        if let Some(index) = index {
            df.index = index;
        }
        Ok(df)
    }
    /// Create a new Table from one or more rows of an existing Table, i.e.,
    /// take a potentially non-contiguous, reordered set of rows by copying
    /// cells. Row index labels travel with their rows.
    pub fn from_rows(&self, rows: &[usize]) -> Self {
        let columns: HashMap<String, Column> = self.col_names
            .par_iter()
            .filter_map(|name| self.columns.get(name).map(|col| (name.clone(), col.take(rows))))
            .collect();
        Self {
            n_row:     rows.len(),
            columns,
            col_names: self.col_names.clone(),
            index:     rows.iter().map(|&i| self.index[i]).collect(),
            print_max_rows:      self.print_max_rows,
            print_max_col_width: self.print_max_col_width,
        }
    }
    /// Return the same Table with a fresh positional row index, 0..n.
    pub fn reset_index(mut self) -> Self {
        self.index = (0..self.n_row).collect();
        self
    }
    /// Replace the row index labels.
    pub fn set_index(&mut self, index: Vec<usize>) -> Result<()> {
        if index.len() != self.n_row {
            return Err(Error::LengthMismatch {
                caller:   "Table::set_index",
                expected: self.n_row,
                found:    index.len(),
            });
        }
        self.index = index;
        Ok(())
    }
    /* -----------------------------------------------------------------------------
    column management
    ----------------------------------------------------------------------------- */
    // append a column at the end of the table; the first column sets n_row
    pub(crate) fn push_column(&mut self, caller: &'static str, name: &str, col: Column) -> Result<()> {
        self.check_incoming(caller, name, &col)?;
        if self.col_names.is_empty() {
            self.n_row = col.len();
            self.index = (0..self.n_row).collect();
        }
        self.columns.insert(name.to_string(), col);
        self.col_names.push(name.to_string());
        Ok(())
    }
    // place a column at position pos, shifting subsequent columns right
    pub(crate) fn insert_column(&mut self, caller: &'static str, pos: usize, name: &str, col: Column) -> Result<()> {
        if pos > self.col_names.len() {
            return Err(Error::PositionOutOfRange { pos, n_col: self.col_names.len() });
        }
        self.push_column(caller, name, col)?;
        let name = self.col_names.pop().unwrap_or_default();
        self.col_names.insert(pos, name);
        Ok(())
    }
    fn check_incoming(&self, caller: &'static str, name: &str, col: &Column) -> Result<()> {
        if self.columns.contains_key(name) {
            return Err(Error::DuplicateColumn { caller, column: name.to_string() });
        }
        if !self.col_names.is_empty() && col.len() != self.n_row {
            return Err(Error::LengthMismatch { caller, expected: self.n_row, found: col.len() });
        }
        Ok(())
    }
    /* -----------------------------------------------------------------------------
    metadata and column getters
    ----------------------------------------------------------------------------- */
    pub fn n_row(&self) -> usize {
        self.n_row
    }
    pub fn n_col(&self) -> usize {
        self.col_names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.n_row == 0
    }
    /// Row index labels in row order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }
    /// Whether a column of that name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
    /// Return a reference to a named Column.
    pub fn get_column(&self, caller: &'static str, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound { caller, column: name.to_string() })
    }
    pub(crate) fn get_column_mut(&mut self, caller: &'static str, name: &str) -> Result<&mut Column> {
        self.columns
            .get_mut(name)
            .ok_or_else(|| Error::ColumnNotFound { caller, column: name.to_string() })
    }
    /// Iterate (name, Column) pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&String, &Column)> + '_ {
        self.col_names
            .iter()
            .filter_map(|name| self.columns.get(name).map(|col| (name, col)))
    }
    /// Position of the first row carrying index label `label`.
    pub fn position_of(&self, label: usize) -> Option<usize> {
        self.index.iter().position(|&l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_checks_shape() {
        let err = Table::from_columns(vec![
            ("a", Column::from(vec![1_i64, 2])),
            ("b", Column::from(vec![1_i64])),
        ]);
        assert!(matches!(err, Err(Error::LengthMismatch { expected: 2, found: 1, .. })));
        let err = Table::from_columns(vec![
            ("a", Column::from(vec![1_i64])),
            ("a", Column::from(vec![2_i64])),
        ]);
        assert!(matches!(err, Err(Error::DuplicateColumn { .. })));
    }

    #[test]
    fn from_series_requires_one_index() {
        let a = Series::with_index("a", vec![1_i64, 2], vec![5, 6]).expect("aligned");
        let b = Series::with_index("b", vec![3_i64, 4], vec![5, 6]).expect("aligned");
        let df = Table::from_series(vec![a.clone(), b]).expect("shared index");
        assert_eq!(df.index(), &[5, 6]);
        let c = Series::with_index("c", vec![3_i64, 4], vec![6, 5]).expect("aligned");
        assert!(matches!(Table::from_series(vec![a, c]), Err(Error::IndexMismatch { .. })));
    }

    #[test]
    fn from_rows_carries_labels() {
        let df = Table::from_columns(vec![("a", Column::from(vec![1_i64, 2, 3]))]).expect("table");
        let sub = df.from_rows(&[2, 0]);
        assert_eq!(sub.index(), &[2, 0]);
        assert_eq!(sub.get_column("test", "a").expect("col"), &Column::from(vec![3_i64, 1]));
        assert_eq!(sub.clone().reset_index().index(), &[0, 1]);
    }

    #[test]
    fn equality_ignores_display_limits() {
        let df = Table::from_columns(vec![("a", Column::from(vec![1_i64]))]).expect("table");
        let mut other = df.clone();
        other.print_max_rows = 3;
        assert_eq!(df, other);
    }
}
