//! Missing-value detection and removal.
//!
//! `isna` and `notna` return same-shape boolean tables; `dropna` and its
//! variants return the retained rows with their original index labels.

// dependencies
use rayon::prelude::*;
use super::Table;
use super::column::{Column, map_data};
use super::types::{DataType, Scalar, parse_float};
use crate::error::{Error, Result};

impl Table {
    /* -----------------------------------------------------------------------------
    missing-value masks and tallies
    ----------------------------------------------------------------------------- */
    /// A same-shape Table of booleans, true where a cell is missing.
    pub fn isna(&self) -> Table {
        self.map_masks(|col| col.missing_mask())
    }
    /// A same-shape Table of booleans, true where a cell is present.
    pub fn notna(&self) -> Table {
        self.map_masks(|col| col.missing_mask().into_iter().map(|m| !m).collect())
    }
    fn map_masks(&self, f: impl Fn(&Column) -> Vec<bool> + Sync) -> Table {
        let mut df = self.clone();
        df.columns.par_iter_mut().for_each(|(_, col)| *col = Column::from(f(col)));
        df
    }
    /// Total number of missing cells in the Table.
    pub fn missing_count(&self) -> usize {
        self.iter_columns().map(|(_, col)| col.missing_count()).sum()
    }
    /// Whether any cell in the Table is missing.
    pub fn has_missing(&self) -> bool {
        self.missing_count() > 0
    }
    /// Number of missing cells per column, in column order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.iter_columns()
            .map(|(name, col)| (name.clone(), col.missing_count()))
            .collect()
    }
    /* -----------------------------------------------------------------------------
    row removal
    ----------------------------------------------------------------------------- */
    /// Return the rows that have no missing cell in any column.
    pub fn dropna(&self) -> Table {
        let cols: Vec<&Column> = self.iter_columns().map(|(_, col)| col).collect();
        self.from_rows(&complete_rows(self.n_row, &cols))
    }
    /// Return the rows that have no missing cell in the named columns.
    pub fn dropna_subset(&self, col_names: &[&str]) -> Result<Table> {
        let cols = col_names
            .iter()
            .map(|name| self.get_column("Table::dropna_subset", name))
            .collect::<Result<Vec<&Column>>>()?;
        Ok(self.from_rows(&complete_rows(self.n_row, &cols)))
    }
    /// Remove, in place, the rows that have a missing cell in any column.
    /// Returns the number of rows removed.
    pub fn dropna_in_place(&mut self) -> usize {
        let n_before = self.n_row;
        *self = self.dropna();
        n_before - self.n_row
    }
    /* -----------------------------------------------------------------------------
    cell repair
    ----------------------------------------------------------------------------- */
    /// Coerce a column to numbers. String cells that do not parse as numbers
    /// become missing; Integer and Float columns are returned unchanged.
    pub fn to_numeric(&self, col_name: &str) -> Result<Table> {
        let coerced = match self.get_column("Table::to_numeric", col_name)? {
            Column::Integer(_) | Column::Float(_) => return Ok(self.clone()),
            Column::String(v) => Column::Float(
                v.iter().map(|s| s.as_deref().and_then(|s| parse_float(s.trim()))).collect()
            ),
            other => {
                return Err(Error::TypeMismatch {
                    caller:   "Table::to_numeric",
                    column:   col_name.to_string(),
                    expected: DataType::String.to_string(),
                    found:    other.dtype().to_string(),
                });
            }
        };
        let mut df = self.clone();
        *df.get_column_mut("Table::to_numeric", col_name)? = coerced;
        Ok(df)
    }
    /// Replace missing cells in one column with a value of that column's type;
    /// an Integer value is accepted for a Float column.
    pub fn fillna(&self, col_name: &str, value: impl Into<Scalar>) -> Result<Table> {
        let value: Scalar = value.into();
        let mut df = self.clone();
        let col = df.get_column_mut("Table::fillna", col_name)?;
        let dtype = col.dtype();
        let fill = Column::from_scalars(dtype, vec![value], col_name)?;
        *col = fill_missing(col, &fill);
        Ok(df)
    }
}

// positions of rows without a missing cell in any of the columns
fn complete_rows(n_row: usize, cols: &[&Column]) -> Vec<usize> {
    let masks: Vec<Vec<bool>> = cols.par_iter().map(|col| col.missing_mask()).collect();
    (0..n_row)
        .filter(|&i| !masks.iter().any(|mask| mask[i]))
        .collect()
}

// replace missing cells of col with the single value held by fill
fn fill_missing(col: &Column, fill: &Column) -> Column {
    macro_rules! __fill {
        ($v:expr, $f:expr) => {
            $v.iter().map(|x| x.clone().or_else(|| $f.first().cloned().flatten())).collect()
        };
    }
    match (col, fill) {
        (Column::Integer(v), Column::Integer(f)) => Column::Integer(__fill!(v, f)),
        (Column::Float(v),   Column::Float(f))   => Column::Float(__fill!(v, f)),
        (Column::Boolean(v), Column::Boolean(f)) => Column::Boolean(__fill!(v, f)),
        (Column::Date(v),    Column::Date(f))    => Column::Date(__fill!(v, f)),
        (Column::String(v),  Column::String(f))  => Column::String(__fill!(v, f)),
        _ => map_data!(col, v => v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salaries() -> Table {
        Table::from_columns(vec![
            ("major",  Column::from(vec![Some("Physics"), Some("Art"), None])),
            ("salary", Column::Float(vec![Some(100.0), None, Some(50.0)])),
        ]).expect("table")
    }

    #[test]
    fn dropna_keeps_complete_rows_and_labels() {
        let df = salaries();
        let clean = df.dropna();
        assert_eq!(clean.n_row(), 1);
        assert_eq!(clean.index(), &[0]);
        assert_eq!(df.n_row(), 3, "input is not mutated");
        let subset = df.dropna_subset(&["salary"]).expect("column exists");
        assert_eq!(subset.index(), &[0, 2]);
    }

    #[test]
    fn dropna_in_place_reports_removed_rows() {
        let mut df = salaries();
        assert_eq!(df.dropna_in_place(), 2);
        assert!(!df.has_missing());
    }

    #[test]
    fn masks_and_counts() {
        let df = salaries();
        assert_eq!(df.missing_count(), 2);
        assert_eq!(df.missing_counts(), vec![("major".to_string(), 1), ("salary".to_string(), 1)]);
        let mask = df.isna();
        assert_eq!(mask.get_column("test", "salary").expect("col"), &Column::from(vec![false, true, false]));
        assert_eq!(mask.columns(), df.columns());
        let present = df.notna();
        assert_eq!(present.get_column("test", "major").expect("col"), &Column::from(vec![true, true, false]));
    }

    #[test]
    fn to_numeric_turns_junk_into_missing() {
        let df = Table::from_columns(vec![
            ("price", Column::from(vec!["12.5", "n/a", "7"])),
        ]).expect("table");
        let df = df.to_numeric("price").expect("string column");
        assert_eq!(df.get_column("test", "price").expect("col"), &Column::Float(vec![Some(12.5), None, Some(7.0)]));
        assert_eq!(df.dropna().n_row(), 2);
    }

    #[test]
    fn fillna_uses_column_type() {
        let df = salaries().fillna("salary", 0).expect("integer into float");
        assert_eq!(df.get_column("test", "salary").expect("col"), &Column::Float(vec![Some(100.0), Some(0.0), Some(50.0)]));
        assert!(matches!(salaries().fillna("salary", "x"), Err(Error::TypeMismatch { .. })));
    }
}
