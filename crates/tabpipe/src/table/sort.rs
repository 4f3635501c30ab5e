//! Stable row sorting by one or more columns, and by row index label.
//!
//! Missing cells sort after all values whether the direction is ascending
//! or descending. Row index labels travel with their rows.

// dependencies
use super::Table;
use super::column::Column;
use crate::error::Result;

impl Table {
    /// Return the rows ordered by one column.
    pub fn sort_values(&self, col_name: &str, ascending: bool) -> Result<Table> {
        self.sort_by(&[(col_name, ascending)])
    }
    /// Return the rows ordered by several (column, ascending) keys, the first
    /// key being the most significant. Ties on every key keep their input order.
    pub fn sort_by(&self, keys: &[(&str, bool)]) -> Result<Table> {
        let cols = keys
            .iter()
            .map(|(name, ascending)| Ok((self.get_column("Table::sort_by", name)?, *ascending)))
            .collect::<Result<Vec<(&Column, bool)>>>()?;
        let mut rows: Vec<usize> = (0..self.n_row).collect();
        rows.sort_by(|&i, &j| {
            cols.iter()
                .map(|(col, ascending)| col.cmp_rows(i, j, *ascending))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(self.from_rows(&rows))
    }
    /// Return the rows ordered by row index label.
    pub fn sort_index(&self, ascending: bool) -> Table {
        let mut rows: Vec<usize> = (0..self.n_row).collect();
        if ascending {
            rows.sort_by_key(|&i| self.index[i]);
        } else {
            rows.sort_by(|&i, &j| self.index[j].cmp(&self.index[i]));
        }
        self.from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::types::Scalar;
    use crate::error::Error;

    fn salaries() -> Table {
        Table::from_columns(vec![
            ("major",  Column::from(vec!["Art", "Physics", "Music", "Math"])),
            ("salary", Column::Float(vec![Some(50.0), Some(100.0), None, Some(100.0)])),
        ]).expect("table")
    }

    #[test]
    fn sort_is_stable_with_missing_last() {
        let df = salaries();
        let up = df.sort_values("salary", true).expect("column exists");
        assert_eq!(up.index(), &[0, 1, 3, 2]);
        let down = df.sort_values("salary", false).expect("column exists");
        assert_eq!(down.index(), &[1, 3, 0, 2]);
        assert_eq!(down.cell("major", 2).expect("label 2"), Scalar::from("Music"));
        assert_eq!(df.index(), &[0, 1, 2, 3], "input is not mutated");
    }

    #[test]
    fn multi_key_sort_and_index_sort() {
        let df = salaries();
        let sorted = df.sort_by(&[("salary", false), ("major", true)]).expect("columns exist");
        assert_eq!(sorted.index(), &[3, 1, 0, 2]);
        assert_eq!(sorted.sort_index(true).index(), &[0, 1, 2, 3]);
        assert_eq!(sorted.sort_index(false).index(), &[3, 2, 1, 0]);
        assert!(matches!(df.sort_values("nope", true), Err(Error::ColumnNotFound { .. })));
    }
}
