//! The `table::join` module aligns two Tables on equal values of a shared
//! key column by an unsorted hash join over the right Table.
//!
//! Output rows follow the left Table's row order, and the right Table's row
//! order within one left row. Missing keys never match. The result carries
//! a fresh positional row index.

// dependencies
use std::collections::HashMap;
use super::Table;
use super::column::Column;
use super::types::Scalar;
use crate::error::{Error, Result};

/// Enumeration of supported join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Keep only left rows with at least one matching right row.
    Inner,
    /// Keep every left row; unmatched rows get missing right cells.
    Left,
}

/// Suffixes appended to non-key column names present in both Tables.
pub const LEFT_SUFFIX:  &str = "_x";
pub const RIGHT_SUFFIX: &str = "_y";

/// The Join struct carries the resolved metadata of one join.
struct Join<'a> {
    join_type:  JoinType,
    key_col:    &'a str,
    cols_left:  Vec<(String, String)>, // (input name, output name)
    cols_right: Vec<(String, String)>,
}
impl<'a> Join<'a> {
    // check key columns and resolve output column names
    fn new(left: &Table, right: &Table, key_col: &'a str, join_type: JoinType) -> Result<Self> {
        let key_l = left.get_column("Table::join", key_col)?;
        let key_r = right.get_column("Table::join", key_col)?;
        if key_l.dtype() != key_r.dtype() {
            return Err(Error::TypeMismatch {
                caller:   "Table::join",
                column:   key_col.to_string(),
                expected: key_l.dtype().to_string(),
                found:    key_r.dtype().to_string(),
            });
        }
        let shared = |name: &String, other: &Table| name != key_col && other.has_column(name);
        let cols_left = left.columns()
            .iter()
            .map(|name| {
                let out = if shared(name, right) { format!("{name}{LEFT_SUFFIX}") } else { name.clone() };
                (name.clone(), out)
            })
            .collect();
        let cols_right = right.columns()
            .iter()
            .filter(|name| name.as_str() != key_col)
            .map(|name| {
                let out = if shared(name, left) { format!("{name}{RIGHT_SUFFIX}") } else { name.clone() };
                (name.clone(), out)
            })
            .collect();
        Ok(Self { join_type, key_col, cols_left, cols_right })
    }
    // pair left rows with right rows, in left order then right order
    fn match_rows(&self, left: &Table, right: &Table) -> Result<(Vec<usize>, Vec<Option<usize>>)> {
        let key_r = right.get_column("Table::join", self.key_col)?;
        let mut lookup: HashMap<Scalar, Vec<usize>> = HashMap::new();
        for j in 0..right.n_row() {
            let key = key_r.get(j);
            if !key.is_missing() {
                lookup.entry(key).or_default().push(j);
            }
        }
        let key_l = left.get_column("Table::join", self.key_col)?;
        let mut rows_l: Vec<usize> = Vec::new();
        let mut rows_r: Vec<Option<usize>> = Vec::new();
        for i in 0..left.n_row() {
            let key = key_l.get(i);
            match lookup.get(&key) {
                Some(matches) => {
                    for &j in matches {
                        rows_l.push(i);
                        rows_r.push(Some(j));
                    }
                }
                None if self.join_type == JoinType::Left => {
                    rows_l.push(i);
                    rows_r.push(None);
                }
                None => {}
            }
        }
        Ok((rows_l, rows_r))
    }
}

impl Table {
    /// Inner join on a shared key column.
    pub fn merge(&self, right: &Table, key_col: &str) -> Result<Table> {
        self.join(right, key_col, JoinType::Inner)
    }
    /// Join on a shared key column: all left columns, then the right
    /// non-key columns, with `_x`/`_y` suffixes on names present in both.
    pub fn join(&self, right: &Table, key_col: &str, join_type: JoinType) -> Result<Table> {
        let join = Join::new(self, right, key_col, join_type)?;
        let (rows_l, rows_r) = join.match_rows(self, right)?;
        let mut cols: Vec<(String, Column)> = Vec::with_capacity(join.cols_left.len() + join.cols_right.len());
        for (name, out) in &join.cols_left {
            cols.push((out.clone(), self.get_column("Table::join", name)?.take(&rows_l)));
        }
        for (name, out) in &join.cols_right {
            cols.push((out.clone(), right.get_column("Table::join", name)?.take_opt(&rows_r)));
        }
        let mut df = Table::from_columns(cols)?;
        df.n_row = rows_l.len();
        df.index = (0..df.n_row).collect();
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left() -> Table {
        Table::from_columns(vec![
            ("id",   Column::from(vec![Some("A"), Some("B"), Some("C"), None])),
            ("name", Column::from(vec!["alpha", "beta", "gamma", "none"])),
        ]).expect("table")
    }
    fn right() -> Table {
        Table::from_columns(vec![
            ("id",   Column::from(vec![Some("B"), Some("B"), Some("D"), None])),
            ("name", Column::from(vec!["b1", "b2", "d", "none"])),
            ("size", Column::from(vec![1_i64, 2, 3, 4])),
        ]).expect("table")
    }

    #[test]
    fn inner_join_keeps_left_order_and_drops_unmatched() {
        let out = left().merge(&right(), "id").expect("join");
        assert_eq!(out.n_row(), 2);
        assert_eq!(out.columns(), &["id", "name_x", "name_y", "size"]);
        assert_eq!(out.column("id").expect("col").to_vec(), vec![Scalar::from("B"), Scalar::from("B")]);
        assert_eq!(out.column("name_y").expect("col").to_vec(), vec![Scalar::from("b1"), Scalar::from("b2")]);
        assert_eq!(out.index(), &[0, 1]);
    }

    #[test]
    fn left_join_fills_missing_right_cells() {
        let out = left().join(&right(), "id", JoinType::Left).expect("join");
        assert_eq!(out.n_row(), 5);
        assert_eq!(out.cell("size", 0).expect("cell"), Scalar::Missing);
        assert_eq!(out.cell("size", 2).expect("cell"), Scalar::from(2));
        assert_eq!(out.cell("name_x", 4).expect("cell"), Scalar::from("none"));
        assert_eq!(out.cell("size", 4).expect("cell"), Scalar::Missing, "missing keys never match");
    }

    #[test]
    fn key_types_must_agree() {
        let numeric = Table::from_columns(vec![("id", Column::from(vec![1_i64]))]).expect("table");
        assert!(matches!(left().merge(&numeric, "id"), Err(Error::TypeMismatch { .. })));
        assert!(matches!(left().merge(&numeric, "nope"), Err(Error::ColumnNotFound { .. })));
    }
}
