//! Group-by aggregation: partition rows by the values of one or more key
//! columns, then reduce target columns within each group.
//!
//! Output tables hold the key columns first, then one column per requested
//! aggregation, with one row per distinct key in ascending key order and a
//! fresh positional row index. Rows with a missing key join no group.

// dependencies
use std::collections::BTreeMap;
use rayon::prelude::*;
use super::Table;
use super::column::Column;
use super::reduce::{Reduction, reduce_rows, reduced_column};
use super::types::Scalar;
use crate::error::{Error, Result};

/// One requested aggregation: a target column, a Reduction, and an optional
/// output column name (default: the target column name).
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub column:    String,
    pub reduction: Reduction,
    pub alias:     Option<String>,
}
impl Aggregation {
    pub fn new(column: &str, reduction: Reduction) -> Self {
        Self {
            column: column.to_string(),
            reduction,
            alias:  None,
        }
    }
    /// Name the output column.
    pub fn alias(mut self, name: &str) -> Self {
        self.alias = Some(name.to_string());
        self
    }
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column)
    }
}

/// A Table's rows partitioned by key, ready for reduction.
#[derive(Debug)]
pub struct GroupedTable<'a> {
    table:  &'a Table,
    keys:   Vec<String>,
    groups: BTreeMap<Vec<Scalar>, Vec<usize>>,
}

impl Table {
    /// Partition rows by the values of the named key columns.
    pub fn group_by(&self, keys: &[&str]) -> Result<GroupedTable<'_>> {
        let key_cols = keys
            .iter()
            .map(|k| self.get_column("Table::group_by", k))
            .collect::<Result<Vec<&Column>>>()?;
        let mut groups: BTreeMap<Vec<Scalar>, Vec<usize>> = BTreeMap::new();
        for i in 0..self.n_row() {
            let key: Vec<Scalar> = key_cols.iter().map(|col| col.get(i)).collect();
            if key.iter().any(Scalar::is_missing) { continue; }
            groups.entry(key).or_default().push(i);
        }
        Ok(GroupedTable {
            table: self,
            keys:  keys.iter().map(|k| k.to_string()).collect(),
            groups,
        })
    }
}

impl GroupedTable<'_> {
    /* -----------------------------------------------------------------------------
    group metadata
    ----------------------------------------------------------------------------- */
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }
    /// Key values of each group, in ascending key order.
    pub fn group_keys(&self) -> Vec<&[Scalar]> {
        self.groups.keys().map(Vec::as_slice).collect()
    }
    /// Row positions of the group with the given key values.
    pub fn group_rows(&self, key: &[Scalar]) -> Option<&[usize]> {
        self.groups.get(key).map(Vec::as_slice)
    }
    // the key columns of the output table, one row per group
    fn key_columns(&self) -> Result<Vec<(String, Column)>> {
        self.keys
            .iter()
            .enumerate()
            .map(|(k, name)| {
                let dtype = self.table.get_column("GroupedTable", name)?.dtype();
                let values = self.groups.keys().map(|key| key[k].clone()).collect();
                Ok((name.clone(), Column::from_scalars(dtype, values, name)?))
            })
            .collect()
    }
    fn non_key_columns(&self) -> Vec<&String> {
        self.table.columns().iter().filter(|name| !self.keys.contains(name)).collect()
    }
    /* -----------------------------------------------------------------------------
    aggregation
    ----------------------------------------------------------------------------- */
    /// Apply each Aggregation to every group, reducing aggregations in parallel.
    pub fn agg(&self, aggs: &[Aggregation]) -> Result<Table> {
        let reduced = aggs
            .par_iter()
            .map(|agg| {
                let col = self.table.get_column("GroupedTable::agg", &agg.column)?;
                let values = self.groups
                    .values()
                    .map(|rows| reduce_rows(col, rows, agg.reduction, &agg.column))
                    .collect::<Result<Vec<Scalar>>>()?;
                let out = reduced_column(col.dtype(), agg.reduction, values, &agg.column)?;
                Ok((agg.output_name().to_string(), out))
            })
            .collect::<Result<Vec<(String, Column)>>>()?;
        let mut cols = self.key_columns()?;
        cols.extend(reduced);
        Table::from_columns(cols)
    }
    /// Apply one Reduction to every non-key column. Mean and sum skip
    /// non-numeric columns.
    pub fn reduce(&self, reduction: Reduction) -> Result<Table> {
        let aggs: Vec<Aggregation> = self.non_key_columns()
            .into_iter()
            .filter(|name| {
                !reduction.is_numeric() || self.table.columns.get(*name).is_some_and(|c| c.dtype().is_numeric())
            })
            .map(|name| Aggregation::new(name, reduction))
            .collect();
        self.agg(&aggs)
    }
    /// Number of non-missing values of every non-key column per group.
    pub fn count(&self) -> Result<Table> {
        self.reduce(Reduction::Count)
    }
    pub fn mean(&self) -> Result<Table> {
        self.reduce(Reduction::Mean)
    }
    pub fn sum(&self) -> Result<Table> {
        self.reduce(Reduction::Sum)
    }
    pub fn max(&self) -> Result<Table> {
        self.reduce(Reduction::Max)
    }
    pub fn min(&self) -> Result<Table> {
        self.reduce(Reduction::Min)
    }
    pub fn nunique(&self) -> Result<Table> {
        self.reduce(Reduction::NUnique)
    }
    pub fn first(&self) -> Result<Table> {
        self.reduce(Reduction::First)
    }
    pub fn last(&self) -> Result<Table> {
        self.reduce(Reduction::Last)
    }
    /// Number of rows per group, in a column named `size`.
    pub fn size(&self) -> Result<Table> {
        let sizes: Vec<i64> = self.groups.values().map(|rows| rows.len() as i64).collect();
        let mut cols = self.key_columns()?;
        if cols.iter().any(|(name, _)| name == "size") {
            return Err(Error::DuplicateColumn { caller: "GroupedTable::size", column: "size".to_string() });
        }
        cols.push(("size".to_string(), Column::from(sizes)));
        Table::from_columns(cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> Table {
        Table::from_columns(vec![
            ("year",     Column::Integer(vec![Some(1950), Some(1949), Some(1950), None, Some(1949)])),
            ("theme_id", Column::Integer(vec![Some(1), Some(2), Some(1), Some(3), Some(4)])),
            ("num_parts", Column::Integer(vec![Some(10), Some(20), None, Some(5), Some(40)])),
        ]).expect("table")
    }

    #[test]
    fn signed_zero_keys_share_a_group() {
        let df = Table::from_columns(vec![
            ("k", Column::Float(vec![Some(0.0), Some(-0.0)])),
            ("v", Column::from(vec![1_i64, 2])),
        ]).expect("table");
        let g = df.group_by(&["k"]).expect("key");
        assert_eq!(g.n_groups(), 1);
        assert_eq!(g.size().expect("size").column("size").expect("col").to_vec(), vec![Scalar::from(2)]);
        let kept = df.filter(&crate::table::select::Predicate::equals("k", 0.0)).expect("filter");
        assert_eq!(kept.n_row(), g.group_rows(&[Scalar::Float(0.0)]).map_or(0, <[usize]>::len));
        assert_eq!(df.column("k").expect("col").nunique(), 1);
    }

    #[test]
    fn groups_are_key_ordered_and_skip_missing_keys() {
        let df = sets();
        let g = df.group_by(&["year"]).expect("key exists");
        assert_eq!(g.n_groups(), 2);
        let total: usize = g.group_keys().iter().filter_map(|k| g.group_rows(k)).map(<[usize]>::len).sum();
        assert_eq!(total, 4, "rows with a missing key join no group");
        let sizes = g.size().expect("size");
        assert_eq!(sizes.column("year").expect("col").to_vec(), vec![Scalar::from(1949), Scalar::from(1950)]);
        assert_eq!(sizes.column("size").expect("col").to_vec(), vec![Scalar::from(2), Scalar::from(2)]);
    }

    #[test]
    fn count_is_non_missing_per_column() {
        let counts = sets().group_by(&["year"]).expect("key").count().expect("count");
        assert_eq!(counts.columns(), &["year", "theme_id", "num_parts"]);
        assert_eq!(counts.column("num_parts").expect("col").to_vec(), vec![Scalar::from(2), Scalar::from(1)]);
    }

    #[test]
    fn agg_names_outputs_and_keeps_types() {
        let out = sets().group_by(&["year"]).expect("key").agg(&[
            Aggregation::new("theme_id", Reduction::NUnique).alias("nr_themes"),
            Aggregation::new("num_parts", Reduction::Mean),
            Aggregation::new("num_parts", Reduction::Max).alias("max_parts"),
        ]).expect("agg");
        assert_eq!(out.columns(), &["year", "nr_themes", "num_parts", "max_parts"]);
        assert_eq!(out.cell("nr_themes", 1).expect("cell"), Scalar::from(1));
        assert_eq!(out.cell("num_parts", 0).expect("cell"), Scalar::from(30.0));
        assert_eq!(out.cell("max_parts", 1).expect("cell"), Scalar::from(10));
    }

    #[test]
    fn empty_group_reductions_fail() {
        let df = Table::from_columns(vec![
            ("k", Column::from(vec!["a", "b"])),
            ("v", Column::Float(vec![Some(1.0), None])),
        ]).expect("table");
        let g = df.group_by(&["k"]).expect("key");
        assert!(matches!(g.mean(), Err(Error::EmptyReduction { .. })));
        assert_eq!(g.first().expect("first").cell("v", 1).expect("cell"), Scalar::Missing);
        assert!(matches!(df.group_by(&["nope"]), Err(Error::ColumnNotFound { .. })));
    }
}
