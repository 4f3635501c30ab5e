//! Reductions of one column to one value, over all rows of a Series or over
//! the row subsets produced by grouping and resampling.
//!
//! Missing cells are skipped by every reduction. Max, min and mean over zero
//! non-missing values fail with `Error::EmptyReduction`; count, nunique and
//! sum are well defined on empty input.

// dependencies
use std::collections::{HashMap, HashSet};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use super::Table;
use super::column::Column;
use super::series::Series;
use super::types::{DataType, Scalar};
use crate::error::{Error, Result};

/* -----------------------------------------------------------------------------
Reduction definition
----------------------------------------------------------------------------- */
/// Reductions applicable to one column of a group or period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Number of non-missing values.
    Count,
    Mean,
    Max,
    Min,
    /// Number of distinct non-missing values.
    NUnique,
    Sum,
    /// First non-missing value in row order.
    First,
    /// Last non-missing value in row order.
    Last,
}
impl Reduction {
    /// Whether the reduction only applies to Integer and Float columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Reduction::Mean | Reduction::Sum)
    }
    /// The data type of the reduced value for a given input column type.
    pub fn output_dtype(&self, input: DataType) -> DataType {
        match self {
            Reduction::Count | Reduction::NUnique => DataType::Integer,
            Reduction::Mean => DataType::Float,
            _ => input,
        }
    }
}
impl Display for Reduction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Reduction::Count   => "count",
            Reduction::Mean    => "mean",
            Reduction::Max     => "max",
            Reduction::Min     => "min",
            Reduction::NUnique => "nunique",
            Reduction::Sum     => "sum",
            Reduction::First   => "first",
            Reduction::Last    => "last",
        };
        f.write_str(name)
    }
}

/* -----------------------------------------------------------------------------
reduction kernel, shared by Series, grouping, and resampling
----------------------------------------------------------------------------- */
/// Reduce the cells of `col` at row positions `rows`.
pub(crate) fn reduce_rows(col: &Column, rows: &[usize], reduction: Reduction, col_name: &str) -> Result<Scalar> {
    let values = || rows.iter().map(|&i| col.get(i)).filter(|x| !x.is_missing());
    let empty = |caller: &'static str| Error::EmptyReduction { caller, column: col_name.to_string() };
    if reduction.is_numeric() && !col.dtype().is_numeric() {
        return Err(Error::TypeMismatch {
            caller:   "reduce",
            column:   col_name.to_string(),
            expected: "numeric".to_string(),
            found:    col.dtype().to_string(),
        });
    }
    Ok(match reduction {
        Reduction::Count   => Scalar::Integer(values().count() as i64),
        Reduction::NUnique => Scalar::Integer(values().collect::<HashSet<Scalar>>().len() as i64),
        Reduction::First   => values().next().unwrap_or_default(),
        Reduction::Last    => values().last().unwrap_or_default(),
        Reduction::Max     => values().max().ok_or_else(|| empty("max"))?,
        Reduction::Min     => values().min().ok_or_else(|| empty("min"))?,
        Reduction::Mean    => {
            let (sum, n) = values().filter_map(|x| x.as_f64()).fold((0.0, 0_usize), |(s, n), x| (s + x, n + 1));
            if n == 0 { return Err(empty("mean")); }
            Scalar::Float(sum / n as f64)
        }
        Reduction::Sum => match col.dtype() {
            DataType::Integer => {
                let sum: i128 = values().filter_map(|x| x.as_i64()).map(i128::from).sum();
                i64::try_from(sum).map_or(Scalar::Float(sum as f64), Scalar::Integer)
            }
            _ => Scalar::Float(values().filter_map(|x| x.as_f64()).sum()),
        },
    })
}

/// Collect reduced values into an output column of the reduction's type;
/// an Integer sum that overflowed promotes the whole column to Float.
pub(crate) fn reduced_column(input: DataType, reduction: Reduction, values: Vec<Scalar>, col_name: &str) -> Result<Column> {
    let mut dtype = reduction.output_dtype(input);
    if dtype == DataType::Integer && values.iter().any(|v| matches!(v, Scalar::Float(_))) {
        dtype = DataType::Float;
    }
    Column::from_scalars(dtype, values, col_name)
}

// the numeric, non-missing values of a Series
fn numeric_values(s: &Series, caller: &'static str) -> Result<Vec<f64>> {
    match s.column() {
        Column::Integer(v) => Ok(v.iter().flatten().map(|x| *x as f64).collect()),
        Column::Float(v)   => Ok(v.iter().flatten().copied().collect()),
        other => Err(Error::TypeMismatch {
            caller,
            column:   s.name().to_string(),
            expected: "numeric".to_string(),
            found:    other.dtype().to_string(),
        }),
    }
}

/* -----------------------------------------------------------------------------
Series reductions
----------------------------------------------------------------------------- */
impl Series {
    fn all_rows(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }
    /// Apply one Reduction to all rows.
    pub fn reduce(&self, reduction: Reduction) -> Result<Scalar> {
        reduce_rows(self.column(), &self.all_rows(), reduction, self.name())
    }
    /// Number of non-missing values.
    pub fn count(&self) -> usize {
        self.len() - self.column().missing_count()
    }
    /// Number of distinct non-missing values.
    pub fn nunique(&self) -> usize {
        self.column().scalars().filter(|x| !x.is_missing()).collect::<HashSet<Scalar>>().len()
    }
    pub fn sum(&self) -> Result<Scalar> {
        self.reduce(Reduction::Sum)
    }
    pub fn mean(&self) -> Result<f64> {
        let mean = self.reduce(Reduction::Mean)?;
        Ok(mean.as_f64().unwrap_or(f64::NAN))
    }
    pub fn max(&self) -> Result<Scalar> {
        self.reduce(Reduction::Max)
    }
    pub fn min(&self) -> Result<Scalar> {
        self.reduce(Reduction::Min)
    }
    /// Row index label of the first occurrence of the maximum value.
    pub fn idxmax(&self) -> Result<usize> {
        self.idx_extreme("Series::idxmax", Ordering::Greater)
    }
    /// Row index label of the first occurrence of the minimum value.
    pub fn idxmin(&self) -> Result<usize> {
        self.idx_extreme("Series::idxmin", Ordering::Less)
    }
    // a later value replaces the current best only if strictly better, so
    // ties resolve to the first occurrence
    fn idx_extreme(&self, caller: &'static str, better: Ordering) -> Result<usize> {
        let mut best: Option<(usize, Scalar)> = None;
        for (i, x) in self.column().scalars().enumerate() {
            if x.is_missing() { continue; }
            let replace = match &best {
                Some((_, b)) => x.cmp(b) == better,
                None => true,
            };
            if replace { best = Some((i, x)); }
        }
        best.map(|(i, _)| self.index()[i])
            .ok_or_else(|| Error::EmptyReduction { caller, column: self.name().to_string() })
    }
    /// Sample standard deviation (n - 1 denominator); None for fewer than
    /// two values.
    pub fn std(&self) -> Result<Option<f64>> {
        let values = numeric_values(self, "Series::std")?;
        if values.len() < 2 {
            return Ok(None);
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        Ok(Some((ss / (n - 1.0)).sqrt()))
    }
    /// Quantile `q` in 0..=1 with linear interpolation between ranks.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        let mut values = numeric_values(self, "Series::quantile")?;
        if values.is_empty() {
            return Err(Error::EmptyReduction { caller: "Series::quantile", column: self.name().to_string() });
        }
        values.sort_by(f64::total_cmp);
        let pos = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        Ok(values[lo] + (values[hi] - values[lo]) * (pos - lo as f64))
    }
    /// Count of each distinct non-missing value as a two-column Table of
    /// (value, count), by descending count with ties in order of first
    /// appearance.
    pub fn value_counts(&self) -> Result<Table> {
        let mut counts: Vec<(Scalar, i64)> = Vec::new();
        let mut slot: HashMap<Scalar, usize> = HashMap::new();
        for x in self.column().scalars().filter(|x| !x.is_missing()) {
            match slot.get(&x) {
                Some(&k) => counts[k].1 += 1,
                None => {
                    slot.insert(x.clone(), counts.len());
                    counts.push((x, 1));
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1)); // stable, so ties keep first appearance
        let (values, n): (Vec<Scalar>, Vec<i64>) = counts.into_iter().unzip();
        Table::from_columns(vec![
            (self.name(), Column::from_scalars(self.dtype(), values, self.name())?),
            ("count", Column::from(n)),
        ])
    }
    /// Distinct values in order of first appearance, including the missing
    /// marker once if present.
    pub fn unique(&self) -> Result<Series> {
        let mut seen: HashSet<Scalar> = HashSet::new();
        let values: Vec<Scalar> = self.column().scalars().filter(|x| seen.insert(x.clone())).collect();
        Ok(Series::new(self.name(), Column::from_scalars(self.dtype(), values, self.name())?))
    }
}

/* -----------------------------------------------------------------------------
Table-wide reductions
----------------------------------------------------------------------------- */
/// Row labels of the `describe` summary.
pub const DESCRIBE_STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl Table {
    /// Number of distinct non-missing values per column, in column order.
    pub fn nunique(&self) -> Result<Vec<(String, usize)>> {
        self.columns()
            .iter()
            .map(|name| Ok((name.clone(), self.column(name)?.nunique())))
            .collect()
    }
    /// Summary statistics of every numeric column: a leading `statistic`
    /// column naming count, mean, std, min, 25%, 50%, 75% and max, then one
    /// Float column per numeric input column.
    pub fn describe(&self) -> Result<Table> {
        let mut cols: Vec<(String, Column)> = vec![(
            "statistic".to_string(),
            Column::from(DESCRIBE_STATISTICS.to_vec()),
        )];
        for (name, col) in self.iter_columns() {
            if !col.dtype().is_numeric() { continue; }
            let s = self.column(name)?;
            let stat = |q: f64| if s.count() == 0 { Ok(None) } else { s.quantile(q).map(Some) };
            let values = vec![
                Some(s.count() as f64),
                if s.count() == 0 { None } else { Some(s.mean()?) },
                s.std()?,
                stat(0.0)?,
                stat(0.25)?,
                stat(0.5)?,
                stat(0.75)?,
                stat(1.0)?,
            ];
            cols.push((name.clone(), Column::Float(values)));
        }
        Table::from_columns(cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idxmax_returns_first_occurrence() {
        let s = Series::new("salary", vec![100_i64, 100, 50]);
        assert_eq!(s.idxmax().expect("values"), 0);
        assert_eq!(s.idxmin().expect("values"), 2);
        let labeled = Series::with_index("salary", vec![Some(1.0), None, Some(3.0)], vec![7, 8, 9]).expect("aligned");
        assert_eq!(labeled.idxmax().expect("values"), 9);
    }

    #[test]
    fn empty_reductions_fail_where_undefined() {
        let s = Series::new("x", Column::Float(vec![None, None]));
        assert!(matches!(s.max(), Err(Error::EmptyReduction { .. })));
        assert!(matches!(s.mean(), Err(Error::EmptyReduction { .. })));
        assert!(matches!(s.idxmax(), Err(Error::EmptyReduction { .. })));
        assert_eq!(s.count(), 0);
        assert_eq!(s.sum().expect("sum of nothing"), Scalar::Float(0.0));
    }

    #[test]
    fn numeric_reductions() {
        let s = Series::new("x", vec![Some(1_i64), Some(2), None, Some(3), Some(4)]);
        assert_eq!(s.sum().expect("sum"), Scalar::from(10));
        assert_eq!(s.mean().expect("mean"), 2.5);
        assert_eq!(s.quantile(0.5).expect("median"), 2.5);
        assert_eq!(s.quantile(0.25).expect("q1"), 1.75);
        let std = s.std().expect("numeric").expect("n > 1");
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(Series::new("one", vec![5_i64]).std().expect("numeric"), None);
        assert!(matches!(Series::new("t", vec!["a"]).sum(), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn value_counts_orders_by_count_then_first_appearance() {
        let s = Series::new("theme", vec![Some("b"), Some("a"), None, Some("a"), Some("c"), Some("b"), Some("c")]);
        let vc = s.value_counts().expect("counts");
        assert_eq!(vc.columns(), &["theme", "count"]);
        assert_eq!(vc.column("theme").expect("col").to_vec(),
            vec![Scalar::from("b"), Scalar::from("a"), Scalar::from("c")]);
        assert_eq!(vc.column("count").expect("col").to_vec(),
            vec![Scalar::from(2), Scalar::from(2), Scalar::from(2)]);
        assert_eq!(s.nunique(), 3);
        assert_eq!(s.unique().expect("unique").len(), 4);
    }

    #[test]
    fn describe_summarizes_numeric_columns() {
        let df = Table::from_columns(vec![
            ("name",  Column::from(vec!["a", "b", "c", "d"])),
            ("value", Column::from(vec![1_i64, 2, 3, 4])),
        ]).expect("table");
        let d = df.describe().expect("describe");
        assert_eq!(d.columns(), &["statistic", "value"]);
        assert_eq!(d.cell("value", 0).expect("count"), Scalar::from(4.0));
        assert_eq!(d.cell("value", 1).expect("mean"), Scalar::from(2.5));
        assert_eq!(d.cell("value", 7).expect("max"), Scalar::from(4.0));
        assert_eq!(df.nunique().expect("nunique"), vec![("name".to_string(), 4), ("value".to_string(), 4)]);
    }
}
