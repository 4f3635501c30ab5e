//! `table::series::Series` is a single named column carried together with the
//! row index labels of the table it was selected from.
//!
//! Series are the operands of elementwise derivation and the inputs of
//! single-column reductions such as `idxmax` or `value_counts`.

// dependencies
use super::column::Column;
use super::types::{DataType, Scalar};
use crate::error::{Error, Result};

/// A named, typed sequence of cells plus their row index labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name:  String,
    index: Vec<usize>,
    data:  Column,
}
impl Series {
    /* -----------------------------------------------------------------------------
    Series constructors
    ----------------------------------------------------------------------------- */
    /// Create a Series with a positional row index, i.e., labels 0..n.
    pub fn new(name: &str, data: impl Into<Column>) -> Self {
        let data = data.into();
        Self {
            name:  name.to_string(),
            index: (0..data.len()).collect(),
            data,
        }
    }
    /// Create a Series with explicit row index labels.
    pub fn with_index(name: &str, data: impl Into<Column>, index: Vec<usize>) -> Result<Self> {
        let data = data.into();
        if index.len() != data.len() {
            return Err(Error::LengthMismatch {
                caller:   "Series::with_index",
                expected: data.len(),
                found:    index.len(),
            });
        }
        Ok(Self { name: name.to_string(), index, data })
    }
    /// Return a copy of the Series under a new name.
    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    /* -----------------------------------------------------------------------------
    Series metadata and data access
    ----------------------------------------------------------------------------- */
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn index(&self) -> &[usize] {
        &self.index
    }
    pub fn column(&self) -> &Column {
        &self.data
    }
    pub fn into_column(self) -> Column {
        self.data
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn dtype(&self) -> DataType {
        self.data.dtype()
    }
    /// Value at row position `i`.
    pub fn get(&self, i: usize) -> Scalar {
        self.data.get(i)
    }
    /// Value at the first row carrying index label `label`.
    pub fn get_label(&self, label: usize) -> Result<Scalar> {
        self.index
            .iter()
            .position(|&l| l == label)
            .map(|i| self.data.get(i))
            .ok_or(Error::RowNotFound { caller: "Series::get_label", label })
    }
    /// All values in row order.
    pub fn to_vec(&self) -> Vec<Scalar> {
        self.data.scalars().collect()
    }
    /// A boolean Series, true where the value is missing.
    pub fn isna(&self) -> Series {
        self.map_mask(self.data.missing_mask())
    }
    /// A boolean Series, true where the value is present.
    pub fn notna(&self) -> Series {
        self.map_mask(self.data.missing_mask().into_iter().map(|m| !m).collect())
    }
    pub(crate) fn map_mask(&self, mask: Vec<bool>) -> Series {
        Series {
            name:  self.name.clone(),
            index: self.index.clone(),
            data:  Column::from(mask),
        }
    }
    /* -----------------------------------------------------------------------------
    row subsetting
    ----------------------------------------------------------------------------- */
    /// Keep the rows at the listed positions, carrying their index labels.
    pub fn take(&self, rows: &[usize]) -> Series {
        Series {
            name:  self.name.clone(),
            index: rows.iter().map(|&i| self.index[i]).collect(),
            data:  self.data.take(rows),
        }
    }
    /// Keep the rows where a boolean mask Series is true; missing mask cells
    /// count as false.
    pub fn filter(&self, mask: &Series) -> Result<Series> {
        let rows = mask.true_positions("Series::filter", self.len())?;
        Ok(self.take(&rows))
    }
    /// Positions where this boolean Series is true, checking it against an
    /// expected length.
    pub(crate) fn true_positions(&self, caller: &'static str, expected: usize) -> Result<Vec<usize>> {
        if self.len() != expected {
            return Err(Error::LengthMismatch { caller, expected, found: self.len() });
        }
        let values = self.data.as_boolean().ok_or_else(|| Error::TypeMismatch {
            caller,
            column:   self.name.clone(),
            expected: DataType::Boolean.to_string(),
            found:    self.dtype().to_string(),
        })?;
        Ok(values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| (*v == Some(true)).then_some(i))
            .collect())
    }
    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Series {
        let rows: Vec<usize> = (0..n.min(self.len())).collect();
        self.take(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lookup_returns_first_position() {
        let s = Series::with_index("x", vec![10_i64, 20, 30], vec![4, 7, 4]).expect("aligned");
        assert_eq!(s.get_label(4).expect("present"), Scalar::from(10));
        assert!(matches!(s.get_label(5), Err(Error::RowNotFound { label: 5, .. })));
    }

    #[test]
    fn filter_keeps_labels() {
        let s = Series::new("x", vec![1_i64, 2, 3]);
        let mask = Series::new("m", vec![Some(true), None, Some(true)]);
        let kept = s.filter(&mask).expect("boolean mask");
        assert_eq!(kept.index(), &[0, 2]);
        assert_eq!(kept.to_vec(), vec![Scalar::from(1), Scalar::from(3)]);
    }

    #[test]
    fn filter_rejects_non_boolean_masks() {
        let s = Series::new("x", vec![1_i64, 2]);
        let mask = Series::new("m", vec![1_i64, 0]);
        assert!(matches!(s.filter(&mask), Err(Error::TypeMismatch { .. })));
    }
}
