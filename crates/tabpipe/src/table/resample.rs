//! Calendar resampling: bucket rows by the period their date falls in and
//! reduce every other column within each period.
//!
//! Periods are labeled by their last day, e.g., month buckets carry the
//! month-end date. Only periods holding at least one row appear in the
//! output, in chronological order; rows with a missing date are ignored.
//! Within a period, rows are taken in date order, so `Last` is the value of
//! the latest-dated row.

// dependencies
use std::collections::BTreeMap;
use chrono::{Datelike, Days, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use super::Table;
use super::column::Column;
use super::reduce::{Reduction, reduce_rows, reduced_column};
use super::types::DataType;
use crate::error::{Error, Result};

/// Calendar bucket widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Day,
    /// Weeks ending on Sunday.
    Week,
    Month,
    Quarter,
    Year,
}
impl Frequency {
    /// The last day of the period containing `date`.
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Day  => date,
            Frequency::Week => {
                let to_sunday = 6 - date.weekday().num_days_from_monday();
                date.checked_add_days(Days::new(u64::from(to_sunday))).unwrap_or(date)
            }
            Frequency::Month   => month_end(date.year(), date.month()).unwrap_or(date),
            Frequency::Quarter => month_end(date.year(), date.month().div_ceil(3) * 3).unwrap_or(date),
            Frequency::Year    => month_end(date.year(), 12).unwrap_or(date),
        }
    }
}

// the last day of a month, as the day before the first of the next month
fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next?.pred_opt()
}

impl Table {
    /// Bucket rows by the period of the date column and reduce every other
    /// column per period. Mean and sum skip non-numeric columns.
    pub fn resample(&self, date_col: &str, freq: Frequency, reduction: Reduction) -> Result<Table> {
        let dates = self.get_column("Table::resample", date_col)?;
        let Column::Date(dates) = dates else {
            return Err(Error::TypeMismatch {
                caller:   "Table::resample",
                column:   date_col.to_string(),
                expected: DataType::Date.to_string(),
                found:    dates.dtype().to_string(),
            });
        };
        // rows enter their period in date order, ties in row order
        let mut dated: Vec<(NaiveDate, usize)> = dates
            .iter()
            .enumerate()
            .filter_map(|(i, date)| date.map(|d| (d, i)))
            .collect();
        dated.sort_by_key(|(d, _)| *d);
        let mut periods: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (date, i) in dated {
            periods.entry(freq.period_end(date)).or_default().push(i);
        }
        let targets: Vec<(&String, &Column)> = self.iter_columns()
            .filter(|(name, col)| {
                name.as_str() != date_col && (!reduction.is_numeric() || col.dtype().is_numeric())
            })
            .collect();
        let reduced = targets
            .par_iter()
            .map(|(name, col)| {
                let values = periods
                    .values()
                    .map(|rows| reduce_rows(col, rows, reduction, name))
                    .collect::<Result<Vec<_>>>()?;
                Ok(((*name).clone(), reduced_column(col.dtype(), reduction, values, name)?))
            })
            .collect::<Result<Vec<(String, Column)>>>()?;
        let mut cols = vec![(
            date_col.to_string(),
            Column::Date(periods.keys().map(|d| Some(*d)).collect()),
        )];
        cols.extend(reduced);
        Table::from_columns(cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::types::Scalar;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn period_ends() {
        let d = date(2024, 2, 14); // a Wednesday
        assert_eq!(Frequency::Day.period_end(d), d);
        assert_eq!(Frequency::Week.period_end(d), date(2024, 2, 18));
        assert_eq!(Frequency::Month.period_end(d), date(2024, 2, 29));
        assert_eq!(Frequency::Quarter.period_end(d), date(2024, 3, 31));
        assert_eq!(Frequency::Year.period_end(d), date(2024, 12, 31));
        assert_eq!(Frequency::Month.period_end(date(2024, 12, 5)), date(2024, 12, 31));
        assert_eq!(Frequency::Week.period_end(date(2024, 2, 18)), date(2024, 2, 18));
    }

    fn daily() -> Table {
        Table::from_columns(vec![
            ("date",  Column::Date(vec![
                Some(date(2024, 1, 30)), Some(date(2024, 1, 31)), None,
                Some(date(2024, 3, 1)), Some(date(2024, 3, 2)), Some(date(2024, 1, 29)),
            ])),
            ("value", Column::Integer(vec![Some(1), Some(2), Some(100), Some(10), Some(20), Some(3)])),
            ("tag",   Column::from(vec!["a", "b", "c", "d", "e", "f"])),
        ]).expect("table")
    }

    #[test]
    fn monthly_mean_omits_empty_months() {
        let out = daily().resample("date", Frequency::Month, Reduction::Mean).expect("resample");
        assert_eq!(out.columns(), &["date", "value"]);
        assert_eq!(out.column("date").expect("col").to_vec(),
            vec![Scalar::from(date(2024, 1, 31)), Scalar::from(date(2024, 3, 31))]);
        assert_eq!(out.column("value").expect("col").to_vec(), vec![Scalar::from(2.0), Scalar::from(15.0)]);
    }

    #[test]
    fn monthly_last_takes_latest_date() {
        let out = daily().resample("date", Frequency::Month, Reduction::Last).expect("resample");
        assert_eq!(out.columns(), &["date", "value", "tag"]);
        assert_eq!(out.cell("tag", 0).expect("cell"), Scalar::from("b"));
        assert_eq!(out.cell("value", 0).expect("cell"), Scalar::from(2));
        assert_eq!(out.cell("value", 1).expect("cell"), Scalar::from(20));
    }

    #[test]
    fn date_column_must_hold_dates() {
        let err = daily().resample("tag", Frequency::Month, Reduction::Mean);
        assert!(matches!(err, Err(Error::TypeMismatch { .. })));
    }
}
