//! Daily prices with gaps: summary statistics, missing values, and the
//! series resampled to month ends.

// dependencies
use tabpipe::Pipeline;
use tabpipe::table::prelude::*;
use super::{export, PRICES_CSV};

// column names
const DATE: &str = "DATE";

/// Explore the daily price table named by PRICES_CSV, which must carry a
/// DATE column.
pub fn run(p: &mut Pipeline) -> Result<()> {
    let Some(df) = p.load_key(PRICES_CSV)? else { return Ok(()) };
    println!("\nshape: ({}, {})", df.n_row(), df.n_col());
    p.report("summary statistics", &df.describe()?);

    // gaps in the daily series
    println!("any missing values: {}", df.has_missing());
    println!("number of missing values: {}", df.missing_count());
    let clean = p.clean(&df, None)?;

    // month-end closing values and monthly means
    let monthly_last = p.resample(&clean, DATE, Frequency::Month, Reduction::Last)?;
    p.report("last value per month", &monthly_last.head(5));
    let monthly_mean = p.resample(&clean, DATE, Frequency::Month, Reduction::Mean)?;
    p.report("mean per month", &monthly_mean.head(5));
    export(p, &monthly_last, "prices_monthly_last.csv")?;
    export(p, &monthly_mean, "prices_monthly_mean.csv")
}
