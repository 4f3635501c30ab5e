//! Salaries by college major: find the majors with the highest and lowest
//! earnings, the widest spread between mid-career percentiles, and
//! summaries per major group.

// dependencies
use tabpipe::Pipeline;
use tabpipe::table::prelude::*;
use super::{export, SALARIES_CSV};

// column names
const MAJOR:    &str = "Undergraduate Major";
const STARTING: &str = "Starting Median Salary";
const MID:      &str = "Mid-Career Median Salary";
const P10:      &str = "Mid-Career 10th Percentile Salary";
const P90:      &str = "Mid-Career 90th Percentile Salary";
const GROUP:    &str = "Group";
const SPREAD:   &str = "Salary Diff";

/// Explore the salaries table named by SALARIES_CSV.
pub fn run(p: &mut Pipeline) -> Result<()> {
    let Some(df) = p.load_key(SALARIES_CSV)? else { return Ok(()) };
    let (n_row, n_col) = df.shape();
    println!("\nshape: ({n_row}, {n_col})");
    println!("columns: {}", df.columns().join(", "));
    p.report("first rows", &df.head(5));

    // footnote rows leave missing cells; drop them
    for (name, n) in df.missing_counts() {
        if n > 0 { println!("{name}: {n} missing"); }
    }
    let clean = p.clean(&df, None)?;
    p.report("last clean rows", &clean.tail(5));

    // extremes and the majors they belong to
    for (col_name, label) in [(STARTING, "starting"), (MID, "mid-career")] {
        let salary = clean.column(col_name)?;
        let max_label = salary.idxmax()?;
        let min_label = salary.idxmin()?;
        println!("highest {label} salary: {} ({})", salary.max()?, clean.cell(MAJOR, max_label)?);
        println!("lowest {label} salary:  {} ({})", salary.min()?, clean.cell(MAJOR, min_label)?);
    }

    // spread between the 90th and 10th mid-career percentiles as a low-risk measure
    let spread = clean.column(P90)?
        .subtract(&clean.column(P10)?)?
        .renamed(SPREAD);
    let clean = clean.insert(1, spread)?;
    p.report("with salary spread", &clean.head(5));
    let low_risk = clean.sort_values(SPREAD, true)?.select(&[MAJOR, SPREAD])?;
    p.report("lowest spread", &low_risk.head(5));
    let highest_spread = clean.sort_values(SPREAD, false)?.select(&[MAJOR, SPREAD])?;
    p.report("highest spread", &highest_spread.head(5));
    let highest_potential = clean.sort_values(P90, false)?.select(&[MAJOR, P90])?;
    p.report("highest potential", &highest_potential.head(5));

    // majors and mean salaries per group
    p.report("majors per group", &clean.group_by(&[GROUP])?.count()?);
    let numeric = clean.drop_columns(&[MAJOR])?;
    let means = numeric.group_by(&[GROUP])?.mean()?;
    p.report("mean salaries per group", &means);
    export(p, &means, "salaries_by_group.csv")
}
