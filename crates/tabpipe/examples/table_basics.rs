//! This binary script demonstrates the usage of the Table API.
//!
//! It builds a small weather Table, then illustrates core Table operations
//! with the following outline (read in order, it gets progressively more complex).
//!   - Imports      = bring Table features into scope
//!   - Constructors = create Tables
//!   - Display      = inspect Tables
//!   - Getters      = extract data from Tables as Series or cell values
//!   - Cleaning     = find and drop missing cells
//!   - Queries      = select rows and columns into new Tables
//!   - Derivation   = add computed columns
//!   - Aggregation  = summarize Tables by row groups
//!   - Joins        = combine Tables by matching column values
//!   - Resampling   = summarize dated rows by calendar period
//!
//! Run as `cargo run --example table_basics`.

/*----------------------------------------------------------------------------
Imports = bring Table features into scope
--------------------------------------------------------------------------- */
use chrono::NaiveDate;
use tabpipe::table::prelude::*; // one line enables all Table features

fn main() -> Result<()> {

    /*------------------------------------------------------------------------
    Constructors = create Tables
    ----------------------------------------------------------------------- */
    // Column data types follow the input vectors; `None` marks a missing cell.
    let df = Table::from_columns(vec![
        ("day",       Column::from(vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"])),
        ("temp",      Column::from(vec![Some(12_i64), Some(14), None, Some(14), Some(21)])),
        ("condition", Column::from(vec!["Sunny", "Rain", "Rain", "Cloudy", "Sunny"])),
    ])?;

    // The same Table read from delimited text; types are inferred per column.
    let csv = "day,temp,condition\nMonday,12,Sunny\nTuesday,14,Rain\nWednesday,,Rain\n";
    let _df2 = Table::read(csv.as_bytes(), "inline", &ReadOptions::default())?;

    /*------------------------------------------------------------------------
    Display = inspect Tables
    ----------------------------------------------------------------------- */
    println!("{df}");
    println!("shape: {:?}, columns: {:?}", df.shape(), df.columns());

    /*------------------------------------------------------------------------
    Getters = extract data from Tables as Series or cell values
    ----------------------------------------------------------------------- */
    let temp = df.column("temp")?;
    println!("{temp}");
    println!("max temp {} on {}", temp.max()?, df.cell("day", temp.idxmax()?)?);

    /*------------------------------------------------------------------------
    Cleaning = find and drop missing cells
    ----------------------------------------------------------------------- */
    println!("missing per column: {:?}", df.missing_counts());
    let clean = df.dropna();

    /*------------------------------------------------------------------------
    Queries = select rows and columns into new Tables
    ----------------------------------------------------------------------- */
    let rainy = clean.filter(&Predicate::equals("condition", "Rain"))?;
    let warm = clean.filter(&Predicate::gt("temp", 13).and(Predicate::not_equals("condition", "Cloudy")))?;
    println!("{rainy}{warm}");
    println!("{}", clean.sort_values("temp", false)?.select(&["day", "temp"])?.head(2));

    /*------------------------------------------------------------------------
    Derivation = add computed columns
    ----------------------------------------------------------------------- */
    let temp_f = clean.column("temp")?.multiply_scalar(1.8)?.add_scalar(32)?.renamed("temp_f");
    let clean = clean.insert(2, temp_f)?;
    println!("{clean}");

    /*------------------------------------------------------------------------
    Aggregation = summarize Tables by row groups
    ----------------------------------------------------------------------- */
    let by_condition = clean.group_by(&["condition"])?.agg(&[
        Aggregation::new("temp", Reduction::Mean).alias("mean_temp"),
        Aggregation::new("day", Reduction::Count).alias("n_days"),
    ])?;
    println!("{by_condition}");
    println!("{}", clean.describe()?);

    /*------------------------------------------------------------------------
    Joins = combine Tables by matching column values
    ----------------------------------------------------------------------- */
    let advice = Table::from_columns(vec![
        ("condition", Column::from(vec!["Sunny", "Rain"])),
        ("bring",     Column::from(vec!["hat", "umbrella"])),
    ])?;
    println!("{}", clean.join(&advice, "condition", JoinType::Left)?);

    /*------------------------------------------------------------------------
    Resampling = summarize dated rows by calendar period
    ----------------------------------------------------------------------- */
    let dates: Vec<Option<NaiveDate>> = [(2024, 1, 30), (2024, 1, 31), (2024, 3, 1)]
        .iter()
        .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect();
    let daily = Table::from_columns(vec![
        ("date",  Column::Date(dates)),
        ("price", Column::from(vec![1.5, 2.5, 4.0])),
    ])?;
    println!("{}", daily.resample("date", Frequency::Month, Reduction::Mean)?);
    Ok(())
}
