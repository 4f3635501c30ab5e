//! A first look at a small daily weather table with columns
//! `day`, `temp` and `condition`.

// dependencies
use tabpipe::Pipeline;
use tabpipe::table::prelude::*;
use super::{export, WEATHER_CSV};

/// Explore the weather table named by WEATHER_CSV.
pub fn run(p: &mut Pipeline) -> Result<()> {
    let Some(df) = p.load_key(WEATHER_CSV)? else { return Ok(()) };
    p.report("weather observations", &df);

    // one column as a Series, with its summary values
    let temp = df.column("temp")?;
    println!("\n{temp}");
    println!("mean temperature: {:.2}", temp.mean()?);
    println!("max temperature:  {}", temp.max()?);

    // the same table as a column-oriented dictionary
    println!("\n{}", serde_json::to_string_pretty(&df.to_dict()?)?);

    // rows selected by a value, and by the column maximum
    let monday = p.filter(&df, &Predicate::equals("day", "Monday"))?;
    p.report("Monday", &monday);
    let hottest = p.filter(&df, &Predicate::is_max("temp"))?;
    p.report("hottest day", &hottest);

    // days per condition, most common first
    let conditions = df.column("condition")?.value_counts()?;
    p.report("days per condition", &conditions);

    // a derived column of Fahrenheit temperatures
    let temp_f = temp
        .multiply_scalar(1.8)?
        .add_scalar(32)?
        .renamed("temp_f");
    let with_f = df.with_column(temp_f)?;
    p.report("with Fahrenheit", &with_f);
    export(p, &with_f, "weather_fahrenheit.csv")
}
