//! Command-line explorations of small tabular data sets: weather
//! observations, salaries by college major, a LEGO catalog, and price trends.
//!
//! Input files are named by environment variables, e.g.,
//! `WEATHER_CSV=weather.csv tabpipe weather`; explorations whose
//! inputs are not set are skipped.

// dependencies
use std::env;
use std::error::Error;
use tabpipe::{throw, Pipeline};

// modules
mod tools;

// constants
const TOOLS_NAME: &str = "tabpipe";

// load and process data
fn main() -> Result<(), Box<dyn Error>> {

    // read command line arguments
    let args: Vec<String> = env::args().skip(1).collect(); // drop executable name
    if args.is_empty() { // check for something to do, i.e., a tool to run
        eprintln!("{}: missing tool or command", TOOLS_NAME);
        Err(format!("usage: {} <weather|salaries|lego|trends|all>", TOOLS_NAME))?
    }
    let tool = args[0].clone();

    // collect input and output paths from the environment
    let cfg = tools::config();
    let mut p = Pipeline::new(&format!("{TOOLS_NAME} {tool}"), cfg);
    p.log.initializing();

    // dispatch to tool or command
    let result = match tool.as_str() {

        /*--------------------------------------------------------------
        single explorations
        ------------------------------------------------------------- */
        // first look at a small weather table: selection, dict export, derived column
        "weather" => tools::weather::run(&mut p),

        // salaries by college major: cleaning, extremes, spread, grouping
        "salaries" => tools::salaries::run(&mut p),

        // LEGO colors, sets and themes: distinct counts, aggregation, merge
        "lego" => tools::lego::run(&mut p),

        // daily prices: summary statistics, missing values, monthly resampling
        "trends" => tools::trends::run(&mut p),

        /*--------------------------------------------------------------
        every exploration whose inputs are set
        ------------------------------------------------------------- */
        "all" => tools::run_all(&mut p),

        /*--------------------------------------------------------------
        unrecognized tool
        ------------------------------------------------------------- */
        _ => Err(format!("{}: unknown tool or command: {}", TOOLS_NAME, tool))?
    };
    if let Err(e) = result {
        throw!("{} {}: {}", TOOLS_NAME, tool, e);
    }
    p.finish();
    Ok(())
}
