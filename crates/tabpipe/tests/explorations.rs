// Table operations run against the fixture data sets in tests/data.

use tabpipe::table::prelude::*;

fn data(file_name: &str) -> String {
    format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), file_name)
}

fn load(file_name: &str) -> Table {
    Table::read_csv(&data(file_name)).expect("fixture loads")
}

/* -----------------------------------------------------------------------------
weather
----------------------------------------------------------------------------- */
#[test]
fn weather_hottest_day() {
    let df = load("weather.csv");
    assert_eq!(df.shape(), (7, 3));
    let hottest = df.filter(&Predicate::is_max("temp")).expect("temp exists");
    assert_eq!(hottest.n_row(), 1);
    assert_eq!(hottest.index(), &[6]);
    assert_eq!(hottest.cell("day", 6).expect("cell"), Scalar::from("Sunday"));
    assert_eq!(hottest.cell("temp", 6).expect("cell"), Scalar::Integer(24));
}

#[test]
fn weather_column_summaries() {
    let df = load("weather.csv");
    let temp = df.column("temp").expect("temp exists");
    assert_eq!(temp.dtype(), DataType::Integer);
    assert!((temp.mean().expect("values") - 122.0 / 7.0).abs() < 1e-12);
    let sunny = df.filter(&Predicate::equals("condition", "Sunny")).expect("condition exists");
    assert_eq!(sunny.n_row(), 4);
    let counts = df.column("condition").expect("condition exists").value_counts().expect("counts");
    assert_eq!(counts.column("condition").expect("values").to_vec(), vec![
        Scalar::from("Sunny"), Scalar::from("Rain"), Scalar::from("Cloudy"),
    ]);
    assert_eq!(counts.column("count").expect("counts").to_vec(), vec![
        Scalar::Integer(4), Scalar::Integer(2), Scalar::Integer(1),
    ]);
}

#[test]
fn weather_dict_is_keyed_by_column_then_label() {
    let dict = load("weather.csv").to_dict().expect("dict");
    assert_eq!(dict["temp"]["6"], serde_json::json!(24));
    assert_eq!(dict["day"]["0"], serde_json::json!("Monday"));
}

/* -----------------------------------------------------------------------------
salaries by major
----------------------------------------------------------------------------- */
const MAJOR: &str = "Undergraduate Major";

fn clean_salaries() -> Table {
    let df = load("salaries.csv");
    assert_eq!(df.n_row(), 7);
    assert!(df.has_missing());
    df.dropna()
}

#[test]
fn salaries_footnote_row_is_dropped() {
    let clean = clean_salaries();
    assert_eq!(clean.n_row(), 6);
    assert_eq!(clean.index(), &[0, 1, 2, 3, 4, 5]);
    assert!(!clean.has_missing());
}

#[test]
fn salaries_extremes_by_label() {
    let clean = clean_salaries();
    let starting = clean.column("Starting Median Salary").expect("column");
    let max_label = starting.idxmax().expect("values");
    assert_eq!(max_label, 4);
    assert_eq!(clean.cell(MAJOR, max_label).expect("cell"), Scalar::from("Physician Assistant"));
    assert_eq!(starting.max().expect("values"), Scalar::Float(74300.0));
    let min_label = starting.idxmin().expect("values");
    assert_eq!(clean.cell(MAJOR, min_label).expect("cell"), Scalar::from("Spanish"));
    let mid = clean.column("Mid-Career Median Salary").expect("column");
    assert_eq!(clean.cell(MAJOR, mid.idxmax().expect("values")).expect("cell"), Scalar::from("Chemical Engineering"));
}

#[test]
fn salaries_idxmax_tie_takes_first_label() {
    let df = Table::from_columns(vec![
        ("major",  Column::from(vec!["a", "b", "c"])),
        ("salary", Column::from(vec![100_i64, 100, 50])),
    ]).expect("table");
    assert_eq!(df.column("salary").expect("column").idxmax().expect("values"), 0);
}

#[test]
fn salaries_spread_sorted_and_grouped() {
    let clean = clean_salaries();
    let spread = clean.column("Mid-Career 90th Percentile Salary").expect("column")
        .subtract(&clean.column("Mid-Career 10th Percentile Salary").expect("column"))
        .expect("aligned numeric columns")
        .renamed("Salary Diff");
    let with_spread = clean.insert(1, spread).expect("new column");
    assert_eq!(with_spread.columns()[1], "Salary Diff");
    assert_eq!(clean.n_col() + 1, with_spread.n_col());

    let low_risk = with_spread.sort_values("Salary Diff", true).expect("sortable");
    assert_eq!(low_risk.cell(MAJOR, low_risk.index()[0]).expect("cell"), Scalar::from("Physician Assistant"));
    assert_eq!(low_risk.cell("Salary Diff", 4).expect("cell"), Scalar::Float(57600.0));
    let high_risk = with_spread.sort_values("Salary Diff", false).expect("sortable");
    assert_eq!(high_risk.index()[0], 3);

    let sizes = with_spread.group_by(&["Group"]).expect("group").size().expect("sizes");
    assert_eq!(sizes.column("Group").expect("keys").to_vec(), vec![
        Scalar::from("Business"), Scalar::from("HASS"), Scalar::from("STEM"),
    ]);
    assert_eq!(sizes.column("size").expect("sizes").to_vec(), vec![
        Scalar::Integer(1), Scalar::Integer(2), Scalar::Integer(3),
    ]);
    let means = with_spread
        .drop_columns(&[MAJOR]).expect("column exists")
        .group_by(&["Group"]).expect("group")
        .mean().expect("means");
    assert_eq!(means.cell("Starting Median Salary", 1).expect("cell"), Scalar::Float(34900.0));
}

/* -----------------------------------------------------------------------------
LEGO catalog
----------------------------------------------------------------------------- */
#[test]
fn lego_first_year_and_themes_per_year() {
    let sets = load("sets.csv");
    let year = sets.column("year").expect("column");
    assert_eq!(year.min().expect("values"), Scalar::Integer(1949));
    assert_eq!(sets.filter(&Predicate::is_min("year")).expect("filter").n_row(), 2);

    let per_year = sets
        .group_by(&["year"]).expect("group")
        .agg(&[
            Aggregation::new("set_num", Reduction::Count).alias("set_count"),
            Aggregation::new("theme_id", Reduction::NUnique),
        ]).expect("agg")
        .rename(&[("theme_id", "themes_count")]).expect("rename");
    assert_eq!(per_year.columns(), &["year", "set_count", "themes_count"]);
    assert_eq!(per_year.n_row(), 6);
    assert_eq!(per_year.cell("year", 5).expect("cell"), Scalar::Integer(1999));
    assert_eq!(per_year.cell("set_count", 5).expect("cell"), Scalar::Integer(3));
    assert_eq!(per_year.cell("themes_count", 5).expect("cell"), Scalar::Integer(2));
}

#[test]
fn lego_set_counts_merge_with_theme_names() {
    let sets = load("sets.csv");
    let themes = load("themes.csv");
    let star_wars_ids = themes
        .filter(&Predicate::equals("name", "Star Wars")).expect("filter")
        .column("id").expect("column")
        .to_vec();
    assert_eq!(star_wars_ids, vec![Scalar::Integer(18), Scalar::Integer(158)]);
    let star_wars_sets = sets.filter(&Predicate::is_in("theme_id", star_wars_ids)).expect("filter");
    assert_eq!(star_wars_sets.n_row(), 3);

    let set_theme_count = sets
        .column("theme_id").expect("column")
        .value_counts().expect("counts")
        .rename(&[("theme_id", "id"), ("count", "set_count")]).expect("rename");
    let merged = set_theme_count.merge(&themes, "id").expect("merge");
    assert_eq!(merged.n_row(), 7);
    assert_eq!(merged.columns(), &["id", "set_count", "name", "parent_id"]);
    assert_eq!(merged.cell("name", 0).expect("cell"), Scalar::from("Samsonite"));
    assert_eq!(merged.cell("set_count", 0).expect("cell"), Scalar::Integer(2));
}

#[test]
fn lego_inner_join_repeats_matching_right_rows() {
    let left = Table::from_columns(vec![
        ("id",   Column::from(vec!["A", "B", "C"])),
        ("left", Column::from(vec![1_i64, 2, 3])),
    ]).expect("table");
    let right = Table::from_columns(vec![
        ("id",    Column::from(vec!["B", "B", "D"])),
        ("right", Column::from(vec![10_i64, 20, 30])),
    ]).expect("table");
    let out = left.merge(&right, "id").expect("merge");
    assert_eq!(out.n_row(), 2);
    assert_eq!(out.column("left").expect("column").to_vec(), vec![Scalar::Integer(2), Scalar::Integer(2)]);
    assert_eq!(out.column("right").expect("column").to_vec(), vec![Scalar::Integer(10), Scalar::Integer(20)]);
    let left_join = left.join(&right, "id", JoinType::Left).expect("join");
    assert_eq!(left_join.n_row(), 4);
    assert_eq!(left_join.cell("right", 3).expect("cell"), Scalar::Missing);
}

/* -----------------------------------------------------------------------------
price trends
----------------------------------------------------------------------------- */
#[test]
fn trends_describe_and_missing_values() {
    let df = load("prices.csv");
    assert_eq!(df.get_column("test", "DATE").expect("column").dtype(), DataType::Date);
    assert_eq!(df.missing_count(), 2);
    let summary = df.describe().expect("describe");
    assert_eq!(summary.columns(), &["statistic", "CLOSE", "VOLUME"]);
    assert_eq!(summary.cell("statistic", 0).expect("cell"), Scalar::from("count"));
    assert_eq!(summary.cell("CLOSE", 0).expect("cell"), Scalar::Float(5.0));
    assert_eq!(summary.cell("VOLUME", 7).expect("cell"), Scalar::Float(34707300.0));
}

#[test]
fn trends_month_end_resampling_omits_empty_months() {
    let clean = load("prices.csv").dropna();
    assert_eq!(clean.n_row(), 5);
    let last = clean.resample("DATE", Frequency::Month, Reduction::Last).expect("resample");
    assert_eq!(last.n_row(), 2);
    assert_eq!(last.column("DATE").expect("column").to_vec(), vec![
        Scalar::from(chrono::NaiveDate::from_ymd_opt(2014, 9, 30).expect("date")),
        Scalar::from(chrono::NaiveDate::from_ymd_opt(2014, 11, 30).expect("date")),
    ]);
    assert_eq!(last.cell("CLOSE", 0).expect("cell"), Scalar::Float(386.944));
    assert_eq!(last.cell("VOLUME", 1).expect("cell"), Scalar::Integer(14921200));

    let mean = clean.resample("DATE", Frequency::Month, Reduction::Mean).expect("resample");
    let nov = mean.cell("CLOSE", 1).expect("cell").as_f64().expect("numeric");
    assert!((nov - (325.748993 + 327.924011) / 2.0).abs() < 1e-9);
}
