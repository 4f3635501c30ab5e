//! The LEGO catalog: colors, sets released per year, and sets per theme,
//! joined from the separate `sets` and `themes` tables.

// dependencies
use tabpipe::Pipeline;
use tabpipe::table::prelude::*;
use super::{export, COLORS_CSV, SETS_CSV, THEMES_CSV};

/// Explore the color, set and theme tables named by COLORS_CSV, SETS_CSV
/// and THEMES_CSV.
pub fn run(p: &mut Pipeline) -> Result<()> {
    if let Some(colors) = p.load_key(COLORS_CSV)? {
        colors_summary(p, &colors)?;
    }
    let Some(sets) = p.load_key(SETS_CSV)? else { return Ok(()) };
    let per_year = sets_summary(p, &sets)?;
    export(p, &per_year, "lego_sets_by_year.csv")?;
    let Some(themes) = p.load_key(THEMES_CSV)? else { return Ok(()) };
    let per_theme = themes_summary(p, &sets, &themes)?;
    export(p, &per_theme, "lego_sets_by_theme.csv")
}

fn colors_summary(p: &mut Pipeline, colors: &Table) -> Result<()> {
    println!("\n{} colors, {} distinct names", colors.n_row(), colors.column("name")?.nunique());
    for (name, n) in colors.nunique()? {
        println!("{name}: {n} distinct values");
    }
    p.report("colors by transparency", &colors.group_by(&["is_trans"])?.count()?);
    p.report("transparency counts", &colors.column("is_trans")?.value_counts()?);
    Ok(())
}

fn sets_summary(p: &mut Pipeline, sets: &Table) -> Result<Table> {
    p.report("first sets", &sets.head(5));
    println!("first year: {}", sets.column("year")?.min()?);
    p.report("sets of the first year", &sets.filter(&Predicate::is_min("year"))?);
    p.report("largest sets", &sets.sort_values("num_parts", false)?.head(5));

    // sets, distinct themes and mean parts per release year
    let themes_by_year = sets
        .group_by(&["year"])?
        .agg(&[Aggregation::new("theme_id", Reduction::NUnique)])?
        .rename(&[("theme_id", "themes_count")])?;
    p.report("themes per year", &themes_by_year.tail(5));
    let per_year = p.aggregate(sets, &["year"], &[
        Aggregation::new("set_num", Reduction::Count).alias("set_count"),
        Aggregation::new("theme_id", Reduction::NUnique).alias("themes_count"),
        Aggregation::new("num_parts", Reduction::Mean).alias("mean_parts"),
    ])?;
    p.report("sets per year", &per_year.tail(5));
    Ok(per_year)
}

fn themes_summary(p: &mut Pipeline, sets: &Table, themes: &Table) -> Result<Table> {
    // one theme name can have several ids, e.g., under different parents
    let star_wars = p.filter(themes, &Predicate::equals("name", "Star Wars"))?;
    p.report("Star Wars themes", &star_wars);
    let ids = star_wars.column("id")?.to_vec();
    let star_wars_sets = p.filter(sets, &Predicate::is_in("theme_id", ids))?;
    p.report("Star Wars sets", &star_wars_sets.head(10));

    // set counts per theme id, named through the themes table
    let set_theme_count = sets
        .column("theme_id")?
        .value_counts()?
        .rename(&[("theme_id", "id"), ("count", "set_count")])?;
    let merged = p.join(&set_theme_count, themes, "id", JoinType::Inner)?;
    p.report("sets per theme", &merged.head(3));
    Ok(merged)
}
