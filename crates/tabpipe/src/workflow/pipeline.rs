//! The Pipeline structure runs Table operations as logged, counted steps.
//!
//! By convention, Pipeline objects are named `p`, and elements are accessed
//! as `p.cfg`, `p.log`, and `p.ctrs`.

// dependencies
use crate::error::Result;
use crate::pub_key_constants;
use crate::table::Table;
use crate::table::group::Aggregation;
use crate::table::join::JoinType;
use crate::table::reduce::Reduction;
use crate::table::resample::Frequency;
use crate::table::select::Predicate;
use super::{Config, Counters, Log, COUNTER_SEPARATOR};

// counter keys
pub_key_constants!(
    ROWS_LOADED
    ROWS_DROPPED
    ROWS_KEPT
    GROUPS
    JOIN_ROWS
    PERIODS
    ROWS_EXPORTED
    TABLE_ROWS
);

/// The Pipeline structure organizes the common components of a tabular
/// pipeline, i.e., configuration parameters, logging, and counters, and
/// wraps the Table operations of each pipeline stage.
pub struct Pipeline {
    pub cfg:  Config,
    pub ctrs: Counters,
    pub log:  Log,
}
impl Pipeline {
    /// Create a new Pipeline with the standard step counters.
    pub fn new(tool: &str, cfg: Config) -> Self {
        Self::with_log(cfg, Log::new(tool), tool)
    }
    /// Create a new Pipeline with a caller-supplied Log, e.g., `Log::quiet`.
    pub fn with_log(cfg: Config, log: Log, tool: &str) -> Self {
        let mut ctrs = Counters::new(tool, &[
            (ROWS_LOADED,   "rows read from input files"),
            (ROWS_DROPPED,  "rows removed by cleaning"),
            (ROWS_KEPT,     "rows kept by filters"),
            (COUNTER_SEPARATOR, ""),
            (GROUPS,        "groups produced by aggregation"),
            (JOIN_ROWS,     "rows produced by joins"),
            (PERIODS,       "periods produced by resampling"),
            (ROWS_EXPORTED, "rows written to output files"),
        ]);
        ctrs.add_keyed_counters(&[(TABLE_ROWS, "rows per loaded table")]);
        Self { cfg, ctrs, log }
    }
    /* ------------------------------------------------------------------
    load and export
    ------------------------------------------------------------------ */
    /// Load a comma-delimited file with a header row.
    pub fn load(&mut self, name: &str, filepath: &str) -> Result<Table> {
        self.log.print(&format!("loading {name} from {filepath}"));
        let df = Table::read_csv(filepath)?;
        self.ctrs.add_to(ROWS_LOADED, df.n_row())?;
        self.ctrs.add_to_keyed(TABLE_ROWS, name, df.n_row())?;
        self.log.step(name, df.n_row(), df.n_col());
        Ok(df)
    }
    /// Load the file named by a config String key, if that key is set.
    pub fn load_key(&mut self, key: &str) -> Result<Option<Table>> {
        if !self.cfg.has_string(key) {
            self.log.print(&format!("{key} not set, skipping"));
            return Ok(None);
        }
        let filepath = self.cfg.get_string(key)?.to_string();
        self.load(key, &filepath).map(Some)
    }
    /// Write a Table to a comma-delimited file.
    pub fn export(&mut self, df: &Table, filepath: &str) -> Result<()> {
        df.write_csv(filepath)?;
        self.ctrs.add_to(ROWS_EXPORTED, df.n_row())?;
        self.log.print(&format!("wrote {} rows to {filepath}", df.n_row()));
        Ok(())
    }
    /* ------------------------------------------------------------------
    transformation steps
    ------------------------------------------------------------------ */
    /// Drop rows with a missing cell, in any column or in the named subset.
    pub fn clean(&mut self, df: &Table, subset: Option<&[&str]>) -> Result<Table> {
        let out = match subset {
            Some(cols) => df.dropna_subset(cols)?,
            None => df.dropna(),
        };
        self.ctrs.add_to(ROWS_DROPPED, df.n_row() - out.n_row())?;
        self.log.step("clean", out.n_row(), out.n_col());
        Ok(out)
    }
    /// Keep rows matching a predicate.
    pub fn filter(&mut self, df: &Table, predicate: &Predicate) -> Result<Table> {
        let out = df.filter(predicate)?;
        self.ctrs.add_to(ROWS_KEPT, out.n_row())?;
        self.log.step("filter", out.n_row(), out.n_col());
        Ok(out)
    }
    /// Group by key columns and aggregate.
    pub fn aggregate(&mut self, df: &Table, keys: &[&str], aggs: &[Aggregation]) -> Result<Table> {
        let out = df.group_by(keys)?.agg(aggs)?;
        self.ctrs.add_to(GROUPS, out.n_row())?;
        self.log.step("aggregate", out.n_row(), out.n_col());
        Ok(out)
    }
    /// Join two Tables on a shared key column.
    pub fn join(&mut self, left: &Table, right: &Table, key_col: &str, join_type: JoinType) -> Result<Table> {
        let out = left.join(right, key_col, join_type)?;
        self.ctrs.add_to(JOIN_ROWS, out.n_row())?;
        self.log.step("join", out.n_row(), out.n_col());
        Ok(out)
    }
    /// Resample by calendar period of a date column.
    pub fn resample(&mut self, df: &Table, date_col: &str, freq: Frequency, reduction: Reduction) -> Result<Table> {
        let out = df.resample(date_col, freq, reduction)?;
        self.ctrs.add_to(PERIODS, out.n_row())?;
        self.log.step("resample", out.n_row(), out.n_col());
        Ok(out)
    }
    /* ------------------------------------------------------------------
    reporting
    ------------------------------------------------------------------ */
    /// Print a titled Table to STDOUT.
    pub fn report(&self, title: &str, df: &Table) {
        println!("{title}{df}");
    }
    /// Print the counter report to STDERR.
    pub fn finish(&self) {
        self.log.print("done");
        self.ctrs.print_all();
    }
}
