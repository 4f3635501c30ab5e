//! `tabpipe` runs small tabular transformation pipelines on in-memory,
//! labeled tables: read → clean → derive → aggregate → join → report.

// modules
pub mod error;    // the shared Error enum and Result alias
pub mod table;    // labeled columnar tables and their operations
pub mod workflow; // configuration, counters, logging, files, and the Pipeline runner

// re-exports
pub use error::{Error, Result};
pub use table::Table;
pub use workflow::file::{InputFile, OutputFile};
pub use workflow::{Config, Counters, Log, Pipeline};

/// Print a highlighted error message to STDERR and exit the process with
/// status 1. For use by binaries at the point a fatal error is reported.
#[macro_export]
macro_rules! throw {
    ($($arg:tt)*) => {
        {
            eprintln!("\n!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!");
            eprintln!($($arg)*);
            eprintln!("!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\n");
            std::process::exit(1)
        }
    };
}
