//! Support for running tabular pipelines: configuration from environment
//! variables, counters, logging, file access, and the Pipeline runner.

// modules
mod config;
mod counters;
mod log;
mod pipeline;
pub mod file;

// exports
pub use config::Config;
pub use counters::{Counters, COUNTER_SEPARATOR};
pub use log::Log;
pub use pipeline::{
    Pipeline,
    ROWS_LOADED, ROWS_DROPPED, ROWS_KEPT, GROUPS, JOIN_ROWS, PERIODS, ROWS_EXPORTED, TABLE_ROWS,
};

/// Declare one or more data keys as constants in form `pub const KEY: &str = "KEY";`.
/// Doing so improves code readability and helps avoid typos in string literals
/// used to access environment variables or string-keyed data structures like HashMap,
/// since calls can now take the form `p.cfg.set_string_env(&[KEY]); p.cfg.get_string(KEY)`.
///
/// Key constants set in this way must have all uppercase names to follow Rust conventions.
///
/// Constants are declared with pub so that other modules can also use them.
///
/// Provide keys as either space-separated or comma-separated lists.
#[macro_export]
macro_rules! pub_key_constants {
    ($($key:ident)+) => { // support space-separated keys
        $(
            pub const $key: &str = stringify!($key);
        )+
    };
    ($($key:ident),+ $(,)?) => { // support comma-separated keys
        $(
            pub const $key: &str = stringify!($key);
        )+
    };
}
