//! The Log structure helps print structured log messages to STDERR.

// dependencies
use chrono::Local;

/// The Log structure helps print time-stamped log messages to STDERR,
/// each prefixed with the name of the running tool.
///
/// By convention, Log objects are named `log`.
#[derive(Debug, Clone)]
pub struct Log {
    tool:  String,
    quiet: bool,
}
impl Log {
    /// Create a new Log instance for a given tool.
    pub fn new(tool: &str) -> Self {
        Self {
            tool:  tool.to_string(),
            quiet: false,
        }
    }
    /// Create a Log instance that formats but does not print messages.
    pub fn quiet(tool: &str) -> Self {
        Self {
            tool:  tool.to_string(),
            quiet: true,
        }
    }
    /// Format a message the way it is printed, with an RFC 3339 timestamp.
    pub fn format(&self, msg: &str) -> String {
        format!("{}: {} ({})", self.tool, msg, Local::now().to_rfc3339())
    }
    /// Print a time-stamped message to STDERR for logging purposes.
    pub fn print(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", self.format(msg));
        }
    }
    /// Print a time-stamped 'initializing' message to STDERR for logging purposes.
    /// Includes a preceding newline for spacing clarity.
    pub fn initializing(&self) {
        if !self.quiet {
            eprintln!("\n{}", self.format("initializing"));
        }
    }
    /// Print a time-stamped message describing the shape of a step's result.
    pub fn step(&self, step: &str, n_row: usize, n_col: usize) {
        self.print(&format!("{step}: {n_row} rows × {n_col} columns"));
    }
}
