//! The Counters structure stores count values that can be passed to
//! pipeline steps as a single variable.
//!
// dependencies
use std::collections::HashMap;
use num_format::{Locale, ToFormattedString};
use crate::error::{Error, Result};

// define a constant to print a separator line when printing counters
pub const COUNTER_SEPARATOR: &str = "------------------------------------------------------------";

/// The Counters struct stores keyed usize count values in a HashMap.
///
/// By convention, Counters objects are named `ctrs`.
#[derive(Debug)]
pub struct Counters {
    tool:               String,
    // regular counter fields, for things like row tallies
    keys:               Vec<String>,
    descriptions:       HashMap<String, String>,
    counts:             HashMap<String, usize>,
    // keyed counter fields, for things like per-table tallies
    keyed_keys:         Vec<String>,
    keyed_descriptions: HashMap<String, String>,
    keyed_inner_keys:   HashMap<String, Vec<String>>,
    keyed_counts:       HashMap<String, HashMap<String, usize>>,
}
impl Counters {
    /// Create a new Counters instance with specified "regular" counters keys
    /// initialized to zero.
    ///
    /// Pass requested counters as a slice of tuples of form `&[(&str, &str)]`,
    /// where the first element of each tuple is the counter key and the second
    /// element is the counter description.
    ///
    /// Pass `(COUNTER_SEPARATOR, "")` to insert a separator line
    /// between groups of related counters.
    pub fn new(tool: &str, counters: &[(&str, &str)]) -> Self {
        let mut ctrs = Counters {
            tool:               tool.to_string(),
            keys:               Vec::new(),
            descriptions:       HashMap::new(),
            counts:             HashMap::new(),
            keyed_keys:         Vec::new(),
            keyed_descriptions: HashMap::new(),
            keyed_inner_keys:   HashMap::new(),
            keyed_counts:       HashMap::new(),
        };
        ctrs.add_counters(counters);
        ctrs
    }
    /// Add one or more regular counters to the Counters instance.
    pub fn add_counters(&mut self, counters: &[(&str, &str)]) -> &mut Self {
        for (key, description) in counters {
            if *key == COUNTER_SEPARATOR {
                let n_separators = self.keys.iter().filter(|k| k.starts_with(COUNTER_SEPARATOR)).count();
                let final_key = format!("{COUNTER_SEPARATOR}{n_separators}");
                self.descriptions.insert(final_key.clone(), COUNTER_SEPARATOR.to_string());
                self.keys.push(final_key);
            } else {
                self.descriptions.insert(key.to_string(), (*description).to_string());
                self.counts.insert(key.to_string(), 0);
                self.keys.push(key.to_string());
            }
        }
        self
    }
    /// Add one or more keyed counters to the Counters instance.
    pub fn add_keyed_counters(&mut self, counters: &[(&str, &str)]) -> &mut Self {
        for (key, description) in counters {
            self.keyed_keys.push(key.to_string());
            self.keyed_descriptions.insert(key.to_string(), (*description).to_string());
            self.keyed_inner_keys.insert(key.to_string(), Vec::new());
            self.keyed_counts.insert(key.to_string(), HashMap::new());
        }
        self
    }
    /* ------------------------------------------------------------------
    regular counter methods
    ------------------------------------------------------------------ */
    /// Increment the count for the specified counter key by one.
    pub fn increment(&mut self, key: &str) -> Result<()> {
        self.add_to(key, 1)
    }
    /// Increment the count for the specified counter key an arbitrary amount.
    pub fn add_to(&mut self, key: &str, value: usize) -> Result<()> {
        let counter = self.counts
            .get_mut(key)
            .ok_or_else(|| Error::Counter(key.to_string()))?;
        *counter += value;
        Ok(())
    }
    /// Get the current count for the specified counter key.
    pub fn get(&self, key: &str) -> Result<usize> {
        self.counts.get(key).copied().ok_or_else(|| Error::Counter(key.to_string()))
    }
    /* ------------------------------------------------------------------
    keyed counter methods, with outer and inner keys
    ------------------------------------------------------------------ */
    /// Increment the count for the specified keyed counter an arbitrary amount.
    /// Inner keys are reported in the order first seen.
    pub fn add_to_keyed(&mut self, outer_key: &str, inner_key: &str, value: usize) -> Result<()> {
        let keyed_counter = self.keyed_counts
            .get_mut(outer_key)
            .ok_or_else(|| Error::Counter(outer_key.to_string()))?;
        if !keyed_counter.contains_key(inner_key) {
            if let Some(inner_keys) = self.keyed_inner_keys.get_mut(outer_key) {
                inner_keys.push(inner_key.to_string());
            }
        }
        *keyed_counter.entry(inner_key.to_string()).or_insert(0) += value;
        Ok(())
    }
    /// Get the current count for an inner key of a keyed counter; inner keys
    /// not yet seen count zero.
    pub fn get_keyed(&self, outer_key: &str, inner_key: &str) -> Result<usize> {
        let keyed_counter = self.keyed_counts
            .get(outer_key)
            .ok_or_else(|| Error::Counter(outer_key.to_string()))?;
        Ok(keyed_counter.get(inner_key).copied().unwrap_or(0))
    }
    /* ------------------------------------------------------------------
    count reporting
    ------------------------------------------------------------------ */
    /// Format the value of all counters with their descriptions, regular
    /// counters first, in the order they were initialized.
    pub fn report(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for key in &self.keys {
            if key.starts_with(COUNTER_SEPARATOR) {
                lines.push(COUNTER_SEPARATOR.to_string());
                continue;
            }
            let count = self.counts.get(key).copied().unwrap_or(0);
            let description = self.descriptions.get(key).map_or("", String::as_str);
            lines.push(format!("{}\t{}\t{}\t{}",
                self.tool,
                count.to_formatted_string(&Locale::en),
                key,
                description
            ));
        }
        for key in &self.keyed_keys {
            let description = self.keyed_descriptions.get(key).map_or("", String::as_str);
            let Some(inner_keys) = self.keyed_inner_keys.get(key) else { continue };
            for inner_key in inner_keys {
                let count = self.get_keyed(key, inner_key).unwrap_or(0);
                lines.push(format!("{}\t{}\t{}\t{}\t{}",
                    self.tool,
                    count.to_formatted_string(&Locale::en),
                    key,
                    inner_key,
                    description
                ));
            }
        }
        lines.join("\n")
    }
    /// Print the report of all counters to STDERR.
    pub fn print_all(&self) {
        eprintln!("{}", self.report());
    }
}
