//! The Config structure stores configuration values in hash maps organized
//! by data type, filled directly or from environment variables, that can be
//! passed to pipeline steps as a single variable.

// dependencies
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use paste::paste;
use crate::error::{Error, Result};

/// Macro to define one or more environment variable key constants as `const KEY: &str = "KEY";`.
/// Doing so at the top of a binary or library module is optional but improves code
/// readability and helps avoid typos in string literals used as keys to access
/// configuration values, since calls can now take the form `cfg.get_usize(KEY)`, etc.
/// Variable keys set in this way must be all uppercase to follow Rust's naming conventions.
/// Provide keys as either space-separated or comma-separated lists.
#[macro_export]
macro_rules! config_key_constants {
    ($($key:ident)+) => { // support space-separated keys
        $(
            const $key: &str = stringify!($key);
        )+
    };
    ($($key:ident),+ $(,)?) => { // support comma-separated keys
        $(
            const $key: &str = stringify!($key);
        )+
    };
}

/// The Config struct gathers configuration values from environment variables
/// and can store derived configuration values, organized by data type.
/// Supported data types include usize, i64, f64, bool, and String.
#[derive(Debug, Default)]
pub struct Config {
    pub usize:  HashMap<String, usize>,
    pub i64:    HashMap<String, i64>,
    pub f64:    HashMap<String, f64>,
    pub bool:   HashMap<String, bool>,
    pub string: HashMap<String, String>,
}

// environment and direct setters for every value map; getters for Copy types
macro_rules! impl_config_maps {
    ($($field:ident),+ $(,)?) => {
        paste! {
            impl Config {
                $(
                    #[doc = "Set " $field " configuration values from environment variables."]
                    #[doc = "Fail if any of the keys is not set or cannot be parsed."]
                    pub fn [<set_ $field _env>](&mut self, keys: &[&str]) -> Result<()> {
                        for &key in keys {
                            let value_str = Self::get_env_string(key)?;
                            let value = Self::parse_env_string(key, &value_str, stringify!($field))?;
                            self.$field.insert(key.to_string(), value);
                        }
                        Ok(())
                    }
                    #[doc = "Set a " $field " configuration value from an environment variable if it is set."]
                    #[doc = "Returns whether a value was set."]
                    pub fn [<set_ $field _env_opt>](&mut self, key: &str) -> Result<bool> {
                        if env::var_os(key).is_none() {
                            return Ok(false);
                        }
                        self.[<set_ $field _env>](&[key])?;
                        Ok(true)
                    }
                    #[doc = "Set a (derived) " $field " configuration value directly."]
                    #[doc = "Any existing value is overridden and returned as an Option."]
                    pub fn [<set_ $field>](&mut self, key: &str, value: $field) -> Option<$field> {
                        self.$field.insert(key.to_string(), value)
                    }
                )+
            }
        }
    };
}
impl_config_maps!(usize, i64, f64, bool);

macro_rules! impl_config_getters {
    ($($field:ident),+ $(,)?) => {
        paste! {
            impl Config {
                $(
                    #[doc = "Get a " $field " configuration value by key."]
                    pub fn [<get_ $field>](&self, key: &str) -> Result<$field> {
                        self.$field.get(key).copied().ok_or_else(|| Self::key_not_found(key, stringify!($field)))
                    }
                )+
            }
        }
    };
}
impl_config_getters!(usize, i64, f64, bool);

impl Config {
    /// Create a new empty Config instance.
    pub fn new() -> Self {
        Self::default()
    }
    /* ------------------------------------------------------------------
    String values
    ------------------------------------------------------------------ */
    /// Set String configuration values from environment variables.
    /// Fail if any of the keys is not set.
    pub fn set_string_env(&mut self, keys: &[&str]) -> Result<()> {
        for &key in keys {
            let value_str = Self::get_env_string(key)?;
            self.string.insert(key.to_string(), value_str);
        }
        Ok(())
    }
    /// Set a String configuration value from an environment variable if it is
    /// set and not empty. Returns whether a value was set.
    pub fn set_string_env_opt(&mut self, key: &str) -> bool {
        match env::var_os(key) {
            Some(value) if !value.is_empty() => {
                self.string.insert(key.to_string(), value.to_string_lossy().to_string());
                true
            }
            _ => false,
        }
    }
    /// Set a (derived) String configuration value directly.
    /// Any existing value is overridden and returned as an Option.
    pub fn set_string(&mut self, key: &str, value: &str) -> Option<String> {
        self.string.insert(key.to_string(), value.to_string())
    }
    /// Get a String configuration value by key.
    pub fn get_string(&self, key: &str) -> Result<&str> {
        self.string
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Self::key_not_found(key, "String"))
    }
    /// Whether a String value is set for a key.
    pub fn has_string(&self, key: &str) -> bool {
        self.string.contains_key(key)
    }
    /* ------------------------------------------------------------------
    environment variable helpers
    ------------------------------------------------------------------ */
    // get the initial string representation of an environment variable
    fn get_env_string(key: &str) -> Result<String> {
        match env::var_os(key) {
            Some(value) => Ok(value.to_string_lossy().to_string()),
            None => Err(Error::Config {
                key:     key.to_string(),
                message: "environment variable is not set".to_string(),
            }),
        }
    }
    // parse an environment variable string into the desired data type
    fn parse_env_string<T: FromStr>(key: &str, value: &str, data_type: &str) -> Result<T> {
        value.trim().parse::<T>().map_err(|_| Error::Config {
            key:     key.to_string(),
            message: format!("value '{value}' could not be parsed as {data_type}"),
        })
    }
    fn key_not_found(key: &str, data_type: &str) -> Error {
        Error::Config {
            key:     key.to_string(),
            message: format!("not found in {data_type} value map"),
        }
    }
}
