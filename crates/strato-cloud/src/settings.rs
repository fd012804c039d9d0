//! Environment-driven settings.

/// Library settings, resolved once when the global cache is built.
#[derive(Debug, Clone)]
pub struct Settings {
    /// When false, the caches become pass-throughs: every lookup
    /// constructs a fresh object and listings are refetched.
    pub memoize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { memoize: true }
    }
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// `STRATO_NO_CACHE` (`1`, `true`, `yes`) disables memoization. The
    /// same-object guarantee for repeated `(provider, id)` lookups is
    /// waived in that mode.
    pub fn from_env() -> Self {
        let no_cache = std::env::var("STRATO_NO_CACHE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { memoize: !no_cache }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_memoizing() {
        temp_env::with_var_unset("STRATO_NO_CACHE", || {
            assert!(Settings::from_env().memoize);
        });
    }

    #[test]
    fn test_no_cache_values() {
        for value in ["1", "true", "YES", " true "] {
            temp_env::with_var("STRATO_NO_CACHE", Some(value), || {
                assert!(!Settings::from_env().memoize, "value {value:?}");
            });
        }
        temp_env::with_var("STRATO_NO_CACHE", Some("0"), || {
            assert!(Settings::from_env().memoize);
        });
    }
}
