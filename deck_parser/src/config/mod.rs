//! Configuration module for the deck parser
//! Compile-time limits are generated from TOML configuration by build.rs

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{InputErrorAction, LogLevel, LoggingPreferences, ParserPreferences, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("DECK_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("DECK_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::parser::MAX_KEYWORD_NAME_LENGTH <= 8);
        assert!(compile_time::raw_record::MAX_REPEAT_COUNT > 0);
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
    }

    #[test]
    fn test_source_info_names_profile() {
        assert!(build_info::source_info().ends_with(".toml"));
    }
}
