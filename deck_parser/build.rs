// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    raw_record: RawRecordLimits,
    parser: ParserLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
}

#[derive(serde::Deserialize)]
struct RawRecordLimits {
    max_tokens_per_record: usize,
    max_token_length: usize,
    max_repeat_count: usize,
}

#[derive(serde::Deserialize)]
struct ParserLimits {
    max_keywords_per_deck: usize,
    max_records_per_keyword: usize,
    max_keyword_name_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DECK_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=DECK_CONFIG_DIR");

    let profile = env::var("DECK_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("DECK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the deck_parser directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 4_000_000_000;
    const ABSOLUTE_MAX_TOKEN_LENGTH: usize = 1_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMIT: max_file_size exceeds absolute maximum");
    }

    if config.raw_record.max_token_length > ABSOLUTE_MAX_TOKEN_LENGTH {
        panic!("LIMIT: max_token_length exceeds absolute maximum");
    }

    if config.raw_record.max_repeat_count == 0 {
        panic!("LIMIT: max_repeat_count must be positive");
    }

    // Deck keyword names are at most eight characters wide
    if config.parser.max_keyword_name_length == 0 || config.parser.max_keyword_name_length > 8 {
        panic!("LIMIT: max_keyword_name_length must be in 1..=8");
    }

    if profile == "production" && config.logging.max_log_message_length > 10_000 {
        panic!("PRODUCTION: max_log_message_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
    }}

    pub mod raw_record {{
        pub const MAX_TOKENS_PER_RECORD: usize = {};
        pub const MAX_TOKEN_LENGTH: usize = {};
        pub const MAX_REPEAT_COUNT: usize = {};
    }}

    pub mod parser {{
        pub const MAX_KEYWORDS_PER_DECK: usize = {};
        pub const MAX_RECORDS_PER_KEYWORD: usize = {};
        pub const MAX_KEYWORD_NAME_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        // Raw Record
        config.raw_record.max_tokens_per_record,
        config.raw_record.max_token_length,
        config.raw_record.max_repeat_count,
        // Parser
        config.parser.max_keywords_per_deck,
        config.parser.max_records_per_keyword,
        config.parser.max_keyword_name_length,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
    );

    fs::write(output_path, constants_code).unwrap();
}
