//! Error and success codes for deck parsing
//!
//! Single source of truth for every code the crate emits, together with the
//! metadata (category, severity, recoverability) the error types look up.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
}

/// Raw record tokenization error codes
pub mod raw_record {
    use super::Code;

    pub const UNTERMINATED_QUOTE: Code = Code::new("E020");
    pub const TOO_MANY_TOKENS: Code = Code::new("E021");
    pub const TOKEN_TOO_LONG: Code = Code::new("E022");
}

/// Record and deck parsing error codes
pub mod parse {
    use super::Code;

    pub const INVALID_VALUE: Code = Code::new("E040");
    pub const INVALID_REPEAT_COUNT: Code = Code::new("E041");
    pub const EXTRA_DATA: Code = Code::new("E042");
    pub const UNKNOWN_KEYWORD: Code = Code::new("E043");
    pub const MISSING_RECORDS: Code = Code::new("E044");
    pub const RANDOM_TEXT: Code = Code::new("E045");
    pub const TOO_MANY_KEYWORDS: Code = Code::new("E046");
    pub const TOO_MANY_RECORDS: Code = Code::new("E047");
    pub const UNTERMINATED_RECORD: Code = Code::new("E048");
}

/// Typed value error codes
pub mod value {
    use super::Code;

    pub const TYPE_MISMATCH: Code = Code::new("E060");
    pub const NOT_NUMERIC: Code = Code::new("E061");
}

/// Unit system error codes
pub mod units {
    use super::Code;

    pub const UNKNOWN_DIMENSION: Code = Code::new("E070");
    pub const INVALID_COMPOSITE: Code = Code::new("E071");
    pub const UNKNOWN_UNIT_SYSTEM: Code = Code::new("E072");
}

/// Keyword schema error codes
pub mod schema {
    use super::Code;

    pub const DUPLICATE_ITEM: Code = Code::new("E080");
    pub const DEFAULT_TYPE_MISMATCH: Code = Code::new("E081");
    pub const ALL_ITEM_NOT_LAST: Code = Code::new("E082");
    pub const INVALID_KEYWORD_NAME: Code = Code::new("E083");
    pub const DIMENSION_ON_NON_NUMERIC: Code = Code::new("E084");
    pub const DUPLICATE_KEYWORD: Code = Code::new("E085");
    pub const SCHEMA_FORMAT_ERROR: Code = Code::new("E086");
    pub const DUPLICATE_COLUMN: Code = Code::new("E087");
}

/// Deck container access error codes
pub mod deck {
    use super::Code;

    pub const INDEX_OUT_OF_RANGE: Code = Code::new("E100");
    pub const ITEM_NOT_FOUND: Code = Code::new("E101");
    pub const NOT_DATA_RECORD: Code = Code::new("E102");
    pub const VALUE_NOT_AVAILABLE: Code = Code::new("E103");
    pub const DUPLICATE_ITEM: Code = Code::new("E104");
    pub const KEYWORD_NOT_FOUND: Code = Code::new("E105");
    pub const TYPE_MISMATCH: Code = Code::new("E106");
}

/// Table column error codes
pub mod table {
    use super::Code;

    pub const DEFAULT_NOT_ALLOWED: Code = Code::new("E120");
    pub const ORDER_VIOLATION: Code = Code::new("E121");
    pub const NOT_DOUBLE_ITEM: Code = Code::new("E122");
    pub const COLUMN_NOT_FOUND: Code = Code::new("E123");
    pub const RAGGED_DATA: Code = Code::new("E124");
}

/// Warning codes for input the parser skipped over
pub mod warnings {
    use super::Code;

    pub const UNKNOWN_KEYWORD_SKIPPED: Code = Code::new("W043");
    pub const EXTRA_DATA_IGNORED: Code = Code::new("W042");
    pub const RANDOM_TEXT_SKIPPED: Code = Code::new("W045");
    pub const LARGE_FILE: Code = Code::new("W007");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_READ_SUCCESS: Code = Code::new("I006");
    pub const DECK_PARSE_COMPLETE: Code = Code::new("I010");
    pub const KEYWORD_PARSED: Code = Code::new("I011");
    pub const UNIT_SYSTEM_SELECTED: Code = Code::new("I020");
    pub const SCHEMA_LOADED: Code = Code::new("I030");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn register(registry: &mut HashMap<&'static str, ErrorMetadata>, metadata: ErrorMetadata) {
    registry.insert(metadata.code, metadata);
}

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the input deck attached",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Initialization failure",
                "Check build configuration and environment variables",
            ),
        );

        // File processing errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Deck file not found",
                "Verify the deck path exists and is readable",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Deck file exceeds maximum size limit",
                "Split the deck into smaller include files",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Deck file is not valid UTF-8",
                "Convert the deck to UTF-8 or plain ASCII",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error while reading deck",
                "Check file permissions and disk state",
            ),
        );

        // Raw record errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E020",
                "RawRecord",
                Severity::High,
                false,
                false,
                "Quoted string is not terminated",
                "Close the quote before the end of the record",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E021",
                "RawRecord",
                Severity::High,
                false,
                true,
                "Record has too many tokens",
                "Check for a missing '/' terminator",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E022",
                "RawRecord",
                Severity::Medium,
                false,
                false,
                "Token exceeds maximum length",
                "Shorten the value or check for a missing quote",
            ),
        );

        // Parse errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E040",
                "Parse",
                Severity::High,
                false,
                false,
                "Token cannot be converted to the item type",
                "Check the value against the keyword's item types",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E041",
                "Parse",
                Severity::High,
                false,
                false,
                "Invalid repeat count in star token",
                "Use a positive integer count, for example 3* or 3*1.5",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E042",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Record has more values than the keyword declares",
                "Remove the extra values or check for a missing '/'",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E043",
                "Parse",
                Severity::Medium,
                true,
                false,
                "Keyword is not known to the registry",
                "Register a schema for the keyword or fix its spelling",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E044",
                "Parse",
                Severity::High,
                false,
                false,
                "Keyword ended before all records were read",
                "Add the missing records",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E045",
                "Parse",
                Severity::Low,
                true,
                false,
                "Text outside of any keyword",
                "Comment the text out with '--'",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E046",
                "Parse",
                Severity::High,
                false,
                true,
                "Deck has too many keywords",
                "Raise parser.max_keywords_per_deck in the build profile",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E047",
                "Parse",
                Severity::High,
                false,
                true,
                "Keyword has too many records",
                "Check for a missing terminating '/'",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E048",
                "Parse",
                Severity::High,
                false,
                false,
                "Input ended inside a record",
                "Close the last record with '/'",
            ),
        );

        // Value errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E060",
                "Value",
                Severity::Medium,
                true,
                false,
                "Value requested with the wrong type",
                "Request the value with its stored type",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E061",
                "Value",
                Severity::Medium,
                true,
                false,
                "Numeric operation on a string UDA value",
                "Resolve the UDA to a number first",
            ),
        );

        // Unit errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E070",
                "Units",
                Severity::High,
                false,
                false,
                "Unknown dimension name",
                "Use a measure known to the unit system",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E071",
                "Units",
                Severity::High,
                false,
                false,
                "Dimension with offset used in a composite",
                "Use the absolute measure in composite dimensions",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E072",
                "Units",
                Severity::Medium,
                false,
                false,
                "Unknown unit system name",
                "Use METRIC, FIELD, LAB or PVT-M",
            ),
        );

        // Schema errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E080",
                "Schema",
                Severity::High,
                false,
                true,
                "Duplicate item name in record schema",
                "Give every item of a record a unique name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E081",
                "Schema",
                Severity::High,
                false,
                true,
                "Default value does not match item type",
                "Declare the default with the item's type",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E082",
                "Schema",
                Severity::High,
                false,
                true,
                "ALL-sized item is not the last item of the record",
                "Move the ALL-sized item to the end of the record",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E083",
                "Schema",
                Severity::High,
                false,
                true,
                "Invalid keyword name",
                "Use 1 to 8 characters starting with a letter",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E084",
                "Schema",
                Severity::High,
                false,
                true,
                "Dimension declared on a non-numeric item",
                "Remove the dimension or make the item DOUBLE or UDA",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E085",
                "Schema",
                Severity::High,
                false,
                true,
                "Keyword registered twice",
                "Remove the duplicate keyword schema",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E086",
                "Schema",
                Severity::High,
                false,
                true,
                "Keyword schema document could not be read",
                "Validate the schema JSON",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E087",
                "Schema",
                Severity::High,
                false,
                true,
                "Duplicate column name in table schema",
                "Give every column a unique name",
            ),
        );

        // Deck access errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E100",
                "Deck",
                Severity::Medium,
                true,
                false,
                "Index outside the container",
                "Check size() before indexing",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E101",
                "Deck",
                Severity::Medium,
                true,
                false,
                "Record has no item with that name",
                "Check the item name against the keyword schema",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E102",
                "Deck",
                Severity::Medium,
                true,
                false,
                "Record is not a single-item data record",
                "Access the item by name instead",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E103",
                "Deck",
                Severity::Medium,
                true,
                false,
                "Slot is defaulted without a default value",
                "Check has_value() before reading",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E104",
                "Deck",
                Severity::Medium,
                false,
                false,
                "Item name already present in record",
                "Add each item once",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E105",
                "Deck",
                Severity::Medium,
                true,
                false,
                "Deck has no such keyword occurrence",
                "Check has_keyword() or count() first",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E106",
                "Deck",
                Severity::Medium,
                true,
                false,
                "Item accessed with the wrong type",
                "Access the item with its declared type",
            ),
        );

        // Table errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E120",
                "Table",
                Severity::Medium,
                false,
                false,
                "Column does not accept defaulted values here",
                "Provide explicit values for this column",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E121",
                "Table",
                Severity::Medium,
                false,
                false,
                "Column values violate the declared order",
                "Sort the column values",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E122",
                "Table",
                Severity::Medium,
                false,
                false,
                "Table column requires a DOUBLE item",
                "Declare the table item as DOUBLE",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E123",
                "Table",
                Severity::Medium,
                true,
                false,
                "Table schema has no such column",
                "Check the column name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E124",
                "Table",
                Severity::Medium,
                false,
                false,
                "Table data does not line up with its columns",
                "Give every table row one value per column",
            ),
        );

        registry
    })
}

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

/// Get complete metadata for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_constant_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            raw_record::UNTERMINATED_QUOTE,
            raw_record::TOO_MANY_TOKENS,
            raw_record::TOKEN_TOO_LONG,
            parse::INVALID_VALUE,
            parse::INVALID_REPEAT_COUNT,
            parse::EXTRA_DATA,
            parse::UNKNOWN_KEYWORD,
            parse::MISSING_RECORDS,
            parse::RANDOM_TEXT,
            parse::TOO_MANY_KEYWORDS,
            parse::TOO_MANY_RECORDS,
            parse::UNTERMINATED_RECORD,
            value::TYPE_MISMATCH,
            value::NOT_NUMERIC,
            units::UNKNOWN_DIMENSION,
            units::INVALID_COMPOSITE,
            units::UNKNOWN_UNIT_SYSTEM,
            schema::DUPLICATE_ITEM,
            schema::DEFAULT_TYPE_MISMATCH,
            schema::ALL_ITEM_NOT_LAST,
            schema::INVALID_KEYWORD_NAME,
            schema::DIMENSION_ON_NON_NUMERIC,
            schema::DUPLICATE_KEYWORD,
            schema::SCHEMA_FORMAT_ERROR,
            schema::DUPLICATE_COLUMN,
            deck::INDEX_OUT_OF_RANGE,
            deck::ITEM_NOT_FOUND,
            deck::NOT_DATA_RECORD,
            deck::VALUE_NOT_AVAILABLE,
            deck::DUPLICATE_ITEM,
            deck::KEYWORD_NOT_FOUND,
            deck::TYPE_MISMATCH,
            table::DEFAULT_NOT_ALLOWED,
            table::ORDER_VIOLATION,
            table::NOT_DOUBLE_ITEM,
            table::COLUMN_NOT_FOUND,
            table::RAGGED_DATA,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_lookup_defaults_for_unknown_code() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category(parse::EXTRA_DATA.as_str()), "Parse");
        assert!(is_recoverable(parse::EXTRA_DATA.as_str()));
        assert!(requires_halt(raw_record::TOO_MANY_TOKENS.as_str()));
        assert_eq!(get_severity(system::INTERNAL_ERROR.as_str()), Severity::Critical);
    }
}
