//! Deck text parser
//!
//! Reads deck text line by line. A line whose first token starts in column 1
//! and is a valid keyword name opens a keyword; the keyword's schema then
//! decides how many `/`-terminated records follow. `--` starts a comment that
//! runs to the end of the line unless it sits inside quotes.

use super::error::{ParseError, ParseResult};
use super::record_parser::parse_record_with;
use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::compile_time::parser::{MAX_KEYWORDS_PER_DECK, MAX_RECORDS_PER_KEYWORD};
use crate::config::{InputErrorAction, ParserPreferences};
use crate::deck::{Deck, DeckKeyword};
use crate::logging::{self, codes};
use crate::raw::RawRecord;
use crate::schema::{is_valid_keyword_name, KeywordRegistry, KeywordSize, ParserKeyword, SchemaError};
use crate::units::UnitSystem;
use crate::utils::{KeywordLocation, Position, Span};
use crate::{log_debug, log_error, log_info, log_success, log_warning};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const MEMORY_FILENAME: &str = "<memory>";
const END_KEYWORD: &str = "END";

// ============================================================================
// PARSER
// ============================================================================

/// Keyword registry plus the policy for irregular input
#[derive(Debug, Clone)]
pub struct Parser {
    registry: KeywordRegistry,
    preferences: ParserPreferences,
}

impl Parser {
    /// Parser knowing only the unit-system and section keywords
    pub fn new() -> Self {
        Self::with_registry(KeywordRegistry::with_builtin_keywords())
    }

    pub fn with_registry(registry: KeywordRegistry) -> Self {
        Self {
            registry,
            preferences: ParserPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: ParserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut KeywordRegistry {
        &mut self.registry
    }

    pub fn preferences(&self) -> &ParserPreferences {
        &self.preferences
    }

    pub fn parse_string(&self, text: &str) -> ParseResult<Deck> {
        self.parse_text(text, MEMORY_FILENAME)
    }

    /// Read and parse a deck file, subject to the compile-time size limits
    pub fn parse_file(&self, path: &Path) -> ParseResult<Deck> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = match e.kind() {
                ErrorKind::NotFound => ParseError::FileNotFound {
                    path: path.display().to_string(),
                },
                _ => ParseError::io(path, &e),
            };
            log_error!(error.error_code(), "Cannot open deck file",
                "path" => path.display(),
                "error" => e
            );
            error
        })?;

        let size = metadata.len();
        if size > MAX_FILE_SIZE {
            let error = ParseError::FileTooLarge {
                path: path.display().to_string(),
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "Deck file exceeds maximum size",
                "path" => path.display(),
                "size" => size,
                "max_size" => MAX_FILE_SIZE
            );
            return Err(error);
        }

        if size > LARGE_FILE_THRESHOLD {
            log_warning!(code = codes::warnings::LARGE_FILE, "Large deck file",
                "path" => path.display(),
                "size" => size
            );
        }

        let bytes = fs::read(path).map_err(|e| ParseError::io(path, &e))?;
        let text = String::from_utf8(bytes).map_err(|_| ParseError::InvalidEncoding {
            path: path.display().to_string(),
        })?;

        log_success!(codes::success::FILE_READ_SUCCESS, "Deck file read",
            "path" => path.display(),
            "bytes" => size
        );

        let filename = path.display().to_string();
        logging::with_file_context(path.to_path_buf(), || self.parse_text(&text, &filename))
    }

    fn parse_text(&self, text: &str, filename: &str) -> ParseResult<Deck> {
        log_info!("Parsing deck", "file" => filename);

        let mut reader = DeckReader::new(self, text, filename);
        match reader.read() {
            Ok(()) => {
                log_success!(codes::success::DECK_PARSE_COMPLETE, "Deck parsed",
                    "file" => filename,
                    "keywords" => reader.deck.size()
                );
                Ok(reader.deck)
            }
            Err(e) => {
                log_error!(e.error_code(), &e.to_string(), span = reader.current_span());
                Err(e)
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LINE SPLITTING
// ============================================================================

#[derive(Debug, Clone)]
struct Line<'a> {
    number: u32,
    start: Position,
    /// Line content with comments and the carriage return removed
    text: &'a str,
}

impl Line<'_> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn first_token(&self) -> Option<&str> {
        if self.text.starts_with(char::is_whitespace) {
            return None;
        }
        self.text.split_whitespace().next()
    }
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for (index, raw) in text.split('\n').enumerate() {
        let number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push(Line {
            number,
            start: Position::line_start(offset, number),
            text: strip_comment(content),
        });
        offset += raw.len() + 1;
    }

    lines
}

fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut previous_dash = false;

    for (index, ch) in line.char_indices() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == '-' && previous_dash => return &line[..index - 1],
            None => {}
        }
        previous_dash = quote.is_none() && ch == '-';
    }

    line
}

/// Byte index of the first `/`, or of the keyword's alternate terminator,
/// outside quotes
fn find_terminator(line: &str, alternate: Option<&str>) -> Option<usize> {
    let mut quote: Option<char> = None;

    for (index, ch) in line.char_indices() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == '/' => return Some(index),
            None if alternate.is_some_and(|t| !t.is_empty() && line[index..].starts_with(t)) => {
                return Some(index)
            }
            None => {}
        }
    }

    None
}

// ============================================================================
// DECK READER
// ============================================================================

struct DeckReader<'p, 't> {
    parser: &'p Parser,
    lines: Vec<Line<'t>>,
    index: usize,
    filename: &'t str,
    deck: Deck,
}

impl<'p, 't> DeckReader<'p, 't> {
    fn new(parser: &'p Parser, text: &'t str, filename: &'t str) -> Self {
        Self {
            parser,
            lines: split_lines(text),
            index: 0,
            filename,
            deck: Deck::new(),
        }
    }

    fn current_span(&self) -> Span {
        let index = self.index.min(self.lines.len().saturating_sub(1));
        self.lines
            .get(index)
            .map(|line| Span::covering(line.start, line.text))
            .unwrap_or_else(Span::dummy)
    }

    /// Keyword name if the line opens a keyword
    fn header_name(&self, line: &Line<'t>) -> Option<&'t str> {
        let text: &'t str = line.text;
        if text.starts_with(char::is_whitespace) {
            return None;
        }
        let name = text.split_whitespace().next()?;
        if !is_valid_keyword_name(name) {
            return None;
        }
        if self.parser.registry.contains(name) || find_terminator(text, None).is_none() {
            Some(name)
        } else {
            None
        }
    }

    fn is_registered_header(&self, line: &Line<'t>) -> bool {
        line.first_token()
            .is_some_and(|name| self.parser.registry.contains(name))
    }

    fn read(&mut self) -> ParseResult<()> {
        while let Some(line) = self.lines.get(self.index).cloned() {
            if line.is_blank() {
                self.index += 1;
                continue;
            }

            let Some(name) = self.header_name(&line) else {
                self.random_text(&line)?;
                self.index += 1;
                continue;
            };

            let location = KeywordLocation::new(name, self.filename, line.number);
            self.index += 1;

            let parser = self.parser;
            match parser.registry.get(name) {
                Some(schema) => {
                    self.read_keyword(schema, location)?;
                    if name == END_KEYWORD {
                        break;
                    }
                }
                None => self.unknown_keyword(location)?,
            }
        }

        Ok(())
    }

    fn random_text(&self, line: &Line<'t>) -> ParseResult<()> {
        let text = line.text.trim();
        match self.parser.preferences.random_text {
            InputErrorAction::Throw => Err(ParseError::RandomText {
                text: text.to_string(),
                filename: self.filename.to_string(),
                line: line.number,
            }),
            InputErrorAction::Warn => {
                log_warning!(code = codes::warnings::RANDOM_TEXT_SKIPPED, "Skipping text outside a keyword",
                    "text" => text,
                    "line" => line.number
                );
                Ok(())
            }
            InputErrorAction::Ignore => Ok(()),
        }
    }

    /// Skip an unknown keyword's body up to the next registered keyword
    fn unknown_keyword(&mut self, location: KeywordLocation) -> ParseResult<()> {
        match self.parser.preferences.unknown_keyword {
            InputErrorAction::Throw => {
                return Err(ParseError::UnknownKeyword {
                    keyword: location.keyword.clone(),
                    location,
                })
            }
            InputErrorAction::Warn => {
                log_warning!(code = codes::warnings::UNKNOWN_KEYWORD_SKIPPED, "Skipping unknown keyword",
                    "keyword" => location.keyword,
                    "line" => location.line
                );
            }
            InputErrorAction::Ignore => {}
        }

        while let Some(line) = self.lines.get(self.index) {
            if self.is_registered_header(line) {
                break;
            }
            self.index += 1;
        }

        Ok(())
    }

    fn read_keyword(&mut self, schema: &ParserKeyword, location: KeywordLocation) -> ParseResult<()> {
        if self.deck.size() >= MAX_KEYWORDS_PER_DECK {
            return Err(ParseError::TooManyKeywords {
                max: MAX_KEYWORDS_PER_DECK,
            });
        }

        if let Some(unit_type) = schema.unit_system_switch() {
            self.deck.set_active_unit_system(UnitSystem::from_type(unit_type));
            log_success!(codes::success::UNIT_SYSTEM_SELECTED, "Unit system selected",
                "unit_system" => unit_type.as_str(),
                "line" => location.line
            );
        }

        let mut keyword = DeckKeyword::from_schema(schema, location.clone());

        match schema.size() {
            KeywordSize::Fixed(expected) => {
                for found in 0..expected {
                    let Some(text) = self.collect_record(&location, schema.terminator())? else {
                        return Err(ParseError::MissingRecords {
                            expected,
                            found,
                            location,
                        });
                    };
                    let raw = RawRecord::from_text(&text, location.clone())?;
                    keyword.add_record(self.parse_raw(schema, found, raw)?);
                }
            }
            KeywordSize::SlashTerminated => loop {
                let Some(text) = self.collect_record(&location, schema.terminator())? else {
                    log_warning!("Keyword ended without a closing '/'",
                        "keyword" => location.keyword,
                        "line" => location.line
                    );
                    break;
                };
                let raw = RawRecord::from_text(&text, location.clone())?;
                if raw.is_empty() {
                    break;
                }
                if keyword.size() >= MAX_RECORDS_PER_KEYWORD {
                    return Err(ParseError::TooManyRecords {
                        max: MAX_RECORDS_PER_KEYWORD,
                        location,
                    });
                }
                let index = keyword.size();
                keyword.add_record(self.parse_raw(schema, index, raw)?);
            },
        }

        if self.parser.preferences.log_keyword_details {
            log_success!(codes::success::KEYWORD_PARSED, "Keyword parsed",
                "keyword" => keyword.name(),
                "records" => keyword.size(),
                "line" => location.line
            );
        }
        log_debug!("Keyword added", "keyword" => keyword.name(), "is_data" => keyword.is_data_keyword());

        self.deck.add_keyword(keyword);
        Ok(())
    }

    fn parse_raw(
        &self,
        schema: &ParserKeyword,
        index: usize,
        raw: RawRecord,
    ) -> ParseResult<crate::deck::DeckRecord> {
        let record_schema = schema
            .get_record(index)
            .ok_or_else(|| SchemaError::MissingRecordSchema {
                keyword: schema.name().to_string(),
            })?;
        parse_record_with(
            record_schema,
            raw,
            self.deck.active_unit_system(),
            self.deck.default_unit_system(),
            self.parser.preferences.extra_data,
        )
    }

    /// Text of the next record up to its terminator, or `None` when a keyword
    /// header or the end of input comes first
    fn collect_record(
        &mut self,
        location: &KeywordLocation,
        terminator: Option<&str>,
    ) -> ParseResult<Option<String>> {
        let mut text = String::new();
        let mut started = false;

        while let Some(line) = self.lines.get(self.index) {
            if !started {
                if line.is_blank() {
                    self.index += 1;
                    continue;
                }
                if self.is_registered_header(line) {
                    return Ok(None);
                }
                started = true;
            }

            let content = line.text;
            self.index += 1;
            match find_terminator(content, terminator) {
                Some(end) => {
                    text.push_str(&content[..end]);
                    return Ok(Some(text));
                }
                None => {
                    text.push_str(content);
                    text.push(' ');
                }
            }
        }

        if started {
            Err(ParseError::UnterminatedRecord {
                location: location.clone(),
            })
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogEvent, LogLevel, LoggingService, MemoryLogger};
    use crate::units::UnitType;
    use crate::value::{UDAValue, ValueStatus};
    use assert_matches::assert_matches;
    use std::io::Write;
    use std::sync::{Arc, OnceLock};
    use tempfile::NamedTempFile;

    const SCHEMA_JSON: &str = r#"[
        {
            "name": "WCONPROD",
            "size": "slash_terminated",
            "records": [[
                {"name": "WELL", "value_type": "STRING"},
                {"name": "STATUS", "value_type": "STRING", "default": "OPEN"},
                {"name": "ORAT", "value_type": "UDA", "dimension": "LiquidSurfaceVolume/Time"},
                {"name": "BHP", "value_type": "DOUBLE", "default": 1, "dimension": "Pressure"}
            ]]
        },
        {
            "name": "PORO",
            "size": {"fixed": 1},
            "is_data_keyword": true,
            "records": [[{"name": "DATA", "value_type": "DOUBLE", "size": "ALL"}]]
        },
        {
            "name": "LINES",
            "size": "slash_terminated",
            "terminator": "ENDREC",
            "records": [[
                {"name": "A", "value_type": "INT"},
                {"name": "B", "value_type": "INT"}
            ]]
        },
        {
            "name": "DIMENS",
            "size": {"fixed": 1},
            "records": [[
                {"name": "NX", "value_type": "INT"},
                {"name": "NY", "value_type": "INT"},
                {"name": "NZ", "value_type": "INT"}
            ]]
        }
    ]"#;

    /// Process-wide memory logger; tests run in parallel, so assertions
    /// filter events by context unique to each test
    fn memory_logger() -> Arc<MemoryLogger> {
        static LOGGER: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
        LOGGER
            .get_or_init(|| {
                let logger = Arc::new(MemoryLogger::new());
                let service = LoggingService::new(logger.clone(), LogLevel::Warning);
                let _ = logging::init_global_logging_with_service(Arc::new(service));
                logger
            })
            .clone()
    }

    fn has_context(events: &[LogEvent], key: &str, value: &str) -> bool {
        events
            .iter()
            .any(|e| e.context.get(key).map(String::as_str) == Some(value))
    }

    fn parser(preferences: ParserPreferences) -> Parser {
        let mut registry = KeywordRegistry::with_builtin_keywords();
        registry.extend_from_json_str(SCHEMA_JSON).unwrap();
        Parser::with_registry(registry).with_preferences(preferences)
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("PORO -- porosity"), "PORO ");
        assert_eq!(strip_comment("'A--B' 1"), "'A--B' 1");
        assert_eq!(strip_comment("-1 -2"), "-1 -2");
        assert_eq!(strip_comment("--"), "");
    }

    #[test]
    fn test_find_terminator() {
        assert_eq!(find_terminator("1 2 /", None), Some(4));
        assert_eq!(find_terminator("'A/B' /", None), Some(6));
        assert_eq!(find_terminator("'A/B'", None), None);
        assert_eq!(find_terminator("1 2 ENDUDQ", Some("ENDUDQ")), Some(4));
        assert_eq!(find_terminator("'ENDUDQ' 1 /", Some("ENDUDQ")), Some(11));
        assert_eq!(find_terminator("1 2 ENDUDQ", None), None);
    }

    #[test]
    fn test_parse_deck() {
        let text = "\
RUNSPEC
DIMENS
  10 20 3 /

GRID
-- porosity for every cell
PORO
  0.25 2*0.3
  1.0D-1 /

SCHEDULE
WCONPROD
  'OP 1' 1* 86400 /
  OP2 SHUT 2* /
/
END
ignored after END
";
        let deck = parser(ParserPreferences::strict()).parse_string(text).unwrap();
        assert_eq!(deck.size(), 7);
        assert!(deck.has_keyword("GRID"));

        let dimens = deck.get_keyword("DIMENS", 0).unwrap();
        assert_eq!(dimens.location().line, 2);
        assert_eq!(dimens.location().filename, "<memory>");
        let record = dimens.get_record(0).unwrap();
        assert_eq!(record.get_item("NY").and_then(|i| i.get::<i32>(0)), Ok(20));

        let poro = deck.get_keyword("PORO", 0).unwrap();
        assert!(poro.is_data_keyword());
        assert_eq!(poro.get_si_double_data(), Ok(vec![0.25, 0.3, 0.3, 0.1]));

        let wconprod = deck.get_keyword("WCONPROD", 0).unwrap();
        assert_eq!(wconprod.size(), 2);
        let first = wconprod.get_record(0).unwrap();
        assert_eq!(first.get_item("WELL").and_then(|i| i.get::<String>(0)), Ok("OP 1".to_string()));
        assert_eq!(
            first.get_item("STATUS").and_then(|i| i.value_status(0)),
            Ok(ValueStatus::ValidDefault)
        );
        assert_eq!(
            first.get_item("ORAT").and_then(|i| i.get::<UDAValue>(0)),
            Ok(UDAValue::from(86400.0))
        );
        let second = wconprod.get_record(1).unwrap();
        assert_eq!(second.get_item("STATUS").and_then(|i| i.get::<String>(0)), Ok("SHUT".to_string()));
        assert_eq!(
            second.get_item("ORAT").and_then(|i| i.value_status(0)),
            Ok(ValueStatus::EmptyDefault)
        );
        assert_eq!(second.get_item("BHP").and_then(|i| i.get_si_double(0)), Ok(1e5));
    }

    #[test]
    fn test_alternate_record_terminator() {
        let text = "LINES\n  1 2 ENDREC\n  3\n  4 /\nENDREC\nDIMENS\n 1 1 1 /\n";
        let deck = parser(ParserPreferences::strict()).parse_string(text).unwrap();
        assert_eq!(deck.size(), 2);

        let lines = deck.get_keyword("LINES", 0).unwrap();
        assert_eq!(lines.size(), 2);
        let second = lines.get_record(1).unwrap();
        assert_eq!(second.get_item("A").and_then(|i| i.get::<i32>(0)), Ok(3));
        assert_eq!(second.get_item("B").and_then(|i| i.get::<i32>(0)), Ok(4));

        // Written back with '/', which every keyword accepts
        let again = parser(ParserPreferences::strict()).parse_string(&deck.to_string()).unwrap();
        assert_eq!(again.get_keyword("LINES", 0).map(|k| k.size()), Ok(2));
    }

    #[test]
    fn test_unit_system_switch() {
        let text = "FIELD\n\nWCONPROD\n  OP1 OPEN 1000 500 /\n/\n";
        let deck = parser(ParserPreferences::strict()).parse_string(text).unwrap();
        assert_eq!(deck.active_unit_system().unit_type(), UnitType::Field);

        let record = deck.get_keyword("WCONPROD", 0).unwrap().get_record(0).unwrap();
        let bhp = record.get_item("BHP").and_then(|i| i.get_si_double(0)).unwrap();
        assert!((bhp - 500.0 * 6894.757293168361).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_keyword_policy() {
        let text = "FOOBAR\n 1 2 3 /\nDIMENS\n 1 1 1 /\n";

        assert_matches!(
            parser(ParserPreferences::strict()).parse_string(text),
            Err(ParseError::UnknownKeyword { keyword, .. }) if keyword == "FOOBAR"
        );

        let deck = parser(ParserPreferences::permissive()).parse_string(text).unwrap();
        assert_eq!(deck.size(), 1);
        assert!(deck.has_keyword("DIMENS"));
    }

    #[test]
    fn test_random_text_policy() {
        let text = "  stray 1 2 /\nDIMENS\n 1 1 1 /\n";

        assert_matches!(
            parser(ParserPreferences::strict()).parse_string(text),
            Err(ParseError::RandomText { line: 1, .. })
        );

        let mut preferences = ParserPreferences::strict();
        preferences.random_text = InputErrorAction::Ignore;
        let deck = parser(preferences).parse_string(text).unwrap();
        assert_eq!(deck.size(), 1);
    }

    #[test]
    fn test_missing_and_unterminated_records() {
        assert_matches!(
            parser(ParserPreferences::strict()).parse_string("DIMENS\nGRID\n"),
            Err(ParseError::MissingRecords { expected: 1, found: 0, .. })
        );
        assert_matches!(
            parser(ParserPreferences::strict()).parse_string("DIMENS\n 1 2 3\n"),
            Err(ParseError::UnterminatedRecord { .. })
        );
    }

    #[test]
    fn test_slash_terminated_keyword_at_end_of_input() {
        let text = "WCONPROD\n  OP1 /\n";
        let deck = parser(ParserPreferences::strict()).parse_string(text).unwrap();
        assert_eq!(deck.get_keyword("WCONPROD", 0).map(|k| k.size()), Ok(1));
    }

    #[test]
    fn test_extra_data_follows_preferences() {
        let text = "DIMENS\n 1 2 3 4 /\n";
        assert_matches!(
            parser(ParserPreferences::strict()).parse_string(text),
            Err(ParseError::ExtraData { count: 1, .. })
        );
        assert!(parser(ParserPreferences::permissive()).parse_string(text).is_ok());
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "DIMENS\r\n 5 5 1 /\r\n").unwrap();

        let deck = parser(ParserPreferences::strict())
            .parse_file(file.path())
            .unwrap();
        let dimens = deck.get_keyword("DIMENS", 0).unwrap();
        assert_eq!(dimens.location().filename, file.path().display().to_string());
        assert_eq!(
            dimens.get_record(0).and_then(|r| r.get_item("NZ")).and_then(|i| i.get::<i32>(0)),
            Ok(1)
        );
    }

    #[test]
    fn test_warn_policies_emit_coded_warnings() {
        let logger = memory_logger();
        let text = "  stray words here\nZZUNKNWN\n 1 /\n\n\n\n\n\n\n\nDIMENS\n 7 8 9 10 /\n";

        let deck = parser(ParserPreferences::permissive()).parse_string(text).unwrap();
        assert_eq!(deck.size(), 1);

        let random = logger.get_events_with_code(codes::warnings::RANDOM_TEXT_SKIPPED);
        assert!(has_context(&random, "text", "stray words here"));

        let unknown = logger.get_events_with_code(codes::warnings::UNKNOWN_KEYWORD_SKIPPED);
        assert!(has_context(&unknown, "keyword", "ZZUNKNWN"));

        let extra = logger.get_events_with_code(codes::warnings::EXTRA_DATA_IGNORED);
        assert!(has_context(&extra, "location", "DIMENS in <memory> line 11"));
        assert!(extra.iter().all(|e| e.is_warning()));

        // Ignore stays silent
        let quiet = ParserPreferences {
            random_text: InputErrorAction::Ignore,
            ..ParserPreferences::permissive()
        };
        parser(quiet).parse_string("  silent stray text\n").unwrap();
        let random = logger.get_events_with_code(codes::warnings::RANDOM_TEXT_SKIPPED);
        assert!(!has_context(&random, "text", "silent stray text"));
    }

    #[test]
    fn test_parse_file_collects_warnings_per_file() {
        let _logger = memory_logger();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  notes for the collector\nDIMENS\n 2 2 2 /\n").unwrap();

        parser(ParserPreferences::permissive())
            .parse_file(file.path())
            .unwrap();

        let events = logging::get_file_events(file.path());
        assert!(events
            .iter()
            .any(|e| e.code == codes::warnings::RANDOM_TEXT_SKIPPED));
        assert!(has_context(&events, "text", "notes for the collector"));
        assert!(logging::get_file_errors(file.path()).is_empty());
    }

    #[test]
    fn test_parse_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("MISSING.DATA");
        assert_matches!(
            Parser::new().parse_file(&missing),
            Err(ParseError::FileNotFound { .. })
        );

        let binary = dir.path().join("BINARY.DATA");
        fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert_matches!(
            Parser::new().parse_file(&binary),
            Err(ParseError::InvalidEncoding { .. })
        );
    }
}
