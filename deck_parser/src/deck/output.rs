//! Text writer producing deck grammar
//!
//! Consecutive defaulted values are stashed and written as a single `N*`
//! token once an explicit value follows. Defaults still stashed when a
//! record ends are dropped, since the parser restores trailing defaults.

/// Values per output line before wrapping
const VALUES_PER_LINE: usize = 16;
const RECORD_INDENT: &str = "  ";

#[derive(Debug, Clone, Default)]
pub struct DeckOutput {
    buffer: String,
    stashed_defaults: usize,
    record_values: usize,
    line_values: usize,
}

impl DeckOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_keyword(&mut self, name: &str) {
        self.buffer.push_str(name);
        self.buffer.push('\n');
    }

    pub fn end_keyword(&mut self, add_slash: bool) {
        if add_slash {
            self.buffer.push_str("/\n");
        }
        self.buffer.push('\n');
    }

    pub fn start_record(&mut self) {
        self.buffer.push_str(RECORD_INDENT);
        self.stashed_defaults = 0;
        self.record_values = 0;
        self.line_values = 0;
    }

    /// Close the record. A record with only defaults keeps them so that it
    /// is not read back as an empty record.
    pub fn end_record(&mut self) {
        if self.record_values == 0 {
            self.flush_defaults();
        }
        self.stashed_defaults = 0;

        if self.record_values > 0 {
            self.buffer.push(' ');
        }
        self.buffer.push_str("/\n");
    }

    pub fn stash_default(&mut self) {
        self.stashed_defaults += 1;
    }

    /// Write stashed defaults now as one `N*` token
    pub fn flush_defaults(&mut self) {
        if self.stashed_defaults > 0 {
            let token = format!("{}*", self.stashed_defaults);
            self.stashed_defaults = 0;
            self.push_token(&token);
        }
    }

    pub fn write_value(&mut self, token: &str) {
        self.flush_defaults();
        self.push_token(token);
    }

    fn push_token(&mut self, token: &str) {
        if self.line_values == VALUES_PER_LINE {
            self.buffer.push('\n');
            self.buffer.push_str(RECORD_INDENT);
            self.line_values = 0;
        } else if self.line_values > 0 {
            self.buffer.push(' ');
        }
        self.buffer.push_str(token);
        self.line_values += 1;
        self.record_values += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_collapse_between_values() {
        let mut out = DeckOutput::new();
        out.start_keyword("WCONPROD");
        out.start_record();
        out.write_value("'OP1'");
        out.stash_default();
        out.stash_default();
        out.write_value("100.0");
        out.stash_default();
        out.end_record();
        out.end_keyword(true);

        assert_eq!(out.as_str(), "WCONPROD\n  'OP1' 2* 100.0 /\n/\n\n");
    }

    #[test]
    fn test_all_default_record_is_written() {
        let mut out = DeckOutput::new();
        out.start_record();
        out.stash_default();
        out.stash_default();
        out.stash_default();
        out.end_record();
        assert_eq!(out.as_str(), "  3* /\n");
    }

    #[test]
    fn test_empty_record() {
        let mut out = DeckOutput::new();
        out.start_record();
        out.end_record();
        assert_eq!(out.into_string(), "  /\n");
    }

    #[test]
    fn test_long_records_wrap() {
        let mut out = DeckOutput::new();
        out.start_record();
        for value in 0..20 {
            out.write_value(&value.to_string());
        }
        out.end_record();

        let lines: Vec<&str> = out.as_str().lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split_whitespace().count(), VALUES_PER_LINE);
        assert_eq!(lines[1], "  16 17 18 19 /");
    }
}
