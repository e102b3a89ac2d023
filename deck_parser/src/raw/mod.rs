//! Raw records: the tokens of one record before any typing
//!
//! Tokens are split on whitespace. A quoted section (`'...'` or `"..."`) is
//! kept inside its token together with the quotes, so `'NEW WELL'` and
//! `3*'A B'` are single tokens. The first unquoted `/` ends the record.
//! Repeat tokens such as `3*` or `2*1.5` are left unexpanded here.

use crate::config::compile_time::raw_record::{MAX_TOKENS_PER_RECORD, MAX_TOKEN_LENGTH};
use crate::parser::error::{ParseError, ParseResult};
use crate::utils::KeywordLocation;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    tokens: VecDeque<String>,
    location: KeywordLocation,
}

impl RawRecord {
    pub fn from_text(text: &str, location: KeywordLocation) -> ParseResult<Self> {
        let mut tokens = VecDeque::new();
        let mut current = String::new();
        let mut quote: Option<char> = None;

        for ch in text.chars() {
            match quote {
                Some(open) => {
                    current.push(ch);
                    if ch == open {
                        quote = None;
                    }
                }
                None if ch == '/' => break,
                None if ch.is_whitespace() => {
                    if !current.is_empty() {
                        push_token(&mut tokens, std::mem::take(&mut current), &location)?;
                    }
                }
                None => {
                    if ch == '\'' || ch == '"' {
                        quote = Some(ch);
                    }
                    current.push(ch);
                }
            }
        }

        if quote.is_some() {
            return Err(ParseError::UnterminatedQuote { location });
        }

        if !current.is_empty() {
            push_token(&mut tokens, current, &location)?;
        }

        Ok(Self { tokens, location })
    }

    pub fn from_tokens<I, S>(tokens: I, location: KeywordLocation) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            location,
        }
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Push `count` repetitions back as a single repeat token
    pub fn prepend(&mut self, count: usize, token: &str) {
        if count == 0 {
            return;
        }
        if token.is_empty() {
            self.tokens.push_front(format!("{}*", count));
        } else {
            self.tokens.push_front(format!("{}*{}", count, token));
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn location(&self) -> &KeywordLocation {
        &self.location
    }
}

fn push_token(
    tokens: &mut VecDeque<String>,
    token: String,
    location: &KeywordLocation,
) -> ParseResult<()> {
    let length = token.chars().count();
    if length > MAX_TOKEN_LENGTH {
        return Err(ParseError::TokenTooLong {
            length,
            max: MAX_TOKEN_LENGTH,
            location: location.clone(),
        });
    }
    if tokens.len() >= MAX_TOKENS_PER_RECORD {
        return Err(ParseError::TooManyTokens {
            max: MAX_TOKENS_PER_RECORD,
            location: location.clone(),
        });
    }
    tokens.push_back(token);
    Ok(())
}
