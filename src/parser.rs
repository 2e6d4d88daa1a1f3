use crate::model::Duration;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, column: usize) -> Self {
        Self { kind, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected one of {expected:?}, found {found:?}")]
    ExpectedChars { expected: Vec<char>, found: char },
    #[error("expected a digit, found {found:?}")]
    ExpectedDigit { found: char },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("number out of range")]
    InvalidNumber,
    #[error("unsupported or out of order duration component")]
    InvalidDurationFormat,
}

/// Parser for the hours/minutes subset of ISO-8601 durations: `PT{h}H{m}M`.
///
/// Both components are optional, so `PT`, `PT1H` and `PT30M` are accepted.
/// Minutes are kept as written; `PT10H65M` yields 10 hours and 65 minutes.
#[derive(Debug, Clone)]
pub struct Parser {
    source: Vec<char>,

    start: usize,
    current: usize,

    column: usize,
}

impl Parser {
    pub fn new(source: Vec<char>) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            column: 1,
        }
    }

    pub fn parse_duration(&mut self) -> Result<Duration> {
        self.expect_string("PT")?;
        self.clear();

        let mut hm: [Option<u32>; 2] = [None, None];
        let mut i: usize = 0;

        while self.peek().is_some() {
            let num_str = self.extract_num()?;
            let Ok(num) = num_str.parse::<u32>() else {
                return Err(self.make_error(ParseErrorKind::InvalidNumber));
            };

            let Some(unit) = self.advance() else {
                return Err(self.make_error(ParseErrorKind::UnexpectedEof));
            };

            let n_unit = match unit {
                'H' => 0,
                'M' => 1,
                _ => return Err(self.make_error(ParseErrorKind::InvalidDurationFormat)),
            };

            self.clear();

            if n_unit < i {
                return Err(self.make_error(ParseErrorKind::InvalidDurationFormat));
            }

            hm[n_unit] = Some(num);
            i = n_unit + 1;
        }

        Ok(Duration::new(
            hm[0].unwrap_or_default(),
            hm[1].unwrap_or_default(),
        ))
    }

    #[must_use]
    fn make_error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.column)
    }

    fn extract_num(&mut self) -> Result<String> {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        match self.collect() {
            Some(num) => Ok(num),
            None => match self.peek() {
                Some(found) => Err(self.make_error(ParseErrorKind::ExpectedDigit { found })),
                None => Err(self.make_error(ParseErrorKind::UnexpectedEof)),
            },
        }
    }

    fn expect_string(&mut self, s: &str) -> Result<()> {
        s.chars()
            .map(|c| self.expect_char(c))
            .find(Result::is_err)
            .unwrap_or(Ok(()))
    }

    fn expect_char(&mut self, c: char) -> Result<()> {
        match self.peek() {
            Some(found) if found == c => {
                self.advance();
                Ok(())
            }
            Some(found) => Err(self.make_error(ParseErrorKind::ExpectedChars {
                expected: vec![c],
                found,
            })),
            None => Err(self.make_error(ParseErrorKind::UnexpectedEof)),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.source.get(self.current).cloned();
        if c.is_some() {
            self.current += 1;
            self.column += 1;
        }

        c
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).cloned()
    }

    /// Takes the pending slice, returning `None` when nothing was consumed.
    fn collect(&mut self) -> Option<String> {
        let result = self
            .source
            .get(self.start..self.current)
            .filter(|chars| !chars.is_empty())
            .map(|chars| chars.iter().collect::<String>());

        self.clear();

        result
    }

    fn clear(&mut self) {
        self.start = self.current;
    }
}

/// Parses `text` as an ISO-8601 hours/minutes duration.
pub fn parse_iso_duration(text: &str) -> Result<Duration> {
    Parser::new(text.chars().collect()).parse_duration()
}
