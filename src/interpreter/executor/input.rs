//! Integer token reader backing `leia`

use std::collections::VecDeque;
use std::io::BufRead;

use super::super::errors::{ExecResult, RuntimeError};

/// Splits an input stream into whitespace-delimited tokens
///
/// Lines are pulled from the underlying reader only when the buffered tokens
/// run out, so a read blocks until the next line is available.
pub struct InputTokens<'io> {
    reader: &'io mut dyn BufRead,
    pending: VecDeque<String>,
}

impl<'io> InputTokens<'io> {
    pub fn new(reader: &'io mut dyn BufRead) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Consume the next token and parse it as an integer
    pub fn next_int(&mut self) -> ExecResult<i32> {
        let token = self.next_token()?.ok_or(RuntimeError::InputExhausted)?;
        token
            .parse::<i32>()
            .map_err(|_| RuntimeError::MalformedInput { token })
    }

    fn next_token(&mut self) -> ExecResult<Option<String>> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            let read = self.reader.read_line(&mut line).map_err(RuntimeError::Input)?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
