//! Prompt Loop
//! Ask-until-valid input handling over any reader/writer pair.

use std::io::{self, BufRead, Write};

pub const RETRY_MESSAGE: &str = "Sorry, I didn't understand that.";
/// Retry line for yes/no questions.
pub const CONFIRM_RETRY_MESSAGE: &str = "Sorry, I don't understand.";

/// States of a single question.
enum PromptState<T> {
    Prompting,
    Validating(String),
    Accepted(T),
}

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed line, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask `question` until `parse` accepts the answer.
    ///
    /// Returns `Ok(None)` when input runs out before a valid answer.
    pub fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        self.ask_with_retry(question, RETRY_MESSAGE, parse)
    }

    fn ask_with_retry<T>(
        &mut self,
        question: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        let mut state = PromptState::Prompting;
        loop {
            state = match state {
                PromptState::Prompting => {
                    writeln!(self.output, "\n{question}")?;
                    self.output.flush()?;
                    match self.read_line()? {
                        Some(answer) => PromptState::Validating(answer),
                        None => return Ok(None),
                    }
                }
                PromptState::Validating(answer) => match parse(&answer) {
                    Some(value) => PromptState::Accepted(value),
                    None => {
                        writeln!(self.output, "{retry}")?;
                        PromptState::Prompting
                    }
                },
                PromptState::Accepted(value) => return Ok(Some(value)),
            };
        }
    }

    /// Ask once and return the lowercased answer without validation.
    pub fn ask_free(&mut self, question: &str) -> io::Result<Option<String>> {
        self.ask(question, |answer| Some(answer.to_lowercase()))
    }

    /// Ask a yes/no question until one of the two is given.
    pub fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        self.ask_with_retry(question, CONFIRM_RETRY_MESSAGE, |answer| {
            match answer.to_lowercase().as_str() {
                "yes" => Some(true),
                "no" => Some(false),
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_retries_until_valid() {
        let mut p = prompter("maybe\n\nYES\n");
        assert_eq!(p.confirm("Continue?").unwrap(), Some(true));

        let out = written(p);
        assert_eq!(out.matches("Continue?").count(), 3);
        assert_eq!(out.matches(CONFIRM_RETRY_MESSAGE).count(), 2);
        assert_eq!(out.matches(RETRY_MESSAGE).count(), 0);
    }

    #[test]
    fn test_end_of_input_yields_none() {
        let mut p = prompter("nope\n");
        assert_eq!(p.confirm("Continue?").unwrap(), None);
    }

    #[test]
    fn test_free_answer_is_lowercased() {
        let mut p = prompter("  No Thanks \n");
        assert_eq!(p.ask_free("Restart?").unwrap().as_deref(), Some("no thanks"));
    }
}
