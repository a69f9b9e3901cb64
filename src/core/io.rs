//! Interactive I/O abstraction shared by every command in a run

use serde_json::Value;

use crate::core::SiteResult;

/// User-facing I/O sink for messages, progress and prompts
///
/// Commands never write to the terminal directly; they go through the
/// handle carried by the execution context so nested commands report
/// through the same channel as the command that started the run.
pub trait Io {
    /// Report a successful outcome
    fn success(&self, message: &str);

    /// Informational message
    fn info(&self, message: &str);

    /// Non-fatal problem
    fn warning(&self, message: &str);

    /// Failure message
    fn error(&self, message: &str);

    /// Learning-mode trace of a generated query or shell command
    fn comment(&self, message: &str);

    /// Progress through a chain of sub-commands
    fn step(&self, number: usize, total: usize, message: &str);

    /// Primary output of a command: `lines` for people, `data` for `--json`
    ///
    /// Unlike `info`, this is never silenced by quiet mode.
    fn report(&self, lines: &[String], data: &Value);

    /// Ask a yes/no question
    fn confirm(&self, question: &str, default: bool) -> SiteResult<bool>;

    /// Ask for a free-form value, returning `default` on empty input
    fn ask(&self, question: &str, default: &str) -> SiteResult<String>;
}

#[cfg(test)]
pub mod testing {
    //! Recording I/O double for unit tests

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use serde_json::Value;

    use super::Io;
    use crate::core::SiteResult;

    /// What kind of message was recorded
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Success,
        Info,
        Warning,
        Error,
        Comment,
        Step,
        Report,
    }

    /// Records every message and answers prompts from a script
    #[derive(Default)]
    pub struct RecordingIo {
        messages: RefCell<Vec<(Level, String)>>,
        confirmations: RefCell<VecDeque<bool>>,
        answers: RefCell<VecDeque<String>>,
        pub questions: RefCell<Vec<String>>,
        pub reports: RefCell<Vec<Value>>,
    }

    impl RecordingIo {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the answer to the next `confirm`
        pub fn with_confirmation(self, answer: bool) -> Self {
            self.confirmations.borrow_mut().push_back(answer);
            self
        }

        /// Queue the answer to the next `ask`
        pub fn with_answer(self, answer: &str) -> Self {
            self.answers.borrow_mut().push_back(answer.to_string());
            self
        }

        pub fn messages(&self, level: Level) -> Vec<String> {
            self.messages
                .borrow()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }

        fn record(&self, level: Level, message: &str) {
            self.messages.borrow_mut().push((level, message.to_string()));
        }
    }

    impl Io for RecordingIo {
        fn success(&self, message: &str) {
            self.record(Level::Success, message);
        }

        fn info(&self, message: &str) {
            self.record(Level::Info, message);
        }

        fn warning(&self, message: &str) {
            self.record(Level::Warning, message);
        }

        fn error(&self, message: &str) {
            self.record(Level::Error, message);
        }

        fn comment(&self, message: &str) {
            self.record(Level::Comment, message);
        }

        fn step(&self, number: usize, total: usize, message: &str) {
            self.record(Level::Step, &format!("[{}/{}] {}", number, total, message));
        }

        fn report(&self, lines: &[String], data: &Value) {
            for line in lines {
                self.record(Level::Report, line);
            }
            self.reports.borrow_mut().push(data.clone());
        }

        fn confirm(&self, question: &str, default: bool) -> SiteResult<bool> {
            self.questions.borrow_mut().push(question.to_string());
            Ok(self.confirmations.borrow_mut().pop_front().unwrap_or(default))
        }

        fn ask(&self, question: &str, default: &str) -> SiteResult<String> {
            self.questions.borrow_mut().push(question.to_string());
            Ok(self
                .answers
                .borrow_mut()
                .pop_front()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| default.to_string()))
        }
    }
}
