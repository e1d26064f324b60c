//! Check state: the student/solution pair under test plus the reporter collecting feedback.

use std::cell::RefCell;

/// Receives feedback messages from failed checks.
///
/// `do_test` returns whether the message was accepted; a reporter that already holds a
/// failure may ignore later ones.
pub trait Reporter {
    fn do_test(&self, message: &str) -> bool;
}

/// Keeps the first failure message and ignores everything after it.
#[derive(Debug, Default)]
pub struct FirstFailureReporter {
    failure: RefCell<Option<String>>,
}

impl FirstFailureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_failed(&self) -> bool {
        self.failure.borrow().is_some()
    }

    /// The accepted failure message, if any.
    pub fn failure(&self) -> Option<String> {
        self.failure.borrow().clone()
    }

    pub fn into_failure(self) -> Option<String> {
        self.failure.into_inner()
    }
}

impl Reporter for FirstFailureReporter {
    fn do_test(&self, message: &str) -> bool {
        let mut failure = self.failure.borrow_mut();
        if failure.is_some() {
            log::debug!("reporter ignored failure: {message}");
            return false;
        }
        log::debug!("reporter accepted failure: {message}");
        *failure = Some(message.to_string());
        true
    }
}

/// Result of a single check.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub fn is_passed(self) -> bool {
        self == Outcome::Passed
    }
}

/// The data a check compares, the A1 range it targets, and where feedback goes.
///
/// `D` is the document at the top level; checks derive child states holding the located
/// sub-objects (e.g. two pivot tables) while keeping the range and reporter.
pub struct State<'r, D> {
    pub student_data: D,
    pub solution_data: D,
    range: String,
    reporter: &'r dyn Reporter,
}

impl<'r, D> State<'r, D> {
    pub fn new(
        student_data: D,
        solution_data: D,
        range: impl Into<String>,
        reporter: &'r dyn Reporter,
    ) -> Self {
        Self {
            student_data,
            solution_data,
            range: range.into(),
            reporter,
        }
    }

    /// The range text as written in the exercise, used verbatim in feedback.
    pub fn range(&self) -> &str {
        &self.range
    }

    /// A state over different data sharing this state's range and reporter.
    pub fn derive_child<C>(&self, student_data: C, solution_data: C) -> State<'r, C> {
        State {
            student_data,
            solution_data,
            range: self.range.clone(),
            reporter: self.reporter,
        }
    }

    /// Hand a failure message to the reporter; returns whether it was accepted.
    pub fn report_result(&self, message: &str) -> bool {
        self.reporter.do_test(message)
    }
}
