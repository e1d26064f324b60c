//! Runs the checks an exercise lists and collects the first failure.

use serde::{Deserialize, Serialize};
use sheetcheck_model::SpreadsheetDocument;

use crate::checks::{has_equal_formula, has_equal_pivot, has_equal_value};
use crate::error::CheckError;
use crate::feedback::pluralize;
use crate::pivot_diff::CompareOptions;
use crate::state::{FirstFailureReporter, Outcome, State};

/// A check an exercise can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    #[serde(alias = "check_pivot")]
    HasEqualPivot,
    HasEqualValue,
    HasEqualFormula,
}

/// One entry of an exercise's check list: a range and the checks to run on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub range: String,
    pub sct: Vec<CheckName>,
    #[serde(default)]
    pub options: CompareOptions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Evaluate `directives` in order, stopping at the first failing check.
pub fn run_exercise(
    student: &SpreadsheetDocument,
    solution: &SpreadsheetDocument,
    directives: &[Directive],
) -> Result<ExerciseResult, CheckError> {
    let reporter = FirstFailureReporter::new();

    'directives: for directive in directives {
        let state = State::new(student, solution, directive.range.as_str(), &reporter);
        for check in &directive.sct {
            log::debug!("running {check:?} on range `{}`", directive.range);
            let outcome = match check {
                CheckName::HasEqualPivot => has_equal_pivot(&state, &directive.options)?,
                CheckName::HasEqualValue => has_equal_value(&state)?,
                CheckName::HasEqualFormula => has_equal_formula(&state)?,
            };
            if outcome == Outcome::Failed {
                break 'directives;
            }
        }
    }

    let message = reporter.into_failure();
    log::debug!(
        "exercise finished with {}",
        pluralize(usize::from(message.is_some()), "failure")
    );
    Ok(ExerciseResult {
        success: message.is_none(),
        message,
    })
}
