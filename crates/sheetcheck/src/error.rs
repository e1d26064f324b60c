use sheetcheck_model::RangeParseError;
use thiserror::Error;

/// Failures of the check itself, as opposed to mistakes in the submission.
///
/// Submission mistakes are never errors: they are reported through the state's reporter.
/// A `CheckError` means the exercise is authored wrongly (bad range, solution lacks the
/// object under test) and should surface to whoever maintains the exercise.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("malformed range `{range}`: {source}")]
    MalformedRange {
        range: String,
        #[source]
        source: RangeParseError,
    },
    #[error("the solution has no pivot table in range `{range}`")]
    MissingSolutionPivot { range: String },
}

impl CheckError {
    pub(crate) fn malformed_range(range: &str, source: RangeParseError) -> Self {
        CheckError::MalformedRange {
            range: range.to_string(),
            source,
        }
    }
}
