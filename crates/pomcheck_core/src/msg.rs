use crate::{SelectedFile, SubmissionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input.
    UrlChanged(String),
    /// User picked files; replaces the previous selection.
    FilesSelected(Vec<SelectedFile>),
    /// User clicked Submit.
    SubmitClicked,
    /// User clicked Reset.
    ResetClicked,
    /// The license service answered a submission.
    ///
    /// `Ok` carries the parsed JSON payload; `Err` carries the text to show
    /// verbatim (the raw response body for non-200 answers).
    ResponseReceived {
        submission_id: SubmissionId,
        result: Result<serde_json::Value, String>,
    },
}
