use crate::view_model::{AppViewModel, Severity, StatusLine};
use crate::{validate_input, FormState, LicenseRequest, SelectedFile};

pub type SubmissionId = u64;

/// Status text while a request is in flight.
pub const RUNNING_MESSAGE: &str = "running purplecat...";

/// Lifecycle of the latest submission. Moves Pending -> Success | Failure once.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Pending,
    Success(serde_json::Value),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    submission_id: SubmissionId,
    request: LicenseRequest,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    form: FormState,
    submit_enabled: bool,
    outcome: Option<RequestOutcome>,
    in_flight: Option<InFlight>,
    status: Option<StatusLine>,
    result_text: String,
    last_submission_id: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn outcome(&self) -> Option<&RequestOutcome> {
        self.outcome.as_ref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url_text: self.form.url_text.clone(),
            file_names: self
                .form
                .selected_files
                .iter()
                .map(|file| file.name.clone())
                .collect(),
            submit_enabled: self.submit_enabled,
            status: self.status.clone(),
            result_text: self.result_text.clone(),
        }
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url_text(&mut self, text: String) {
        if self.form.url_text != text {
            self.form.url_text = text;
            self.revalidate();
            self.dirty = true;
        }
    }

    pub(crate) fn set_selected_files(&mut self, files: Vec<SelectedFile>) {
        if self.form.selected_files != files {
            self.form.selected_files = files;
            self.revalidate();
            self.dirty = true;
        }
    }

    fn revalidate(&mut self) {
        self.submit_enabled = validate_input(&self.form.url_text, &self.form.selected_files);
    }

    /// Records a new in-flight submission; any earlier one becomes stale.
    pub(crate) fn begin_submission(&mut self, request: LicenseRequest) -> SubmissionId {
        self.last_submission_id += 1;
        let submission_id = self.last_submission_id;
        self.in_flight = Some(InFlight {
            submission_id,
            request,
        });
        self.outcome = Some(RequestOutcome::Pending);
        self.status = Some(StatusLine::info(RUNNING_MESSAGE));
        self.dirty = true;
        submission_id
    }

    /// Applies a completion. Returns false when it does not belong to the
    /// submission currently in flight.
    pub(crate) fn complete_submission(
        &mut self,
        submission_id: SubmissionId,
        result: Result<serde_json::Value, String>,
    ) -> bool {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.submission_id == submission_id => in_flight,
            other => {
                self.in_flight = other;
                return false;
            }
        };

        match result {
            Ok(payload) => {
                self.status = Some(StatusLine::info(in_flight.request.done_message()));
                self.result_text = pretty_json(&payload);
                self.outcome = Some(RequestOutcome::Success(payload));
            }
            Err(raw) => {
                self.status = Some(StatusLine {
                    text: raw.clone(),
                    severity: Severity::Warning,
                });
                self.outcome = Some(RequestOutcome::Failure(raw));
            }
        }
        self.dirty = true;
        true
    }

    /// Back to an empty form. The submission counter keeps counting so that
    /// completions of forgotten submissions stay stale.
    pub(crate) fn reset(&mut self) {
        let last_submission_id = self.last_submission_id;
        *self = Self {
            last_submission_id,
            dirty: true,
            ..Self::default()
        };
    }
}

fn pretty_json(payload: &serde_json::Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
