//! Pomcheck core: pure form controller and view-model helpers.
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{
    build_request, is_pom_file_name, is_pom_url, validate_input, FormState, LicenseRequest,
    SelectedFile,
};
pub use msg::Msg;
pub use state::{AppState, RequestOutcome, SubmissionId, RUNNING_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, Severity, StatusLine};
