use crate::{LicenseRequest, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one request to the license service.
    SendRequest {
        submission_id: SubmissionId,
        request: LicenseRequest,
    },
}
