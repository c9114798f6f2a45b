//! Pomcheck engine: license API client, POM loading and effect execution.
mod client;
mod decode;
mod engine;
mod persist;
mod pom;
mod types;

pub use client::{
    endpoint_url, ClientSettings, LicenseClient, ReqwestLicenseClient, DEFAULT_ENDPOINT,
};
pub use decode::{decode_pom, DecodeError, DecodedPom};
pub use engine::{EngineError, EngineHandle};
pub use persist::{write_report, PersistError};
pub use pom::{load_pom, PomError, PomFile};
pub use types::{ApiCall, ApiResponse, ClientError, EngineEvent, FailureKind, SubmissionId};
