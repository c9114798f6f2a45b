use std::time::Duration;

use pomcheck_core::{Effect, LicenseRequest, Msg};
use pomcheck_engine::{
    ApiCall, ApiResponse, ClientError, EngineError, EngineEvent, EngineHandle, FailureKind,
};
use pomcheck_logging::{pom_info, pom_warn};

/// Turns core effects into engine calls and engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest {
                    submission_id,
                    request,
                } => {
                    let call = map_request(request);
                    pom_info!(
                        "SendRequest submission_id={} call={}",
                        submission_id,
                        describe(&call)
                    );
                    self.engine.submit(submission_id, call);
                }
            }
        }
    }

    /// Next engine completion as a message, if one is ready.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    /// Like `poll`, but waits up to `timeout`. Fails once the engine is gone.
    pub fn wait(&self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.recv_timeout(timeout)?.map(map_event))
    }

    /// Runs one call outside the form and blocks until it completes.
    pub fn call_blocking(&self, call: ApiCall) -> Result<ApiResponse, ClientError> {
        // Form submissions count from 1, so 0 never collides with one.
        const DIRECT_SUBMISSION: u64 = 0;
        pom_info!("Direct call {}", describe(&call));
        self.engine.submit(DIRECT_SUBMISSION, call);
        loop {
            match self.engine.recv_timeout(Duration::from_millis(100)) {
                Ok(Some(EngineEvent::Completed { result, .. })) => return result,
                Ok(None) => {}
                Err(err) => {
                    return Err(ClientError {
                        kind: FailureKind::Network,
                        message: err.to_string(),
                    })
                }
            }
        }
    }
}

fn map_request(request: LicenseRequest) -> ApiCall {
    match request {
        LicenseRequest::ByUrl { target } => ApiCall::LookupByUrl { target },
        LicenseRequest::ByPom { content, .. } => ApiCall::SubmitPom { content },
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed {
            submission_id,
            result,
        } => Msg::ResponseReceived {
            submission_id,
            result: match result {
                Ok(response) => Ok(response.json),
                Err(err) => {
                    pom_warn!("Submission {} failed: {}", submission_id, err);
                    Err(err.user_message())
                }
            },
        },
    }
}

fn describe(call: &ApiCall) -> String {
    match call {
        ApiCall::LookupByUrl { target } => format!("lookup target={target}"),
        ApiCall::SubmitPom { content } => {
            format!("submit pom ({} chars)", content.chars().count())
        }
        ApiCall::DumpCaches => "dump caches".to_string(),
        ApiCall::ClearCaches => "clear caches".to_string(),
    }
}
