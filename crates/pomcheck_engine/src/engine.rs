use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pomcheck_logging::{pom_debug, pom_error, pom_warn};
use thiserror::Error;

use crate::client::{ClientSettings, LicenseClient, ReqwestLicenseClient};
use crate::{ApiCall, ClientError, EngineEvent, FailureKind, SubmissionId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine stopped before delivering a result")]
    Disconnected,
}

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        call: ApiCall,
    },
}

/// Runs license calls on a background runtime and hands results back over a
/// channel, so the caller's loop never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        Self::with_client(Arc::new(ReqwestLicenseClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn LicenseClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client, command, event_tx).await;
                });
            }
            pom_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, submission_id: SubmissionId, call: ApiCall) {
        if self
            .cmd_tx
            .send(EngineCommand::Submit {
                submission_id,
                call,
            })
            .is_err()
        {
            pom_warn!("engine thread gone; submission {} dropped", submission_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// `Ok(None)` on timeout; `Err` once no result can arrive any more.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

async fn handle_command(
    client: Arc<dyn LicenseClient>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            call,
        } => {
            // Own task so a panicking client still yields a completion.
            let task = tokio::spawn(async move { client.call(&call).await });
            let result = match task.await {
                Ok(result) => result,
                Err(join_err) => {
                    pom_error!("submission {} task failed: {}", submission_id, join_err);
                    Err(ClientError::new(
                        FailureKind::Network,
                        format!("request task failed: {join_err}"),
                    ))
                }
            };
            if let Err(err) = &result {
                pom_warn!("submission {} failed: {}", submission_id, err.kind);
            }
            let _ = event_tx.send(EngineEvent::Completed {
                submission_id,
                result,
            });
        }
    }
}
