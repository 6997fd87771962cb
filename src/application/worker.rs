//! Background call worker for non-blocking backend requests.
//!
//! Each call runs on its own thread and reports exactly once over a
//! channel. The UI loop polls the handle; dropping the handle abandons the
//! call, and the worker's late send is discarded.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::{Disease, HealthStatus, PredictionResult};
use crate::ports::{ApiError, PredictionApi};

/// Handle to a running call.
pub struct CallHandle<T> {
    rx: Receiver<Result<T, ApiError>>,
    _thread: Option<JoinHandle<()>>,
}

impl<T> CallHandle<T> {
    /// Try to receive the outcome (non-blocking).
    ///
    /// A worker that went away without reporting yields `WorkerLost`.
    #[must_use]
    pub fn try_recv(&self) -> Option<Result<T, ApiError>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ApiError::WorkerLost)),
        }
    }

    /// Block until the outcome arrives.
    pub fn wait(self) -> Result<T, ApiError> {
        self.rx.recv().unwrap_or(Err(ApiError::WorkerLost))
    }
}

/// Spawns backend calls off the UI thread.
pub struct CallWorker;

impl CallWorker {
    /// Run `call` on a named background thread.
    pub fn spawn<T, F>(name: String, call: F) -> CallHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
            let outcome = call();
            if tx.send(outcome).is_err() {
                tracing::debug!("Call resolved after its handle was dropped; discarding");
            }
        });

        // On spawn failure the sender is already gone, so the handle
        // reports WorkerLost on first poll.
        let thread = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(worker = %name, error = %e, "Failed to spawn call worker");
                None
            }
        };

        CallHandle {
            rx,
            _thread: thread,
        }
    }

    /// Spawn a prediction call. Serialization happens on the worker.
    pub fn predict<A, I>(api: Arc<A>, disease: Disease, input: I) -> CallHandle<PredictionResult>
    where
        A: PredictionApi + 'static,
        I: serde::Serialize + Send + 'static,
    {
        Self::spawn(format!("predict-{}", disease.slug()), move || {
            let payload = serde_json::to_value(&input)?;
            api.predict(disease, &payload)
        })
    }

    /// Spawn a health probe.
    pub fn health_check<A>(api: Arc<A>) -> CallHandle<HealthStatus>
    where
        A: PredictionApi + 'static,
    {
        Self::spawn("health-check".to_string(), move || api.health_check())
    }
}
