//! Single-worker actuation queue.
//!
//! All hardware access is serialized through one dedicated thread: a command
//! runs to completion before the next begins, by construction rather than by
//! accident of the hosting runtime. Callers block on a per-job reply channel
//! (HTTP handlers do so inside `spawn_blocking`).

use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::bank::ActuatorBank;
use crate::command::{Command, Outcome};
use crate::error::{Result, RoverError};
use crate::sequencer::{CancelToken, Sequencer};

enum Job {
    Execute {
        cmd: Command,
        reply: mpsc::Sender<Result<Outcome>>,
    },
    Shutdown,
}

/// Cloneable submission handle. `submit` validates, enqueues, and blocks
/// until the worker has executed the command.
#[derive(Clone)]
pub struct ActuatorClient {
    tx: mpsc::Sender<Job>,
}

impl ActuatorClient {
    pub fn submit(&self, cmd: Command) -> Result<Outcome> {
        cmd.validate()?;
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Job::Execute {
                cmd,
                reply: reply_tx,
            })
            .map_err(|_| RoverError::WorkerGone)?;
        reply_rx.recv().map_err(|_| RoverError::WorkerGone)?
    }
}

/// Owns the worker thread. Dropping without calling [`shutdown`] leaves the
/// thread running until every client is gone; the bank is quiesced either
/// way before the thread exits.
///
/// [`shutdown`]: ActuatorWorker::shutdown
pub struct ActuatorWorker {
    tx: mpsc::Sender<Job>,
    cancel: CancelToken,
    handle: JoinHandle<()>,
}

impl ActuatorWorker {
    /// Interrupt any in-flight wait, drain the queue, quiesce the bank, and
    /// join the worker thread. Jobs still queued behind the shutdown signal
    /// complete with an `Interrupted` error instead of actuating.
    pub fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.tx.send(Job::Shutdown);
        if self.handle.join().is_err() {
            tracing::error!("actuation worker panicked");
        }
    }
}

/// Start the worker thread over the given bank.
pub fn spawn<B: ActuatorBank + 'static>(bank: B) -> (ActuatorWorker, ActuatorClient) {
    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();
    let mut sequencer = Sequencer::new(bank, cancel.clone());

    let handle = std::thread::spawn(move || {
        while let Ok(job) = rx.recv() {
            match job {
                Job::Execute { cmd, reply } => {
                    let result = sequencer.execute(&cmd);
                    if let Err(e) = &result {
                        tracing::warn!(error = %e, "actuation command failed");
                    }
                    // Receiver may have given up; execution already happened.
                    let _ = reply.send(result);
                }
                Job::Shutdown => break,
            }
        }
        if let Err(e) = sequencer.quiesce() {
            tracing::error!(error = %e, "failed to quiesce actuator lines on shutdown");
        }
    });

    let worker = ActuatorWorker {
        tx: tx.clone(),
        cancel,
        handle,
    };
    (worker, ActuatorClient { tx })
}
