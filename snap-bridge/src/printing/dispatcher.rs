//! Print dispatcher
//!
//! Receives orders from the intake channel, renders them and hands the
//! resulting jobs to one worker per destination. A worker runs a single job at
//! a time, so two receipts never interleave on the same printer; different
//! destinations print concurrently.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;

use snap_printer::command::strip_commands;
use snap_printer::{NetworkPrinter, PrintResult, Printer};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace};

use super::renderer::ReceiptRenderer;
use super::types::{Destination, PrintJob};
use crate::core::error::{DispatchError, DispatchResult};
use crate::order::Order;

/// Queue feeding a destination's worker
struct WorkerQueue {
    tx: mpsc::UnboundedSender<PrintJob>,
    handle: JoinHandle<()>,
}

/// Print dispatcher
///
/// Owns the renderer and the per-destination workers. Runs as a single task
/// (see [`PrintDispatcher::run`]).
pub struct PrintDispatcher {
    renderer: ReceiptRenderer,
    destination: Destination,
    timeout: Duration,
    workers: HashMap<Destination, WorkerQueue>,
    shutdown: CancellationToken,
}

impl PrintDispatcher {
    /// Create a dispatcher printing to `destination`
    pub fn new(
        renderer: ReceiptRenderer,
        destination: Destination,
        timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            renderer,
            destination,
            timeout,
            workers: HashMap::new(),
            shutdown,
        }
    }

    /// Render an order and queue it for the configured printer
    pub fn submit(&mut self, order: &Order) -> DispatchResult<()> {
        let payload = self.renderer.render(order);
        trace!(
            preview = %String::from_utf8_lossy(&strip_commands(&payload)),
            "Rendered receipt"
        );

        self.enqueue(PrintJob {
            order_number: order.order_number.to_string(),
            destination: self.destination.clone(),
            payload,
        })
    }

    /// Queue an already rendered job; never waits for the printer
    pub fn enqueue(&mut self, job: PrintJob) -> DispatchResult<()> {
        if self.shutdown.is_cancelled() {
            return Err(DispatchError::ShuttingDown);
        }

        let queue = match self.workers.entry(job.destination.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let queue = spawn_worker(entry.key(), self.timeout, self.shutdown.clone())?;
                entry.insert(queue)
            }
        };

        debug!(order = %job.order_number, destination = %job.destination, "Queued print job");
        queue
            .tx
            .send(job)
            .map_err(|e| DispatchError::WorkerGone(e.0.destination))
    }

    /// Run until shutdown or until the order channel closes
    ///
    /// On channel close the workers drain their queues before this returns.
    /// On shutdown they finish the job in flight and drop the rest.
    pub async fn run(mut self, mut orders: mpsc::UnboundedReceiver<Order>) {
        info!(destination = %self.destination, "Print dispatcher started");
        let shutdown = self.shutdown.clone();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Print dispatcher received shutdown signal");
                    break;
                }
                order = orders.recv() => {
                    let Some(order) = order else {
                        info!("Order channel closed, print dispatcher stopping");
                        break;
                    };
                    if let Err(e) = self.submit(&order) {
                        error!(order = %order.order_number, error = %e, "Failed to submit print job");
                    }
                }
            }
        }

        self.join_workers().await;
    }

    async fn join_workers(self) {
        for (destination, queue) in self.workers {
            drop(queue.tx);
            if let Err(e) = queue.handle.await {
                error!(destination = %destination, error = ?e, "Print worker panicked");
            }
        }
        info!("Print dispatcher stopped");
    }
}

fn spawn_worker(
    destination: &Destination,
    timeout: Duration,
    shutdown: CancellationToken,
) -> DispatchResult<WorkerQueue> {
    let printer = NetworkPrinter::new(&destination.host, destination.port)?.with_timeout(timeout);
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_worker(printer, rx, shutdown));

    info!(destination = %destination, "Started print worker");
    Ok(WorkerQueue { tx, handle })
}

/// Execute jobs one at a time until the queue closes or shutdown is signalled
pub async fn run_worker<P: Printer>(
    printer: P,
    mut jobs: mpsc::UnboundedReceiver<PrintJob>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("Print worker received shutdown signal");
                break;
            }
            job = jobs.recv() => {
                let Some(job) = job else { break };
                // Failures are reported by execute_job; the job is dropped.
                let _ = execute_job(&printer, &job).await;
            }
        }
    }
}

/// Send one job and log the outcome
#[instrument(skip_all, fields(order = %job.order_number, destination = %job.destination))]
pub async fn execute_job<P: Printer>(printer: &P, job: &PrintJob) -> PrintResult<()> {
    debug!("Print job started");
    let result = printer.print(&job.payload).await;
    match &result {
        Ok(()) => info!(bytes = job.payload.len(), "Receipt printed"),
        Err(e) if e.is_timeout() => error!(error = %e, "Print job timed out, dropping"),
        Err(e) => error!(error = %e, "Print job failed, dropping"),
    }
    result
}
