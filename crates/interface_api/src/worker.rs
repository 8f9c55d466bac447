//! Queue worker
//!
//! Drains queued claim bodies in batches. Each record is processed on its
//! own: a failure is logged and the record dropped, without retry, so one
//! bad claim never holds back the rest of the batch.

use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::service::ClaimProcessor;

/// Counts for one processed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
}

/// Settles queued claims through a [`ClaimProcessor`]
#[derive(Clone)]
pub struct QueueWorker {
    processor: ClaimProcessor,
    batch_size: usize,
}

impl QueueWorker {
    pub fn new(processor: ClaimProcessor, batch_size: usize) -> Self {
        Self {
            processor,
            batch_size: batch_size.max(1),
        }
    }

    /// Processes every record of a batch independently
    pub async fn process_batch(&self, records: &[Value]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, record) in records.iter().enumerate() {
            match self.processor.process_queued(record).await {
                Ok(message) => {
                    report.processed += 1;
                    info!(
                        claim_id = %message.claim_id,
                        message_id = %message.message_id,
                        "Queued claim settled"
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    error!(record = index, error = %e, "Queued claim failed, record skipped");
                }
            }
        }

        report
    }

    /// Runs until `shutdown` resolves or the queue is closed
    pub async fn run(
        self,
        mut receiver: mpsc::UnboundedReceiver<Value>,
        shutdown: impl Future<Output = ()>,
    ) {
        tokio::pin!(shutdown);
        let mut buffer = Vec::with_capacity(self.batch_size);

        info!(batch_size = self.batch_size, "Queue worker started");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                received = receiver.recv_many(&mut buffer, self.batch_size) => {
                    if received == 0 {
                        break;
                    }
                    let report = self.process_batch(&buffer).await;
                    info!(processed = report.processed, failed = report.failed, "Batch complete");
                    buffer.clear();
                }
            }
        }

        info!("Queue worker stopped");
    }
}
