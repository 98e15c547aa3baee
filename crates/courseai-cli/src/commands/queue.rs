//! The `courseai queue` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use courseai_core::config::load_config_from;
use courseai_core::model::Job;
use courseai_core::parser::parse_jobs;
use courseai_core::scheduler::WorkQueue;

/// A job taken off the queue by a worker.
struct Dispatch {
    worker: usize,
    job: Job,
}

pub async fn execute(
    jobs_path: PathBuf,
    workers: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let workers = workers.unwrap_or(config.workers);
    anyhow::ensure!(workers >= 1, "workers must be at least 1");

    let jobs = parse_jobs(&jobs_path)?;
    let total = jobs.len();

    let queue: Arc<WorkQueue<Job>> = Arc::new(WorkQueue::new());
    for job in jobs {
        let priority = job.priority;
        queue
            .push(job, priority)
            .await
            .context("failed to queue job")?;
    }
    queue.close().await;

    eprintln!("Dispatching {total} job(s) with {workers} worker(s)");
    let start = Instant::now();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            tokio::spawn(async move {
                while let Some(job) = queue.pop().await {
                    tracing::debug!(worker, job = %job.name, "dispatched job");
                    if tx.send(Dispatch { worker, job }).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();
    drop(tx);

    let mut order = 0usize;
    while let Some(Dispatch { worker, job }) = rx.recv().await {
        order += 1;
        if job.description.is_empty() {
            println!(
                "{order:>3}. {} (priority {}) [worker {worker}]",
                job.name, job.priority
            );
        } else {
            println!(
                "{order:>3}. {} (priority {}) [worker {worker}] - {}",
                job.name, job.priority, job.description
            );
        }
    }

    for result in futures::future::join_all(handles).await {
        result.context("worker task panicked")?;
    }

    eprintln!(
        "\nComplete: {order}/{total} dispatched ({:.1}s)",
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
