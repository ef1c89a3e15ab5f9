//! CPU load generator.
//!
//! # Responsibilities
//! - Launch exactly `workers` blocking units on Tokio's blocking pool
//! - Keep each unit in a tight floating-point loop until its own deadline
//! - Join every unit before returning
//!
//! # Design Decisions
//! - Each unit reads its own monotonic clock; there is no shared deadline
//! - Units share no state, so the loop never contends on a lock or atomic
//! - Join handles are detached on drop: a caller that goes away does not stop
//!   units already running
//! - A panicking unit is resumed on the caller only after every unit joined

use std::hint::black_box;
use std::panic;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tokio::task;

/// Burn `workers` cores for `duration` and return each unit's elapsed time.
pub async fn run_burst(duration: Duration, workers: usize) -> Vec<Duration> {
    fan_out(workers, move |worker_id| spin(duration, worker_id)).await
}

/// Run `job` once per worker on the blocking pool and wait for all of them.
pub(crate) async fn fan_out<F>(workers: usize, job: F) -> Vec<Duration>
where
    F: Fn(usize) -> Duration + Clone + Send + 'static,
{
    let handles: Vec<_> = (0..workers)
        .map(|worker_id| {
            let job = job.clone();
            task::spawn_blocking(move || job(worker_id))
        })
        .collect();

    let mut elapsed = Vec::with_capacity(workers);
    let mut first_panic = None;
    for joined in join_all(handles).await {
        match joined {
            Ok(worker_elapsed) => elapsed.push(worker_elapsed),
            Err(err) if err.is_panic() => {
                if first_panic.is_none() {
                    first_panic = Some(err.into_panic());
                }
            }
            Err(err) => tracing::error!(error = %err, "Stress worker did not complete"),
        }
    }

    if let Some(payload) = first_panic {
        panic::resume_unwind(payload);
    }
    elapsed
}

/// Keep the current thread busy until `duration` has elapsed on its own clock.
pub fn spin(duration: Duration, worker_id: usize) -> Duration {
    tracing::debug!(
        worker_id,
        target_duration = ?duration,
        "Stress worker started"
    );

    let start = Instant::now();
    while start.elapsed() < duration {
        let seed = start.elapsed().as_nanos() as f64;
        let mut value = seed.sqrt();
        value = value.sin() * value.cos();
        value = (value.abs() + 1.0).ln();
        black_box(value);
    }

    let elapsed = start.elapsed();
    tracing::debug!(
        worker_id,
        elapsed = ?elapsed,
        "Stress worker finished"
    );
    elapsed
}
