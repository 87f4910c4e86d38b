// Tick loop: compose, push to the sink, sleep to the next wall-clock second.

use crate::sink::StatusSink;
use crate::status::StatusComposer;
use chrono::{DateTime, Local, TimeZone, Timelike};
use tokio::time::{Duration, Instant};

/// How often the loop logs a tick count at DEBUG.
const TICK_LOG_INTERVAL: Duration = Duration::from_secs(300);

/// Composer, sink and shutdown for the worker.
pub struct WorkerDeps<S> {
    pub composer: StatusComposer,
    pub sink: S,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Time left until the next whole second after `now`. Never zero, so a tick
/// landing exactly on a boundary waits a full second instead of spinning.
pub fn until_next_second<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let into_second = now.nanosecond() % 1_000_000_000;
    Duration::from_nanos(u64::from(1_000_000_000 - into_second))
}

pub fn spawn<S>(deps: WorkerDeps<S>) -> tokio::task::JoinHandle<u64>
where
    S: StatusSink + 'static,
{
    let WorkerDeps {
        mut composer,
        mut sink,
        mut shutdown_rx,
    } = deps;

    tokio::spawn(async move {
        let mut ticks: u64 = 0;
        let mut last_tick_log = Instant::now();

        loop {
            let status = composer.compose(&Local::now());
            sink.push(&status).await;
            ticks += 1;

            if last_tick_log.elapsed() >= TICK_LOG_INTERVAL {
                tracing::debug!(ticks, status = %status, "status ticks");
                last_tick_log = Instant::now();
            }

            let wait = until_next_second(&Local::now());
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = &mut shutdown_rx => {
                    tracing::debug!(ticks, "Worker shutting down");
                    break;
                }
            }
        }
        ticks
    })
}
