// Worker integration test: spawn the tick loop with a recording sink, shutdown

mod common;

use common::{FakeSystem, MEMINFO_40};
use dwmstatus::sink::StatusSink;
use dwmstatus::status::StatusComposer;
use dwmstatus::worker::{WorkerDeps, spawn};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl StatusSink for RecordingSink {
    async fn push(&mut self, status: &str) {
        self.lines.lock().unwrap().push(status.to_string());
    }
}

#[tokio::test]
async fn worker_pushes_each_tick_and_stops_on_shutdown() {
    let sys = FakeSystem::new();
    sys.set_net_dev(&[("eth0", 0, 0)]);
    sys.set_loadavg("0.10 0.10 0.10 1/1 1\n");
    sys.set_meminfo(MEMINFO_40);

    let composer = StatusComposer::from_config(&sys.config(&["eth0"]), 1);
    let sink = RecordingSink::default();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(WorkerDeps {
        composer,
        sink: sink.clone(),
        shutdown_rx,
    });
    tokio::time::sleep(tokio::time::Duration::from_millis(1100)).await;
    let _ = shutdown_tx.send(());
    let ticks = handle.await.unwrap();

    let lines = sink.lines.lock().unwrap().clone();
    assert!(ticks >= 1, "worker should tick at least once");
    assert_eq!(lines.len() as u64, ticks);
    for line in &lines {
        assert_eq!(line.split(" | ").count(), 4, "{line:?}");
        assert!(line.starts_with("RX  00b TX  00b | CPU 10% | MEM 40% | "));
    }
}

#[tokio::test]
async fn worker_exits_promptly_when_shutdown_already_sent() {
    let sys = FakeSystem::new();
    let composer = StatusComposer::from_config(&sys.config(&["eth0"]), 1);
    let sink = RecordingSink::default();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let _ = shutdown_tx.send(());

    let handle = spawn(WorkerDeps {
        composer,
        sink: sink.clone(),
        shutdown_rx,
    });
    let ticks = tokio::time::timeout(tokio::time::Duration::from_secs(2), handle)
        .await
        .expect("worker should stop")
        .unwrap();
    assert_eq!(ticks, 1);
    assert_eq!(sink.lines.lock().unwrap().len(), 1);
}
