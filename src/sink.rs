// Status sinks: where the composed line goes each tick. Fire-and-forget.

use crate::config::SinkConfig;
use serde::Deserialize;
use std::future::Future;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Run `command args... <status>` (default: `xsetroot -name`).
    #[default]
    Command,
    /// One line per tick on stdout.
    Stdout,
}

pub trait StatusSink: Send {
    /// Publish one status line. Failures are logged and dropped.
    fn push(&mut self, status: &str) -> impl Future<Output = ()> + Send;
}

pub struct CommandSink {
    command: String,
    args: Vec<String>,
}

impl CommandSink {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl StatusSink for CommandSink {
    async fn push(&mut self, status: &str) {
        match Command::new(&self.command)
            .args(&self.args)
            .arg(status)
            .status()
            .await
        {
            Ok(exit) if exit.success() => {}
            Ok(exit) => {
                tracing::debug!(command = %self.command, status = %exit, "status sink exited unsuccessfully");
            }
            Err(e) => {
                tracing::debug!(error = %e, command = %self.command, "status sink failed to run");
            }
        }
    }
}

#[derive(Default)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    async fn push(&mut self, status: &str) {
        let mut out = tokio::io::stdout();
        let line = format!("{status}\n");
        if let Err(e) = out.write_all(line.as_bytes()).await {
            tracing::debug!(error = %e, "stdout sink write failed");
            return;
        }
        if let Err(e) = out.flush().await {
            tracing::debug!(error = %e, "stdout sink flush failed");
        }
    }
}

/// Sink selected by config.
pub enum Sink {
    Command(CommandSink),
    Stdout(StdoutSink),
}

impl Sink {
    pub fn from_config(config: &SinkConfig) -> Self {
        match config.kind {
            SinkKind::Command => Sink::Command(CommandSink::new(&config.command, config.args.clone())),
            SinkKind::Stdout => Sink::Stdout(StdoutSink),
        }
    }
}

impl StatusSink for Sink {
    async fn push(&mut self, status: &str) {
        match self {
            Sink::Command(s) => s.push(status).await,
            Sink::Stdout(s) => s.push(status).await,
        }
    }
}
