//! Real-time tailer for the game client's log file.
//!
//! Watches the log directory until `Client.txt` exists, then opens it,
//! seeks to the end (prior history is not re-parsed), and polls on a short
//! interval for appended bytes. Every complete line is fed through the
//! parser; parsed messages are appended to the shared history and emitted
//! as [`LogEvent`]s. The directory watch is torn down once the file has
//! been opened.

use crate::{LineSplitter, MessageParser, PoelogError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use poelog_types::Message;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Events emitted by the tailer.
#[derive(Debug, Clone)]
pub enum LogEvent {
    /// The log file was opened and live tailing has begun. Fires once.
    Initialized,
    /// A message was parsed and appended to the history. Never fires for
    /// messages consumed during the initial catch-up read.
    Message(Arc<Message>),
}

/// Shared, append-only message history.
type History = Arc<RwLock<Vec<Arc<Message>>>>;

/// Tails one growing log file for the life of the process.
pub struct LogTailer {
    log_path: PathBuf,
    parser: MessageParser,
    splitter: LineSplitter,
    history: History,
    event_tx: mpsc::UnboundedSender<LogEvent>,
    file: Option<File>,
    position: u64,
    initialized: bool,
    poll_interval: Duration,
}

impl LogTailer {
    /// Default poll interval; tight enough to feel live in chat.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new(
        log_path: PathBuf,
        parser: MessageParser,
        poll_interval: Duration,
        event_tx: mpsc::UnboundedSender<LogEvent>,
    ) -> Self {
        Self {
            log_path,
            parser,
            splitter: LineSplitter::new(),
            history: Arc::new(RwLock::new(Vec::new())),
            event_tx,
            file: None,
            position: 0,
            initialized: false,
            poll_interval,
        }
    }

    /// Spawn the tailing task. Returns a handle for history snapshots.
    ///
    /// The task runs until the event receiver is dropped; there is no
    /// explicit shutdown.
    pub fn start(mut self) -> Result<LogTailerHandle> {
        let history = self.history.clone();

        // One immediate attempt covers the file already existing at startup.
        // If it isn't open after that (absent, or open failed), a directory
        // event is the retry trigger.
        self.try_open();
        let (dir_tx, dir_rx) = mpsc::unbounded_channel();
        let watcher = if self.file.is_some() {
            None
        } else {
            match Self::watch_directory(&self.log_path, dir_tx) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    // Missing directory is an environment problem; a later
                    // filesystem event is the only retry path, so report it.
                    warn!(
                        target: "poelog::tailer",
                        "Could not watch log directory for {}: {}",
                        self.log_path.display(),
                        err
                    );
                    None
                }
            }
        };

        tokio::spawn(self.run(dir_rx, watcher));

        Ok(LogTailerHandle { history })
    }

    fn watch_directory(
        log_path: &std::path::Path,
        dir_tx: mpsc::UnboundedSender<Event>,
    ) -> Result<RecommendedWatcher> {
        let dir = log_path
            .parent()
            .ok_or_else(|| PoelogError::Watch("log path has no parent directory".into()))?;
        let mut watcher =
            notify::recommended_watcher(move |res: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = dir_tx.send(event);
                }
            })
            .map_err(|e| PoelogError::Watch(e.to_string()))?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| PoelogError::Watch(e.to_string()))?;
        Ok(watcher)
    }

    async fn run(
        mut self,
        mut dir_rx: mpsc::UnboundedReceiver<Event>,
        watcher: Option<RecommendedWatcher>,
    ) {
        while self.file.is_none() {
            match dir_rx.recv().await {
                Some(_event) => self.try_open(),
                None => {
                    // No watch and no file: nothing will ever wake us.
                    warn!(
                        target: "poelog::tailer",
                        "Directory watch ended before {} appeared; tailer stopping",
                        self.log_path.display()
                    );
                    return;
                }
            }
        }
        // One-shot transition: the watch is no longer needed.
        drop(watcher);
        drop(dir_rx);

        // Catch-up read: anything already readable is appended silently.
        self.poll();
        self.initialized = true;
        info!(target: "poelog::tailer", "Tailing {}", self.log_path.display());
        if self.event_tx.send(LogEvent::Initialized).is_err() {
            return;
        }

        let mut tick = tokio::time::interval(self.poll_interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            self.poll();
            if self.event_tx.is_closed() {
                debug!(target: "poelog::tailer", "Event receiver dropped, tailer stopping");
                return;
            }
        }
    }

    /// Open the log file and seek to its end, if it exists now.
    fn try_open(&mut self) {
        if self.file.is_some() || !self.log_path.exists() {
            return;
        }
        let mut file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(err) => {
                // Stay uninitialized; the next directory event retries.
                warn!(
                    target: "poelog::tailer",
                    "Could not open client log file for reading: {}",
                    err
                );
                return;
            }
        };
        match file.seek(SeekFrom::End(0)) {
            Ok(position) => self.position = position,
            Err(err) => {
                warn!(target: "poelog::tailer", "Could not seek client log file: {}", err);
                return;
            }
        }
        self.file = Some(file);
    }

    /// Read whatever new bytes are available and turn them into messages.
    fn poll(&mut self) {
        let Some(file) = self.file.as_mut() else { return };

        let len = match file.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                warn!(target: "poelog::tailer", "Could not stat client log file: {}", err);
                return;
            }
        };
        if len < self.position {
            // The game rotated the log; start over from the top.
            debug!(target: "poelog::tailer", "Log file was truncated, resetting position");
            self.position = 0;
            self.splitter.reset();
            if let Err(err) = file.seek(SeekFrom::Start(0)) {
                warn!(target: "poelog::tailer", "Could not rewind client log file: {}", err);
                return;
            }
        }
        if len == self.position {
            return;
        }

        let mut chunk = Vec::with_capacity((len - self.position) as usize);
        match file.read_to_end(&mut chunk) {
            Ok(read) => self.position += read as u64,
            Err(err) => {
                warn!(target: "poelog::tailer", "Could not read client log file: {}", err);
                return;
            }
        }

        for line in self.splitter.push(&chunk) {
            if let Some(message) = self.parser.parse_line(&line) {
                let message = Arc::new(message);
                // Append before notifying, so subscribers always see their
                // own message in a history snapshot.
                self.history.write().unwrap().push(message.clone());
                if self.initialized {
                    let _ = self.event_tx.send(LogEvent::Message(message));
                }
            }
        }
    }
}

/// Handle to a running tailer's history.
#[derive(Clone)]
pub struct LogTailerHandle {
    history: History,
}

impl LogTailerHandle {
    /// Snapshot of every message parsed so far, in file order.
    pub fn messages(&self) -> Vec<Arc<Message>> {
        self.history.read().unwrap().clone()
    }

    /// Snapshot of messages with a sequence id greater than `seq`.
    pub fn messages_since(&self, seq: u64) -> Vec<Arc<Message>> {
        self.history
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.sequence_id > seq)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.history.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.read().unwrap().is_empty()
    }
}
