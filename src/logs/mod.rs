use chrono::Local;
use log::info;
use serde::{ Deserialize, Serialize };
use std::collections::VecDeque;
use std::sync::{ Mutex, MutexGuard };

pub const LOG_CAPACITY: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
    #[serde(rename = "server")]
    pub source: String,
    pub message: String,
}

/// Fixed-capacity FIFO of recent diagnostic lines, shared by the whole
/// process. When full, the oldest entry is dropped.
#[derive(Debug)]
pub struct LogRing {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl Default for LogRing {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl LogRing {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn append(&self, source: &str, message: impl Into<String>) {
        let entry = LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            source: source.to_string(),
            message: message.into(),
        };
        info!("[{}] {}", entry.source, entry.message);

        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Current entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic while holding the lock cannot leave the deque half-updated, so
    // a poisoned guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
