// Snapshot management for stepping through a script run

use crate::memory::stack::TypedStack;
use crate::memory::value::Value;
use crate::script::ast::SourceLocation;
use std::mem::size_of;

/// Kind of a log line, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Outcome of a mutating operation (push, trim, clear, batches)
    Info,
    /// A value came off the stack
    Pulled,
    /// The operation was rejected
    Error,
}

/// A line of output with source location tracking
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub text: String,
    pub kind: LogKind,
    pub location: SourceLocation,
}

/// Output log recording the outcome of each executed operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputLog {
    pub lines: Vec<LogLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { lines: Vec::new() }
    }

    pub fn record(&mut self, kind: LogKind, text: String, location: SourceLocation) {
        self.lines.push(LogLine {
            text,
            kind,
            location,
        });
    }

    /// Get all lines as plain strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    /// Lines of the given kind
    pub fn lines_of(&self, kind: LogKind) -> impl Iterator<Item = &LogLine> {
        self.lines.iter().filter(move |line| line.kind == kind)
    }
}

/// Snapshot of the run state after one operation
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stack: TypedStack<Value>,
    pub log: OutputLog,
    pub history_index: usize,
    pub source_location: SourceLocation,
    /// Statement executed to reach this state; `None` for the initial state
    pub statement_index: Option<usize>,
}

impl Snapshot {
    pub fn new(
        stack: TypedStack<Value>,
        log: OutputLog,
        history_index: usize,
        source_location: SourceLocation,
        statement_index: Option<usize>,
    ) -> Self {
        Snapshot {
            stack,
            log,
            history_index,
            source_location,
            statement_index,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: every slot costs a Value, plus 50 bytes per log line
        let slots_size = self.stack.capacity() * size_of::<Value>();
        let log_size = self.log.lines.len() * 50;

        slots_size + log_size
    }
}

/// Manages run history for stepping backward and forward
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_capacity(capacity: usize) -> Snapshot {
        Snapshot::new(
            TypedStack::new(capacity),
            OutputLog::new(),
            0,
            SourceLocation::new(1, 1),
            None,
        )
    }

    #[test]
    fn test_manager_enforces_limit() {
        let one = snapshot_with_capacity(10).estimated_size();
        let mut manager = SnapshotManager::new(one * 2);

        assert!(manager.push(snapshot_with_capacity(10)).is_ok());
        assert!(manager.push(snapshot_with_capacity(10)).is_ok());
        assert!(manager.push(snapshot_with_capacity(10)).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), one * 2);
    }

    #[test]
    fn test_log_filters_by_kind() {
        let mut log = OutputLog::new();
        let loc = SourceLocation::new(3, 1);
        log.record(LogKind::Info, "push 1".to_string(), loc);
        log.record(LogKind::Pulled, "pull → 1".to_string(), loc);
        log.record(LogKind::Error, "boom".to_string(), loc);

        assert_eq!(log.lines_of(LogKind::Pulled).count(), 1);
        assert_eq!(log.get_output().len(), 3);
    }
}
