// Execution engine for stack scripts

use crate::memory::stack::TypedStack;
use crate::memory::value::Value;
use crate::runner::errors::RunError;
use crate::script::ast::{Op, Script, SourceLocation, Statement};
use crate::snapshot::{LogKind, OutputLog, Snapshot, SnapshotManager};

/// Runs a script against a stack and keeps the history of every step
pub struct Runner {
    script: Script,

    /// The stack being operated on
    stack: TypedStack<Value>,

    /// Outcome of every executed operation
    log: OutputLog,

    /// Location of the statement that produced the current state
    current_location: SourceLocation,

    /// Statement that produced the current state (None before the first one)
    current_statement: Option<usize>,

    /// Snapshot manager for stepping backward
    snapshot_manager: SnapshotManager,

    /// Current position in the history
    history_position: usize,

    /// Whether every statement has been executed
    finished: bool,
}

impl Runner {
    /// Create a runner for a parsed script
    pub fn new(script: Script, snapshot_memory_limit: usize) -> Self {
        let stack = script.build_stack();
        let current_location = script
            .declaration
            .as_ref()
            .map(|d| d.location)
            .unwrap_or(SourceLocation::new(1, 1));

        Runner {
            script,
            stack,
            log: OutputLog::new(),
            current_location,
            current_statement: None,
            snapshot_manager: SnapshotManager::new(snapshot_memory_limit),
            history_position: 0,
            finished: false,
        }
    }

    /// Run the script from start to finish
    pub fn run(&mut self) -> Result<(), RunError> {
        self.take_snapshot()?;

        let statements = self.script.statements.clone();
        for (index, statement) in statements.iter().enumerate() {
            self.execute_statement(statement);
            self.current_location = statement.location;
            self.current_statement = Some(index);
            self.take_snapshot()?;
        }

        self.finished = true;
        Ok(())
    }

    /// Execute one statement, recording its outcome in the log
    fn execute_statement(&mut self, statement: &Statement) {
        let location = statement.location;

        match &statement.op {
            Op::Push(value) => {
                let before = self.stack.capacity();
                match self.stack.push(value.clone()) {
                    Ok(()) => {
                        let mut text = format!(
                            "push {} → size {}, capacity {}",
                            value,
                            self.stack.size(),
                            self.stack.capacity()
                        );
                        if self.stack.capacity() != before {
                            text.push_str(&format!(" (grew from {})", before));
                        }
                        self.log.record(LogKind::Info, text, location);
                    }
                    Err(e) => {
                        self.log.record(LogKind::Error, format!("error: {}", e), location);
                    }
                }
            }
            Op::Pull(count) => {
                for _ in 0..*count {
                    self.pull_once(location);
                }
            }
            Op::Drain => {
                let mut drained = 0;
                while self.stack.pull().is_some() {
                    drained += 1;
                }
                self.log.record(
                    LogKind::Pulled,
                    format!("drain → {} value(s), capacity {}", drained, self.stack.capacity()),
                    location,
                );
            }
            Op::Trim => {
                let before = self.stack.capacity();
                self.stack.trim();
                self.log.record(
                    LogKind::Info,
                    format!("trim → capacity {} → {}", before, self.stack.capacity()),
                    location,
                );
            }
            Op::Clear => {
                self.stack.clear();
                self.log.record(
                    LogKind::Info,
                    format!(
                        "clear → size {}, capacity {}",
                        self.stack.size(),
                        self.stack.capacity()
                    ),
                    location,
                );
            }
            Op::PushBatch(values) => {
                let count = values.len();
                self.stack.push_batch(values.clone());
                self.log.record(
                    LogKind::Info,
                    format!("push_batch ({} value(s)) → not implemented, no effect", count),
                    location,
                );
            }
            Op::PullBatch => {
                let batch = self.stack.pull_batch();
                self.log.record(
                    LogKind::Info,
                    format!("pull_batch → {} value(s), not implemented", batch.len()),
                    location,
                );
            }
        }
    }

    fn pull_once(&mut self, location: SourceLocation) {
        let text = match self.stack.pull() {
            Some(value) => format!("pull → {}", value),
            None => "pull → (empty)".to_string(),
        };
        self.log.record(LogKind::Pulled, text, location);
    }

    /// Take a snapshot of the current state
    fn take_snapshot(&mut self) -> Result<(), RunError> {
        let snapshot = Snapshot::new(
            self.stack.clone(),
            self.log.clone(),
            self.snapshot_manager.len(),
            self.current_location,
            self.current_statement,
        );

        self.snapshot_manager
            .push(snapshot)
            .map_err(|_| RunError::SnapshotLimitExceeded {
                current: self.snapshot_manager.memory_usage(),
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Restore the state captured in a snapshot
    fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.stack = snapshot.stack.clone();
        self.log = snapshot.log.clone();
        self.current_location = snapshot.source_location;
        self.current_statement = snapshot.statement_index;
        self.history_position = snapshot.history_index;
    }

    fn restore_at(&mut self, index: usize) -> Result<(), RunError> {
        let snapshot = self
            .snapshot_manager
            .get(index)
            .cloned()
            .ok_or_else(|| RunError::History {
                message: "Snapshot not found in history".to_string(),
            })?;
        self.restore_snapshot(&snapshot);
        Ok(())
    }

    /// Step backward in the history
    pub fn step_backward(&mut self) -> Result<(), RunError> {
        if self.history_position == 0 {
            return Err(RunError::History {
                message: "Already at the beginning of the run".to_string(),
            });
        }

        self.restore_at(self.history_position - 1)
    }

    /// Step forward in the history
    pub fn step_forward(&mut self) -> Result<(), RunError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RunError::History {
                message: "No more snapshots available (run finished)".to_string(),
            });
        }

        self.restore_at(self.history_position + 1)
    }

    /// Rewind to the state before the first operation
    pub fn rewind_to_start(&mut self) -> Result<(), RunError> {
        if self.snapshot_manager.is_empty() {
            return Err(RunError::History {
                message: "No snapshots available".to_string(),
            });
        }

        self.restore_at(0)
    }

    /// Jump to the state after the last operation
    pub fn jump_to_end(&mut self) -> Result<(), RunError> {
        match self.snapshot_manager.len() {
            0 => Err(RunError::History {
                message: "No snapshots available".to_string(),
            }),
            len => self.restore_at(len - 1),
        }
    }

    // ========== Getter methods for UI ==========

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn stack(&self) -> &TypedStack<Value> {
        &self.stack
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }

    /// Statement that produced the current state
    pub fn current_statement(&self) -> Option<&Statement> {
        self.current_statement
            .and_then(|index| self.script.statements.get(index))
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse::Parser;

    fn runner_for(source: &str) -> Runner {
        let script = Parser::new(source).unwrap().parse_script().unwrap();
        let mut runner = Runner::new(script, 64 * 1024 * 1024);
        runner.run().unwrap();
        runner
    }

    #[test]
    fn test_one_snapshot_per_statement() {
        let runner = runner_for("push 1\npush 2\npull");
        assert_eq!(runner.total_snapshots(), 4);
        assert_eq!(runner.history_position(), 3);
        assert!(runner.is_finished());
        assert_eq!(runner.stack().size(), 1);
    }

    #[test]
    fn test_growth_is_logged() {
        let runner = runner_for("stack 1\npush 1\npush 2");
        let output = runner.log().get_output();
        assert_eq!(output[0], "push 1 → size 1, capacity 1");
        assert_eq!(output[1], "push 2 → size 2, capacity 2 (grew from 1)");
    }

    #[test]
    fn test_step_backward_restores_stack() {
        let mut runner = runner_for("push \"a\"\npush \"b\"\nclear");
        assert_eq!(runner.stack().capacity(), 0);

        runner.step_backward().unwrap();
        assert_eq!(runner.stack().size(), 2);
        assert_eq!(runner.stack().capacity(), 10);
        assert_eq!(runner.current_location().line, 2);
        assert!(matches!(
            runner.current_statement().map(|s| &s.op),
            Some(Op::Push(_))
        ));

        runner.step_forward().unwrap();
        assert_eq!(runner.stack().capacity(), 0);
        assert!(runner.step_forward().is_err());
    }

    #[test]
    fn test_rewind_and_jump() {
        let mut runner = runner_for("push 1\npush 2");
        runner.rewind_to_start().unwrap();
        assert_eq!(runner.history_position(), 0);
        assert!(runner.stack().is_empty());
        assert!(runner.current_statement().is_none());
        assert!(runner.log().lines.is_empty());
        assert!(runner.step_backward().is_err());

        runner.jump_to_end().unwrap();
        assert_eq!(runner.stack().size(), 2);
    }

    #[test]
    fn test_tiny_snapshot_limit_fails_run() {
        let script = Parser::new("push 1").unwrap().parse_script().unwrap();
        let mut runner = Runner::new(script, 1);
        assert!(matches!(
            runner.run(),
            Err(RunError::SnapshotLimitExceeded { .. })
        ));
    }
}
