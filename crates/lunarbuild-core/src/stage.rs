//! Build tasks and the cached stage wrapper
//!
//! A [`BuildTask`] pairs an action with the output it produces and the
//! inputs it reads. [`CachedStage`] gates the action behind
//! [`freshness::are_current`](crate::freshness::are_current).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::freshness::{self, Freshness, Timestamp};

/// Integer stage status: zero is success, anything else is a failure code
pub type Status = i32;

/// Status of a successful stage
pub const SUCCESS: Status = 0;

/// Status reported for failures that carry no code of their own
pub const FAILURE: Status = 1;

/// Result of running an action.
///
/// `Ok` carries the status to propagate (an external tool's exit code, for
/// instance); `Err` is logged by the stage and reported as [`FAILURE`].
pub type ActionResult = std::result::Result<Status, Box<dyn std::error::Error + Send + Sync>>;

/// Work performed by a stage when its output is stale
pub trait Action {
    /// Run the action
    fn run(&self) -> ActionResult;
}

impl<F> Action for F
where
    F: Fn() -> ActionResult,
{
    fn run(&self) -> ActionResult {
        self()
    }
}

/// Process-wide, read-only settings shared by every stage
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Timestamp of the build tool itself; outputs older than this rebuild
    pub tool_stamp: Option<Timestamp>,

    /// Run every action regardless of freshness
    pub force: bool,
}

impl BuildContext {
    /// Create a context with the given tool timestamp
    pub fn new(tool_stamp: Option<Timestamp>) -> Self {
        Self {
            tool_stamp,
            force: false,
        }
    }

    /// Ignore cached outputs
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Immutable description of one pipeline stage
pub struct BuildTask {
    name: String,
    outputs: Vec<PathBuf>,
    inputs: Vec<PathBuf>,
    action: Box<dyn Action>,
}

impl BuildTask {
    /// Create a task producing `output` from `inputs`
    pub fn new(
        name: impl Into<String>,
        output: impl Into<PathBuf>,
        inputs: Vec<PathBuf>,
        action: impl Action + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            outputs: vec![output.into()],
            inputs,
            action: Box::new(action),
        }
    }

    /// Stage name used in trace output
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Also produce `output`; the stage is stale while any output is missing
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.outputs.push(output.into());
        self
    }

    /// Primary output
    pub fn output(&self) -> &Path {
        &self.outputs[0]
    }

    /// Every declared output, primary first
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Declared inputs, in check order
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }
}

impl fmt::Debug for BuildTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildTask")
            .field("name", &self.name)
            .field("outputs", &self.outputs)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

/// A task gated by the staleness check
#[derive(Debug)]
pub struct CachedStage {
    task: BuildTask,
}

impl CachedStage {
    /// Wrap a task
    pub fn new(task: BuildTask) -> Self {
        Self { task }
    }

    /// The wrapped task
    pub fn task(&self) -> &BuildTask {
        &self.task
    }

    /// Run the action unless the output is current.
    ///
    /// Returns [`SUCCESS`] without running anything when the output is
    /// current, [`FAILURE`] when a declared input cannot be stat'd, and the
    /// action's own status otherwise.
    pub fn run(&self, ctx: &BuildContext) -> Status {
        let task = &self.task;
        let inputs: Vec<_> = task.inputs.iter().map(|p| p.display().to_string()).collect();
        let outputs: Vec<_> = task.outputs.iter().map(|p| p.display().to_string()).collect();
        tracing::info!("[{}] {:?} -> {}", task.name, inputs, outputs.join(", "));

        if ctx.force {
            tracing::debug!("[{}] forced rebuild", task.name);
        } else {
            match freshness::are_current(
                task.outputs.as_slice(),
                task.inputs.as_slice(),
                ctx.tool_stamp,
            ) {
                Ok(Freshness::Current) => {
                    tracing::info!("[{}] using cache", task.name);
                    return SUCCESS;
                }
                Ok(Freshness::Stale(reason)) => {
                    tracing::debug!("[{}] rebuilding: {}", task.name, reason);
                }
                Err(Error::MissingInput { path, source }) => {
                    tracing::error!("[{}] ERROR: {}: {}", task.name, path.display(), source);
                    return FAILURE;
                }
                Err(e) => {
                    tracing::error!("[{}] ERROR: {}", task.name, e);
                    return FAILURE;
                }
            }
        }

        match task.action.run() {
            Ok(status) => {
                if status != SUCCESS {
                    tracing::error!("[{}] failed with status {}", task.name, status);
                }
                status
            }
            Err(e) => {
                tracing::error!("[{}] ERROR: {}", task.name, e);
                FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, SystemTime};

    fn touch(path: &Path, secs: u64) {
        std::fs::write(path, b"x").unwrap();
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs))
            .unwrap();
    }

    fn counting(status: Status) -> (Rc<Cell<u32>>, impl Action + 'static) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let action = move || -> ActionResult {
            counter.set(counter.get() + 1);
            Ok(status)
        };
        (calls, action)
    }

    #[test]
    fn test_current_output_skips_action() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = (dir.path().join("in"), dir.path().join("out"));
        touch(&input, 0);
        touch(&output, 10);

        let (calls, action) = counting(7);
        let stage = CachedStage::new(BuildTask::new("t", &output, vec![input], action));

        assert_eq!(stage.run(&BuildContext::default()), SUCCESS);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_stale_output_runs_action_and_propagates_status() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = (dir.path().join("in"), dir.path().join("out"));
        touch(&input, 20);
        touch(&output, 10);

        let (calls, action) = counting(3);
        let stage = CachedStage::new(BuildTask::new("t", &output, vec![input], action));

        assert_eq!(stage.run(&BuildContext::default()), 3);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_missing_input_fails_without_running() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        touch(&output, 10);

        let (calls, action) = counting(SUCCESS);
        let stage = CachedStage::new(BuildTask::new(
            "t",
            &output,
            vec![dir.path().join("gone")],
            action,
        ));

        assert_eq!(stage.run(&BuildContext::default()), FAILURE);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_missing_output_runs_action_even_with_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let (calls, action) = counting(SUCCESS);
        let stage = CachedStage::new(BuildTask::new(
            "t",
            dir.path().join("out"),
            vec![dir.path().join("gone")],
            action,
        ));

        assert_eq!(stage.run(&BuildContext::default()), SUCCESS);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_action_error_becomes_failure() {
        let dir = tempfile::tempdir().unwrap();
        let stage = CachedStage::new(BuildTask::new(
            "t",
            dir.path().join("out"),
            vec![],
            || -> ActionResult { Err("boom".into()) },
        ));
        assert_eq!(stage.run(&BuildContext::default()), FAILURE);
    }

    #[test]
    fn test_force_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        touch(&output, 10);

        let (calls, action) = counting(SUCCESS);
        let stage = CachedStage::new(BuildTask::new("t", &output, vec![], action));

        stage.run(&BuildContext::default().with_force(true));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_missing_secondary_output_reruns_action() {
        let dir = tempfile::tempdir().unwrap();
        let (input, js) = (dir.path().join("in"), dir.path().join("table.js"));
        touch(&input, 0);
        touch(&js, 10);

        let (calls, action) = counting(SUCCESS);
        let task = BuildTask::new("t", &js, vec![input], action).with_output(dir.path().join("glue.c"));
        assert_eq!(task.output(), js);
        assert_eq!(task.outputs().len(), 2);

        let stage = CachedStage::new(task);
        assert_eq!(stage.run(&BuildContext::default()), SUCCESS);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_tool_stamp_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = (dir.path().join("in"), dir.path().join("out"));
        touch(&input, 0);
        touch(&output, 10);
        let tool = Timestamp::of(&output).unwrap();

        let (calls, action) = counting(SUCCESS);
        let stage = CachedStage::new(BuildTask::new("t", &output, vec![input], action));

        stage.run(&BuildContext::new(tool));
        assert_eq!(calls.get(), 1);
    }
}
