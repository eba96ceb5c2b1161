//! Modification-time staleness checks
//!
//! An output is current when it exists, is newer than the build tool
//! itself, and is strictly newer than every declared input. Equal
//! timestamps count as stale so coarse filesystem clocks err toward
//! rebuilding.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Last-modification time of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(SystemTime);

impl Timestamp {
    /// Read the modification time of `path`.
    ///
    /// A path that does not exist yields `Ok(None)`; any other failure is
    /// returned as an error.
    pub fn of(path: impl AsRef<Path>) -> io::Result<Option<Self>> {
        match std::fs::metadata(path.as_ref()).and_then(|m| m.modified()) {
            Ok(time) => Ok(Some(Self(time))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Newest timestamp among the paths that can be read.
    ///
    /// Used to compute the tool's own timestamp from its executable and
    /// manifest; paths that are missing or unreadable are ignored.
    pub fn newest_of<I, P>(paths: I) -> Option<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .filter_map(|p| Self::of(p).ok().flatten())
            .max()
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self(time)
    }
}

/// Outcome of a staleness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// The output can be reused as is
    Current,
    /// The output must be rebuilt
    Stale(StaleReason),
}

impl Freshness {
    /// Returns `true` if the result is `Current`.
    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current)
    }
}

/// Why an output is considered stale
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// The output does not exist (or cannot be stat'd)
    OutputMissing,
    /// The build tool changed at or after the output was written
    ToolChanged,
    /// An input changed at or after the output was written
    InputChanged(PathBuf),
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputMissing => write!(f, "output missing"),
            Self::ToolChanged => write!(f, "build tool is newer than output"),
            Self::InputChanged(path) => write!(f, "{} is newer than output", path.display()),
        }
    }
}

/// Decide whether `output` is up to date.
///
/// Inputs are checked in order and only once the output is known to exist
/// and to be newer than `tool`. A missing input at that point is an
/// [`Error::MissingInput`]: the dependency is broken and no rebuild can fix
/// it.
pub fn is_current<P: AsRef<Path>>(
    output: &Path,
    inputs: &[P],
    tool: Option<Timestamp>,
) -> Result<Freshness> {
    are_current(std::slice::from_ref(&output), inputs, tool)
}

/// [`is_current`] for a stage writing several files.
///
/// Any missing output makes the stage stale; otherwise the tool and the
/// inputs are compared against the oldest output.
pub fn are_current<O, P>(outputs: &[O], inputs: &[P], tool: Option<Timestamp>) -> Result<Freshness>
where
    O: AsRef<Path>,
    P: AsRef<Path>,
{
    let mut oldest: Option<Timestamp> = None;
    for output in outputs {
        let output = output.as_ref();
        let time = match Timestamp::of(output) {
            Ok(Some(time)) => time,
            Ok(None) => return Ok(Freshness::Stale(StaleReason::OutputMissing)),
            Err(e) => {
                tracing::debug!("cannot stat {}: {}", output.display(), e);
                return Ok(Freshness::Stale(StaleReason::OutputMissing));
            }
        };
        oldest = Some(oldest.map_or(time, |t| t.min(time)));
    }
    let Some(out_time) = oldest else {
        return Ok(Freshness::Stale(StaleReason::OutputMissing));
    };

    if tool.is_some_and(|t| t >= out_time) {
        return Ok(Freshness::Stale(StaleReason::ToolChanged));
    }

    for input in inputs {
        let input = input.as_ref();
        let in_time = std::fs::metadata(input)
            .and_then(|m| m.modified())
            .map_err(|source| Error::MissingInput {
                path: input.to_path_buf(),
                source,
            })?;
        if Timestamp(in_time) >= out_time {
            return Ok(Freshness::Stale(StaleReason::InputChanged(
                input.to_path_buf(),
            )));
        }
    }

    Ok(Freshness::Current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn touch(path: &Path, time: SystemTime) {
        std::fs::write(path, b"x").unwrap();
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
    }

    #[test]
    fn test_missing_output_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let freshness = is_current::<PathBuf>(&dir.path().join("out"), &[], None).unwrap();
        assert_eq!(freshness, Freshness::Stale(StaleReason::OutputMissing));
    }

    #[test]
    fn test_missing_output_skips_input_checks() {
        let dir = tempfile::tempdir().unwrap();
        let freshness =
            is_current(&dir.path().join("out"), &[dir.path().join("nope")], None).unwrap();
        assert_eq!(freshness, Freshness::Stale(StaleReason::OutputMissing));
    }

    #[test]
    fn test_older_inputs_are_current() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = (dir.path().join("in"), dir.path().join("out"));
        touch(&input, at(0));
        touch(&output, at(10));

        let freshness = is_current(&output, &[&input], Some(at(5).into())).unwrap();
        assert!(freshness.is_current());
    }

    #[test]
    fn test_equal_input_time_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = (dir.path().join("in"), dir.path().join("out"));
        touch(&input, at(10));
        touch(&output, at(10));

        let freshness = is_current(&output, &[&input], None).unwrap();
        assert_eq!(freshness, Freshness::Stale(StaleReason::InputChanged(input)));
    }

    #[test]
    fn test_tool_newer_or_equal_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        touch(&output, at(10));

        for tool in [at(10), at(11)] {
            let freshness = is_current::<PathBuf>(&output, &[], Some(tool.into())).unwrap();
            assert_eq!(freshness, Freshness::Stale(StaleReason::ToolChanged));
        }
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        touch(&output, at(10));

        let result = is_current(&output, &[dir.path().join("gone")], None);
        assert!(matches!(result, Err(Error::MissingInput { .. })));
    }

    #[test]
    fn test_first_stale_input_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let (newer, output) = (dir.path().join("newer"), dir.path().join("out"));
        touch(&output, at(10));
        touch(&newer, at(20));

        // The missing input after the stale one is never checked.
        let freshness = is_current(&output, &[newer.clone(), dir.path().join("gone")], None).unwrap();
        assert_eq!(freshness, Freshness::Stale(StaleReason::InputChanged(newer)));
    }

    #[test]
    fn test_any_missing_output_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let (input, js) = (dir.path().join("in"), dir.path().join("table.js"));
        touch(&input, at(0));
        touch(&js, at(10));

        let outputs = [js, dir.path().join("glue.c")];
        let freshness = are_current(&outputs, &[&input], None).unwrap();
        assert_eq!(freshness, Freshness::Stale(StaleReason::OutputMissing));
    }

    #[test]
    fn test_inputs_compared_against_oldest_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let (js, c) = (dir.path().join("table.js"), dir.path().join("glue.c"));
        touch(&input, at(5));
        touch(&js, at(10));
        touch(&c, at(3));

        let freshness = are_current(&[&js, &c], &[&input], None).unwrap();
        assert_eq!(freshness, Freshness::Stale(StaleReason::InputChanged(input.clone())));

        touch(&c, at(10));
        assert!(are_current(&[&js, &c], &[&input], None).unwrap().is_current());
        assert_eq!(
            are_current(&[&js, &c], &[&input], Some(at(10).into())).unwrap(),
            Freshness::Stale(StaleReason::ToolChanged)
        );
    }

    #[test]
    fn test_newest_of_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        touch(&a, at(1));
        touch(&b, at(2));

        let newest = Timestamp::newest_of([a, b, dir.path().join("missing")]);
        assert_eq!(newest, Some(at(2).into()));
        assert_eq!(Timestamp::newest_of(Vec::<PathBuf>::new()), None);
    }
}
