//! One solve against the external solver process: validate, encode, spawn,
//! block, decode.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::protocol::{self, Outcome, ProtocolError};
use crate::region::{self, ValidationError};

/// Reasons one solve attempt can fail.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The board failed structural validation. Nothing was written or spawned.
    #[error("board is not solvable as painted: {0}")]
    Invalid(#[from] ValidationError),
    /// The board cannot be expressed in the wire format.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// No solver binary exists at the given path.
    #[error("solver executable not found at {0}")]
    ExecutableMissing(PathBuf),
    /// The solver exited with a nonzero status; any partial output is ignored.
    #[error("solver crashed with exit code {code:?}")]
    SolverCrashed {
        /// The exit code, when the platform reports one.
        code: Option<i32>,
    },
    /// A protocol file could not be written or read.
    #[error("protocol file i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// How a session starts the external solver and waits for it.
///
/// A solve only needs "run this binary on this input and tell me how it
/// exited", so the session depends on this capability rather than on process
/// plumbing and tests substitute fakes that write canned protocol files.
pub trait Launcher {
    /// Run `executable` with `input` as its sole argument, blocking until it exits.
    fn run(&self, executable: &Path, input: &Path) -> io::Result<ExitStatus>;
}

/// The default launcher: a blocking [`std::process::Command`] invocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn run(&self, executable: &Path, input: &Path) -> io::Result<ExitStatus> {
        Command::new(executable).arg(input).status()
    }
}

/// Locations of the three protocol files exchanged with the solver.
///
/// Each file is written wholly by one party and read wholly by the other
/// after the writer is done; there is no interleaving.
#[derive(Clone, Debug)]
pub struct SessionPaths {
    /// Where the encoded board is written for the solver to read.
    pub input: PathBuf,
    /// Where the solver writes its result.
    pub output: PathBuf,
    /// Where the solver optionally records its iteration trace.
    pub trace: PathBuf,
}

impl Default for SessionPaths {
    fn default() -> Self {
        Self {
            input: PathBuf::from("test/input.txt"),
            output: PathBuf::from("test/output.txt"),
            trace: PathBuf::from("test/iterations.txt"),
        }
    }
}

/// Orchestrates solves against an external solver binary.
///
/// There is at most one solve in flight: [`solve`](Self::solve) borrows the
/// board shared, freezing it, and blocks its caller for the entire run of the
/// external process. Callers wanting a responsive surface run it off their
/// interaction thread.
pub struct Session<L: Launcher = ProcessLauncher> {
    paths: SessionPaths,
    launcher: L,
}

impl Session<ProcessLauncher> {
    /// A session over the default protocol file locations.
    pub fn new() -> Self {
        Self::with_launcher(SessionPaths::default(), ProcessLauncher)
    }
}

impl Default for Session<ProcessLauncher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher> Session<L> {
    /// A session with explicit paths and a custom launcher.
    pub fn with_launcher(paths: SessionPaths, launcher: L) -> Self {
        Self { paths, launcher }
    }

    /// The file the solver's result is read from.
    pub fn output_path(&self) -> &Path {
        &self.paths.output
    }

    /// The file the solver's iteration trace lands in, when it records one.
    ///
    /// The trace is left on disk after [`solve`](Self::solve) for on-demand
    /// parsing by [`trace::read_all`](crate::trace::read_all); it is never
    /// required for the solve itself.
    pub fn trace_path(&self) -> &Path {
        &self.paths.trace
    }

    /// Run one solve of `board` with the solver binary at `executable`.
    ///
    /// Validation failures surface before any file is touched or process
    /// spawned. A missing output file after a clean exit is `Ok(None)`: the
    /// solver owns its own reporting, so an absent result means "nothing to
    /// show", not a crash.
    pub fn solve(&self, board: &Board, executable: &Path) -> Result<Option<Outcome>, SessionError> {
        region::validate(board)?;
        let encoded = protocol::encode(board)?;

        if let Some(parent) = self.paths.input.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.paths.input, encoded)?;
        debug!(input = %self.paths.input.display(), "wrote solver input");

        if !executable.exists() {
            return Err(SessionError::ExecutableMissing(executable.to_owned()));
        }

        info!(executable = %executable.display(), "launching solver");
        let status = self.launcher.run(executable, &self.paths.input)?;
        info!(%status, "solver exited");

        if !status.success() {
            return Err(SessionError::SolverCrashed { code: status.code() });
        }

        if !self.paths.output.exists() {
            warn!(output = %self.paths.output.display(), "solver exited cleanly but wrote no output");
            return Ok(None);
        }

        let text = fs::read_to_string(&self.paths.output)?;
        Ok(protocol::decode_output(&text, board.size()))
    }
}
