#![warn(missing_docs)]

//! # `regicide`
//!
//! The non-GUI core of a region Queens puzzle front-end: paint an N x N board
//! into lettered regions, hand it to an external solver process, and read back
//! the placement it found.
//! Begin by building a [`Board`] with [`Board::new`] and painting it, or load
//! one wholesale from text with [`Board::from_lines`]. Then run a [`Session`],
//! which validates the board, writes the solver's input file, blocks on the
//! solver binary, and decodes its result.
//!
//! # Protocol
//! The solver is an independently built program spoken to through three fixed
//! text files. The input file spells each region id as an uppercase letter,
//! one row per line. The output file is either the single line `No Solution`
//! or a grid of `#` markers, optionally followed by `---META---` and timing
//! lines. The optional trace file records intermediate search states as
//! `---ITERATION n---` blocks, parsed on demand by [`trace::read_all`].
//!
//! Region ids map positionally to the wire alphabet `A`-`Z`, so boards with
//! more than 26 regions cannot be put on the wire; encoding says so rather
//! than truncating.

pub use board::{Board, BoardError, Palette, RegionId};
pub use location::Location;
pub use protocol::{Outcome, Solution, SolveMeta};
pub use region::{validate, ValidationError};
pub use session::{Launcher, ProcessLauncher, Session, SessionError, SessionPaths};
pub use trace::IterationSnapshot;

pub(crate) mod board;
pub(crate) mod location;
pub mod protocol;
pub(crate) mod region;
pub mod session;
pub mod trace;
