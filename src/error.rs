//! Diagnostics. Every fallible operation in the crate returns the first failure it
//! detects as a `Diagnostic`: an error kind, a message, and the word position at which
//! the failure was detected.

use std::fmt::{Display, Formatter};
use std::ops::Add;

use strum_macros::Display as StrumDisplay;
use thiserror::Error;

/// The category of a failure.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ErrorKind {
  /// Structural malformation of a binary module.
  InvalidBinary,
  /// Malformed input to an encoding operation.
  InvalidText,
  /// A required output destination was absent (or supplied when it must not be).
  InvalidPointer,
  /// A required description table was not supplied.
  InvalidTable,
  /// No diagnostic destination was available. Diagnostics are returned as the `Err` value
  /// of every operation in this crate, so this kind is never produced by it; it exists for
  /// callers that forward diagnostics into their own sinks.
  InvalidDiagnostic,
  /// Allocation failure while materializing output.
  OutOfMemory,
}

/// A cursor into a word buffer, with line/column bookkeeping for text-oriented callers.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Position {
  pub index  : usize,
  pub line   : usize,
  pub column : usize,
}

impl Position {
  pub fn at(index: usize) -> Position {
    Position{ index, line: 0, column: 0 }
  }
}

impl Display for Position {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.index)
  }
}

// Advance a position by a number of words.
impl Add<usize> for Position {
  type Output = Position;
  fn add(self, rhs: usize) -> Position {
    Position{ index: self.index + rhs, ..self }
  }
}

#[derive(Error, Clone, Eq, PartialEq, Debug)]
#[error("word {position}: {message}")]
pub struct Diagnostic {
  pub kind     : ErrorKind,
  pub message  : String,
  pub position : Position,
}

impl Diagnostic {
  pub fn new<S: Into<String>>(kind: ErrorKind, position: Position, message: S) -> Diagnostic {
    Diagnostic{ kind, message: message.into(), position }
  }

  pub fn invalid_binary<S: Into<String>>(position: Position, message: S) -> Diagnostic {
    Diagnostic::new(ErrorKind::InvalidBinary, position, message)
  }

  pub fn invalid_text<S: Into<String>>(position: Position, message: S) -> Diagnostic {
    Diagnostic::new(ErrorKind::InvalidText, position, message)
  }
}

pub type Result<T> = std::result::Result<T, Diagnostic>;
