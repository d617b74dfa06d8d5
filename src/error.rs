//! The encoder's only failure mode: a length-framed region too large for its size field.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Identifies a length-framed region of the output for diagnostics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Frame {
  /// A named section.
  Section(&'static str),
  /// The instruction stream of the function with the given index.
  FunctionBody(u32),
}

impl Display for Frame {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Frame::Section(name) => write!(f, "section `{}`", name),
      Frame::FunctionBody(index) => write!(f, "body of function {}", index),
    }
  }
}

/**
  Errors are limitations of the encoder, never complaints about the module: the input is assumed
  to have been validated upstream. A module that triggers one cannot be represented at all, so no
  partial output is ever returned alongside it.
*/
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum EncodeError {
  #[error("{frame} measures {size} bytes, which does not fit in a 4 byte size field (limit {limit})")]
  FrameTooLarge {
    frame : Frame,
    size  : usize,
    limit : usize,
  },
}

pub type Result<T> = std::result::Result<T, EncodeError>;
