//! ANSI emphasis for the operand classes of disassembly text.

use std::fmt::Write;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Colour {
  Grey,
  Red,
  Green,
  Yellow,
  Blue,
}

impl Colour {
  fn code(&self) -> &'static str {
    match self {
      Colour::Grey   => "\x1b[1;30m",
      Colour::Red    => "\x1b[31m",
      Colour::Green  => "\x1b[32m",
      Colour::Yellow => "\x1b[33m",
      Colour::Blue   => "\x1b[34m",
    }
  }
}

pub const RESET: &str = "\x1b[0m";

/// Writes `text` into `out`, wrapped in the colour's escape codes when `enabled`.
pub fn paint<T: std::fmt::Display>(out: &mut String, colour: Colour, enabled: bool, text: T) {
  if enabled {
    out.push_str(colour.code());
  }
  // Writing into a `String` cannot fail.
  let _ = write!(out, "{}", text);
  if enabled {
    out.push_str(RESET);
  }
}
