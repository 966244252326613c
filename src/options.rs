//! Options accepted by `binary_to_text`.

use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
  pub struct Options: u32 {
    /// Write directly to the caller's sink instead of materializing a `Text`.
    const PRINT = 1 << 1;
    /// Tag ids, result ids, literals and strings with terminal colours. Only honoured
    /// together with `PRINT`.
    const COLOR = 1 << 2;
  }
}

impl Options {
  pub fn print(&self) -> bool {
    self.contains(Options::PRINT)
  }

  pub fn color(&self) -> bool {
    self.print() && self.contains(Options::COLOR)
  }
}
