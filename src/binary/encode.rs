/*!
  The encoding side of the binary format. An `Instruction` is the working record for one
  instruction: its first word is kept in sync with the number of words appended, so the
  record is always a well formed instruction. Nothing here applies byte order; words are
  host order until `Binary::assemble` emits them.
*/

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use super::{join_first_word, split_first_word, TwoWords, Word, DoubleWord};
use crate::error::{Diagnostic, Position, Result};

/// The word count field is 16 bits wide.
pub const INSTRUCTION_WORD_COUNT_MAX: usize = 0xFFFF;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction {
  opcode : u16,
  words  : Vec<Word>,
}

impl Instruction {
  /// An instruction with no operands yet.
  pub fn new(opcode: u16) -> Instruction {
    Instruction{
      opcode,
      words: vec![join_first_word(1, opcode)]
    }
  }

  /// Wraps already encoded host-order words. The opcode is taken from word 0.
  pub fn from_words(words: Vec<Word>) -> Instruction {
    let opcode = words.first().map_or(0, |first| split_first_word(*first).1);
    Instruction{ opcode, words }
  }

  pub fn opcode(&self) -> u16 {
    self.opcode
  }

  pub fn word_count(&self) -> usize {
    self.words.len()
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  /// Fails if appending `count` words would exceed `INSTRUCTION_WORD_COUNT_MAX`.
  fn reserve(&self, count: usize, position: Position) -> Result<()> {
    if self.words.len() + count > INSTRUCTION_WORD_COUNT_MAX {
      return Err(Diagnostic::invalid_text(
        position,
        format!("Instruction word count '{}' exceeded.", INSTRUCTION_WORD_COUNT_MAX)
      ));
    }
    Ok(())
  }

  fn sync_first_word(&mut self) {
    // `reserve` keeps the length within 16 bits.
    self.words[0] = join_first_word(self.words.len() as u16, self.opcode);
  }

  pub fn encode_u32(&mut self, value: Word, position: Position) -> Result<()> {
    self.reserve(1, position)?;
    self.words.push(value);
    self.sync_first_word();
    Ok(())
  }

  /// Appends the low word, then the high word.
  pub fn encode_u64(&mut self, value: DoubleWord, position: Position) -> Result<()> {
    self.reserve(2, position)?;
    let TwoWords{ low, high } = TwoWords::from(value);
    self.words.push(low);
    self.words.push(high);
    self.sync_first_word();
    Ok(())
  }

  /// Appends `text` as a NUL terminated, zero padded string operand.
  pub fn encode_string(&mut self, text: &str, position: Position) -> Result<()> {
    if text.as_bytes().contains(&0) {
      return Err(Diagnostic::invalid_text(
        position,
        format!("String literal '{}' contains a NUL byte.", text.escape_default())
      ));
    }
    self.reserve(string_word_count(text.len()), position)?;
    self.words.extend(pack_string(text.as_bytes()));
    self.sync_first_word();
    Ok(())
  }

  /// The words of the instruction rendered as a table, one row per word.
  pub fn word_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Word", ubl->"Value"]);
    for (i, word) in self.words.iter().enumerate() {
      table.add_row(row![r->i, format!("0x{:08x}", word)]);
    }
    table
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.word_table())
  }
}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
    .column_separator('│')
    .borders(' ')
    .separator(
      TableFormat::LinePosition::Title,
      TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
    )
    .padding(1, 1)
    .build();
}

/// Words occupied by a string of `length` bytes: always room for the terminating NUL.
pub fn string_word_count(length: usize) -> usize {
  length / 4 + 1
}

/// Packs bytes low-to-high within each word, zero padding the last word.
pub fn pack_string(bytes: &[u8]) -> Vec<Word> {
  let mut words = vec![0 as Word; string_word_count(bytes.len())];
  for (i, byte) in bytes.iter().enumerate() {
    words[i / 4] |= (*byte as Word) << (8 * (i % 4));
  }
  words
}

/// Unpacks a NUL terminated string from the front of `words`. Returns the bytes before the
/// NUL and the number of words the string occupies, or `None` if `words` runs out before
/// a NUL is found.
pub fn unpack_string(words: &[Word]) -> Option<(Vec<u8>, usize)> {
  let mut bytes = Vec::new();
  for word in words {
    for shift in (0..4).map(|i| 8 * i) {
      let byte = ((word >> shift) & 0xFF) as u8;
      if byte == 0 {
        let count = string_word_count(bytes.len());
        return Some((bytes, count));
      }
      bytes.push(byte);
    }
  }
  None
}
