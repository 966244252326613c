/*!

  A module is a flat buffer of 32 bit words. The first five words are the header; the
  rest is a sequence of variable length instructions. The first word of every instruction
  packs the instruction's total word count into the high 16 bits and the opcode into the
  low 16 bits:

    Word count: 16 bits
    Opcode:     16 bits

  Words are stored in whichever byte order the producer used. The magic number in word 0
  identifies that order, and every later read passes the raw word through `fix_word` so
  the rest of the crate only ever sees host-order values. Encoding goes the other way: an
  `Instruction` is built in host order and byte order is applied once, when the module is
  emitted by `Binary::assemble`.

*/

mod encode;
mod header;

use strum_macros::Display as StrumDisplay;

use crate::error::{Diagnostic, Position, Result};

pub use encode::{pack_string, string_word_count, unpack_string, Instruction,
                 INSTRUCTION_WORD_COUNT_MAX};
pub use header::{generator_name, Header, GENERATOR_KHRONOS, HEADER_SIZE, INDEX_BOUND,
                 INDEX_GENERATOR_NUMBER, INDEX_INSTRUCTION, INDEX_MAGIC_NUMBER,
                 INDEX_SCHEMA, INDEX_VERSION_NUMBER, MAGIC_NUMBER, VERSION_NUMBER};

// If you change this you must also change `split_first_word` and the encoders.
pub type Word = u32;
pub type DoubleWord = u64;
// Convenience for decomposing a DoubleWord into a high word and a low word:
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TwoWords {
  pub low: Word,
  pub high: Word
}

impl From<DoubleWord> for TwoWords {
  fn from(value: DoubleWord) -> TwoWords {
    TwoWords{
      low  : (value & 0xFFFF_FFFF) as Word,
      high : (value >> 32) as Word
    }
  }
}

impl From<TwoWords> for DoubleWord {
  fn from(words: TwoWords) -> DoubleWord {
    (words.low as DoubleWord) | ((words.high as DoubleWord) << 32)
  }
}

/// Byte order of the words of a module.
#[derive(StrumDisplay, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Endianness {
  Little,
  Big
}

impl Endianness {
  pub fn host() -> Endianness {
    if cfg!(target_endian = "little") {
      Endianness::Little
    } else {
      Endianness::Big
    }
  }
}

/// Converts a word between `endian` and host byte order. The conversion is its own
/// inverse, so the same function serves reads and writes.
pub fn fix_word(word: Word, endian: Endianness) -> Word {
  match endian == Endianness::host() {
    true  => word,
    false => word.swap_bytes()
  }
}

/// Splits the first word of an instruction into its word count and opcode.
pub fn split_first_word(word: Word) -> (u16, u16) {
  ((word >> 16) as u16, (word & 0xFFFF) as u16)
}

/// Packs a word count and opcode into the first word of an instruction.
pub fn join_first_word(word_count: u16, opcode: u16) -> Word {
  ((word_count as Word) << 16) | opcode as Word
}

/// An owned word buffer holding one module.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Binary {
  words: Vec<Word>
}

impl Binary {
  pub fn new(words: Vec<Word>) -> Binary {
    Binary{ words }
  }

  /// Reinterprets bytes as words in host order. The byte length must be a whole number of
  /// words.
  pub fn from_bytes(bytes: &[u8]) -> Result<Binary> {
    if bytes.len() % 4 != 0 {
      return Err(Diagnostic::invalid_binary(
        Position::at(bytes.len() / 4),
        format!("Binary length of {} bytes is not a multiple of 4.", bytes.len())
      ));
    }
    let words = bytes
      .chunks_exact(4)
      .map(|chunk| Word::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
      .collect();
    Ok(Binary{ words })
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    self.words.iter().flat_map(|word| word.to_ne_bytes().to_vec()).collect()
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  pub fn words_mut(&mut self) -> &mut Vec<Word> {
    &mut self.words
  }

  pub fn into_words(self) -> Vec<Word> {
    self.words
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// The raw word at `index`, as stored.
  pub fn raw_word(&self, index: usize) -> Result<Word> {
    self.words.get(index).copied().ok_or_else(|| {
      Diagnostic::invalid_binary(
        Position::at(index),
        format!("Unexpected end of binary at word {} of {}.", index, self.words.len())
      )
    })
  }

  /// The word at `index`, converted to host order.
  pub fn word(&self, index: usize, endian: Endianness) -> Result<Word> {
    self.raw_word(index).map(|word| fix_word(word, endian))
  }

  /// Determines the byte order of the module from the raw bytes of the magic number.
  pub fn endianness(&self) -> Result<Endianness> {
    let first = self.words.first().ok_or_else(|| {
      Diagnostic::invalid_binary(Position::default(), "Binary is empty.")
    })?;

    match first.to_ne_bytes() {
      [0x03, 0x02, 0x23, 0x07] => Ok(Endianness::Little),
      [0x07, 0x23, 0x02, 0x03] => Ok(Endianness::Big),
      _ => Err(Diagnostic::invalid_binary(
        Position::default(),
        format!("Invalid SPIR-V magic number '{:x}'.", first)
      ))
    }
  }

  /// Emits a complete module: a header declaring `bound`, then each instruction. Every
  /// word is written in `endian` byte order.
  pub fn assemble(bound: Word, instructions: &[Instruction], endian: Endianness)
    -> Result<Binary>
  {
    let mut binary = Binary::with_header(bound)?;
    for instruction in instructions {
      binary.words.extend_from_slice(instruction.words());
    }
    for word in binary.words.iter_mut() {
      *word = fix_word(*word, endian);
    }
    Ok(binary)
  }
}

impl From<Vec<Word>> for Binary {
  fn from(words: Vec<Word>) -> Binary {
    Binary::new(words)
  }
}
