//! The fixed five word module header.

use std::fmt::{Display, Formatter};

use tracing::warn;

use super::{Binary, Endianness, Word};
use crate::error::{Diagnostic, Position, Result};

pub const MAGIC_NUMBER   : Word = 0x0723_0203;
pub const VERSION_NUMBER : Word = 0x0001_0000;
pub const GENERATOR_KHRONOS : Word = 0;

pub const INDEX_MAGIC_NUMBER     : usize = 0;
pub const INDEX_VERSION_NUMBER   : usize = 1;
pub const INDEX_GENERATOR_NUMBER : usize = 2;
pub const INDEX_BOUND            : usize = 3;
pub const INDEX_SCHEMA           : usize = 4;
pub const INDEX_INSTRUCTION      : usize = 5;
pub const HEADER_SIZE            : usize = INDEX_INSTRUCTION;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Header {
  pub magic     : Word,
  pub version   : Word,
  pub generator : Word,
  /// Exclusive upper bound on the ids used in the module.
  pub bound     : Word,
  /// Reserved.
  pub schema    : Word,
  /// Word index of the first instruction.
  pub instructions : usize,
}

impl Header {
  /// Reads the header of `binary`, converting each field from `endian` to host order.
  pub fn read(binary: &Binary, endian: Endianness) -> Result<Header> {
    if binary.is_empty() {
      return Err(Diagnostic::invalid_binary(Position::default(), "Binary is empty."));
    }
    if binary.len() < HEADER_SIZE {
      return Err(Diagnostic::invalid_binary(
        Position::at(binary.len()),
        format!("Header requires {} words but the binary has {}.", HEADER_SIZE, binary.len())
      ));
    }

    let header = Header{
      magic        : binary.word(INDEX_MAGIC_NUMBER, endian)?,
      version      : binary.word(INDEX_VERSION_NUMBER, endian)?,
      generator    : binary.word(INDEX_GENERATOR_NUMBER, endian)?,
      bound        : binary.word(INDEX_BOUND, endian)?,
      schema       : binary.word(INDEX_SCHEMA, endian)?,
      instructions : INDEX_INSTRUCTION,
    };
    if header.schema != 0 {
      warn!(schema = header.schema, "reserved header schema is non-zero");
    }
    Ok(header)
  }

  /// Writes a fresh header declaring `bound` into the first five words of `binary`, in
  /// host order.
  pub fn write(binary: &mut Binary, bound: Word) -> Result<()> {
    let words = binary.words_mut();
    if words.len() < HEADER_SIZE {
      return Err(Diagnostic::invalid_binary(
        Position::at(words.len()),
        format!("Binary has no room for a {} word header.", HEADER_SIZE)
      ));
    }

    words[INDEX_MAGIC_NUMBER]     = MAGIC_NUMBER;
    words[INDEX_VERSION_NUMBER]   = VERSION_NUMBER;
    words[INDEX_GENERATOR_NUMBER] = GENERATOR_KHRONOS;
    words[INDEX_BOUND]            = bound;
    words[INDEX_SCHEMA]           = 0;
    Ok(())
  }
}

impl Binary {
  /// A module holding only a header declaring `bound`.
  pub fn with_header(bound: Word) -> Result<Binary> {
    let mut binary = Binary::new(vec![0; HEADER_SIZE]);
    Header::write(&mut binary, bound)?;
    Ok(binary)
  }
}

/// The comment block that opens every disassembly.
impl Display for Header {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "; SPIR-V\n; Version: {}\n; Generator: {}\n; Bound: {}\n; Schema: {}\n",
      self.version, generator_name(self.generator), self.bound, self.schema
    )
  }
}

/// The registered name of a generator id.
pub fn generator_name(generator: Word) -> &'static str {
  match generator {
    0 => "Khronos",
    1 => "LunarG",
    2 => "Valve",
    3 => "Codeplay Software Ltd.",
    4 => "NVIDIA",
    5 => "ARM",
    _ => "Unknown"
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ErrorKind;

  #[test]
  fn write_then_read(){
    let binary = Binary::with_header(42).unwrap();
    let endian = binary.endianness().unwrap();
    let header = Header::read(&binary, endian).unwrap();

    assert_eq!(header.magic, MAGIC_NUMBER);
    assert_eq!(header.version, VERSION_NUMBER);
    assert_eq!(header.generator, GENERATOR_KHRONOS);
    assert_eq!(header.bound, 42);
    assert_eq!(header.schema, 0);
    assert_eq!(header.instructions, 5);
  }

  #[test]
  fn read_swapped_header(){
    let words = vec![
      MAGIC_NUMBER.swap_bytes(),
      VERSION_NUMBER.swap_bytes(),
      3u32.swap_bytes(),
      17u32.swap_bytes(),
      0
    ];
    let binary = Binary::new(words);
    let endian = binary.endianness().unwrap();
    assert_ne!(endian, Endianness::host());

    let header = Header::read(&binary, endian).unwrap();
    assert_eq!(header.magic, MAGIC_NUMBER);
    assert_eq!(header.generator, 3);
    assert_eq!(header.bound, 17);
  }

  #[test]
  fn truncated_header(){
    let binary = Binary::new(vec![MAGIC_NUMBER, VERSION_NUMBER]);
    let error = Header::read(&binary, Endianness::host()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
  }

  #[test]
  fn empty_header(){
    let error = Header::read(&Binary::default(), Endianness::host()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
  }

  #[test]
  fn nonzero_schema_is_accepted(){
    let binary = Binary::new(vec![MAGIC_NUMBER, VERSION_NUMBER, 0, 1, 9]);
    let header = Header::read(&binary, Endianness::host()).unwrap();
    assert_eq!(header.schema, 9);
  }

  #[test]
  fn write_needs_room(){
    let mut binary = Binary::new(vec![0; 3]);
    let error = Header::write(&mut binary, 1).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
  }

  #[test]
  fn comment_block(){
    let binary = Binary::with_header(3).unwrap();
    let header = Header::read(&binary, Endianness::host()).unwrap();
    assert_eq!(
      header.to_string(),
      "; SPIR-V\n; Version: 65536\n; Generator: Khronos\n; Bound: 3\n; Schema: 0\n"
    );
  }

  #[test]
  fn unknown_generator(){
    assert_eq!(generator_name(4), "NVIDIA");
    assert_eq!(generator_name(0xFFFF), "Unknown");
  }
}
