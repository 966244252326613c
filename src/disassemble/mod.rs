/*!
  Binary to text. A decode is a single pass over the words of one module:

    ```text
    words -> [`Binary::endianness`] -> [`Header::read`] -> header comment block ->⋯

        ┌──────────── for each instruction ────────────┐
    ⋯->*│*-> [`decode_instruction`] -> [`operand_type`] │
        │       -> [`decode_operand`] -> line of text ->*│*->⋯
        └───────────────────────────────────────────────┘

    ⋯-> `Text`, or lines written to the caller's sink as they are decoded
    ```

  Every step returns the first failure it finds, and the decode stops there. State that
  outlives a single instruction, the cursor and the active extended instruction set, lives
  in one `DecodeContext` passed down by exclusive reference.
*/

mod instruction;
mod operand;
mod resolve;

use std::fmt::{Display, Formatter};
use std::io::Write;

use tracing::debug;

use crate::binary::{fix_word, split_first_word, Binary, Endianness, Header, Word};
use crate::colour::{paint, Colour};
use crate::error::{Diagnostic, ErrorKind, Position, Result};
use crate::grammar::{ExtInstType, Grammar, Tables};
use crate::options::Options;

pub use resolve::{operand_type, Nested};

/// The disassembly of a module.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Text {
  text: String
}

impl Text {
  /// Copies `buffer` into exactly sized storage, reporting allocation failure.
  fn materialize(buffer: &str) -> Result<Text> {
    let mut text = String::new();
    text.try_reserve_exact(buffer.len()).map_err(|_| {
      Diagnostic::new(
        ErrorKind::OutOfMemory,
        Position::default(),
        format!("Unable to allocate {} bytes of text.", buffer.len())
      )
    })?;
    text.push_str(buffer);
    Ok(Text{ text })
  }

  pub fn as_str(&self) -> &str {
    &self.text
  }

  pub fn len(&self) -> usize {
    self.text.len()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  pub fn into_string(self) -> String {
    self.text
  }
}

impl Display for Text {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.text)
  }
}

/// Where decoded text goes.
enum Output<'w> {
  Buffer(String),
  Print(&'w mut dyn Write),
}

impl<'w> Output<'w> {
  fn emit(&mut self, text: &str, position: Position) -> Result<()> {
    match self {
      Output::Buffer(buffer) => {
        buffer.push_str(text);
        Ok(())
      }
      Output::Print(sink) => {
        sink.write_all(text.as_bytes()).map_err(|error| {
          Diagnostic::new(
            ErrorKind::InvalidPointer,
            position,
            format!("Unable to write to the output: {}", error)
          )
        })
      }
    }
  }
}

/// State of one decode.
pub struct DecodeContext<'a> {
  /// The module's words in host order.
  words    : Vec<Word>,
  grammar  : Grammar<'a>,
  options  : Options,
  position : Position,
  /// Set by `OpExtInstImport`, consulted by every later `OpExtInst`.
  ext_inst_type : Option<ExtInstType>,
  /// Whether the current `OpExtInst` has had its instruction number named.
  ext_inst_named : bool,
}

impl<'a> DecodeContext<'a> {
  pub fn new(binary: &Binary, endian: Endianness, grammar: Grammar<'a>, options: Options)
    -> DecodeContext<'a>
  {
    DecodeContext{
      words         : binary.words().iter().map(|word| fix_word(*word, endian)).collect(),
      grammar,
      options,
      position      : Position::default(),
      ext_inst_type : None,
      ext_inst_named : false,
    }
  }

  pub fn position(&self) -> Position {
    self.position
  }

  pub fn ext_inst_type(&self) -> Option<ExtInstType> {
    self.ext_inst_type
  }

  /// The host order word at `index`.
  fn word(&self, index: usize) -> Result<Word> {
    self.words.get(index).copied().ok_or_else(|| {
      Diagnostic::invalid_binary(
        Position::at(index),
        format!("Unexpected end of binary at word {} of {}.", index, self.words.len())
      )
    })
  }

  /// `count` host order words starting at `index`.
  fn span(&self, index: usize, count: usize) -> Result<&[Word]> {
    self.words.get(index..index + count).ok_or_else(|| {
      Diagnostic::invalid_binary(
        Position::at(index),
        format!(
          "Instruction declares {} words but only {} remain.",
          count,
          self.words.len().saturating_sub(index)
        )
      )
    })
  }

  /// Words from `index` to the end of the module.
  fn tail(&self, index: usize) -> Result<&[Word]> {
    self.words.get(index..).ok_or_else(|| {
      Diagnostic::invalid_binary(Position::at(index), "Unexpected end of binary.")
    })
  }

  /// Decodes every instruction from `position` to the end of the module, emitting one line
  /// each.
  fn decode_instructions(&mut self, output: &mut Output) -> Result<()> {
    while self.position.index < self.words.len() {
      let start = self.position;
      let line = self.decode_instruction()?;

      let (declared, _) = split_first_word(self.word(start.index)?);
      if start.index + declared as usize != self.position.index {
        return Err(Diagnostic::invalid_binary(start, "Invalid word count."));
      }

      output.emit(&line, start)?;
      output.emit("\n", start)?;
    }
    Ok(())
  }
}

/**
  Disassembles `binary`.

  Without `Options::PRINT` the text is returned. With it, text is written to `sink` one
  instruction at a time and `None` is returned; `Options::COLOR` then tags operands with
  terminal colours. A sink must be supplied exactly when `PRINT` is set.
*/
pub fn binary_to_text(
  binary  : &Binary,
  options : Options,
  tables  : &Tables,
  sink    : Option<&mut dyn Write>
) -> Result<Option<Text>> {
  if binary.is_empty() {
    return Err(Diagnostic::invalid_binary(Position::default(), "Binary is empty."));
  }
  let grammar = tables.grammar()?;

  let mut output = match (options.print(), sink) {
    (true, Some(sink)) => Output::Print(sink),
    (false, None)      => Output::Buffer(String::new()),
    (true, None) => {
      return Err(Diagnostic::new(
        ErrorKind::InvalidPointer, Position::default(), "Print requested without an output."
      ));
    }
    (false, Some(_)) => {
      return Err(Diagnostic::new(
        ErrorKind::InvalidPointer, Position::default(), "An output was supplied without print."
      ));
    }
  };

  let endian = binary.endianness()?;
  let header = Header::read(binary, endian).map_err(|error| {
    Diagnostic::invalid_binary(error.position, format!("Invalid SPIR-V header. {}", error.message))
  })?;
  debug!(
    %endian, version = header.version, generator = header.generator, bound = header.bound,
    words = binary.len(), "decoding module"
  );

  let mut block = String::new();
  paint(&mut block, Colour::Grey, options.color(), &header);
  output.emit(&block, Position::default())?;

  let mut context = DecodeContext::new(binary, endian, grammar, options);
  context.position = Position::at(header.instructions);
  context.decode_instructions(&mut output)?;
  debug!(words = context.position.index, "decoded module");

  match output {
    Output::Buffer(buffer) => Ok(Some(Text::materialize(&buffer)?)),
    Output::Print(sink) => {
      sink.flush().map_err(|error| {
        Diagnostic::new(
          ErrorKind::InvalidPointer,
          context.position,
          format!("Unable to flush the output: {}", error)
        )
      })?;
      Ok(None)
    }
  }
}

/// Disassembles `binary` with the built-in tables.
pub fn disassemble(binary: &Binary) -> Result<Text> {
  let text = binary_to_text(binary, Options::empty(), &Tables::builtin(), None)?;
  // Without `PRINT` the text is always materialized.
  Ok(text.unwrap_or_default())
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::binary::{join_first_word, MAGIC_NUMBER, VERSION_NUMBER};
  use crate::grammar::Op;

  fn type_void_module() -> Binary {
    Binary::new(vec![
      MAGIC_NUMBER, VERSION_NUMBER, 0, 3, 0,
      join_first_word(2, Op::TypeVoid.code()), 1
    ])
  }

  #[test]
  fn materialized_text(){
    let text = disassemble(&type_void_module()).unwrap();
    assert_eq!(
      text.as_str(),
      "; SPIR-V\n; Version: 65536\n; Generator: Khronos\n; Bound: 3\n; Schema: 0\n\
       %1 = OpTypeVoid\n"
    );
    assert_eq!(text.len(), text.as_str().len());
  }

  #[test]
  fn printed_text(){
    let mut sink: Vec<u8> = Vec::new();
    let result = binary_to_text(
      &type_void_module(), Options::PRINT, &Tables::builtin(), Some(&mut sink)
    ).unwrap();
    assert!(result.is_none());
    assert!(String::from_utf8(sink).unwrap().ends_with("%1 = OpTypeVoid\n"));
  }

  #[test]
  fn coloured_text(){
    let mut sink: Vec<u8> = Vec::new();
    binary_to_text(
      &type_void_module(), Options::PRINT | Options::COLOR, &Tables::builtin(), Some(&mut sink)
    ).unwrap();
    let text = String::from_utf8(sink).unwrap();
    assert!(text.starts_with("\x1b[1;30m; SPIR-V"));
    assert!(text.contains("\x1b[34m%1\x1b[0m = OpTypeVoid"));
  }

  #[test]
  fn colour_needs_print(){
    let text = binary_to_text(&type_void_module(), Options::COLOR, &Tables::builtin(), None)
      .unwrap()
      .unwrap();
    assert!(!text.as_str().contains('\x1b'));
  }

  #[test]
  fn output_must_match_mode(){
    let error = binary_to_text(&type_void_module(), Options::PRINT, &Tables::builtin(), None)
      .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidPointer);

    let mut sink: Vec<u8> = Vec::new();
    let error = binary_to_text(
      &type_void_module(), Options::empty(), &Tables::builtin(), Some(&mut sink)
    ).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidPointer);
  }

  #[test]
  fn tables_are_required(){
    let error = binary_to_text(&type_void_module(), Options::empty(), &Tables::default(), None)
      .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidTable);
  }

  #[test]
  fn truncated_header(){
    let binary = Binary::new(vec![MAGIC_NUMBER, VERSION_NUMBER]);
    let error = disassemble(&binary).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
    assert!(error.message.starts_with("Invalid SPIR-V header."));
  }

  #[test]
  fn empty_binary(){
    assert_eq!(disassemble(&Binary::default()).unwrap_err().kind, ErrorKind::InvalidBinary);
  }

  #[test]
  fn header_only(){
    let text = disassemble(&Binary::with_header(1).unwrap()).unwrap();
    assert_eq!(text.as_str().lines().count(), 5);
  }
}
