//! Renders single operands.

use tracing::debug;

use super::DecodeContext;
use crate::binary::unpack_string;
use crate::colour::{paint, Colour};
use crate::error::{Diagnostic, Result};
use crate::grammar::{Op, OperandType, PlainOperand};

/// What decoding one operand produced besides its text.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) struct Decoded<'g> {
  /// Words the operand occupied.
  pub consumed : usize,
  /// Operand types the operand introduced for the words that follow it.
  pub nested   : Option<&'g [OperandType]>,
}

impl<'g> Decoded<'g> {
  fn words(consumed: usize) -> Decoded<'g> {
    Decoded{ consumed, nested: None }
  }

  fn with_nested(types: &'g [OperandType]) -> Decoded<'g> {
    Decoded{
      consumed : 1,
      nested   : if types.is_empty() { None } else { Some(types) }
    }
  }
}

impl<'a> DecodeContext<'a> {
  /// Renders the operand of type `operand` at the cursor into `out`. `opcode` is the
  /// opcode of the instruction the operand belongs to.
  pub(super) fn decode_operand(
    &mut self,
    opcode  : Op,
    operand : Option<OperandType>,
    out     : &mut String
  ) -> Result<Decoded<'a>> {
    let position = self.position;
    let grammar = self.grammar;
    let color = self.options.color();

    let operand = operand.ok_or_else(|| {
      Diagnostic::invalid_binary(position, "Invalid binary operand.")
    })?;

    match operand {

      OperandType::Plain(PlainOperand::Id) => {
        let id = self.word(position.index)?;
        paint(out, Colour::Yellow, color, format_args!("%{}", id));
        Ok(Decoded::words(1))
      }

      OperandType::Plain(PlainOperand::ResultId) => {
        let id = self.word(position.index)?;
        paint(out, Colour::Blue, color, format_args!("%{}", id));
        Ok(Decoded::words(1))
      }

      // The first literal number of `OpExtInst` is the instruction's number in the
      // imported set.
      OperandType::Plain(PlainOperand::LiteralNumber)
        if opcode == Op::ExtInst && !self.ext_inst_named =>
      {
        self.ext_inst_named = true;
        let number = self.word(position.index)?;
        let set = self.ext_inst_type.ok_or_else(|| {
          Diagnostic::invalid_binary(
            position,
            format!("Invalid extended instruction '{}': no instruction set was imported.", number)
          )
        })?;
        let ext_inst = grammar.ext_insts.lookup(set, number).ok_or_else(|| {
          Diagnostic::invalid_binary(position, format!("Invalid extended instruction '{}'.", number))
        })?;
        paint(out, Colour::Red, color, &*ext_inst.name);
        Ok(Decoded::with_nested(&ext_inst.operands))
      }

      // TODO: Reassemble multi-word literals once the width of the result type is tracked.
      OperandType::Plain(PlainOperand::Literal)
      | OperandType::Plain(PlainOperand::LiteralNumber) => {
        let value = self.word(position.index)?;
        paint(out, Colour::Red, color, value);
        Ok(Decoded::words(1))
      }

      OperandType::Plain(PlainOperand::LiteralString) => {
        let (bytes, count) = unpack_string(self.tail(position.index)?).ok_or_else(|| {
          Diagnostic::invalid_binary(position, "Unterminated string literal.")
        })?;
        let string = String::from_utf8(bytes).map_err(|_| {
          Diagnostic::invalid_binary(position, "String literal is not valid UTF-8.")
        })?;

        if opcode == Op::ExtInstImport {
          let set = grammar.ext_insts.import_type(&string).ok_or_else(|| {
            Diagnostic::invalid_binary(
              position,
              format!("Invalid extended instruction import '{}'.", string)
            )
          })?;
          debug!(%set, position = position.index, "imported extended instruction set");
          self.ext_inst_type = Some(set);
        }

        out.push('"');
        paint(out, Colour::Green, color, &string);
        out.push('"');
        Ok(Decoded::words(count))
      }

      OperandType::Enumerant(kind) => {
        let value = self.word(position.index)?;
        let entry = grammar.operands.lookup(kind, value).ok_or_else(|| {
          Diagnostic::invalid_binary(position, format!("Invalid {} operand '{}'.", kind, value))
        })?;
        out.push_str(entry.name);
        Ok(Decoded::with_nested(&entry.extra))
      }

    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::binary::{pack_string, Binary, Endianness};
  use crate::error::{ErrorKind, Position};
  use crate::grammar::{enumerant, EnumerantKind, ExtInstType, Tables, ID, LITERAL_NUMBER,
                       LITERAL_STRING};
  use crate::options::Options;

  fn context(words: Vec<u32>) -> DecodeContext<'static> {
    let grammar = Tables::builtin().grammar().unwrap();
    DecodeContext::new(&Binary::new(words), Endianness::host(), grammar, Options::empty())
  }

  #[test]
  fn string_consumes_whole_words(){
    for text in &["", "abc", "abcd", "abcdefgh", "GLSL.std.450"] {
      let mut context = context(pack_string(text.as_bytes()));
      let mut out = String::new();
      let decoded = context.decode_operand(Op::Name, Some(LITERAL_STRING), &mut out).unwrap();
      assert_eq!(decoded.consumed, text.len() / 4 + 1);
      assert_eq!(out, format!("\"{}\"", text));
    }
  }

  #[test]
  fn unterminated_string(){
    let mut context = context(vec![0x6463_6261]);
    let mut out = String::new();
    let error = context.decode_operand(Op::Name, Some(LITERAL_STRING), &mut out).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
  }

  #[test]
  fn import_selects_set(){
    let mut context = context(pack_string(b"OpenCL.std"));
    let mut out = String::new();
    context.decode_operand(Op::ExtInstImport, Some(LITERAL_STRING), &mut out).unwrap();
    assert_eq!(context.ext_inst_type(), Some(ExtInstType::OpenClStd));
  }

  #[test]
  fn unknown_import(){
    let mut context = context(pack_string(b"Nonexistent.std"));
    let mut out = String::new();
    let error = context.decode_operand(Op::ExtInstImport, Some(LITERAL_STRING), &mut out)
      .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
    assert_eq!(context.ext_inst_type(), None);
  }

  #[test]
  fn ext_inst_number_needs_an_import(){
    let mut context = context(vec![31]);
    let mut out = String::new();
    let error = context.decode_operand(Op::ExtInst, Some(LITERAL_NUMBER), &mut out).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
  }

  #[test]
  fn ext_inst_number_is_named_once(){
    let mut context = context(vec![31, 31]);
    context.ext_inst_type = Some(ExtInstType::GlslStd450);

    let mut out = String::new();
    let decoded = context.decode_operand(Op::ExtInst, Some(LITERAL_NUMBER), &mut out).unwrap();
    assert_eq!(out, "Sqrt");
    assert_eq!(decoded.nested, Some(&[ID][..]));

    context.position = Position::at(1);
    let mut out = String::new();
    context.decode_operand(Op::ExtInst, Some(LITERAL_NUMBER), &mut out).unwrap();
    assert_eq!(out, "31");
  }

  #[test]
  fn enumerant_with_extra_operands(){
    let mut context = context(vec![41]);
    let mut out = String::new();
    let decoded = context.decode_operand(
      Op::Decorate, Some(enumerant(EnumerantKind::Decoration)), &mut out
    ).unwrap();
    assert_eq!(out, "LinkageAttributes");
    assert_eq!(decoded.consumed, 1);
    assert_eq!(
      decoded.nested,
      Some(&[LITERAL_STRING, enumerant(EnumerantKind::LinkageType)][..])
    );
  }

  #[test]
  fn missing_operand_type(){
    let mut context = context(vec![0]);
    let mut out = String::new();
    let error = context.decode_operand(Op::Nop, None, &mut out).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidBinary);
  }
}
