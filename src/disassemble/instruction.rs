//! Decodes one instruction into one line of disassembly.

use tracing::trace;

use super::resolve::{operand_type, Nested};
use super::DecodeContext;
use crate::binary::{split_first_word, Instruction};
use crate::error::{Diagnostic, Result};

impl<'a> DecodeContext<'a> {
  /**
    Decodes the instruction at the cursor and leaves the cursor after the last word its
    operands consumed. A well formed instruction leaves it exactly on the next
    instruction; checking that is the caller's job.

    The result id, wherever the opcode places it, is printed first:
    `%5 = OpLoad %3 %4` for the words `OpLoad %3 %5 %4`.
  */
  pub(super) fn decode_instruction(&mut self) -> Result<String> {
    let start = self.position;
    let grammar = self.grammar;
    let (word_count, opcode) = split_first_word(self.word(start.index)?);

    let desc = grammar.opcodes.lookup(opcode).ok_or_else(|| {
      Diagnostic::invalid_binary(start, format!("Invalid Opcode '{}'.", opcode))
    })?;
    if word_count < desc.word_count {
      return Err(Diagnostic::invalid_binary(
        start,
        format!(
          "Invalid instruction word count '{}', expected at least '{}'.",
          word_count, desc.word_count
        )
      ));
    }

    let record = Instruction::from_words(self.span(start.index, word_count as usize)?.to_vec());
    trace!(
      opcode = desc.name(), word_count, position = start.index, "decoding instruction"
    );
    #[cfg(feature = "trace_decode")]
    trace!("\n{}", record);

    let mut result_id: Option<String> = None;
    let mut text = desc.opcode.mnemonic();
    let mut nested: Option<Nested<'a>> = None;
    self.ext_inst_named = false;
    self.position = start + 1;

    let mut index = 1;
    let mut ordinal = 0;
    while index < record.word_count() {
      let operand = operand_type(desc, index, nested);

      let decoded = if desc.result_id == Some(ordinal) {
        let mut id = String::new();
        let decoded = self.decode_operand(desc.opcode, operand, &mut id)?;
        result_id = Some(id);
        decoded
      } else {
        text.push(' ');
        self.decode_operand(desc.opcode, operand, &mut text)?
      };

      // Skip every word the operand consumed, not just the first.
      index += decoded.consumed;
      self.position = self.position + decoded.consumed;
      match decoded.nested {
        Some(types) => nested = Some(Nested::new(types)),
        None => if let Some(active) = nested.as_mut() { active.advance() },
      }
      ordinal += 1;
    }

    Ok(match result_id {
      Some(id) => format!("{} = {}", id, text),
      None     => text
    })
  }
}
