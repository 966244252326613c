//! Decides which operand type a word of an instruction holds.

use crate::grammar::{Op, OpcodeDesc, OperandType};

/// Operand types introduced by an earlier operand, such as the literal following an
/// `Aligned` memory access. `decoded` counts the operands decoded since that operand, so
/// it indexes `types` whatever number of words each of them took.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Nested<'g> {
  pub types   : &'g [OperandType],
  pub decoded : usize,
}

impl<'g> Nested<'g> {
  pub fn new(types: &'g [OperandType]) -> Nested<'g> {
    Nested{ types, decoded: 0 }
  }

  /// Records that one more operand has been decoded.
  pub fn advance(&mut self) {
    self.decoded += 1;
  }

  fn next(&self) -> Option<OperandType> {
    self.types.get(self.decoded).copied()
  }
}

/**
  The operand type of word `index` (counting the first word of the instruction as 0) of an
  instruction described by `desc`:

    1. a fixed operand takes its declared type;
    2. otherwise an active nested list with types left supplies the next one;
    3. otherwise `OpSwitch` alternates between its (literal, target) pair types;
    4. otherwise an optional operand declared at that position takes its type;
    5. otherwise the last declared type repeats.

  Returns `None` when the opcode declares no operand types at all.
*/
pub fn operand_type(desc: &OpcodeDesc, index: usize, nested: Option<Nested>) -> Option<OperandType> {
  let word_count = desc.word_count as usize;

  if index < word_count {
    return index.checked_sub(1).and_then(|i| desc.operands.get(i)).copied();
  }

  if let Some(operand) = nested.and_then(|nested| nested.next()) {
    return Some(operand);
  }

  if desc.opcode == Op::Switch {
    let pair = (index - word_count) % 2;
    return desc.operands.get(word_count - 1 + pair).copied();
  }

  if let Some(operand) = desc.operands.get(index - 1) {
    return Some(*operand);
  }

  desc.operands.last().copied()
}
