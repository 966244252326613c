/*!
  The description tables that give meaning to the words of an instruction. Decoding is
  table driven: the opcode table says how many words an instruction needs at least and
  which operand type each word holds, the operand table names the value of every
  enumerant word, and the extended instruction table names the instructions of imported
  instruction sets.

  The tables are read only once built. The built-in instances are `lazy_static`s, so they
  are built on first use and may be shared freely between threads.
*/

mod ext_inst;
mod opcode;
mod operand;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, IntoStaticStr, EnumString};

use crate::binary::Word;
use crate::error::{Diagnostic, ErrorKind, Position, Result};

pub use ext_inst::{ExtInstDesc, ExtInstTable, ExtInstType};
pub use opcode::Op;

/// Operand types whose words are rendered by position alone.
#[derive(StrumDisplay, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PlainOperand {
  Id,
  ResultId,
  Literal,
  LiteralNumber,
  LiteralString,
}

/// Operand types whose words are rendered by looking their value up in the operand table.
#[derive(StrumDisplay, IntoStaticStr, EnumString, Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum EnumerantKind {
  Capability,
  SourceLanguage,
  ExecutionModel,
  AddressingModel,
  MemoryModel,
  ExecutionMode,
  StorageClass,
  Dimensionality,
  SamplerAddressingMode,
  SamplerFilterMode,
  FpFastMathMode,
  FpRoundingMode,
  LinkageType,
  AccessQualifier,
  FunctionParameterAttribute,
  Decoration,
  BuiltIn,
  SelectionControl,
  LoopControl,
  FunctionControl,
  MemorySemantics,
  MemoryAccess,
  ExecutionScope,
  GroupOperation,
  KernelEnqueueFlags,
  KernelProfilingInfo,
}

/// The semantic type of an operand word.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum OperandType {
  Plain(PlainOperand),
  Enumerant(EnumerantKind),
}

impl Display for OperandType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      OperandType::Plain(plain)    => write!(f, "{}", plain),
      OperandType::Enumerant(kind) => write!(f, "{}", kind),
    }
  }
}

// Abbreviations used by the built-in tables.
pub(crate) const ID             : OperandType = OperandType::Plain(PlainOperand::Id);
pub(crate) const RESULT_ID      : OperandType = OperandType::Plain(PlainOperand::ResultId);
pub(crate) const LITERAL        : OperandType = OperandType::Plain(PlainOperand::Literal);
pub(crate) const LITERAL_NUMBER : OperandType = OperandType::Plain(PlainOperand::LiteralNumber);
pub(crate) const LITERAL_STRING : OperandType = OperandType::Plain(PlainOperand::LiteralString);

pub(crate) const fn enumerant(kind: EnumerantKind) -> OperandType {
  OperandType::Enumerant(kind)
}

/**
  Describes one opcode. The first `word_count - 1` entries of `operands` are the fixed
  operands every instance carries. Any entries after them describe optional operands by
  position, and the last entry repeats for every word past the declared ones. `OpSwitch`
  is the exception: past its fixed operands its last two entries alternate.
*/
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OpcodeDesc {
  pub opcode     : Op,
  /// Minimum number of words, including the first.
  pub word_count : u16,
  pub operands   : Vec<OperandType>,
  /// Index into `operands` of the result id, if the opcode produces one.
  pub result_id  : Option<usize>,
}

impl OpcodeDesc {
  pub fn new(opcode: Op, word_count: u16, operands: &[OperandType]) -> OpcodeDesc {
    OpcodeDesc{
      opcode,
      word_count,
      operands  : operands.to_vec(),
      result_id : operands.iter().position(|operand| *operand == RESULT_ID),
    }
  }

  pub fn name(&self) -> &'static str {
    self.opcode.into()
  }
}

#[derive(Clone, Default, Debug)]
pub struct OpcodeTable {
  entries: HashMap<Op, OpcodeDesc>
}

impl OpcodeTable {
  pub fn new() -> OpcodeTable {
    OpcodeTable::default()
  }

  pub fn builtin() -> &'static OpcodeTable {
    &opcode::BUILTIN_OPCODES
  }

  pub fn insert(&mut self, desc: OpcodeDesc) {
    self.entries.insert(desc.opcode, desc);
  }

  /// Looks up the raw opcode value of an instruction.
  pub fn lookup(&self, opcode: u16) -> Option<&OpcodeDesc> {
    let op = Op::from_code(opcode)?;
    self.entries.get(&op)
  }

  pub fn get(&self, op: Op) -> Option<&OpcodeDesc> {
    self.entries.get(&op)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Describes one enumerant value of an `EnumerantKind`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OperandDesc {
  pub kind  : EnumerantKind,
  pub name  : &'static str,
  pub value : Word,
  /// Operands that follow the enumerant when it is present, e.g. the alignment literal
  /// after the `Aligned` memory access.
  pub extra : Vec<OperandType>,
}

impl OperandDesc {
  pub fn new(kind: EnumerantKind, name: &'static str, value: Word) -> OperandDesc {
    OperandDesc{ kind, name, value, extra: vec![] }
  }

  pub fn with_extra(kind: EnumerantKind, name: &'static str, value: Word, extra: &[OperandType])
    -> OperandDesc
  {
    OperandDesc{ kind, name, value, extra: extra.to_vec() }
  }
}

#[derive(Clone, Default, Debug)]
pub struct OperandTable {
  entries: HashMap<(EnumerantKind, Word), OperandDesc>
}

impl OperandTable {
  pub fn new() -> OperandTable {
    OperandTable::default()
  }

  pub fn builtin() -> &'static OperandTable {
    &operand::BUILTIN_OPERANDS
  }

  pub fn insert(&mut self, desc: OperandDesc) {
    self.entries.insert((desc.kind, desc.value), desc);
  }

  /// Inserts enumerants without extra operands.
  pub fn insert_all(&mut self, kind: EnumerantKind, enumerants: &[(&'static str, Word)]) {
    for (name, value) in enumerants {
      self.insert(OperandDesc::new(kind, *name, *value));
    }
  }

  pub fn lookup(&self, kind: EnumerantKind, value: Word) -> Option<&OperandDesc> {
    self.entries.get(&(kind, value))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// The tables a decode consults. Each is supplied by the caller; a missing table is
/// reported when decoding starts.
#[derive(Copy, Clone, Default, Debug)]
pub struct Tables<'t> {
  pub opcodes   : Option<&'t OpcodeTable>,
  pub operands  : Option<&'t OperandTable>,
  pub ext_insts : Option<&'t ExtInstTable>,
}

impl Tables<'static> {
  /// The built-in SPIR-V tables.
  pub fn builtin() -> Tables<'static> {
    Tables{
      opcodes   : Some(OpcodeTable::builtin()),
      operands  : Some(OperandTable::builtin()),
      ext_insts : Some(ExtInstTable::builtin()),
    }
  }
}

impl<'t> Tables<'t> {
  pub fn new(opcodes: &'t OpcodeTable, operands: &'t OperandTable, ext_insts: &'t ExtInstTable)
    -> Tables<'t>
  {
    Tables{
      opcodes   : Some(opcodes),
      operands  : Some(operands),
      ext_insts : Some(ext_insts),
    }
  }

  /// Fails with `InvalidTable` unless every table is present.
  pub fn grammar(&self) -> Result<Grammar<'t>> {
    match (self.opcodes, self.operands, self.ext_insts) {
      (Some(opcodes), Some(operands), Some(ext_insts)) => Ok(Grammar{ opcodes, operands, ext_insts }),
      _ => Err(Diagnostic::new(
        ErrorKind::InvalidTable,
        Position::default(),
        "Opcode, operand and extended instruction tables are all required."
      ))
    }
  }
}

/// A complete set of tables.
#[derive(Copy, Clone, Debug)]
pub struct Grammar<'t> {
  pub opcodes   : &'t OpcodeTable,
  pub operands  : &'t OperandTable,
  pub ext_insts : &'t ExtInstTable,
}
