//! Opcodes and the built-in opcode table.

use std::convert::TryFrom;

use num_enum::{TryFromPrimitive, IntoPrimitive};
use strum_macros::{Display as StrumDisplay, IntoStaticStr, EnumString};

use super::{
  OpcodeDesc, OpcodeTable, OperandType, enumerant, EnumerantKind,
  ID, RESULT_ID, LITERAL, LITERAL_NUMBER, LITERAL_STRING
};

/**
  Opcodes known to the built-in tables. The discriminant of each variant is its value in
  the low 16 bits of an instruction's first word; the variant name is the mnemonic
  without its `Op` prefix.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u16)]
pub enum Op {
  // Miscellaneous and debug //
  Nop                = 0,
  Undef              = 1,
  SourceContinued    = 2,
  Source             = 3,
  SourceExtension    = 4,
  Name               = 5,
  MemberName         = 6,
  String             = 7,
  Line               = 8,

  // Extensions and mode setting //
  Extension          = 10,
  ExtInstImport      = 11,
  ExtInst            = 12,
  MemoryModel        = 14,
  EntryPoint         = 15,
  ExecutionMode      = 16,
  Capability         = 17,

  // Types //
  TypeVoid           = 19,
  TypeBool           = 20,
  TypeInt            = 21,
  TypeFloat          = 22,
  TypeVector         = 23,
  TypeMatrix         = 24,
  TypeArray          = 28,
  TypeRuntimeArray   = 29,
  TypeStruct         = 30,
  TypePointer        = 32,
  TypeFunction       = 33,

  // Constants //
  ConstantTrue       = 41,
  ConstantFalse      = 42,
  Constant           = 43,
  ConstantComposite  = 44,

  // Functions and memory //
  Function           = 54,
  FunctionParameter  = 55,
  FunctionEnd        = 56,
  FunctionCall       = 57,
  Variable           = 59,
  Load               = 61,
  Store              = 62,
  AccessChain        = 65,

  // Annotation //
  Decorate           = 71,
  MemberDecorate     = 72,

  // Composite, conversion and arithmetic //
  CompositeConstruct = 80,
  CompositeExtract   = 81,
  ConvertSToF        = 111,
  IAdd               = 128,
  FAdd               = 129,
  ISub               = 130,
  FSub               = 131,
  IMul               = 132,
  FMul               = 133,
  IEqual             = 170,
  FOrdLessThan       = 184,

  // Control flow //
  Phi                = 245,
  LoopMerge          = 246,
  SelectionMerge     = 247,
  Label              = 248,
  Branch             = 249,
  BranchConditional  = 250,
  Switch             = 251,
  Kill               = 252,
  Return             = 253,
  ReturnValue        = 254,
  Unreachable        = 255,
}

impl Op {
  pub fn code(&self) -> u16 {
    Into::<u16>::into(*self)
  }

  pub fn from_code(code: u16) -> Option<Op> {
    Op::try_from(code).ok()
  }

  /// The name as it appears in disassembly.
  pub fn mnemonic(&self) -> String {
    format!("Op{}", self)
  }
}

fn desc(opcode: Op, word_count: u16, operands: &[OperandType]) -> OpcodeDesc {
  OpcodeDesc::new(opcode, word_count, operands)
}

lazy_static! {
  pub(super) static ref BUILTIN_OPCODES: OpcodeTable = {
    use EnumerantKind::*;

    let mut table = OpcodeTable::new();
    let entries = vec![
      desc(Op::Nop,                1, &[]),
      desc(Op::Undef,              3, &[ID, RESULT_ID]),
      desc(Op::SourceContinued,    2, &[LITERAL_STRING]),
      desc(Op::Source,             3, &[enumerant(SourceLanguage), LITERAL, ID, LITERAL_STRING]),
      desc(Op::SourceExtension,    2, &[LITERAL_STRING]),
      desc(Op::Name,               3, &[ID, LITERAL_STRING]),
      desc(Op::MemberName,         4, &[ID, LITERAL, LITERAL_STRING]),
      desc(Op::String,             3, &[RESULT_ID, LITERAL_STRING]),
      desc(Op::Line,               4, &[ID, LITERAL, LITERAL]),

      desc(Op::Extension,          2, &[LITERAL_STRING]),
      desc(Op::ExtInstImport,      3, &[RESULT_ID, LITERAL_STRING]),
      desc(Op::ExtInst,            5, &[ID, RESULT_ID, ID, LITERAL_NUMBER, ID]),
      desc(Op::MemoryModel,        3, &[enumerant(AddressingModel), enumerant(MemoryModel)]),
      desc(Op::EntryPoint,         4, &[enumerant(ExecutionModel), ID, LITERAL_STRING, ID]),
      desc(Op::ExecutionMode,      3, &[ID, enumerant(ExecutionMode)]),
      desc(Op::Capability,         2, &[enumerant(Capability)]),

      desc(Op::TypeVoid,           2, &[RESULT_ID]),
      desc(Op::TypeBool,           2, &[RESULT_ID]),
      desc(Op::TypeInt,            4, &[RESULT_ID, LITERAL, LITERAL]),
      desc(Op::TypeFloat,          3, &[RESULT_ID, LITERAL]),
      desc(Op::TypeVector,         4, &[RESULT_ID, ID, LITERAL]),
      desc(Op::TypeMatrix,         4, &[RESULT_ID, ID, LITERAL]),
      desc(Op::TypeArray,          4, &[RESULT_ID, ID, ID]),
      desc(Op::TypeRuntimeArray,   3, &[RESULT_ID, ID]),
      desc(Op::TypeStruct,         2, &[RESULT_ID, ID]),
      desc(Op::TypePointer,        4, &[RESULT_ID, enumerant(StorageClass), ID]),
      desc(Op::TypeFunction,       3, &[RESULT_ID, ID, ID]),

      desc(Op::ConstantTrue,       3, &[ID, RESULT_ID]),
      desc(Op::ConstantFalse,      3, &[ID, RESULT_ID]),
      desc(Op::Constant,           4, &[ID, RESULT_ID, LITERAL]),
      desc(Op::ConstantComposite,  3, &[ID, RESULT_ID, ID]),

      desc(Op::Function,           5, &[ID, RESULT_ID, enumerant(FunctionControl), ID]),
      desc(Op::FunctionParameter,  3, &[ID, RESULT_ID]),
      desc(Op::FunctionEnd,        1, &[]),
      desc(Op::FunctionCall,       4, &[ID, RESULT_ID, ID, ID]),
      desc(Op::Variable,           4, &[ID, RESULT_ID, enumerant(StorageClass), ID]),
      desc(Op::Load,               4, &[ID, RESULT_ID, ID, enumerant(MemoryAccess)]),
      desc(Op::Store,              3, &[ID, ID, enumerant(MemoryAccess)]),
      desc(Op::AccessChain,        4, &[ID, RESULT_ID, ID, ID]),

      desc(Op::Decorate,           3, &[ID, enumerant(Decoration)]),
      desc(Op::MemberDecorate,     4, &[ID, LITERAL, enumerant(Decoration)]),

      desc(Op::CompositeConstruct, 3, &[ID, RESULT_ID, ID]),
      desc(Op::CompositeExtract,   5, &[ID, RESULT_ID, ID, LITERAL]),
      desc(Op::ConvertSToF,        4, &[ID, RESULT_ID, ID]),
      desc(Op::IAdd,               5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::FAdd,               5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::ISub,               5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::FSub,               5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::IMul,               5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::FMul,               5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::IEqual,             5, &[ID, RESULT_ID, ID, ID]),
      desc(Op::FOrdLessThan,       5, &[ID, RESULT_ID, ID, ID]),

      desc(Op::Phi,                3, &[ID, RESULT_ID, ID]),
      desc(Op::LoopMerge,          4, &[ID, ID, enumerant(LoopControl)]),
      desc(Op::SelectionMerge,     3, &[ID, enumerant(SelectionControl)]),
      desc(Op::Label,              2, &[RESULT_ID]),
      desc(Op::Branch,             2, &[ID]),
      desc(Op::BranchConditional,  4, &[ID, ID, ID, LITERAL]),
      // Selector, default target, then (literal, target) pairs.
      desc(Op::Switch,             3, &[ID, ID, LITERAL_NUMBER, ID]),
      desc(Op::Kill,               1, &[]),
      desc(Op::Return,             1, &[]),
      desc(Op::ReturnValue,        2, &[ID]),
      desc(Op::Unreachable,        1, &[]),
    ];
    for entry in entries {
      table.insert(entry);
    }
    table
  };
}
