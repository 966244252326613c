//! Whole-module decoding: modules are assembled with the encoding primitives and then
//! disassembled with the built-in tables.

use spirv_binary::binary::{join_first_word, MAGIC_NUMBER, VERSION_NUMBER};
use spirv_binary::{
  binary_to_text, disassemble, Binary, Diagnostic, Endianness, ErrorKind, Instruction, Op,
  Options, Position, Tables, Word
};

const HEADER: &str =
  "; SPIR-V\n; Version: 65536\n; Generator: Khronos\n; Bound: 3\n; Schema: 0\n";

fn instruction(op: Op, words: &[Word]) -> Instruction {
  let mut instruction = Instruction::new(op.code());
  for word in words {
    instruction.encode_u32(*word, Position::default()).unwrap();
  }
  instruction
}

fn import(name: &str) -> Instruction {
  let mut instruction = instruction(Op::ExtInstImport, &[1]);
  instruction.encode_string(name, Position::default()).unwrap();
  instruction
}

fn decode(instructions: &[Instruction]) -> Result<Vec<String>, Diagnostic> {
  let binary = Binary::assemble(10, instructions, Endianness::host()).unwrap();
  let text = disassemble(&binary)?;
  Ok(text.as_str().lines().skip(5).map(String::from).collect())
}

#[test]
fn type_void_module() {
  let binary = Binary::new(vec![
    MAGIC_NUMBER, 0x0001_0000, 0, 3, 0,
    join_first_word(2, Op::TypeVoid.code()), 1
  ]);
  let text = disassemble(&binary).unwrap();
  assert_eq!(text.as_str(), format!("{}%1 = OpTypeVoid\n", HEADER));
}

#[test]
fn bad_magic_is_rejected_before_instructions() {
  let binary = Binary::new(vec![
    0xDEAD_BEEF, VERSION_NUMBER, 0, 3, 0,
    join_first_word(2, Op::TypeVoid.code()), 1
  ]);
  let error = disassemble(&binary).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
  assert_eq!(error.position.index, 0);
  assert_eq!(error.message, "Invalid SPIR-V magic number 'deadbeef'.");
}

#[test]
fn extended_instruction_is_named() {
  let lines = decode(&[
    import("GLSL.std.450"),
    instruction(Op::TypeFloat, &[2, 32]),
    instruction(Op::ExtInst, &[2, 3, 1, 31, 4]),
    instruction(Op::ExtInst, &[2, 5, 1, 43, 3, 6, 7]),
  ]).unwrap();

  assert_eq!(lines, vec![
    "%1 = OpExtInstImport \"GLSL.std.450\"",
    "%2 = OpTypeFloat 32",
    "%3 = OpExtInst %2 %1 Sqrt %4",
    "%5 = OpExtInst %2 %1 FClamp %3 %6 %7",
  ]);
}

#[test]
fn second_import_replaces_the_first() {
  let lines = decode(&[
    import("GLSL.std.450"),
    import("OpenCL.std"),
    instruction(Op::ExtInst, &[2, 3, 1, 0, 4]),
  ]).unwrap();
  assert_eq!(lines[2], "%3 = OpExtInst %2 %1 acos %4");
}

#[test]
fn unknown_import() {
  let error = decode(&[import("GLSL.std.999")]).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
  assert_eq!(error.message, "Invalid extended instruction import 'GLSL.std.999'.");
  assert_eq!(error.position.index, 7);
}

#[test]
fn extended_instruction_out_of_range() {
  let error = decode(&[
    import("GLSL.std.450"),
    instruction(Op::ExtInst, &[2, 3, 1, 9999, 4]),
  ]).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
  assert_eq!(error.message, "Invalid extended instruction '9999'.");
}

#[test]
fn extended_instruction_without_import() {
  let error = decode(&[instruction(Op::ExtInst, &[2, 3, 1, 31, 4])]).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
}

#[test]
fn import_is_tracked_by_the_decoder() {
  // The set stays active across unrelated instructions.
  let lines = decode(&[
    import("OpenCL.std"),
    instruction(Op::TypeVoid, &[5]),
    instruction(Op::TypeBool, &[6]),
    instruction(Op::ExtInst, &[2, 3, 1, 7, 4, 5]),
  ]).unwrap();
  assert_eq!(lines[3], "%3 = OpExtInst %2 %1 atan2 %4 %5");
}

#[test]
fn string_overrunning_its_instruction() {
  // OpName claims three words, but its string is only terminated in the next word.
  let binary = Binary::new(vec![
    MAGIC_NUMBER, VERSION_NUMBER, 0, 3, 0,
    join_first_word(3, Op::Name.code()), 1, 0x6463_6261,
    0
  ]);
  let error = disassemble(&binary).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
  assert_eq!(error.message, "Invalid word count.");
  assert_eq!(error.position.index, 5);
}

#[test]
fn string_running_off_the_end() {
  let binary = Binary::new(vec![
    MAGIC_NUMBER, VERSION_NUMBER, 0, 3, 0,
    join_first_word(3, Op::Name.code()), 1, 0x6463_6261
  ]);
  let error = disassemble(&binary).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
  assert_eq!(error.message, "Unterminated string literal.");
}

#[test]
fn byte_order_does_not_change_the_text() {
  let mut name = instruction(Op::Name, &[4]);
  name.encode_string("main", Position::default()).unwrap();
  let instructions = vec![
    instruction(Op::Capability, &[1]),
    instruction(Op::MemoryModel, &[0, 1]),
    instruction(Op::TypeVoid, &[1]),
    instruction(Op::TypeFunction, &[2, 1]),
    name,
    instruction(Op::Function, &[1, 4, 0, 2]),
    instruction(Op::Label, &[5]),
    instruction(Op::Return, &[]),
    instruction(Op::FunctionEnd, &[]),
  ];

  let little = Binary::assemble(6, &instructions, Endianness::Little).unwrap();
  let big = Binary::assemble(6, &instructions, Endianness::Big).unwrap();
  assert_eq!(little.endianness().unwrap(), Endianness::Little);
  assert_eq!(big.endianness().unwrap(), Endianness::Big);
  assert_ne!(little.words(), big.words());

  let little_text = disassemble(&little).unwrap();
  let big_text = disassemble(&big).unwrap();
  assert_eq!(little_text, big_text);
  assert_eq!(
    little_text.as_str().lines().skip(5).collect::<Vec<_>>(),
    vec![
      "OpCapability Shader",
      "OpMemoryModel Logical GLSL450",
      "%1 = OpTypeVoid",
      "%2 = OpTypeFunction %1",
      "OpName %4 \"main\"",
      "%4 = OpFunction %1 None %2",
      "%5 = OpLabel",
      "OpReturn",
      "OpFunctionEnd",
    ]
  );
}

#[test]
fn bytes_round_trip() {
  let binary = Binary::assemble(2, &[instruction(Op::TypeVoid, &[1])], Endianness::Big).unwrap();
  let copy = Binary::from_bytes(&binary.to_bytes()).unwrap();
  assert_eq!(copy, binary);
  assert!(disassemble(&copy).unwrap().as_str().ends_with("%1 = OpTypeVoid\n"));
}

#[test]
fn printing_streams_every_line() {
  let binary = Binary::assemble(
    3, &[instruction(Op::TypeVoid, &[1]), instruction(Op::TypeBool, &[2])], Endianness::host()
  ).unwrap();

  let mut sink: Vec<u8> = Vec::new();
  let text = binary_to_text(&binary, Options::PRINT, &Tables::builtin(), Some(&mut sink)).unwrap();
  assert!(text.is_none());
  assert_eq!(
    String::from_utf8(sink).unwrap(),
    format!("{}%1 = OpTypeVoid\n%2 = OpTypeBool\n", HEADER)
  );
}

#[test]
fn failure_returns_no_partial_text() {
  let binary = Binary::assemble(
    3, &[instruction(Op::TypeVoid, &[1]), instruction(Op::Capability, &[4242])], Endianness::host()
  ).unwrap();
  let error = binary_to_text(&binary, Options::empty(), &Tables::builtin(), None).unwrap_err();
  assert_eq!(error.kind, ErrorKind::InvalidBinary);
  assert_eq!(error.to_string(), "word 8: Invalid capability operand '4242'.");
}
