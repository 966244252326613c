/*!
  Decoding and encoding primitives for SPIR-V style modules: flat buffers of 32 bit words
  holding a five word header followed by variable length instructions.

  The decoder turns a `Binary` into disassembly text:

  ```
  use spirv_binary::{disassemble, Binary, Instruction, Endianness, Op, Position};

  let mut type_void = Instruction::new(Op::TypeVoid.code());
  type_void.encode_u32(1, Position::default()).unwrap();

  let binary = Binary::assemble(2, &[type_void], Endianness::Little).unwrap();
  let text = disassemble(&binary).unwrap();
  assert!(text.as_str().ends_with("%1 = OpTypeVoid\n"));
  ```

  How each word is interpreted comes from the description tables in `grammar`. The
  built-in tables cover the core opcodes and the `GLSL.std.450` and `OpenCL.std`
  extended instruction sets; callers may supply their own through `Tables`.
*/

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate prettytable;

pub mod binary;
pub mod colour;
pub mod disassemble;
pub mod error;
pub mod grammar;
pub mod options;

pub use binary::{Binary, Endianness, Header, Instruction, Word};
pub use disassemble::{binary_to_text, disassemble, Text};
pub use error::{Diagnostic, ErrorKind, Position};
pub use grammar::{Op, Tables};
pub use options::Options;
