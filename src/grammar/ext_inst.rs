/*!
  Extended instruction sets. A module imports a set by name with `OpExtInstImport` and
  then invokes its instructions by number with `OpExtInst`. The table is a mapping between
  import names and set identifiers, and from (set, number) to the instruction's record.
  As with the names of functors elsewhere, instruction and import names are interned.
*/

use std::collections::HashMap;

use bimap::BiMap;
use string_cache::DefaultAtom;
use strum_macros::{Display as StrumDisplay, IntoStaticStr};

use super::{OperandType, ID};
use crate::binary::Word;

#[derive(StrumDisplay, IntoStaticStr, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum ExtInstType {
  #[strum(serialize = "GLSL.std.450")]
  GlslStd450,
  #[strum(serialize = "OpenCL.std")]
  OpenClStd,
}

/// One instruction of an extended instruction set.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ExtInstDesc {
  pub name     : DefaultAtom,
  pub number   : Word,
  /// Operand types following the instruction number.
  pub operands : Vec<OperandType>,
}

#[derive(Clone, Debug)]
pub struct ExtInstTable {
  imports      : BiMap<DefaultAtom, ExtInstType>,
  instructions : HashMap<(ExtInstType, Word), ExtInstDesc>,
}

impl ExtInstTable {
  pub fn new() -> ExtInstTable {
    ExtInstTable{
      imports      : BiMap::new(),
      instructions : HashMap::new(),
    }
  }

  pub fn builtin() -> &'static ExtInstTable {
    &BUILTIN_EXT_INSTS
  }

  /// Registers `name` as the import name of `set`. Neither may already be registered.
  pub fn insert_import(&mut self, name: &str, set: ExtInstType)
    -> Result<(), (DefaultAtom, ExtInstType)>
  {
    self.imports.insert_no_overwrite(DefaultAtom::from(name), set)
  }

  pub fn insert(&mut self, set: ExtInstType, name: &str, number: Word, operands: &[OperandType]) {
    self.instructions.insert(
      (set, number),
      ExtInstDesc{ name: DefaultAtom::from(name), number, operands: operands.to_vec() }
    );
  }

  /// The set imported under `name`.
  pub fn import_type(&self, name: &str) -> Option<ExtInstType> {
    self.imports.get_by_left(&DefaultAtom::from(name)).copied()
  }

  pub fn import_name(&self, set: ExtInstType) -> Option<&DefaultAtom> {
    self.imports.get_by_right(&set)
  }

  pub fn lookup(&self, set: ExtInstType, number: Word) -> Option<&ExtInstDesc> {
    self.instructions.get(&(set, number))
  }
}

lazy_static! {
  static ref BUILTIN_EXT_INSTS: ExtInstTable = {
    let mut table = ExtInstTable::new();

    for set in [ExtInstType::GlslStd450, ExtInstType::OpenClStd].iter().copied() {
      let name: &'static str = set.into();
      let inserted = table.insert_import(name, set);
      debug_assert!(inserted.is_ok(), "duplicate import name {}", name);
    }

    let unary = &[ID];
    let binary = &[ID, ID];
    let ternary = &[ID, ID, ID];

    for (name, number) in &[
      ("Round", 1), ("RoundEven", 2), ("Trunc", 3), ("FAbs", 4), ("SAbs", 5), ("FSign", 6),
      ("SSign", 7), ("Floor", 8), ("Ceil", 9), ("Fract", 10), ("Radians", 11), ("Degrees", 12),
      ("Sin", 13), ("Cos", 14), ("Tan", 15), ("Asin", 16), ("Acos", 17), ("Atan", 18),
      ("Sinh", 19), ("Cosh", 20), ("Tanh", 21), ("Asinh", 22), ("Acosh", 23), ("Atanh", 24),
      ("Exp", 27), ("Log", 28), ("Exp2", 29), ("Log2", 30), ("Sqrt", 31), ("InverseSqrt", 32),
      ("Determinant", 33), ("MatrixInverse", 34), ("Length", 66), ("Normalize", 69)
    ] {
      table.insert(ExtInstType::GlslStd450, name, *number, unary);
    }
    for (name, number) in &[
      ("Atan2", 25), ("Pow", 26), ("FMin", 37), ("UMin", 38), ("SMin", 39), ("FMax", 40),
      ("UMax", 41), ("SMax", 42), ("Step", 48), ("Distance", 67), ("Cross", 68),
      ("Reflect", 71)
    ] {
      table.insert(ExtInstType::GlslStd450, name, *number, binary);
    }
    for (name, number) in &[
      ("FClamp", 43), ("UClamp", 44), ("SClamp", 45), ("FMix", 46), ("IMix", 47),
      ("SmoothStep", 49), ("Fma", 50), ("FaceForward", 70), ("Refract", 72)
    ] {
      table.insert(ExtInstType::GlslStd450, name, *number, ternary);
    }

    for (name, number) in &[
      ("acos", 0), ("acosh", 1), ("acospi", 2), ("asin", 3), ("asinh", 4), ("asinpi", 5),
      ("atan", 6), ("atanh", 8), ("atanpi", 9), ("cbrt", 11), ("ceil", 12), ("cos", 14),
      ("cosh", 15), ("cospi", 16)
    ] {
      table.insert(ExtInstType::OpenClStd, name, *number, unary);
    }
    for (name, number) in &[("atan2", 7), ("atan2pi", 10), ("copysign", 13)] {
      table.insert(ExtInstType::OpenClStd, name, *number, binary);
    }

    table
  };
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn import_names(){
    let table = ExtInstTable::builtin();
    assert_eq!(table.import_type("GLSL.std.450"), Some(ExtInstType::GlslStd450));
    assert_eq!(table.import_type("OpenCL.std"), Some(ExtInstType::OpenClStd));
    assert_eq!(table.import_type("GLSL.std.451"), None);
    assert_eq!(
      table.import_name(ExtInstType::GlslStd450),
      Some(&DefaultAtom::from("GLSL.std.450"))
    );
  }

  #[test]
  fn instructions_are_per_set(){
    let table = ExtInstTable::builtin();
    assert_eq!(&*table.lookup(ExtInstType::GlslStd450, 31).unwrap().name, "Sqrt");
    assert_eq!(&*table.lookup(ExtInstType::OpenClStd, 0).unwrap().name, "acos");
    assert!(table.lookup(ExtInstType::GlslStd450, 0).is_none());
    assert_eq!(table.lookup(ExtInstType::GlslStd450, 43).unwrap().operands.len(), 3);
  }

  #[test]
  fn duplicate_import(){
    let mut table = ExtInstTable::new();
    assert!(table.insert_import("GLSL.std.450", ExtInstType::GlslStd450).is_ok());
    assert!(table.insert_import("GLSL.std.450", ExtInstType::OpenClStd).is_err());
    assert!(table.insert_import("Other", ExtInstType::GlslStd450).is_err());
  }
}
