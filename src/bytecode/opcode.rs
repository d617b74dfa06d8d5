
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/**
  Opcodes of the version 11 format.

  The discriminants are the bytes written to the instruction stream and are part of the wire
  format, so no variant may be renumbered. The byte space has holes (0x0b-0x0e, 0x19-0x1f,
  0x37, 0x38, 0x3a, 0x3c-0x3f) that belong to no instruction of this version.

  The `strum` names are the mnemonics of the text format.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[repr(u8)]
pub enum Opcode {
  // Control //
  #[strum(serialize = "nop")]               Nop               = 0x00,
  #[strum(serialize = "block")]             Block             = 0x01,
  #[strum(serialize = "loop")]              Loop              = 0x02,
  #[strum(serialize = "if")]                If                = 0x03,
  #[strum(serialize = "else")]              Else              = 0x04,
  #[strum(serialize = "select")]            Select            = 0x05,
  #[strum(serialize = "br")]                Br                = 0x06,
  #[strum(serialize = "br_if")]             BrIf              = 0x07,
  #[strum(serialize = "br_table")]          BrTable           = 0x08,
  #[strum(serialize = "return")]            Return            = 0x09,
  #[strum(serialize = "unreachable")]       Unreachable       = 0x0a,
  #[strum(serialize = "end")]               End               = 0x0f,

  // Constants, locals and calls //
  #[strum(serialize = "i32.const")]         I32Const          = 0x10,
  #[strum(serialize = "i64.const")]         I64Const          = 0x11,
  #[strum(serialize = "f64.const")]         F64Const          = 0x12,
  #[strum(serialize = "f32.const")]         F32Const          = 0x13,
  #[strum(serialize = "get_local")]         GetLocal          = 0x14,
  #[strum(serialize = "set_local")]         SetLocal          = 0x15,
  #[strum(serialize = "call")]              Call              = 0x16,
  #[strum(serialize = "call_indirect")]     CallIndirect      = 0x17,
  #[strum(serialize = "call_import")]       CallImport        = 0x18,

  // Memory //
  #[strum(serialize = "i32.load8_s")]       I32Load8S         = 0x20,
  #[strum(serialize = "i32.load8_u")]       I32Load8U         = 0x21,
  #[strum(serialize = "i32.load16_s")]      I32Load16S        = 0x22,
  #[strum(serialize = "i32.load16_u")]      I32Load16U        = 0x23,
  #[strum(serialize = "i64.load8_s")]       I64Load8S         = 0x24,
  #[strum(serialize = "i64.load8_u")]       I64Load8U         = 0x25,
  #[strum(serialize = "i64.load16_s")]      I64Load16S        = 0x26,
  #[strum(serialize = "i64.load16_u")]      I64Load16U        = 0x27,
  #[strum(serialize = "i64.load32_s")]      I64Load32S        = 0x28,
  #[strum(serialize = "i64.load32_u")]      I64Load32U        = 0x29,
  #[strum(serialize = "i32.load")]          I32Load           = 0x2a,
  #[strum(serialize = "i64.load")]          I64Load           = 0x2b,
  #[strum(serialize = "f32.load")]          F32Load           = 0x2c,
  #[strum(serialize = "f64.load")]          F64Load           = 0x2d,
  #[strum(serialize = "i32.store8")]        I32Store8         = 0x2e,
  #[strum(serialize = "i32.store16")]       I32Store16        = 0x2f,
  #[strum(serialize = "i64.store8")]        I64Store8         = 0x30,
  #[strum(serialize = "i64.store16")]       I64Store16        = 0x31,
  #[strum(serialize = "i64.store32")]       I64Store32        = 0x32,
  #[strum(serialize = "i32.store")]         I32Store          = 0x33,
  #[strum(serialize = "i64.store")]         I64Store          = 0x34,
  #[strum(serialize = "f32.store")]         F32Store          = 0x35,
  #[strum(serialize = "f64.store")]         F64Store          = 0x36,
  #[strum(serialize = "grow_memory")]       GrowMemory        = 0x39,
  #[strum(serialize = "current_memory")]    CurrentMemory     = 0x3b,

  // i32 //
  #[strum(serialize = "i32.add")]           I32Add            = 0x40,
  #[strum(serialize = "i32.sub")]           I32Sub            = 0x41,
  #[strum(serialize = "i32.mul")]           I32Mul            = 0x42,
  #[strum(serialize = "i32.div_s")]         I32DivS           = 0x43,
  #[strum(serialize = "i32.div_u")]         I32DivU           = 0x44,
  #[strum(serialize = "i32.rem_s")]         I32RemS           = 0x45,
  #[strum(serialize = "i32.rem_u")]         I32RemU           = 0x46,
  #[strum(serialize = "i32.and")]           I32And            = 0x47,
  #[strum(serialize = "i32.or")]            I32Or             = 0x48,
  #[strum(serialize = "i32.xor")]           I32Xor            = 0x49,
  #[strum(serialize = "i32.shl")]           I32Shl            = 0x4a,
  #[strum(serialize = "i32.shr_u")]         I32ShrU           = 0x4b,
  #[strum(serialize = "i32.shr_s")]         I32ShrS           = 0x4c,
  #[strum(serialize = "i32.eq")]            I32Eq             = 0x4d,
  #[strum(serialize = "i32.ne")]            I32Ne             = 0x4e,
  #[strum(serialize = "i32.lt_s")]          I32LtS            = 0x4f,
  #[strum(serialize = "i32.le_s")]          I32LeS            = 0x50,
  #[strum(serialize = "i32.lt_u")]          I32LtU            = 0x51,
  #[strum(serialize = "i32.le_u")]          I32LeU            = 0x52,
  #[strum(serialize = "i32.gt_s")]          I32GtS            = 0x53,
  #[strum(serialize = "i32.ge_s")]          I32GeS            = 0x54,
  #[strum(serialize = "i32.gt_u")]          I32GtU            = 0x55,
  #[strum(serialize = "i32.ge_u")]          I32GeU            = 0x56,
  #[strum(serialize = "i32.clz")]           I32Clz            = 0x57,
  #[strum(serialize = "i32.ctz")]           I32Ctz            = 0x58,
  #[strum(serialize = "i32.popcnt")]        I32Popcnt         = 0x59,
  #[strum(serialize = "i32.eqz")]           I32Eqz            = 0x5a,

  // i64 //
  #[strum(serialize = "i64.add")]           I64Add            = 0x5b,
  #[strum(serialize = "i64.sub")]           I64Sub            = 0x5c,
  #[strum(serialize = "i64.mul")]           I64Mul            = 0x5d,
  #[strum(serialize = "i64.div_s")]         I64DivS           = 0x5e,
  #[strum(serialize = "i64.div_u")]         I64DivU           = 0x5f,
  #[strum(serialize = "i64.rem_s")]         I64RemS           = 0x60,
  #[strum(serialize = "i64.rem_u")]         I64RemU           = 0x61,
  #[strum(serialize = "i64.and")]           I64And            = 0x62,
  #[strum(serialize = "i64.or")]            I64Or             = 0x63,
  #[strum(serialize = "i64.xor")]           I64Xor            = 0x64,
  #[strum(serialize = "i64.shl")]           I64Shl            = 0x65,
  #[strum(serialize = "i64.shr_u")]         I64ShrU           = 0x66,
  #[strum(serialize = "i64.shr_s")]         I64ShrS           = 0x67,
  #[strum(serialize = "i64.eq")]            I64Eq             = 0x68,
  #[strum(serialize = "i64.ne")]            I64Ne             = 0x69,
  #[strum(serialize = "i64.lt_s")]          I64LtS            = 0x6a,
  #[strum(serialize = "i64.le_s")]          I64LeS            = 0x6b,
  #[strum(serialize = "i64.lt_u")]          I64LtU            = 0x6c,
  #[strum(serialize = "i64.le_u")]          I64LeU            = 0x6d,
  #[strum(serialize = "i64.gt_s")]          I64GtS            = 0x6e,
  #[strum(serialize = "i64.ge_s")]          I64GeS            = 0x6f,
  #[strum(serialize = "i64.gt_u")]          I64GtU            = 0x70,
  #[strum(serialize = "i64.ge_u")]          I64GeU            = 0x71,
  #[strum(serialize = "i64.clz")]           I64Clz            = 0x72,
  #[strum(serialize = "i64.ctz")]           I64Ctz            = 0x73,
  #[strum(serialize = "i64.popcnt")]        I64Popcnt         = 0x74,

  // f32 //
  #[strum(serialize = "f32.add")]           F32Add            = 0x75,
  #[strum(serialize = "f32.sub")]           F32Sub            = 0x76,
  #[strum(serialize = "f32.mul")]           F32Mul            = 0x77,
  #[strum(serialize = "f32.div")]           F32Div            = 0x78,
  #[strum(serialize = "f32.min")]           F32Min            = 0x79,
  #[strum(serialize = "f32.max")]           F32Max            = 0x7a,
  #[strum(serialize = "f32.abs")]           F32Abs            = 0x7b,
  #[strum(serialize = "f32.neg")]           F32Neg            = 0x7c,
  #[strum(serialize = "f32.copysign")]      F32CopySign       = 0x7d,
  #[strum(serialize = "f32.ceil")]          F32Ceil           = 0x7e,
  #[strum(serialize = "f32.floor")]         F32Floor          = 0x7f,
  #[strum(serialize = "f32.trunc")]         F32Trunc          = 0x80,
  #[strum(serialize = "f32.nearest")]       F32Nearest        = 0x81,
  #[strum(serialize = "f32.sqrt")]          F32Sqrt           = 0x82,
  #[strum(serialize = "f32.eq")]            F32Eq             = 0x83,
  #[strum(serialize = "f32.ne")]            F32Ne             = 0x84,
  #[strum(serialize = "f32.lt")]            F32Lt             = 0x85,
  #[strum(serialize = "f32.le")]            F32Le             = 0x86,
  #[strum(serialize = "f32.gt")]            F32Gt             = 0x87,
  #[strum(serialize = "f32.ge")]            F32Ge             = 0x88,

  // f64 //
  #[strum(serialize = "f64.add")]           F64Add            = 0x89,
  #[strum(serialize = "f64.sub")]           F64Sub            = 0x8a,
  #[strum(serialize = "f64.mul")]           F64Mul            = 0x8b,
  #[strum(serialize = "f64.div")]           F64Div            = 0x8c,
  #[strum(serialize = "f64.min")]           F64Min            = 0x8d,
  #[strum(serialize = "f64.max")]           F64Max            = 0x8e,
  #[strum(serialize = "f64.abs")]           F64Abs            = 0x8f,
  #[strum(serialize = "f64.neg")]           F64Neg            = 0x90,
  #[strum(serialize = "f64.copysign")]      F64CopySign       = 0x91,
  #[strum(serialize = "f64.ceil")]          F64Ceil           = 0x92,
  #[strum(serialize = "f64.floor")]         F64Floor          = 0x93,
  #[strum(serialize = "f64.trunc")]         F64Trunc          = 0x94,
  #[strum(serialize = "f64.nearest")]       F64Nearest        = 0x95,
  #[strum(serialize = "f64.sqrt")]          F64Sqrt           = 0x96,
  #[strum(serialize = "f64.eq")]            F64Eq             = 0x97,
  #[strum(serialize = "f64.ne")]            F64Ne             = 0x98,
  #[strum(serialize = "f64.lt")]            F64Lt             = 0x99,
  #[strum(serialize = "f64.le")]            F64Le             = 0x9a,
  #[strum(serialize = "f64.gt")]            F64Gt             = 0x9b,
  #[strum(serialize = "f64.ge")]            F64Ge             = 0x9c,

  // Conversions //
  #[strum(serialize = "i32.trunc_s/f32")]     I32TruncSF32      = 0x9d,
  #[strum(serialize = "i32.trunc_s/f64")]     I32TruncSF64      = 0x9e,
  #[strum(serialize = "i32.trunc_u/f32")]     I32TruncUF32      = 0x9f,
  #[strum(serialize = "i32.trunc_u/f64")]     I32TruncUF64      = 0xa0,
  #[strum(serialize = "i32.wrap/i64")]        I32WrapI64        = 0xa1,
  #[strum(serialize = "i64.trunc_s/f32")]     I64TruncSF32      = 0xa2,
  #[strum(serialize = "i64.trunc_s/f64")]     I64TruncSF64      = 0xa3,
  #[strum(serialize = "i64.trunc_u/f32")]     I64TruncUF32      = 0xa4,
  #[strum(serialize = "i64.trunc_u/f64")]     I64TruncUF64      = 0xa5,
  #[strum(serialize = "i64.extend_s/i32")]    I64ExtendSI32     = 0xa6,
  #[strum(serialize = "i64.extend_u/i32")]    I64ExtendUI32     = 0xa7,
  #[strum(serialize = "f32.convert_s/i32")]   F32ConvertSI32    = 0xa8,
  #[strum(serialize = "f32.convert_u/i32")]   F32ConvertUI32    = 0xa9,
  #[strum(serialize = "f32.convert_s/i64")]   F32ConvertSI64    = 0xaa,
  #[strum(serialize = "f32.convert_u/i64")]   F32ConvertUI64    = 0xab,
  #[strum(serialize = "f32.demote/f64")]      F32DemoteF64      = 0xac,
  #[strum(serialize = "f32.reinterpret/i32")] F32ReinterpretI32 = 0xad,
  #[strum(serialize = "f64.convert_s/i32")]   F64ConvertSI32    = 0xae,
  #[strum(serialize = "f64.convert_u/i32")]   F64ConvertUI32    = 0xaf,
  #[strum(serialize = "f64.convert_s/i64")]   F64ConvertSI64    = 0xb0,
  #[strum(serialize = "f64.convert_u/i64")]   F64ConvertUI64    = 0xb1,
  #[strum(serialize = "f64.promote/f32")]     F64PromoteF32     = 0xb2,
  #[strum(serialize = "f64.reinterpret/i64")] F64ReinterpretI64 = 0xb3,
  #[strum(serialize = "i32.reinterpret/f32")] I32ReinterpretF32 = 0xb4,
  #[strum(serialize = "i64.reinterpret/f64")] I64ReinterpretF64 = 0xb5,

  // Late additions, out of family order //
  #[strum(serialize = "i32.rotr")]          I32Rotr           = 0xb6,
  #[strum(serialize = "i32.rotl")]          I32Rotl           = 0xb7,
  #[strum(serialize = "i64.rotr")]          I64Rotr           = 0xb8,
  #[strum(serialize = "i64.rotl")]          I64Rotl           = 0xb9,
  #[strum(serialize = "i64.eqz")]           I64Eqz            = 0xba,
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn mnemonic(&self) -> &'static str {
    (*self).into()
  }
}


#[cfg(test)]
mod tests {
  use std::collections::HashSet;
  use std::convert::TryFrom;
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn codes_and_mnemonics_are_unique() {
    let codes: HashSet<u8> = Opcode::iter().map(|op| op.code()).collect();
    let names: HashSet<&str> = Opcode::iter().map(|op| op.mnemonic()).collect();
    assert_eq!(codes.len(), Opcode::iter().count());
    assert_eq!(names.len(), Opcode::iter().count());
  }

  #[test]
  fn bytes_map_back_to_opcodes() {
    for op in Opcode::iter() {
      assert_eq!(Opcode::try_from(op.code()).ok(), Some(op));
      assert_eq!(Opcode::from_str(op.mnemonic()).ok(), Some(op));
    }
    assert!(Opcode::try_from(0x0bu8).is_err());
    assert!(Opcode::try_from(0x3au8).is_err());
    assert!(Opcode::try_from(0xbbu8).is_err());
  }

  /// Every byte of the format with its mnemonic.
  const WIRE_TABLE: &[(u8, &str)] = &[
    (0x00, "nop"), (0x01, "block"), (0x02, "loop"), (0x03, "if"), (0x04, "else"),
    (0x05, "select"), (0x06, "br"), (0x07, "br_if"), (0x08, "br_table"), (0x09, "return"),
    (0x0a, "unreachable"), (0x0f, "end"), (0x10, "i32.const"), (0x11, "i64.const"),
    (0x12, "f64.const"), (0x13, "f32.const"), (0x14, "get_local"), (0x15, "set_local"),
    (0x16, "call"), (0x17, "call_indirect"), (0x18, "call_import"), (0x20, "i32.load8_s"),
    (0x21, "i32.load8_u"), (0x22, "i32.load16_s"), (0x23, "i32.load16_u"), (0x24, "i64.load8_s"),
    (0x25, "i64.load8_u"), (0x26, "i64.load16_s"), (0x27, "i64.load16_u"), (0x28, "i64.load32_s"),
    (0x29, "i64.load32_u"), (0x2a, "i32.load"), (0x2b, "i64.load"), (0x2c, "f32.load"),
    (0x2d, "f64.load"), (0x2e, "i32.store8"), (0x2f, "i32.store16"), (0x30, "i64.store8"),
    (0x31, "i64.store16"), (0x32, "i64.store32"), (0x33, "i32.store"), (0x34, "i64.store"),
    (0x35, "f32.store"), (0x36, "f64.store"), (0x39, "grow_memory"), (0x3b, "current_memory"),
    (0x40, "i32.add"), (0x41, "i32.sub"), (0x42, "i32.mul"), (0x43, "i32.div_s"),
    (0x44, "i32.div_u"), (0x45, "i32.rem_s"), (0x46, "i32.rem_u"), (0x47, "i32.and"),
    (0x48, "i32.or"), (0x49, "i32.xor"), (0x4a, "i32.shl"), (0x4b, "i32.shr_u"),
    (0x4c, "i32.shr_s"), (0x4d, "i32.eq"), (0x4e, "i32.ne"), (0x4f, "i32.lt_s"),
    (0x50, "i32.le_s"), (0x51, "i32.lt_u"), (0x52, "i32.le_u"), (0x53, "i32.gt_s"),
    (0x54, "i32.ge_s"), (0x55, "i32.gt_u"), (0x56, "i32.ge_u"), (0x57, "i32.clz"),
    (0x58, "i32.ctz"), (0x59, "i32.popcnt"), (0x5a, "i32.eqz"), (0x5b, "i64.add"),
    (0x5c, "i64.sub"), (0x5d, "i64.mul"), (0x5e, "i64.div_s"), (0x5f, "i64.div_u"),
    (0x60, "i64.rem_s"), (0x61, "i64.rem_u"), (0x62, "i64.and"), (0x63, "i64.or"),
    (0x64, "i64.xor"), (0x65, "i64.shl"), (0x66, "i64.shr_u"), (0x67, "i64.shr_s"),
    (0x68, "i64.eq"), (0x69, "i64.ne"), (0x6a, "i64.lt_s"), (0x6b, "i64.le_s"),
    (0x6c, "i64.lt_u"), (0x6d, "i64.le_u"), (0x6e, "i64.gt_s"), (0x6f, "i64.ge_s"),
    (0x70, "i64.gt_u"), (0x71, "i64.ge_u"), (0x72, "i64.clz"), (0x73, "i64.ctz"),
    (0x74, "i64.popcnt"), (0x75, "f32.add"), (0x76, "f32.sub"), (0x77, "f32.mul"),
    (0x78, "f32.div"), (0x79, "f32.min"), (0x7a, "f32.max"), (0x7b, "f32.abs"), (0x7c, "f32.neg"),
    (0x7d, "f32.copysign"), (0x7e, "f32.ceil"), (0x7f, "f32.floor"), (0x80, "f32.trunc"),
    (0x81, "f32.nearest"), (0x82, "f32.sqrt"), (0x83, "f32.eq"), (0x84, "f32.ne"),
    (0x85, "f32.lt"), (0x86, "f32.le"), (0x87, "f32.gt"), (0x88, "f32.ge"), (0x89, "f64.add"),
    (0x8a, "f64.sub"), (0x8b, "f64.mul"), (0x8c, "f64.div"), (0x8d, "f64.min"), (0x8e, "f64.max"),
    (0x8f, "f64.abs"), (0x90, "f64.neg"), (0x91, "f64.copysign"), (0x92, "f64.ceil"),
    (0x93, "f64.floor"), (0x94, "f64.trunc"), (0x95, "f64.nearest"), (0x96, "f64.sqrt"),
    (0x97, "f64.eq"), (0x98, "f64.ne"), (0x99, "f64.lt"), (0x9a, "f64.le"), (0x9b, "f64.gt"),
    (0x9c, "f64.ge"), (0x9d, "i32.trunc_s/f32"), (0x9e, "i32.trunc_s/f64"),
    (0x9f, "i32.trunc_u/f32"), (0xa0, "i32.trunc_u/f64"), (0xa1, "i32.wrap/i64"),
    (0xa2, "i64.trunc_s/f32"), (0xa3, "i64.trunc_s/f64"), (0xa4, "i64.trunc_u/f32"),
    (0xa5, "i64.trunc_u/f64"), (0xa6, "i64.extend_s/i32"), (0xa7, "i64.extend_u/i32"),
    (0xa8, "f32.convert_s/i32"), (0xa9, "f32.convert_u/i32"), (0xaa, "f32.convert_s/i64"),
    (0xab, "f32.convert_u/i64"), (0xac, "f32.demote/f64"), (0xad, "f32.reinterpret/i32"),
    (0xae, "f64.convert_s/i32"), (0xaf, "f64.convert_u/i32"), (0xb0, "f64.convert_s/i64"),
    (0xb1, "f64.convert_u/i64"), (0xb2, "f64.promote/f32"), (0xb3, "f64.reinterpret/i64"),
    (0xb4, "i32.reinterpret/f32"), (0xb5, "i64.reinterpret/f64"), (0xb6, "i32.rotr"),
    (0xb7, "i32.rotl"), (0xb8, "i64.rotr"), (0xb9, "i64.rotl"), (0xba, "i64.eqz"),
  ];

  #[test]
  fn whole_table_matches_wire_format() {
    assert_eq!(WIRE_TABLE.len(), Opcode::iter().count());
    for &(code, mnemonic) in WIRE_TABLE {
      let op = Opcode::try_from(code).ok();
      assert_eq!(op.map(|op| op.mnemonic()), Some(mnemonic), "byte {:#04x}", code);
    }
  }

  #[test]
  fn family_anchors() {
    assert_eq!(Opcode::End.code(), 0x0f);
    assert_eq!(Opcode::I32Add.code(), 0x40);
    assert_eq!(Opcode::I64Add.code(), 0x5b);
    assert_eq!(Opcode::F32Add.code(), 0x75);
    assert_eq!(Opcode::F64Add.code(), 0x89);
    assert_eq!(Opcode::I32TruncSF32.code(), 0x9d);
    assert_eq!(Opcode::I64Eqz.code(), 0xba);
    assert_eq!(Opcode::F64ReinterpretI64.to_string(), "f64.reinterpret/i64");
  }
}
