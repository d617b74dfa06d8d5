use super::Encoder;
use crate::ast::{FuncType, ValueType};
use crate::bytecode::Codec;

/// Leads every function signature.
pub const FUNC_TYPE_TAG: u8 = 0x40;

pub fn value_type_tag(value_type: ValueType) -> u8 {
  match value_type {
    ValueType::I32 => 0x01,
    ValueType::I64 => 0x02,
    ValueType::F32 => 0x03,
    ValueType::F64 => 0x04,
  }
}

impl Encoder {

  pub(super) fn value_type(&mut self, value_type: ValueType) {
    self.u8(value_type_tag(value_type));
  }

  pub(super) fn func_type(&mut self, func_type: &FuncType) {
    self.u8(FUNC_TYPE_TAG);
    self.vec(&func_type.params, |s, t| s.value_type(*t));
    self.vec1(func_type.result.as_ref(), |s, t| s.value_type(*t));
  }
}


#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use strum::IntoEnumIterator;

  use super::*;
  use crate::ast::ValueType::*;

  #[test]
  fn tags_are_distinct() {
    let tags: HashSet<u8> = ValueType::iter().map(value_type_tag).collect();
    assert_eq!(tags.len(), 4);
  }

  #[test]
  fn signature_with_result() {
    let mut encoder = Encoder::new();
    encoder.func_type(&FuncType::new(vec![I32, F64], Some(I64)));
    assert_eq!(encoder.finish().0, vec![0x40, 2, 0x01, 0x04, 1, 0x02]);
  }

  #[test]
  fn signature_without_result() {
    let mut encoder = Encoder::new();
    encoder.func_type(&FuncType::new(vec![], None));
    assert_eq!(encoder.finish().0, vec![0x40, 0, 0]);
  }
}
