use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter};

/// Index into one of the module's index spaces (types, functions, imports, locals, labels).
pub type Var = u32;

#[derive(StrumDisplay, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ValueType {
  #[strum(serialize = "i32")] I32,
  #[strum(serialize = "i64")] I64,
  #[strum(serialize = "f32")] F32,
  #[strum(serialize = "f64")] F64,
}

/// A function signature. There is at most one result.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct FuncType {
  pub params : Vec<ValueType>,
  pub result : Option<ValueType>,
}

impl FuncType {
  pub fn new(params: Vec<ValueType>, result: Option<ValueType>) -> FuncType {
    FuncType { params, result }
  }
}

impl Display for FuncType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let params =
      self.params
          .iter()
          .map(ValueType::to_string)
          .collect::<Vec<String>>()
          .join(" ");
    match self.result {
      Some(result) => write!(f, "({}) -> {}", params, result),
      None         => write!(f, "({}) -> ()", params)
    }
  }
}
