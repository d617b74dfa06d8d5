//! The module as handed over by the validator: every index has already been checked.

use string_cache::DefaultAtom;

use super::expr::Expr;
use super::types::{FuncType, ValueType, Var};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Import {
  pub type_index  : Var,
  pub module_name : DefaultAtom,
  pub func_name   : DefaultAtom,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Func {
  pub type_index : Var,
  /// Locals beyond the parameters, in declaration order.
  pub locals     : Vec<ValueType>,
  pub body       : Vec<Expr>,
}

/// Function indices reachable through `call_indirect`.
pub type Table = Vec<Var>;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Segment {
  pub address : u64,
  pub data    : Vec<u8>,
}

/// Sizes are in pages.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Memory {
  pub min      : u64,
  pub max      : u64,
  pub segments : Vec<Segment>,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ExportKind {
  Func(Var),
  Memory,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Export {
  pub name : DefaultAtom,
  pub kind : ExportKind,
}

#[derive(Clone, Default, PartialEq, Debug)]
pub struct Module {
  pub types   : Vec<FuncType>,
  pub imports : Vec<Import>,
  pub funcs   : Vec<Func>,
  pub table   : Table,
  pub memory  : Option<Memory>,
  pub exports : Vec<Export>,
  pub start   : Option<Var>,
}

impl Module {
  pub fn new() -> Module {
    Module::default()
  }

  /// Whether any export refers to the module's memory.
  pub fn exports_memory(&self) -> bool {
    self.exports.iter().any(|export| export.kind == ExportKind::Memory)
  }
}
