/*!
  Instruction trees. Operands are nested inside the instruction that consumes them; the encoder
  flattens the tree in postorder.

  Operators are grouped the way the format groups them: an operator family (`IntBinaryOp`,
  `FloatCompareOp`, ...) is paired with its operand type by `Op`. Conversions, loads and stores
  name their source and destination types directly, so every variant is a real instruction.
*/

use super::types::Var;

/// Pairs an operator with the value type it operates on.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Op<I, F> {
  I32(I),
  I64(I),
  F32(F),
  F64(F),
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum IntUnaryOp { Clz, Ctz, Popcnt }

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum FloatUnaryOp { Neg, Abs, Ceil, Floor, Trunc, Nearest, Sqrt }

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum IntBinaryOp {
  Add, Sub, Mul,
  DivS, DivU, RemS, RemU,
  And, Or, Xor,
  Shl, ShrS, ShrU, Rotl, Rotr,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum FloatBinaryOp { Add, Sub, Mul, Div, Min, Max, CopySign }

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum IntTestOp { Eqz }

/// Floats have no test operators.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum FloatTestOp {}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum IntCompareOp { Eq, Ne, LtS, LtU, LeS, LeU, GtS, GtU, GeS, GeU }

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum FloatCompareOp { Eq, Ne, Lt, Le, Gt, Ge }

pub type UnaryOp   = Op<IntUnaryOp, FloatUnaryOp>;
pub type BinaryOp  = Op<IntBinaryOp, FloatBinaryOp>;
pub type TestOp    = Op<IntTestOp, FloatTestOp>;
pub type CompareOp = Op<IntCompareOp, FloatCompareOp>;

/// Conversions, named `<result><operation><operand>`.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ConvertOp {
  I32WrapI64,
  I32TruncSF32,
  I32TruncUF32,
  I32TruncSF64,
  I32TruncUF64,
  I32ReinterpretF32,
  I64ExtendSI32,
  I64ExtendUI32,
  I64TruncSF32,
  I64TruncUF32,
  I64TruncSF64,
  I64TruncUF64,
  I64ReinterpretF64,
  F32ConvertSI32,
  F32ConvertUI32,
  F32ConvertSI64,
  F32ConvertUI64,
  F32DemoteF64,
  F32ReinterpretI32,
  F64ConvertSI32,
  F64ConvertUI32,
  F64ConvertSI64,
  F64ConvertUI64,
  F64PromoteF32,
  F64ReinterpretI64,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum LoadOp {
  I32Load,
  I64Load,
  F32Load,
  F64Load,
  I32Load8S,
  I32Load8U,
  I32Load16S,
  I32Load16U,
  I64Load8S,
  I64Load8U,
  I64Load16S,
  I64Load16U,
  I64Load32S,
  I64Load32U,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum StoreOp {
  I32Store,
  I64Store,
  F32Store,
  F64Store,
  I32Store8,
  I32Store16,
  I64Store8,
  I64Store16,
  I64Store32,
}

/// The immediates of a memory access. The alignment is an exponent: the access is aligned to
/// `2^align` bytes.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct MemArg {
  pub offset : u64,
  pub align  : u32,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Literal {
  I32(i32),
  I64(i64),
  F32(f32),
  F64(f64),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
  Nop,
  Unreachable,
  Block(Vec<Expr>),
  Loop(Vec<Expr>),
  If {
    condition   : Box<Expr>,
    then_branch : Vec<Expr>,
    else_branch : Vec<Expr>,
  },
  Select {
    if_true   : Box<Expr>,
    if_false  : Box<Expr>,
    condition : Box<Expr>,
  },
  Br {
    label : Var,
    value : Option<Box<Expr>>,
  },
  BrIf {
    label     : Var,
    value     : Option<Box<Expr>>,
    condition : Box<Expr>,
  },
  BrTable {
    targets : Vec<Var>,
    default : Var,
    value   : Option<Box<Expr>>,
    index   : Box<Expr>,
  },
  Return(Option<Box<Expr>>),

  Const(Literal),
  GetLocal(Var),
  SetLocal(Var, Box<Expr>),

  /// Calls a function of this module by function index.
  Call(Var, Vec<Expr>),
  /// Calls an imported function by import index.
  CallImport(Var, Vec<Expr>),
  /// Calls the table entry selected by `callee`, which must have the signature `type_index`.
  CallIndirect {
    type_index : Var,
    callee     : Box<Expr>,
    args       : Vec<Expr>,
  },

  Load {
    op      : LoadOp,
    memarg  : MemArg,
    address : Box<Expr>,
  },
  Store {
    op      : StoreOp,
    memarg  : MemArg,
    address : Box<Expr>,
    value   : Box<Expr>,
  },
  CurrentMemory,
  GrowMemory(Box<Expr>),

  Unary(UnaryOp, Box<Expr>),
  Binary(BinaryOp, Box<Expr>, Box<Expr>),
  Test(TestOp, Box<Expr>),
  Compare(CompareOp, Box<Expr>, Box<Expr>),
  Convert(ConvertOp, Box<Expr>),
}

// region Convenience constructors

impl Expr {
  pub fn i32_const(n: i32) -> Expr {
    Expr::Const(Literal::I32(n))
  }

  pub fn i64_const(n: i64) -> Expr {
    Expr::Const(Literal::I64(n))
  }

  pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary(op, Box::new(operand))
  }

  pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary(op, Box::new(left), Box::new(right))
  }

  pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Expr {
    Expr::Compare(op, Box::new(left), Box::new(right))
  }

  pub fn set_local(local: Var, value: Expr) -> Expr {
    Expr::SetLocal(local, Box::new(value))
  }
}

// endregion
