/*!
  The expression codec flattens an instruction tree in postorder: the operands of an instruction
  are emitted before its opcode, matching the order a stack machine consumes them.

  Operand orderings that are not plain postorder:
  ```text
  block/loop          op, body.., end
  if                  cond, if, then.., [else, else..,] end        (else only when non-empty)
  br                  [value], br, arity, label
  br_if               [value], cond, br_if, arity, label
  br_table            [value], index, br_table, arity, labels, default
  return              [value], return, arity
  call/call_import    args.., op, arg count, target
  call_indirect       callee, args.., op, arg count, type index
  load                address, op, align, offset
  store               address, value, op, align, offset
  ```
  `[value]` is the carried value as a sequence of at most one, `arity` is 1 if it is present.
*/

use super::Encoder;
use crate::ast::*;
use crate::bytecode::{Codec, Opcode};

impl Encoder {

  pub(super) fn exprs(&mut self, exprs: &[Expr]) {
    for expr in exprs {
      self.expr(expr);
    }
  }

  pub(super) fn expr(&mut self, expr: &Expr) {
    match expr {

      Expr::Nop => self.op(Opcode::Nop),

      Expr::Unreachable => self.op(Opcode::Unreachable),

      Expr::Block(body) => {
        self.op(Opcode::Block);
        self.exprs(body);
        self.op(Opcode::End);
      }

      Expr::Loop(body) => {
        self.op(Opcode::Loop);
        self.exprs(body);
        self.op(Opcode::End);
      }

      Expr::If{ condition, then_branch, else_branch } => {
        self.expr(condition);
        self.op(Opcode::If);
        self.exprs(then_branch);
        if !else_branch.is_empty() {
          self.op(Opcode::Else);
          self.exprs(else_branch);
        }
        self.op(Opcode::End);
      }

      Expr::Select{ if_true, if_false, condition } => {
        self.expr(if_true);
        self.expr(if_false);
        self.expr(condition);
        self.op(Opcode::Select);
      }

      Expr::Br{ label, value } => {
        self.carried(value);
        self.op(Opcode::Br);
        self.arity(value);
        self.vu32(*label);
      }

      Expr::BrIf{ label, value, condition } => {
        self.carried(value);
        self.expr(condition);
        self.op(Opcode::BrIf);
        self.arity(value);
        self.vu32(*label);
      }

      Expr::BrTable{ targets, default, value, index } => {
        self.carried(value);
        self.expr(index);
        self.op(Opcode::BrTable);
        self.arity(value);
        self.vec(targets, |s, label| s.vu32(*label));
        self.vu32(*default);
      }

      Expr::Return(value) => {
        self.carried(value);
        self.op(Opcode::Return);
        self.arity(value);
      }

      Expr::Const(literal) => {
        match *literal {
          Literal::I32(n) => { self.op(Opcode::I32Const); self.vs32(n); }
          Literal::I64(n) => { self.op(Opcode::I64Const); self.vs64(n); }
          Literal::F32(x) => { self.op(Opcode::F32Const); self.f32(x); }
          Literal::F64(x) => { self.op(Opcode::F64Const); self.f64(x); }
        }
      }

      Expr::GetLocal(local) => {
        self.op(Opcode::GetLocal);
        self.vu32(*local);
      }

      Expr::SetLocal(local, value) => {
        self.expr(value);
        self.op(Opcode::SetLocal);
        self.vu32(*local);
      }

      Expr::Call(func, args) => self.call(Opcode::Call, *func, args),

      Expr::CallImport(import, args) => self.call(Opcode::CallImport, *import, args),

      Expr::CallIndirect{ type_index, callee, args } => {
        self.expr(callee);
        self.call(Opcode::CallIndirect, *type_index, args);
      }

      Expr::Load{ op, memarg, address } => {
        self.expr(address);
        self.op(load_opcode(*op));
        self.memarg(memarg);
      }

      Expr::Store{ op, memarg, address, value } => {
        self.expr(address);
        self.expr(value);
        self.op(store_opcode(*op));
        self.memarg(memarg);
      }

      Expr::CurrentMemory => self.op(Opcode::CurrentMemory),

      Expr::GrowMemory(pages) => {
        self.expr(pages);
        self.op(Opcode::GrowMemory);
      }

      Expr::Unary(op, operand) => {
        self.expr(operand);
        self.op(unary_opcode(*op));
      }

      Expr::Binary(op, left, right) => {
        self.expr(left);
        self.expr(right);
        self.op(binary_opcode(*op));
      }

      Expr::Test(op, operand) => {
        self.expr(operand);
        self.op(test_opcode(*op));
      }

      Expr::Compare(op, left, right) => {
        self.expr(left);
        self.expr(right);
        self.op(compare_opcode(*op));
      }

      Expr::Convert(op, operand) => {
        self.expr(operand);
        self.op(convert_opcode(*op));
      }

    }
  }

  /// The value a branch carries to its target, if any.
  fn carried(&mut self, value: &Option<Box<Expr>>) {
    self.vec1(value.as_deref(), |s, value| s.expr(value));
  }

  fn arity(&mut self, value: &Option<Box<Expr>>) {
    self.bool(value.is_some());
  }

  fn call(&mut self, opcode: Opcode, target: Var, args: &[Expr]) {
    self.exprs(args);
    self.op(opcode);
    self.len(args.len());
    self.vu32(target);
  }

  fn memarg(&mut self, memarg: &MemArg) {
    self.vu32(memarg.align);
    self.vu64(memarg.offset);
  }
}

// region Opcode mapping

pub fn unary_opcode(op: UnaryOp) -> Opcode {
  match op {
    Op::I32(IntUnaryOp::Clz)    => Opcode::I32Clz,
    Op::I32(IntUnaryOp::Ctz)    => Opcode::I32Ctz,
    Op::I32(IntUnaryOp::Popcnt) => Opcode::I32Popcnt,
    Op::I64(IntUnaryOp::Clz)    => Opcode::I64Clz,
    Op::I64(IntUnaryOp::Ctz)    => Opcode::I64Ctz,
    Op::I64(IntUnaryOp::Popcnt) => Opcode::I64Popcnt,

    Op::F32(FloatUnaryOp::Neg)     => Opcode::F32Neg,
    Op::F32(FloatUnaryOp::Abs)     => Opcode::F32Abs,
    Op::F32(FloatUnaryOp::Ceil)    => Opcode::F32Ceil,
    Op::F32(FloatUnaryOp::Floor)   => Opcode::F32Floor,
    Op::F32(FloatUnaryOp::Trunc)   => Opcode::F32Trunc,
    Op::F32(FloatUnaryOp::Nearest) => Opcode::F32Nearest,
    Op::F32(FloatUnaryOp::Sqrt)    => Opcode::F32Sqrt,
    Op::F64(FloatUnaryOp::Neg)     => Opcode::F64Neg,
    Op::F64(FloatUnaryOp::Abs)     => Opcode::F64Abs,
    Op::F64(FloatUnaryOp::Ceil)    => Opcode::F64Ceil,
    Op::F64(FloatUnaryOp::Floor)   => Opcode::F64Floor,
    Op::F64(FloatUnaryOp::Trunc)   => Opcode::F64Trunc,
    Op::F64(FloatUnaryOp::Nearest) => Opcode::F64Nearest,
    Op::F64(FloatUnaryOp::Sqrt)    => Opcode::F64Sqrt,
  }
}

pub fn binary_opcode(op: BinaryOp) -> Opcode {
  match op {
    Op::I32(IntBinaryOp::Add)  => Opcode::I32Add,
    Op::I32(IntBinaryOp::Sub)  => Opcode::I32Sub,
    Op::I32(IntBinaryOp::Mul)  => Opcode::I32Mul,
    Op::I32(IntBinaryOp::DivS) => Opcode::I32DivS,
    Op::I32(IntBinaryOp::DivU) => Opcode::I32DivU,
    Op::I32(IntBinaryOp::RemS) => Opcode::I32RemS,
    Op::I32(IntBinaryOp::RemU) => Opcode::I32RemU,
    Op::I32(IntBinaryOp::And)  => Opcode::I32And,
    Op::I32(IntBinaryOp::Or)   => Opcode::I32Or,
    Op::I32(IntBinaryOp::Xor)  => Opcode::I32Xor,
    Op::I32(IntBinaryOp::Shl)  => Opcode::I32Shl,
    Op::I32(IntBinaryOp::ShrS) => Opcode::I32ShrS,
    Op::I32(IntBinaryOp::ShrU) => Opcode::I32ShrU,
    Op::I32(IntBinaryOp::Rotl) => Opcode::I32Rotl,
    Op::I32(IntBinaryOp::Rotr) => Opcode::I32Rotr,
    Op::I64(IntBinaryOp::Add)  => Opcode::I64Add,
    Op::I64(IntBinaryOp::Sub)  => Opcode::I64Sub,
    Op::I64(IntBinaryOp::Mul)  => Opcode::I64Mul,
    Op::I64(IntBinaryOp::DivS) => Opcode::I64DivS,
    Op::I64(IntBinaryOp::DivU) => Opcode::I64DivU,
    Op::I64(IntBinaryOp::RemS) => Opcode::I64RemS,
    Op::I64(IntBinaryOp::RemU) => Opcode::I64RemU,
    Op::I64(IntBinaryOp::And)  => Opcode::I64And,
    Op::I64(IntBinaryOp::Or)   => Opcode::I64Or,
    Op::I64(IntBinaryOp::Xor)  => Opcode::I64Xor,
    Op::I64(IntBinaryOp::Shl)  => Opcode::I64Shl,
    Op::I64(IntBinaryOp::ShrS) => Opcode::I64ShrS,
    Op::I64(IntBinaryOp::ShrU) => Opcode::I64ShrU,
    Op::I64(IntBinaryOp::Rotl) => Opcode::I64Rotl,
    Op::I64(IntBinaryOp::Rotr) => Opcode::I64Rotr,

    Op::F32(FloatBinaryOp::Add)      => Opcode::F32Add,
    Op::F32(FloatBinaryOp::Sub)      => Opcode::F32Sub,
    Op::F32(FloatBinaryOp::Mul)      => Opcode::F32Mul,
    Op::F32(FloatBinaryOp::Div)      => Opcode::F32Div,
    Op::F32(FloatBinaryOp::Min)      => Opcode::F32Min,
    Op::F32(FloatBinaryOp::Max)      => Opcode::F32Max,
    Op::F32(FloatBinaryOp::CopySign) => Opcode::F32CopySign,
    Op::F64(FloatBinaryOp::Add)      => Opcode::F64Add,
    Op::F64(FloatBinaryOp::Sub)      => Opcode::F64Sub,
    Op::F64(FloatBinaryOp::Mul)      => Opcode::F64Mul,
    Op::F64(FloatBinaryOp::Div)      => Opcode::F64Div,
    Op::F64(FloatBinaryOp::Min)      => Opcode::F64Min,
    Op::F64(FloatBinaryOp::Max)      => Opcode::F64Max,
    Op::F64(FloatBinaryOp::CopySign) => Opcode::F64CopySign,
  }
}

pub fn test_opcode(op: TestOp) -> Opcode {
  match op {
    Op::I32(IntTestOp::Eqz) => Opcode::I32Eqz,
    Op::I64(IntTestOp::Eqz) => Opcode::I64Eqz,
    Op::F32(op) | Op::F64(op) => match op {},
  }
}

pub fn compare_opcode(op: CompareOp) -> Opcode {
  match op {
    Op::I32(IntCompareOp::Eq)  => Opcode::I32Eq,
    Op::I32(IntCompareOp::Ne)  => Opcode::I32Ne,
    Op::I32(IntCompareOp::LtS) => Opcode::I32LtS,
    Op::I32(IntCompareOp::LtU) => Opcode::I32LtU,
    Op::I32(IntCompareOp::LeS) => Opcode::I32LeS,
    Op::I32(IntCompareOp::LeU) => Opcode::I32LeU,
    Op::I32(IntCompareOp::GtS) => Opcode::I32GtS,
    Op::I32(IntCompareOp::GtU) => Opcode::I32GtU,
    Op::I32(IntCompareOp::GeS) => Opcode::I32GeS,
    Op::I32(IntCompareOp::GeU) => Opcode::I32GeU,
    Op::I64(IntCompareOp::Eq)  => Opcode::I64Eq,
    Op::I64(IntCompareOp::Ne)  => Opcode::I64Ne,
    Op::I64(IntCompareOp::LtS) => Opcode::I64LtS,
    Op::I64(IntCompareOp::LtU) => Opcode::I64LtU,
    Op::I64(IntCompareOp::LeS) => Opcode::I64LeS,
    Op::I64(IntCompareOp::LeU) => Opcode::I64LeU,
    Op::I64(IntCompareOp::GtS) => Opcode::I64GtS,
    Op::I64(IntCompareOp::GtU) => Opcode::I64GtU,
    Op::I64(IntCompareOp::GeS) => Opcode::I64GeS,
    Op::I64(IntCompareOp::GeU) => Opcode::I64GeU,

    Op::F32(FloatCompareOp::Eq) => Opcode::F32Eq,
    Op::F32(FloatCompareOp::Ne) => Opcode::F32Ne,
    Op::F32(FloatCompareOp::Lt) => Opcode::F32Lt,
    Op::F32(FloatCompareOp::Le) => Opcode::F32Le,
    Op::F32(FloatCompareOp::Gt) => Opcode::F32Gt,
    Op::F32(FloatCompareOp::Ge) => Opcode::F32Ge,
    Op::F64(FloatCompareOp::Eq) => Opcode::F64Eq,
    Op::F64(FloatCompareOp::Ne) => Opcode::F64Ne,
    Op::F64(FloatCompareOp::Lt) => Opcode::F64Lt,
    Op::F64(FloatCompareOp::Le) => Opcode::F64Le,
    Op::F64(FloatCompareOp::Gt) => Opcode::F64Gt,
    Op::F64(FloatCompareOp::Ge) => Opcode::F64Ge,
  }
}

pub fn convert_opcode(op: ConvertOp) -> Opcode {
  match op {
    ConvertOp::I32WrapI64        => Opcode::I32WrapI64,
    ConvertOp::I32TruncSF32      => Opcode::I32TruncSF32,
    ConvertOp::I32TruncUF32      => Opcode::I32TruncUF32,
    ConvertOp::I32TruncSF64      => Opcode::I32TruncSF64,
    ConvertOp::I32TruncUF64      => Opcode::I32TruncUF64,
    ConvertOp::I32ReinterpretF32 => Opcode::I32ReinterpretF32,
    ConvertOp::I64ExtendSI32     => Opcode::I64ExtendSI32,
    ConvertOp::I64ExtendUI32     => Opcode::I64ExtendUI32,
    ConvertOp::I64TruncSF32      => Opcode::I64TruncSF32,
    ConvertOp::I64TruncUF32      => Opcode::I64TruncUF32,
    ConvertOp::I64TruncSF64      => Opcode::I64TruncSF64,
    ConvertOp::I64TruncUF64      => Opcode::I64TruncUF64,
    ConvertOp::I64ReinterpretF64 => Opcode::I64ReinterpretF64,
    ConvertOp::F32ConvertSI32    => Opcode::F32ConvertSI32,
    ConvertOp::F32ConvertUI32    => Opcode::F32ConvertUI32,
    ConvertOp::F32ConvertSI64    => Opcode::F32ConvertSI64,
    ConvertOp::F32ConvertUI64    => Opcode::F32ConvertUI64,
    ConvertOp::F32DemoteF64      => Opcode::F32DemoteF64,
    ConvertOp::F32ReinterpretI32 => Opcode::F32ReinterpretI32,
    ConvertOp::F64ConvertSI32    => Opcode::F64ConvertSI32,
    ConvertOp::F64ConvertUI32    => Opcode::F64ConvertUI32,
    ConvertOp::F64ConvertSI64    => Opcode::F64ConvertSI64,
    ConvertOp::F64ConvertUI64    => Opcode::F64ConvertUI64,
    ConvertOp::F64PromoteF32     => Opcode::F64PromoteF32,
    ConvertOp::F64ReinterpretI64 => Opcode::F64ReinterpretI64,
  }
}

pub fn load_opcode(op: LoadOp) -> Opcode {
  match op {
    LoadOp::I32Load    => Opcode::I32Load,
    LoadOp::I64Load    => Opcode::I64Load,
    LoadOp::F32Load    => Opcode::F32Load,
    LoadOp::F64Load    => Opcode::F64Load,
    LoadOp::I32Load8S  => Opcode::I32Load8S,
    LoadOp::I32Load8U  => Opcode::I32Load8U,
    LoadOp::I32Load16S => Opcode::I32Load16S,
    LoadOp::I32Load16U => Opcode::I32Load16U,
    LoadOp::I64Load8S  => Opcode::I64Load8S,
    LoadOp::I64Load8U  => Opcode::I64Load8U,
    LoadOp::I64Load16S => Opcode::I64Load16S,
    LoadOp::I64Load16U => Opcode::I64Load16U,
    LoadOp::I64Load32S => Opcode::I64Load32S,
    LoadOp::I64Load32U => Opcode::I64Load32U,
  }
}

pub fn store_opcode(op: StoreOp) -> Opcode {
  match op {
    StoreOp::I32Store   => Opcode::I32Store,
    StoreOp::I64Store   => Opcode::I64Store,
    StoreOp::F32Store   => Opcode::F32Store,
    StoreOp::F64Store   => Opcode::F64Store,
    StoreOp::I32Store8  => Opcode::I32Store8,
    StoreOp::I32Store16 => Opcode::I32Store16,
    StoreOp::I64Store8  => Opcode::I64Store8,
    StoreOp::I64Store16 => Opcode::I64Store16,
    StoreOp::I64Store32 => Opcode::I64Store32,
  }
}

// endregion
