//! Encodes a small demonstration module and writes it to disk.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use wasm_proto_encode::ast::*;
use wasm_proto_encode::encode_with_layout;

#[derive(Parser, Debug)]
#[command(name = "wasm-proto-encode", version, about = "Encodes the built-in demonstration module")]
struct Args {
  /// Where to write the encoded module.
  #[arg(short, long, default_value = "demo.wasm")]
  output: PathBuf,

  /// Print the section layout of the encoded module.
  #[arg(short, long)]
  layout: bool,
}

/**
  A recursive factorial over `i64`, exported as `fac`, plus one page of exported memory holding
  a greeting at address 8.
*/
fn demo_module() -> Module {
  let n = || Expr::GetLocal(0);

  let fac = Func {
    type_index : 0,
    locals     : vec![],
    body       : vec![
      Expr::If {
        condition   : Box::new(Expr::Test(Op::I64(IntTestOp::Eqz), Box::new(n()))),
        then_branch : vec![Expr::i64_const(1)],
        else_branch : vec![
          Expr::binary(
            Op::I64(IntBinaryOp::Mul),
            n(),
            Expr::Call(0, vec![
              Expr::binary(Op::I64(IntBinaryOp::Sub), n(), Expr::i64_const(1))
            ])
          )
        ],
      }
    ],
  };

  Module {
    types   : vec![FuncType::new(vec![ValueType::I64], Some(ValueType::I64))],
    imports : vec![],
    funcs   : vec![fac],
    table   : vec![],
    memory  : Some(Memory {
      min      : 1,
      max      : 1,
      segments : vec![Segment{ address: 8, data: b"Hello, world!".to_vec() }],
    }),
    exports : vec![
      Export{ name: "fac".into(),    kind: ExportKind::Func(0) },
      Export{ name: "memory".into(), kind: ExportKind::Memory },
    ],
    start   : None,
  }
}

fn main() -> Result<(), Box<dyn Error>> {
  env_logger::init();
  let args = Args::parse();

  let module = demo_module();
  for (index, func_type) in module.types.iter().enumerate() {
    debug!("type {}: {}", index, func_type);
  }

  let (bytes, layout) = encode_with_layout(&module)?;
  fs::write(&args.output, &bytes)?;
  info!("wrote {}", args.output.display());

  println!("Encoded {} bytes to {}.", bytes.len(), args.output.display());

  if args.layout || cfg!(feature = "trace_encoding") {
    println!("{}", layout);
  }

  Ok(())
}
