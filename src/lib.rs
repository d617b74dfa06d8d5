/*!
  An encoder for version 11 of the prototype WebAssembly binary format.

  The input is a `Module` that an upstream validator has already checked: every index is in
  range and every instruction is well typed. The encoder trusts it completely and never
  inspects it for errors. Its single job is representation:

  ```text
  magic "\0asm" | version 11 | type | import | function | table | memory |
      export | start | code | data | end
  ```
  Sections other than `end` appear only when the module has something to put in them.

  ```no_run
  use wasm_proto_encode::{ast::Module, encode};

  let bytes = encode(&Module::new());
  assert_eq!(&bytes[..4], b"\0asm");
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod ast;
pub mod bytecode;
mod encode;
pub mod error;
pub mod layout;

pub use encode::*;
pub use error::{EncodeError, Frame};
pub use layout::{Layout, SectionLayout};
