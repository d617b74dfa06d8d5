/*!
  Functions to produce the binary encoding of a validated `Module`.

  The encoding pipeline is this:
  ```text
  Module -> [`Encoder::module`] -> header, sections ->⋯

  ⋯-> `Stream` (bytes + staged size patches) -> [`Stream::finalize`] -> Vec<u8>
  ```
  Every section and every function body is framed by a gap that is patched once its size is
  known, so the output is produced in a single pass over the module.
*/

mod expr;
mod section;
mod types;

use log::debug;

use crate::ast::Module;
use crate::bytecode::{Codec, Opcode, Stream};
use crate::error::Result;
use crate::layout::Layout;

pub use expr::{binary_opcode, compare_opcode, convert_opcode, load_opcode, store_opcode,
               test_opcode, unary_opcode};
pub use section::{compress_locals, SECTION_ORDER};
pub use types::{value_type_tag, FUNC_TYPE_TAG};

/// `\0asm`, read as a little-endian `u32`.
pub const MAGIC: u32 = 0x6d73_6100;
pub const VERSION: u32 = 11;
/// Length of the magic number plus the version.
pub const HEADER_SIZE: usize = 8;

/// The state of one encode operation. Owned by that operation alone.
pub(crate) struct Encoder {
  stream : Stream,
  layout : Layout,
}

impl Codec for Encoder {
  fn stream(&mut self) -> &mut Stream {
    &mut self.stream
  }
}

impl Encoder {

  fn new() -> Encoder {
    Encoder {
      stream : Stream::new(),
      layout : Layout::new(),
    }
  }

  fn op(&mut self, opcode: Opcode) {
    self.u8(opcode.code());
  }

  /// The header, then every section in the fixed order, then the terminator.
  fn module(&mut self, module: &Module) -> Result<()> {
    self.u32(MAGIC);
    self.u32(VERSION);

    self.type_section(&module.types)?;
    self.import_section(&module.imports)?;
    self.func_section(&module.funcs)?;
    self.table_section(&module.table)?;
    self.memory_section(module)?;
    self.export_section(&module.exports)?;
    self.start_section(module.start)?;
    self.code_section(&module.funcs)?;
    self.data_section(module)?;
    self.end_section()
  }

  fn finish(self) -> (Vec<u8>, Layout) {
    let Encoder { stream, mut layout } = self;
    let bytes = stream.finalize();
    layout.set_total(bytes.len());
    (bytes, layout)
  }
}

/// Encodes `module`, also reporting where each section was placed.
pub fn encode_with_layout(module: &Module) -> Result<(Vec<u8>, Layout)> {
  let encoding_time = std::time::Instant::now();

  let mut encoder = Encoder::new();
  encoder.module(module)?;
  let (bytes, layout) = encoder.finish();

  debug!(
    "Encoded {} bytes in {} sections in {:?}.",
    bytes.len(), layout.sections().len(), encoding_time.elapsed()
  );
  Ok((bytes, layout))
}

/// Encodes `module`, reporting a frame too large for its size field as an error.
pub fn try_encode(module: &Module) -> Result<Vec<u8>> {
  encode_with_layout(module).map(|(bytes, _layout)| bytes)
}

/**
  Encodes `module`.

  The module is assumed valid; nothing about it is checked. The one thing that can go wrong is a
  section or function body of 2^28 bytes or more, which the format's size fields cannot express.
  That is a limit of the encoder rather than a fault in the module, and this function aborts
  with a diagnostic naming the offending frame. Use `try_encode` to receive it as a value.
*/
pub fn encode(module: &Module) -> Vec<u8> {
  abort_on_error(try_encode(module))
}

fn abort_on_error(result: Result<Vec<u8>>) -> Vec<u8> {
  match result {
    Ok(bytes) => bytes,
    Err(e) => panic!("Encoding failed: {}", e)
  }
}
