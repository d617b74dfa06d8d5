/*!

  The binary format is written least-significant byte first. Integers that describe the module
  (counts, indices, sizes) and integer constants are LEB128 encoded: 7 data bits per byte,
  least-significant group first, with the high bit of each byte set when another byte follows.
  Floats are written as their raw IEEE-754 bits at fixed width.

  Many regions of a module are framed as `[size][payload]`, where the size is not known until
  the payload has been written. Rather than encode the payload twice or shift bytes around, a
  fixed 4 byte field is reserved up front (a "gap") and overwritten once the size is known. The
  overwrite uses the fact that LEB128 allows redundant zero groups, so a short size can still
  fill all 4 bytes. The price is that a framed region cannot exceed 2^28 - 1 bytes.

  Overwrites are staged in the `Stream` and applied when it is finalized.

*/

mod binary;
mod opcode;
mod stream;

pub use binary::{Codec, Gap, GAP_PLACEHOLDER, GAP_WIDTH, MAX_GAP_SIZE};
pub use opcode::Opcode;
pub use stream::{Patch, Stream};
