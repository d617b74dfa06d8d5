/*!
  The output buffer every codec writes through. Bytes are only ever appended. Overwrites of
  bytes already written are staged as patches and applied once, when the stream is finalized.
*/

/// A staged single-byte overwrite.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Patch {
  pub position : usize,
  pub byte     : u8
}

#[derive(Default, Debug)]
pub struct Stream {
  buffer  : Vec<u8>,
  patches : Vec<Patch>,
}

impl Stream {

  pub fn new() -> Stream {
    Stream {
      buffer  : Vec::new(),
      patches : Vec::new(),
    }
  }

  /// The number of bytes written so far, which is also the position of the next byte.
  pub fn position(&self) -> usize {
    self.buffer.len()
  }

  pub fn put(&mut self, byte: u8) {
    self.buffer.push(byte);
  }

  pub fn put_bytes(&mut self, bytes: &[u8]) {
    self.buffer.extend_from_slice(bytes);
  }

  /**
    Stages `byte` to replace whatever was written at `position`. The position must already have
    been written. Patches are independent of one another, so the order they are recorded in is
    irrelevant.
  */
  pub fn patch(&mut self, position: usize, byte: u8) {
    debug_assert!(position < self.buffer.len(), "patch at {} past end of stream", position);
    self.patches.push(Patch{ position, byte });
  }

  /// The raw bytes written so far, without patches applied.
  pub fn bytes(&self) -> &[u8] {
    &self.buffer
  }

  /// Applies every staged patch and yields the finished buffer.
  pub fn finalize(self) -> Vec<u8> {
    let Stream { mut buffer, patches } = self;
    for Patch{ position, byte } in patches {
      buffer[position] = byte;
    }
    buffer
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn position_tracks_appended_bytes() {
    let mut stream = Stream::new();
    assert_eq!(stream.position(), 0);
    stream.put(7);
    stream.put_bytes(&[1, 2, 3]);
    assert_eq!(stream.position(), 4);
    assert_eq!(stream.bytes(), &[7, 1, 2, 3]);
  }

  #[test]
  fn patches_apply_only_at_finalize() {
    let mut stream = Stream::new();
    stream.put_bytes(&[0, 0, 0]);
    stream.patch(2, 9);
    stream.patch(0, 5);
    assert_eq!(stream.bytes(), &[0, 0, 0]);
    assert_eq!(stream.finalize(), vec![5, 0, 9]);
  }
}
