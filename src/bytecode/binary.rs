/*!
  Primitive and composite codecs, and the gap/patch mechanism for size fields.

  Every codec is a provided method of the `Codec` trait, so anything that can hand out its
  `Stream` gets the whole family: the module encoder, and the throwaway side stream used to
  measure a size before it is patched into a gap.
*/

use log::trace;

use super::Stream;
use crate::error::{EncodeError, Frame, Result};

/// Physical width of a reserved size field.
pub const GAP_WIDTH: usize = 4;
/// A maximal-width LEB128 encoding of zero: continuation bits on every byte but the last.
pub const GAP_PLACEHOLDER: [u8; GAP_WIDTH] = [0x80, 0x80, 0x80, 0x00];
/// The largest size a patched gap can hold, 7 data bits per byte.
pub const MAX_GAP_SIZE: usize = (1 << (7 * GAP_WIDTH)) - 1;

const CONTINUATION_BIT: u8 = 0x80;
const DATA_BITS: u64 = 0x7f;

/// The position of a reserved size field, returned by `Codec::gap`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Gap(usize);

impl Gap {
  pub fn position(&self) -> usize {
    self.0
  }
}

pub trait Codec: Sized {

  fn stream(&mut self) -> &mut Stream;

  fn position(&mut self) -> usize {
    Stream::position(self.stream())
  }

  // region Fixed width, little-endian

  fn u8(&mut self, byte: u8) {
    self.stream().put(byte);
  }

  fn u16(&mut self, n: u16) {
    self.u8((n & 0xff) as u8);
    self.u8((n >> 8) as u8);
  }

  fn u32(&mut self, n: u32) {
    self.u16((n & 0xffff) as u16);
    self.u16((n >> 16) as u16);
  }

  fn u64(&mut self, n: u64) {
    self.u32((n & 0xffff_ffff) as u32);
    self.u32((n >> 32) as u32);
  }

  // endregion

  // region Variable length (LEB128)

  fn vu64(&mut self, mut n: u64) {
    while n >= 0x80 {
      self.u8((n & DATA_BITS) as u8 | CONTINUATION_BIT);
      n >>= 7;
    }
    self.u8(n as u8);
  }

  /**
    Stops once the remaining value fits in a 7 bit two's complement group, so that bit 6 of the
    final byte sign-extends to the original value. The shift is arithmetic.
  */
  fn vs64(&mut self, mut n: i64) {
    while n < -64 || n >= 64 {
      self.u8((n as u64 & DATA_BITS) as u8 | CONTINUATION_BIT);
      n >>= 7;
    }
    self.u8((n as u64 & DATA_BITS) as u8);
  }

  fn vu32(&mut self, n: u32) {
    self.vu64(u64::from(n));
  }

  fn vs32(&mut self, n: i32) {
    self.vs64(i64::from(n));
  }

  /// Lengths and counts.
  fn len(&mut self, n: usize) {
    self.vu64(n as u64);
  }

  // endregion

  fn f32(&mut self, x: f32) {
    self.u32(x.to_bits());
  }

  fn f64(&mut self, x: f64) {
    self.u64(x.to_bits());
  }

  fn bool(&mut self, b: bool) {
    self.u8(if b { 1 } else { 0 });
  }

  // region Composites

  /// A byte count followed by the bytes themselves. No terminator, no transcoding.
  fn string(&mut self, bytes: &[u8]) {
    self.len(bytes.len());
    self.stream().put_bytes(bytes);
  }

  fn vec<T, F>(&mut self, items: &[T], mut f: F)
    where F: FnMut(&mut Self, &T)
  {
    self.len(items.len());
    for item in items {
      f(self, item);
    }
  }

  /// A presence flag, then the payload if there is one.
  fn opt<T, F>(&mut self, item: Option<&T>, f: F)
    where F: FnOnce(&mut Self, &T)
  {
    self.bool(item.is_some());
    if let Some(item) = item {
      f(self, item);
    }
  }

  /// A sequence of at most one element, framed by the same presence flag as `opt`.
  fn vec1<T, F>(&mut self, item: Option<&T>, f: F)
    where F: FnOnce(&mut Self, &T)
  {
    self.opt(item, f);
  }

  // endregion

  // region Gaps

  /// Reserves a size field to be filled in by `patch_gap` once the size is known.
  fn gap(&mut self) -> Gap {
    let position = self.position();
    self.stream().put_bytes(&GAP_PLACEHOLDER);
    Gap(position)
  }

  /**
    Fills the reserved field at `gap` with `size`. The minimal LEB128 encoding of `size` occupies
    the low-order end of the field, and its last byte gets a continuation bit whenever placeholder
    bytes follow it. The bytes that follow keep their placeholder values, which read as zero
    padding, so the field keeps its width and nothing written after it moves.
  */
  fn patch_gap(&mut self, gap: Gap, size: usize, frame: Frame) -> Result<()> {
    let mut side = Stream::new();
    side.vu64(size as u64);
    let encoded = side.bytes();

    if encoded.len() > GAP_WIDTH {
      return Err(EncodeError::FrameTooLarge { frame, size, limit: MAX_GAP_SIZE });
    }

    let last = encoded.len() - 1;
    for (i, &byte) in encoded.iter().enumerate() {
      let byte =
        match i == last && encoded.len() < GAP_WIDTH {
          true  => byte | CONTINUATION_BIT,
          false => byte
        };
      self.stream().patch(gap.position() + i, byte);
    }
    trace!("patched {} at {} with size {}", frame, gap.position(), size);

    Ok(())
  }

  // endregion
}

impl Codec for Stream {
  fn stream(&mut self) -> &mut Stream {
    self
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn encoded<F: FnOnce(&mut Stream)>(f: F) -> Vec<u8> {
    let mut stream = Stream::new();
    f(&mut stream);
    stream.finalize()
  }

  fn read_vu64(bytes: &[u8]) -> (u64, usize) {
    let mut result = 0u64;
    let mut shift = 0;
    for (i, byte) in bytes.iter().enumerate() {
      result |= u64::from(byte & 0x7f) << shift;
      if byte & 0x80 == 0 {
        return (result, i + 1);
      }
      shift += 7;
    }
    panic!("unterminated LEB128");
  }

  fn read_vs64(bytes: &[u8]) -> (i64, usize) {
    let mut result = 0i64;
    let mut shift = 0;
    for (i, byte) in bytes.iter().enumerate() {
      result |= i64::from(byte & 0x7f) << shift;
      shift += 7;
      if byte & 0x80 == 0 {
        if shift < 64 && byte & 0x40 != 0 {
          result |= -1i64 << shift;
        }
        return (result, i + 1);
      }
    }
    panic!("unterminated LEB128");
  }

  #[test]
  fn fixed_width_is_little_endian() {
    assert_eq!(encoded(|s| s.u16(0x0102)), vec![0x02, 0x01]);
    assert_eq!(encoded(|s| s.u32(0x6d73_6100)), b"\0asm".to_vec());
    assert_eq!(
      encoded(|s| s.u64(0x0807_0605_0403_0201)),
      vec![1, 2, 3, 4, 5, 6, 7, 8]
    );
  }

  #[test]
  fn unsigned_boundaries() {
    assert_eq!(encoded(|s| s.vu64(0)), vec![0x00]);
    assert_eq!(encoded(|s| s.vu64(127)), vec![0x7f]);
    assert_eq!(encoded(|s| s.vu64(128)), vec![0x80, 0x01]);
    assert_eq!(encoded(|s| s.vu64(16383)), vec![0xff, 0x7f]);
    assert_eq!(encoded(|s| s.vu64(16384)), vec![0x80, 0x80, 0x01]);
    assert_eq!(encoded(|s| s.vu64(u64::MAX)).len(), 10);
    for &n in &[0, 127, 128, 16383, 16384, u64::MAX] {
      assert_eq!(read_vu64(&encoded(|s| s.vu64(n))).0, n);
    }
  }

  #[test]
  fn signed_boundaries() {
    assert_eq!(encoded(|s| s.vs64(63)), vec![0x3f]);
    assert_eq!(encoded(|s| s.vs64(64)), vec![0xc0, 0x00]);
    assert_eq!(encoded(|s| s.vs64(-64)), vec![0x40]);
    assert_eq!(encoded(|s| s.vs64(-65)), vec![0xbf, 0x7f]);
    assert_eq!(encoded(|s| s.vs64(-1)), vec![0x7f]);
    for &n in &[-64, -65, 63, 64, i64::MIN, i64::MAX] {
      assert_eq!(read_vs64(&encoded(|s| s.vs64(n))).0, n);
    }
  }

  #[test]
  fn narrow_codecs_widen() {
    assert_eq!(encoded(|s| s.vu32(u32::MAX)), encoded(|s| s.vu64(u64::from(u32::MAX))));
    assert_eq!(encoded(|s| s.vs32(i32::MIN)), encoded(|s| s.vs64(i64::from(i32::MIN))));
  }

  #[test]
  fn floats_are_raw_bits() {
    assert_eq!(encoded(|s| s.f32(1.0)), vec![0x00, 0x00, 0x80, 0x3f]);
    assert_eq!(
      encoded(|s| s.f64(-2.0)),
      vec![0, 0, 0, 0, 0, 0, 0x00, 0xc0]
    );
  }

  #[test]
  fn composites() {
    assert_eq!(encoded(|s| s.string(b"end")), vec![3, b'e', b'n', b'd']);
    assert_eq!(
      encoded(|s| s.vec(&[1u32, 300], |s, n| s.vu32(*n))),
      vec![2, 1, 0xac, 0x02]
    );
    assert_eq!(encoded(|s| s.opt(Some(&5u32), |s, n| s.vu32(*n))), vec![1, 5]);
    assert_eq!(encoded(|s| s.opt(None::<&u32>, |s, n| s.vu32(*n))), vec![0]);
    assert_eq!(encoded(|s| s.vec1(Some(&true), |s, b| s.bool(*b))), vec![1, 1]);
  }

  #[test]
  fn gap_placeholder_reads_as_zero() {
    let bytes = encoded(|s| { s.gap(); });
    assert_eq!(bytes, GAP_PLACEHOLDER.to_vec());
    assert_eq!(read_vu64(&bytes), (0, GAP_WIDTH));
  }

  #[test]
  fn patched_gap_keeps_its_width() {
    for &size in &[0usize, 5, 127, 128, 200, 16384, 1 << 21, MAX_GAP_SIZE] {
      let mut stream = Stream::new();
      let gap = stream.gap();
      stream.u8(0xaa);
      stream.patch_gap(gap, size, Frame::Section("test")).unwrap();
      let bytes = stream.finalize();
      assert_eq!(bytes.len(), GAP_WIDTH + 1);
      assert_eq!(read_vu64(&bytes), (size as u64, GAP_WIDTH), "size {}", size);
      assert_eq!(bytes[GAP_WIDTH], 0xaa);
    }
  }

  #[test]
  fn gap_positions_follow_written_bytes() {
    let mut stream = Stream::new();
    stream.u16(0xffff);
    assert_eq!(Codec::position(&mut stream), 2);
    let gap = stream.gap();
    assert_eq!(gap.position(), 2);
    assert_eq!(Codec::position(&mut stream), 2 + GAP_WIDTH);
    stream.string(b"ab");
    stream.patch_gap(gap, 3, Frame::Section("test")).unwrap();
    assert_eq!(stream.finalize(), vec![0xff, 0xff, 0x83, 0x80, 0x80, 0x00, 2, b'a', b'b']);
  }

  #[test]
  fn patched_gap_is_not_minimal() {
    let mut stream = Stream::new();
    let gap = stream.gap();
    stream.patch_gap(gap, 5, Frame::Section("test")).unwrap();
    assert_eq!(stream.finalize(), vec![0x85, 0x80, 0x80, 0x00]);
  }

  #[test]
  fn oversized_gap_is_rejected() {
    let mut stream = Stream::new();
    let gap = stream.gap();
    let result = stream.patch_gap(gap, MAX_GAP_SIZE + 1, Frame::FunctionBody(3));
    assert_eq!(
      result,
      Err(EncodeError::FrameTooLarge {
        frame : Frame::FunctionBody(3),
        size  : 1 << 28,
        limit : MAX_GAP_SIZE
      })
    );
    // Nothing was staged.
    assert_eq!(stream.finalize(), GAP_PLACEHOLDER.to_vec());
  }

  proptest! {
    #[test]
    fn vu64_round_trips(n in any::<u64>()) {
      let bytes = encoded(|s| s.vu64(n));
      prop_assert_eq!(read_vu64(&bytes), (n, bytes.len()));
    }

    #[test]
    fn vs64_round_trips(n in any::<i64>()) {
      let bytes = encoded(|s| s.vs64(n));
      prop_assert_eq!(read_vs64(&bytes), (n, bytes.len()));
    }

    #[test]
    fn gap_round_trips(size in 0usize..=MAX_GAP_SIZE) {
      let mut stream = Stream::new();
      let gap = stream.gap();
      stream.patch_gap(gap, size, Frame::Section("test")).unwrap();
      let bytes = stream.finalize();
      prop_assert_eq!(read_vu64(&bytes), (size as u64, GAP_WIDTH));
    }
  }
}
