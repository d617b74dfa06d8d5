//! A minimal reader for the framing of encoded modules, enough to check what the encoder wrote.
#![allow(dead_code)]

use nom::{
  bytes::complete::{tag, take},
  error::Error,
  number::complete::{le_u32, u8 as byte},
  IResult
};

pub struct Section<'a> {
  pub offset     : usize,
  pub size_field : &'a [u8],
  pub name       : &'a str,
  pub payload    : &'a [u8],
}

pub fn leb_u64(input: &[u8]) -> IResult<&[u8], u64> {
  let mut result = 0u64;
  let mut shift = 0;
  let mut rest = input;
  loop {
    let (next, b) = byte::<&[u8], Error<&[u8]>>(rest)?;
    result |= u64::from(b & 0x7f) << shift;
    rest = next;
    if b & 0x80 == 0 {
      return Ok((rest, result));
    }
    shift += 7;
  }
}

fn header(input: &[u8]) -> IResult<&[u8], u32> {
  let (rest, _) = tag::<&[u8], &[u8], Error<&[u8]>>(b"\0asm")(input)?;
  le_u32(rest)
}

fn section(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8], &[u8])> {
  let (rest, size_field) = take::<usize, &[u8], Error<&[u8]>>(4)(input)?;
  let (_, size) = leb_u64(size_field)?;
  let (rest, name_length) = leb_u64(rest)?;
  let (rest, name) = take::<usize, &[u8], Error<&[u8]>>(name_length as usize)(rest)?;
  let (rest, payload) = take::<usize, &[u8], Error<&[u8]>>(size as usize)(rest)?;
  Ok((rest, (size_field, name, payload)))
}

/// Splits a module into its version and sections. Panics if the framing is broken.
pub fn read_module(bytes: &[u8]) -> (u32, Vec<Section<'_>>) {
  let (mut rest, version) = header(bytes).expect("bad header");
  let mut sections = Vec::new();
  while !rest.is_empty() {
    let offset = bytes.len() - rest.len();
    let (next, (size_field, name, payload)) = section(rest).expect("bad section frame");
    sections.push(Section {
      offset,
      size_field,
      name: std::str::from_utf8(name).expect("section name is not UTF-8"),
      payload
    });
    rest = next;
  }
  (version, sections)
}

pub fn section_names<'a>(sections: &[Section<'a>]) -> Vec<&'a str> {
  sections.iter().map(|section| section.name).collect()
}
