/*!
  Section codecs. A section is framed as `[size][name][payload]`, where the size counts only
  the payload, and is left out of the output entirely when it has nothing to say.
*/

use log::debug;

use super::Encoder;
use crate::ast::*;
use crate::bytecode::Codec;
use crate::error::{Frame, Result};
use crate::layout::SectionLayout;

/// Section names in the order the format requires. The `end` section is always present.
pub const SECTION_ORDER: [&str; 10] = [
  "type", "import", "function", "table", "memory", "export", "start", "code", "data", "end"
];

/**
  Run-length encodes adjacent locals of the same type. Only neighbours merge:
  `[i32, i32, f64, i32]` becomes `[(i32, 2), (f64, 1), (i32, 1)]`.

  The sequence is scanned from the right, so a change of type always opens a new group.
*/
pub fn compress_locals(locals: &[ValueType]) -> Vec<(ValueType, usize)> {
  let mut groups: Vec<(ValueType, usize)> = Vec::new();

  for &local in locals.iter().rev() {
    if let Some((value_type, count)) = groups.last_mut() {
      if *value_type == local {
        *count += 1;
        continue;
      }
    }
    groups.push((local, 1));
  }

  groups.reverse();
  groups
}

impl Encoder {

  /// Frames the payload written by `payload` as a section called `name`, if `needed`.
  fn section<F>(&mut self, name: &'static str, needed: bool, payload: F) -> Result<()>
    where F: FnOnce(&mut Self) -> Result<()>
  {
    if !needed {
      return Ok(());
    }

    let gap = self.gap();
    self.string(name.as_bytes());
    let start = self.position();
    payload(self)?;
    let size = self.position() - start;
    self.patch_gap(gap, size, Frame::Section(name))?;

    debug!("section `{}`: {} bytes at offset {}", name, size, gap.position());
    self.layout.push(SectionLayout{ name, offset: gap.position(), size });

    Ok(())
  }

  pub(super) fn type_section(&mut self, types: &[FuncType]) -> Result<()> {
    self.section("type", !types.is_empty(), |s| {
      s.vec(types, |s, func_type| s.func_type(func_type));
      Ok(())
    })
  }

  pub(super) fn import_section(&mut self, imports: &[Import]) -> Result<()> {
    self.section("import", !imports.is_empty(), |s| {
      s.vec(imports, |s, import| {
        s.vu32(import.type_index);
        s.string(import.module_name.as_bytes());
        s.string(import.func_name.as_bytes());
      });
      Ok(())
    })
  }

  /// The signature of each function, by type index. The bodies follow in the code section.
  pub(super) fn func_section(&mut self, funcs: &[Func]) -> Result<()> {
    self.section("function", !funcs.is_empty(), |s| {
      s.vec(funcs, |s, func| s.vu32(func.type_index));
      Ok(())
    })
  }

  pub(super) fn table_section(&mut self, table: &[Var]) -> Result<()> {
    self.section("table", !table.is_empty(), |s| {
      s.vec(table, |s, func| s.vu32(*func));
      Ok(())
    })
  }

  pub(super) fn memory_section(&mut self, module: &Module) -> Result<()> {
    let exported = module.exports_memory();
    self.section("memory", module.memory.is_some(), |s| {
      s.opt(module.memory.as_ref(), |s, memory| {
        s.vu64(memory.min);
        s.vu64(memory.max);
        s.bool(exported);
      });
      Ok(())
    })
  }

  /// Memory exports carry no index; there is only one memory.
  pub(super) fn export_section(&mut self, exports: &[Export]) -> Result<()> {
    self.section("export", !exports.is_empty(), |s| {
      s.vec(exports, |s, export| {
        match export.kind {
          ExportKind::Func(func) => s.vu32(func),
          ExportKind::Memory => {}
        }
        s.string(export.name.as_bytes());
      });
      Ok(())
    })
  }

  pub(super) fn start_section(&mut self, start: Option<Var>) -> Result<()> {
    self.section("start", start.is_some(), |s| {
      s.opt(start.as_ref(), |s, func| s.vu32(*func));
      Ok(())
    })
  }

  pub(super) fn code_section(&mut self, funcs: &[Func]) -> Result<()> {
    self.section("code", !funcs.is_empty(), |s| {
      s.len(funcs.len());
      for (index, func) in funcs.iter().enumerate() {
        s.code(index as Var, func)?;
      }
      Ok(())
    })
  }

  /// Compressed locals, then the body framed by its own size field.
  fn code(&mut self, index: Var, func: &Func) -> Result<()> {
    let locals = compress_locals(&func.locals);
    self.vec(&locals, |s, &(value_type, count)| {
      s.len(count);
      s.value_type(value_type);
    });

    let gap = self.gap();
    let start = self.position();
    self.exprs(&func.body);
    let size = self.position() - start;
    self.patch_gap(gap, size, Frame::FunctionBody(index))
  }

  pub(super) fn data_section(&mut self, module: &Module) -> Result<()> {
    let segments = module.memory.as_ref().map(|memory| &memory.segments);
    let needed = segments.map_or(false, |segments| !segments.is_empty());
    self.section("data", needed, |s| {
      s.opt(segments, |s, segments| {
        s.vec(segments, |s, segment| {
          s.vu64(segment.address);
          s.string(&segment.data);
        });
      });
      Ok(())
    })
  }

  /// Terminates the module. Always present, always empty.
  pub(super) fn end_section(&mut self) -> Result<()> {
    self.section("end", true, |_| Ok(()))
  }
}
