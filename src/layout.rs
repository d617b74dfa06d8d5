//! Where each section landed in the output, for diagnostics.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct SectionLayout {
  pub name   : &'static str,
  /// Offset of the section's size field from the start of the module.
  pub offset : usize,
  /// Payload size, excluding the size field and the name.
  pub size   : usize,
}

#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Layout {
  sections : Vec<SectionLayout>,
  total    : usize,
}

impl Layout {

  pub fn new() -> Layout {
    Layout::default()
  }

  pub fn push(&mut self, section: SectionLayout) {
    self.sections.push(section);
  }

  pub fn set_total(&mut self, total: usize) {
    self.total = total;
  }

  /// Sections in the order they were emitted.
  pub fn sections(&self) -> &[SectionLayout] {
    &self.sections
  }

  pub fn section(&self, name: &str) -> Option<&SectionLayout> {
    self.sections.iter().find(|section| section.name == name)
  }

  /// The length of the whole module in bytes.
  pub fn total(&self) -> usize {
    self.total
  }
}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Layout {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ub->"Section", ubr->"Offset", ubr->"Size"]);

    for section in &self.sections {
      table.add_row(
        row![section.name, r->format!("{:#06x}", section.offset), r->section.size]
      );
    }

    write!(f, "{}Total: {} bytes", table, self.total)
  }
}
