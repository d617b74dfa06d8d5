mod expr;
mod module;
mod types;

pub use expr::*;
pub use module::*;
pub use types::*;
