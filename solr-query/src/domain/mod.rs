mod field_modifier;
mod input_doc;

pub use field_modifier::*;
pub use input_doc::*;
