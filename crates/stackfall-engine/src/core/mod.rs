pub use self::{cell::*, figure::*, settled_field::*};

pub(crate) mod cell;
pub(crate) mod figure;
pub(crate) mod settled_field;

/// Number of columns in the visible field.
pub const FIELD_WIDTH: usize = 10;
/// Number of rows in the visible field.
pub const FIELD_HEIGHT: usize = 20;
