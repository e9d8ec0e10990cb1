mod array;
pub use array::IntoArray3;

mod luma;
pub use luma::IntoLumaGrid;

mod dynamic;
pub use dynamic::{color_type_u8, IntoAnyGrid};
