//! Pure normalizers applied at every level of the structuring pass.
//!
//! - [`strip_spaces`]: string leaves, per line
//! - [`camel_to_snake_case`]: mapping keys, external → internal naming
pub mod key;
pub mod scalar;

pub use key::camel_to_snake_case;
pub use scalar::strip_spaces;
