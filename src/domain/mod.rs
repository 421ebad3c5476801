//! Dashboard domain: closed enumerations and record types

pub mod enums;
pub mod records;

pub use enums::*;
pub use records::*;
