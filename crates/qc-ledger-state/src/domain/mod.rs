pub mod directory;
pub mod entries;
pub mod errors;
pub mod fees;
pub mod keylet;
pub mod rules;

pub use directory::*;
pub use entries::*;
pub use errors::*;
pub use fees::*;
pub use keylet::Keylet;
pub use rules::*;
