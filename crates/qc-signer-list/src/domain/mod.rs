pub mod classifier;
pub mod errors;
pub mod reserve;
pub mod stages;
pub mod transaction;
pub mod validator;

pub use classifier::*;
pub use errors::*;
pub use reserve::*;
pub use stages::*;
pub use transaction::*;
pub use validator::*;
