pub mod auth;
pub mod error;
pub mod visits;

pub use auth::*;
pub use error::*;
pub use visits::*;
