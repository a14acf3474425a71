//! Session state module

mod forms;
mod session;

pub use forms::*;
pub use session::*;
