/*!
# Language support module

Shared infrastructure for the interpreter: the error/severity model and
the warning sink the machine logs through.

*/

#[macro_use]
mod error;
mod log;

pub use error::Error;
pub use error::ErrorCode;
pub use error::Position;
pub use error::Severity;
pub use log::Log;
