mod error;
mod logger;
mod session;
mod storage;

pub use error::*;
pub use logger::*;
pub use session::*;
pub use storage::*;
