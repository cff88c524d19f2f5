pub mod document;
pub mod session;

pub use document::*;
pub use session::*;
