pub mod ownership;
pub mod session;

pub use ownership::OwnershipGuard;
pub use session::SessionAuth;
