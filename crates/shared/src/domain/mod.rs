mod identity;
pub mod requests;
pub mod responses;

pub use self::identity::Identity;
