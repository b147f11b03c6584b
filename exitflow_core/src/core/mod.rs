pub mod request;
pub mod user;

pub use request::{ExitRequest, FormType, Responsibility, normalize_identifier};
pub use user::Actor;
