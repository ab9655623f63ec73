mod user;

pub use user::{NewUser, ProfileChanges, User, UserRole};
