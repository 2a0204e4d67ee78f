//! Database entities module

pub mod parcel;
pub mod role;
pub mod user;
pub mod user_role;

pub use parcel::Entity as Parcel;
pub use role::Entity as Role;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;
