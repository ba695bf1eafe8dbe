mod actor;
mod movie;
mod permission;

pub use actor::*;
pub use movie::*;
pub use permission::*;
