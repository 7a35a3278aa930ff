pub mod links;
pub mod users;

pub use links::LinkStore;
pub use users::UserDirectory;
