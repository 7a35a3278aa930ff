pub mod cookies;
pub mod id_gen;
pub mod session;
