pub mod session;
pub mod tap;
