pub mod system;
pub mod validate;
