pub mod console;
pub mod error;
pub mod refs;
