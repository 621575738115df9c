pub mod bytes;
pub mod testing;
