pub mod decoder;
pub mod manifest;
pub mod random;
