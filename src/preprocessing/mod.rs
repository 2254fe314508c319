pub mod sampler;
pub mod synthetic;
