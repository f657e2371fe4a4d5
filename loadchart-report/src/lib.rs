pub mod counter;
pub mod sampler;
pub mod synthetic;

pub use counter::RequestCounter;
pub use sampler::DurationSampler;
