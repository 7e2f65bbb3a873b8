//! Point sampling strategies for decorative scattering

pub mod poisson;

pub use poisson::PoissonDiskSampler;
