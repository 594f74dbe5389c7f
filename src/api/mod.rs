mod client;
mod genomics;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use genomics::GenomicsApi;
