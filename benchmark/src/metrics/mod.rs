//! @ai:module:intent Timing statistics and result aggregation
//! @ai:module:layer application
//! @ai:module:public_api TimingSummary, MemoryReading, VariantResult, DeltaStats, BenchmarkResults, MetricsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{arithmetic_mean, geometric_mean, sample_stdev, MetricsAggregator};
pub use types::{BenchmarkResults, DeltaStats, MemoryReading, TimingSummary, VariantResult};
