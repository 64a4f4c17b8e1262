// B+ Tree Sampling Benchmark Library
// B+ 树采样基准测试库

mod build;
mod error;
mod index;
mod latency;
mod runner;
pub mod sample;
mod stat;

pub use build::{BATCH, build, build_with_shape, validate_shape};
pub use error::{Error, Result};
pub use index::{Index, IndexMeta};
pub use latency::{LatencyHistogram, LatencyStats};
pub use runner::{
  Conf, DEFAULT_METHODS, MethodReport, ParsedConf, RunReport, check_exclusive, clustered_run,
  run_sample_methods, select_methods, zipf_run,
};
pub use sample::{Registry, Sampler, measure, sample_monkey};
pub use stat::{JsonlSink, MemSink, SampleStat, StatSink};
