use bts_tree::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Tree error: {0}")]
  Tree(#[from] bts_tree::Error),

  #[error("Data error: {0}")]
  Data(#[from] bts_bench_data::Error),

  #[error("Histogram error: {0}")]
  Histogram(#[from] hdrhistogram::CreationError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] sonic_rs::Error),

  #[error("unknown sampling method: {0}")]
  UnknownMethod(String),

  #[error("{method} needs tree height {need}, index height is {actual}")]
  HeightMismatch {
    method: &'static str,
    need: usize,
    actual: usize,
  },

  #[error("height-specialized methods are mutually exclusive: {0:?}")]
  ExclusiveHeights(Vec<String>),

  #[error("bucket {bucket} holds {size} entries, leaf cap is {max}")]
  Shape {
    bucket: NodeId,
    size: usize,
    max: usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
