//! Error types / 错误类型

use thiserror::Error;

use crate::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("invalid node type at {0}: expected leaf")]
  NotLeaf(NodeId),

  #[error("node {0} out of range")]
  NoNode(NodeId),
}
