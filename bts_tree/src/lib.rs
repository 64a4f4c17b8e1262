//! In-memory B+ tree with a leaf bucket chain
//! 带叶子桶链的内存 B+ 树

#![cfg_attr(docsrs, feature(doc_cfg))]

mod bucket;
pub mod conf;
mod error;
mod node;
mod tree;

pub use bucket::{Bucket, Buckets};
pub use conf::{Conf, ParsedConf};
pub use error::{Error, Result};
pub use node::{Internal, Leaf, Node, NodeId};
pub use tree::{BTree, Iter};
