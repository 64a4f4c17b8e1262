// Benchmark dataset generators
// 基准测试数据集生成器

#![cfg_attr(docsrs, feature(doc_cfg))]

mod clustered;
mod dataset;
mod error;
pub mod keycode;
mod zipf;

pub use clustered::{ALPHABET, CHUNK, KEY_LEN, clustered};
pub use dataset::{Dataset, GenMethod};
pub use error::{Error, Result};
pub use keycode::{BASE_OFFSET, KeyCoder, SUFFIX_LEN, decode, encode};
pub use zipf::{Order, ZipfFreq, zipf};
