//! Tree capacity configuration
//! 树容量配置

/// Default values, same as the classic object B-tree
/// 默认值，与经典对象 B 树一致
pub mod default {
  pub const MAX_LEAF: usize = 30;
  pub const MAX_INTERNAL: usize = 250;
}

/// Smallest internal fan-out that still splits into two valid halves
/// 可分裂为两个合法半节点的最小内部扇出
pub const MIN_INTERNAL: usize = 3;

/// Tree configuration
/// 树配置
#[derive(Debug, Clone, Copy)]
pub enum Conf {
  /// Max entries per leaf bucket
  /// 每个叶子桶的最大条目数
  MaxLeaf(usize),
  /// Max children per internal node
  /// 每个内部节点的最大子节点数
  MaxInternal(usize),
}

/// Parsed configuration
/// 解析后的配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedConf {
  pub max_leaf: usize,
  pub max_internal: usize,
}

impl Default for ParsedConf {
  fn default() -> Self {
    Self {
      max_leaf: default::MAX_LEAF,
      max_internal: default::MAX_INTERNAL,
    }
  }
}

impl ParsedConf {
  pub fn new(conf: &[Conf]) -> Self {
    let mut c = Self::default();
    for item in conf {
      match *item {
        Conf::MaxLeaf(v) => c.max_leaf = v.max(1),
        Conf::MaxInternal(v) => c.max_internal = v.max(MIN_INTERNAL),
      }
    }
    c
  }
}
