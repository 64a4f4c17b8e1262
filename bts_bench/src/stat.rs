// Per-invocation sampling statistics and their sinks
// 单次采样统计及其持久化

use std::{
  fs::{self, File},
  io::{BufWriter, Write},
  path::{Path, PathBuf},
  time::Duration,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Result;

/// One sampling call / 一次采样调用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleStat<V> {
  /// Strategy name / 策略名
  pub method: String,
  pub index_id: u64,
  /// Size asked for / 请求的样本量
  pub requested: usize,
  /// Size after clamping to the index population / 截断后的样本量
  pub sample_size: usize,
  /// Wall clock start, unix epoch milliseconds / 开始时间（Unix 毫秒）
  pub start_ms: u64,
  pub elapsed_ns: u64,
  pub iteration: usize,
  /// Sampled values in returned order / 按返回顺序的样本值
  pub values: Vec<V>,
}

impl<V> SampleStat<V> {
  #[inline]
  pub fn elapsed(&self) -> Duration {
    Duration::from_nanos(self.elapsed_ns)
  }
}

/// Destination for statistics records / 统计记录的去处
pub trait StatSink {
  fn persist<V: Serialize>(&mut self, stat: &SampleStat<V>) -> Result<()>;
}

/// JSON lines file, one record per line / JSON Lines 文件，每行一条记录
pub struct JsonlSink {
  path: PathBuf,
  out: BufWriter<File>,
  count: usize,
}

impl JsonlSink {
  /// Create `dir/name.jsonl`, truncating an older run
  /// 创建 `dir/name.jsonl`，覆盖旧记录
  pub fn create(dir: &Path, name: &str) -> Result<Self> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}.jsonl"));
    let out = BufWriter::new(File::create(&path)?);
    Ok(Self {
      path,
      out,
      count: 0,
    })
  }

  #[inline]
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Records written / 已写入的记录数
  #[inline]
  pub fn count(&self) -> usize {
    self.count
  }
}

impl StatSink for JsonlSink {
  fn persist<V: Serialize>(&mut self, stat: &SampleStat<V>) -> Result<()> {
    let line = sonic_rs::to_string(stat)?;
    self.out.write_all(line.as_bytes())?;
    self.out.write_all(b"\n")?;
    self.out.flush()?;
    self.count += 1;
    Ok(())
  }
}

/// In-memory sink keeping serialized records / 保存序列化记录的内存 sink
#[derive(Debug, Default)]
pub struct MemSink {
  lines: Vec<String>,
}

impl MemSink {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.lines.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Decode every record back / 解码所有记录
  pub fn records<V: DeserializeOwned>(&self) -> Result<Vec<SampleStat<V>>> {
    let mut out = Vec::with_capacity(self.lines.len());
    for line in &self.lines {
      out.push(sonic_rs::from_str(line)?);
    }
    Ok(out)
  }
}

impl StatSink for MemSink {
  fn persist<V: Serialize>(&mut self, stat: &SampleStat<V>) -> Result<()> {
    self.lines.push(sonic_rs::to_string(stat)?);
    Ok(())
  }
}
