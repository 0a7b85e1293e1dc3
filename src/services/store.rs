//! 本地存储服务 - 业务能力层
//!
//! 只负责键值读写：用户名、每道题最后一次编辑的代码。
//! 存储不可用时静默降级（读视为不存在，写视为无操作），这里不是持久性保证

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;

/// 用户名的存储键
pub const USER_NAME_KEY: &str = "userName";

/// 题目代码的存储键
pub fn code_key(question_id: &str) -> String {
    format!("code_{}", question_id)
}

/// 键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// 内存存储
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// 基于 TOML 文件的存储
///
/// 每次 `set` 都会整体重写文件（写穿）
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// 打开存储文件，文件不存在或损坏时从空表开始
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => {
                debug!("已加载 {} 条本地存储记录", entries.len());
                entries
            }
            Err(e) => {
                warn!("⚠️ 本地存储不可用，使用空存储: {}", e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = toml::to_string(&self.entries)?;
        fs::write(&self.path, content).map_err(|source| StoreError::WriteFailed {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            warn!("⚠️ 写入本地存储失败: {}", e);
        }
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| StoreError::TomlParseFailed {
        path: path.display().to_string(),
        source,
    })
}
