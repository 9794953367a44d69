//! 结果存储 - 基础设施层
//!
//! 简单的键值存储，用来在提交流程和结果展示流程之间传递分析结果

use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// 分析结果的固定存储键
pub const RESULTS_KEY: &str = "researchGaps";

/// 键值存储能力
///
/// 职责：
/// - 只认识字符串键和字符串值
/// - 不认识 ResearchGap
/// - 删除不存在的键不算错误
pub trait ResultStore: Send + Sync {
    /// 读取值，不存在时返回 None
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 写入值（覆盖）
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// 删除值
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// 基于目录的存储，每个键一个 `<key>.json` 文件
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 创建存储，目录在第一次写入时创建
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::storage(
                key,
                std::io::Error::new(ErrorKind::InvalidInput, "非法的存储键"),
            ));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl ResultStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| AppError::storage(key, e))?;

        // 先写临时文件再改名，避免留下半个文件
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| AppError::storage(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| AppError::storage(key, e))?;

        debug!("已写入存储: {} ({} 字节)", path.display(), value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("已删除存储: {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(key, e)),
        }
    }
}

/// 内存存储
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // 写入只做 insert/remove，不会留下不一致的状态
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get(RESULTS_KEY).unwrap(), None);

        store.set(RESULTS_KEY, "[]").unwrap();
        assert_eq!(store.get(RESULTS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested").join("researchGaps.json").exists());

        store.remove(RESULTS_KEY).unwrap();
        assert_eq!(store.get(RESULTS_KEY).unwrap(), None);
        // 重复删除不报错
        store.remove(RESULTS_KEY).unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store.set("../escape", "x"),
            Err(AppError::Storage { .. })
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
