//! 文件来源 - 业务能力层
//!
//! 把拖放、文件选择框、命令行参数等输入方式统一成"提供了一批文件"这一事件

use crate::error::{AppError, AppResult};
use crate::models::UploadedFile;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 文件来源能力
///
/// 只暴露"提供了哪些文件"，不关心文件是怎么选出来的
pub trait FileSource {
    /// 取出本次提供的文件批次
    fn offered(&self) -> AppResult<Vec<UploadedFile>>;
}

/// 从磁盘路径读取文件
///
/// MIME 类型按扩展名推断，无法推断时为 `application/octet-stream`
pub struct PathFileSource {
    paths: Vec<PathBuf>,
}

impl PathFileSource {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    fn read_one(path: &Path) -> AppResult<UploadedFile> {
        let content = std::fs::read(path).map_err(|e| AppError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        debug!("读取文件: {} ({}, {} 字节)", name, mime_type, content.len());

        Ok(UploadedFile::new(name, mime_type, content))
    }
}

impl FileSource for PathFileSource {
    fn offered(&self) -> AppResult<Vec<UploadedFile>> {
        self.paths.iter().map(|p| Self::read_one(p)).collect()
    }
}

/// 内存中的文件批次
pub struct StaticFileSource {
    files: Vec<UploadedFile>,
}

impl StaticFileSource {
    pub fn new(files: Vec<UploadedFile>) -> Self {
        Self { files }
    }
}

impl FileSource for StaticFileSource {
    fn offered(&self) -> AppResult<Vec<UploadedFile>> {
        Ok(self.files.clone())
    }
}
