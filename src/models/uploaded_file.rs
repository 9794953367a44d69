use std::fmt;
use std::sync::Arc;

/// 待上传的文件
///
/// 只在一次选择会话中存在，由 FileSet 独占持有。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    content: Arc<[u8]>,
}

impl UploadedFile {
    /// 创建新的上传文件，大小取内容长度
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            byte_size: content.len() as u64,
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// 文件内容
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// 以 MB 显示文件大小，保留两位小数
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.byte_size as f64 / 1024.0 / 1024.0)
    }
}

impl fmt::Display for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.size_label())
    }
}

/// 已接受的文件列表
///
/// 有序；每次变更都返回新的 FileSet，原值保持不变。
/// 只能通过 intake 校验后产生，类型和数量上限由 `IntakePolicy` 保证。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<UploadedFile>,
}

impl FileSet {
    /// 创建空列表
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UploadedFile> {
        self.files.iter()
    }

    /// 文件名列表（按顺序）
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// 追加一批文件，返回新列表（调用方负责校验）
    pub(crate) fn appended(&self, batch: Vec<UploadedFile>) -> Self {
        let mut files = self.files.clone();
        files.extend(batch);
        Self { files }
    }

    /// 删除指定位置的文件，返回新列表（调用方负责校验索引）
    pub(crate) fn without(&self, index: usize) -> Self {
        let files = self
            .files
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.clone())
            .collect();
        Self { files }
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a UploadedFile;
    type IntoIter = std::slice::Iter<'a, UploadedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
