//! 基础设施层
//!
//! 持有结果存储这一共享资源，只暴露读、写、删除的能力

pub mod result_store;

pub use result_store::{FileStore, MemoryStore, ResultStore, RESULTS_KEY};
