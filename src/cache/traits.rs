use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 后端异常，按未命中处理但与之区分以便观测
    ExistsButNoValue,
}

/// 对象缓存后端契约
///
/// 值以字符串存取，调用方自行负责 serde_json 编解码，
/// 以保证 trait 对象安全（Arc<dyn ObjectCache> 全程传递）。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
