//! 缓存层
//!
//! 可插拔的对象缓存：后端（Moka/Redis）通过 `declare_object_cache_plugin!`
//! 在进程启动时自注册，运行时按配置选择。排行榜与分析报告等聚合结果
//! 走缓存；评分状态统计永不缓存，轮询方必须看到实时进度。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 排行榜缓存键
pub fn leaderboard_cache_key(competition_id: i64) -> String {
    format!("leaderboard:{competition_id}")
}

/// 分析报告缓存键
pub fn report_cache_key(competition_id: i64) -> String {
    format!("report:{competition_id}")
}

/// 声明一个对象缓存插件，在进程启动时注册到全局缓存注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            #[allow(non_snake_case)]
            fn [<__register_object_cache_ $ty>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$ty>::new()
                                .map_err($crate::errors::PromptArenaError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys_are_scoped_by_competition() {
        assert_eq!(leaderboard_cache_key(7), "leaderboard:7");
        assert_eq!(report_cache_key(7), "report:7");
        assert_ne!(leaderboard_cache_key(1), leaderboard_cache_key(2));
    }
}
