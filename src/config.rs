use crate::error::{DirectorError, Result};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 凭证解析：命令行参数优先，其次环境变量（.env 已由 dotenvy 预加载）。
/// 两者都缺失时立即失败，不发起任何网络请求
pub fn resolve_api_key(flag: Option<String>) -> Result<String> {
    resolve_from(flag, std::env::var(API_KEY_ENV).ok())
}

fn resolve_from(flag: Option<String>, env: Option<String>) -> Result<String> {
    flag.filter(|k| !k.is_empty())
        .or(env.filter(|k| !k.is_empty()))
        .ok_or_else(|| {
            DirectorError::ConfigError(format!(
                "provide --api-key or set the {} environment variable",
                API_KEY_ENV
            ))
        })
}
