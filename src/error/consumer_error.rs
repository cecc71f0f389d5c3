//! 消费者配置统一错误类型

use super::code::ErrorCode;
use crate::kafka::ConfigKey;
use thiserror::Error;

/// 消费者配置与构建错误
#[derive(Error, Debug)]
pub enum ConsumerError {
    /// 配置项取值不满足前置条件（由 setter 立即返回）
    #[error("无效配置 [{key}]: {reason}")]
    InvalidConfig { key: ConfigKey, reason: String },

    /// 缺少必需配置项（由消费者工厂在构建时返回）
    #[error("配置不完整: 缺少 {key}")]
    IncompleteConfig { key: ConfigKey },

    /// librdkafka 拒绝创建客户端（创建时不建立连接）
    #[cfg(feature = "kafka")]
    #[error("Kafka 客户端创建失败: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件解析错误
    #[error("配置解析失败: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConsumerError {
    /// 创建无效配置错误
    pub fn invalid(key: ConfigKey, reason: impl Into<String>) -> Self {
        ConsumerError::InvalidConfig {
            key,
            reason: reason.into(),
        }
    }

    /// 创建配置不完整错误
    pub fn incomplete(key: ConfigKey) -> Self {
        ConsumerError::IncompleteConfig { key }
    }

    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        match self {
            ConsumerError::InvalidConfig { .. } => ErrorCode::InvalidParameter,
            ConsumerError::IncompleteConfig { .. } => ErrorCode::ConfigurationError,
            #[cfg(feature = "kafka")]
            ConsumerError::Kafka(_) => ErrorCode::ConfigurationError,
            ConsumerError::Io(_) => ErrorCode::IoError,
            ConsumerError::Parse(_) => ErrorCode::DeserializationError,
        }
    }

    /// 出错的配置项（如果有）
    pub fn key(&self) -> Option<ConfigKey> {
        match self {
            ConsumerError::InvalidConfig { key, .. } | ConsumerError::IncompleteConfig { key } => {
                Some(*key)
            }
            _ => None,
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ConsumerError>;
