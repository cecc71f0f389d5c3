//! 错误处理模块
//!
//! 提供消费者配置的错误类型与错误代码分类

pub mod code;
pub mod consumer_error;

// 重新导出公共类型
pub use code::{ErrorCategory, ErrorCode};
pub use consumer_error::{ConsumerError, Result};
