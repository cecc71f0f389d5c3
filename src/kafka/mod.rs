//! Kafka 消费者配置模块
//!
//! 提供链式构建消费者配置的构建器与消费者工厂
//!
//! 基于 rdkafka 的工厂需要启用 `kafka` feature

pub mod consumer_builder;
pub mod consumer_config;
pub mod factory;
pub mod options;

pub use consumer_builder::KafkaConsumerBuilder;
pub use consumer_config::{ConfigValue, ConsumerConfig};
pub use factory::ConsumerFactory;
#[cfg(feature = "kafka")]
pub use factory::{KafkaConsumer, RdKafkaConsumerFactory};
pub use options::{ClientDnsLookup, ConfigKey};
