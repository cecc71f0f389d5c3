//! Flare Kafka Consumer
//!
//! Fluent builder that collects and validates Kafka consumer options, then hands
//! them to a consumer factory (rdkafka by default) to create the client.

pub mod config;
pub mod error;

// Kafka 消费者构建
pub mod kafka;

// Re-exports
pub use config::ConsumerSettings;
pub use error::{ConsumerError, ErrorCategory, ErrorCode, Result};
pub use kafka::{
    ClientDnsLookup, ConfigKey, ConfigValue, ConsumerConfig, ConsumerFactory, KafkaConsumerBuilder,
};

#[cfg(feature = "kafka")]
pub use kafka::{KafkaConsumer, RdKafkaConsumerFactory};
