//! Kafka 消费者工厂
//!
//! 构建器只负责收集配置，真正创建客户端的是实现了 [`ConsumerFactory`] 的工厂。
//! 配置完整性（例如必须提供 bootstrap 地址）由工厂负责检查。

use crate::error::Result;
use crate::kafka::consumer_config::ConsumerConfig;

/// 消费者工厂 Trait
///
/// 接收构建器交出的配置并返回可用的客户端
pub trait ConsumerFactory {
    /// 工厂产出的客户端类型
    type Consumer;

    /// 根据配置创建客户端
    fn create(&self, config: &ConsumerConfig) -> Result<Self::Consumer>;
}

impl<F: ConsumerFactory + ?Sized> ConsumerFactory for &F {
    type Consumer = F::Consumer;

    fn create(&self, config: &ConsumerConfig) -> Result<Self::Consumer> {
        (**self).create(config)
    }
}

#[cfg(feature = "kafka")]
pub use rdkafka_factory::{KafkaConsumer, RdKafkaConsumerFactory};

#[cfg(feature = "kafka")]
mod rdkafka_factory {
    use std::marker::PhantomData;

    use rdkafka::config::{ClientConfig, FromClientConfig};
    use rdkafka::consumer::StreamConsumer;
    use tracing::{info, warn};

    use super::ConsumerFactory;
    use crate::error::{ConsumerError, Result};
    use crate::kafka::consumer_config::ConsumerConfig;
    use crate::kafka::options::{ClientDnsLookup, ConfigKey};

    /// 由 rdkafka 创建的消费者
    ///
    /// librdkafka 没有 `max.poll.records`，该限制随句柄一起返回，由调用方在拉取时遵守
    pub struct KafkaConsumer<C = StreamConsumer> {
        consumer: C,
        max_poll_records: Option<u32>,
    }

    impl<C> KafkaConsumer<C> {
        /// 底层 rdkafka 消费者
        pub fn consumer(&self) -> &C {
            &self.consumer
        }

        /// 每次拉取返回的最大记录数
        pub fn max_poll_records(&self) -> Option<u32> {
            self.max_poll_records
        }

        pub fn into_inner(self) -> C {
            self.consumer
        }
    }

    /// 基于 rdkafka 的消费者工厂
    pub struct RdKafkaConsumerFactory<C = StreamConsumer> {
        extra: Vec<(String, String)>,
        _consumer: PhantomData<fn() -> C>,
    }

    impl<C> Default for RdKafkaConsumerFactory<C> {
        fn default() -> Self {
            Self {
                extra: Vec::new(),
                _consumer: PhantomData,
            }
        }
    }

    impl<C> RdKafkaConsumerFactory<C> {
        pub fn new() -> Self {
            Self::default()
        }

        /// 追加原始 librdkafka 属性（如 `security.protocol`）
        ///
        /// 先于类型化配置项写入，同名时以类型化配置项为准
        #[must_use]
        pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
            self.extra.push((key.into(), value.into()));
            self
        }

        /// 将配置转换为 librdkafka 的 `ClientConfig`
        pub fn client_config(&self, config: &ConsumerConfig) -> Result<ClientConfig> {
            let bootstrap = config
                .bootstrap_servers()
                .filter(|servers| !servers.is_empty())
                .ok_or_else(|| ConsumerError::incomplete(ConfigKey::BootstrapServers))?;

            let mut client_config = ClientConfig::new();
            for (key, value) in &self.extra {
                client_config.set(key, value);
            }

            client_config.set(ConfigKey::BootstrapServers.property_name(), bootstrap.join(","));
            if let Some(group_id) = config.group_id() {
                client_config.set(ConfigKey::GroupId.property_name(), group_id);
            }
            if let Some(ms) = config.max_poll_interval_ms() {
                client_config.set(ConfigKey::MaxPollIntervalMs.property_name(), ms.to_string());
            }
            if let Some(ms) = config.session_timeout_ms() {
                client_config.set(ConfigKey::SessionTimeoutMs.property_name(), ms.to_string());
            }
            if let Some(ms) = config.heartbeat_interval_ms() {
                client_config.set(ConfigKey::HeartbeatIntervalMs.property_name(), ms.to_string());
            }
            match config.client_dns_lookup() {
                Some(ClientDnsLookup::Default) | None => {}
                Some(mode) => {
                    client_config.set(ConfigKey::ClientDnsLookup.property_name(), mode.as_str());
                }
            }

            Ok(client_config)
        }
    }

    impl<C: FromClientConfig> ConsumerFactory for RdKafkaConsumerFactory<C> {
        type Consumer = KafkaConsumer<C>;

        fn create(&self, config: &ConsumerConfig) -> Result<Self::Consumer> {
            let client_config = self.client_config(config).inspect_err(|err| {
                warn!(error = %err, "Kafka consumer configuration rejected");
            })?;

            let consumer = C::from_config(&client_config).map_err(|err| {
                warn!(error = %err, "Failed to create Kafka consumer");
                ConsumerError::from(err)
            })?;

            info!(
                bootstrap = %client_config.get("bootstrap.servers").unwrap_or_default(),
                group_id = %config.group_id().unwrap_or_default(),
                max_poll_records = ?config.max_poll_records(),
                "Kafka consumer created successfully"
            );

            Ok(KafkaConsumer {
                consumer,
                max_poll_records: config.max_poll_records(),
            })
        }
    }

}
