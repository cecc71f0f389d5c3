//! Kafka 消费者构建器
//!
//! 链式收集并校验消费者配置，最终交给 [`ConsumerFactory`] 创建客户端。
//!
//! setter 遇到非法参数立即返回 `InvalidConfig`，之前已写入的配置保持不变；
//! 重复设置同一配置项时以最后一次为准。

use tracing::{debug, warn};

use crate::config::ConsumerSettings;
use crate::error::{ConsumerError, Result};
use crate::kafka::consumer_config::ConsumerConfig;
use crate::kafka::factory::ConsumerFactory;
use crate::kafka::options::{ClientDnsLookup, ConfigKey, validate_address};

/// Kafka 消费者构建器
///
/// # 示例
/// ```rust
/// use flare_kafka_consumer::{ConfigKey, ConfigValue, KafkaConsumerBuilder};
///
/// # fn example() -> flare_kafka_consumer::Result<()> {
/// let mut builder = KafkaConsumerBuilder::new();
/// builder
///     .with_bootstrap_servers(["host1:9092", "host2:9092"])?
///     .with_group_id("g1")?
///     .with_max_poll_records(500)?;
///
/// assert_eq!(
///     builder.config().get(ConfigKey::GroupId),
///     Some(ConfigValue::Text("g1".to_string()))
/// );
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct KafkaConsumerBuilder {
    config: ConsumerConfig,
}

impl KafkaConsumerBuilder {
    /// 创建空构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置文件内容创建构建器，逐项经过 setter 校验
    pub fn from_settings(settings: &ConsumerSettings) -> Result<Self> {
        let mut builder = Self::new();
        if let Some(servers) = &settings.bootstrap_servers {
            builder.with_bootstrap_servers(servers.iter().cloned())?;
        }
        if let Some(group_id) = &settings.group_id {
            builder.with_group_id(group_id.clone())?;
        }
        if let Some(n) = settings.max_poll_records {
            builder.with_max_poll_records(n)?;
        }
        if let Some(ms) = settings.max_poll_interval_ms {
            builder.with_max_poll_interval_ms(ms)?;
        }
        if let Some(ms) = settings.session_timeout_ms {
            builder.with_session_timeout_ms(ms)?;
        }
        if let Some(ms) = settings.heartbeat_interval_ms {
            builder.with_heartbeat_interval_ms(ms)?;
        }
        if let Some(mode) = &settings.client_dns_lookup {
            builder.with_client_dns_lookup(mode.parse()?)?;
        }
        Ok(builder)
    }

    /// 设置 bootstrap 地址列表
    ///
    /// 仅用于首次连接并发现完整的集群成员，列表无需包含全部 broker。
    /// 每一项必须是 `host:port`。
    pub fn with_bootstrap_servers<I, S>(&mut self, addresses: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = ConfigKey::BootstrapServers;
        let servers: Vec<String> = addresses.into_iter().map(Into::into).collect();
        if servers.is_empty() {
            return Err(ConsumerError::invalid(key, "at least one address is required"));
        }
        for address in &servers {
            validate_address(address).map_err(|reason| ConsumerError::invalid(key, reason))?;
        }

        self.note_override(key);
        debug!(key = %key, servers = ?servers, "Consumer option set");
        self.config.bootstrap_servers = Some(servers);
        Ok(self)
    }

    /// 设置消费者组 ID
    ///
    /// 使用组管理订阅或基于 Kafka 的 offset 管理时需要；构建器本身不检查这一依赖。
    pub fn with_group_id(&mut self, group_id: impl Into<String>) -> Result<&mut Self> {
        let key = ConfigKey::GroupId;
        let group_id = group_id.into();
        if group_id.trim().is_empty() {
            return Err(ConsumerError::invalid(key, "group id must not be empty"));
        }

        self.note_override(key);
        debug!(key = %key, group_id = %group_id, "Consumer option set");
        self.config.group_id = Some(group_id);
        Ok(self)
    }

    /// [`with_group_id`](Self::with_group_id) 的别名
    pub fn with_group_id_config(&mut self, group_id: impl Into<String>) -> Result<&mut Self> {
        self.with_group_id(group_id)
    }

    /// 设置单次 poll 返回的最大记录数
    pub fn with_max_poll_records(&mut self, max_poll_records: i32) -> Result<&mut Self> {
        let value = self.positive(ConfigKey::MaxPollRecords, max_poll_records)?;
        self.config.max_poll_records = Some(value);
        Ok(self)
    }

    /// 设置两次 poll 之间允许的最大间隔（毫秒）
    ///
    /// 超时未 poll 的消费者被视为失败，组内分区会重新分配。
    pub fn with_max_poll_interval_ms(&mut self, max_poll_interval_ms: i32) -> Result<&mut Self> {
        let value = self.positive(ConfigKey::MaxPollIntervalMs, max_poll_interval_ms)?;
        self.config.max_poll_interval_ms = Some(value);
        Ok(self)
    }

    /// 设置会话超时（毫秒）
    ///
    /// broker 允许的范围在连接时由 broker 检查。
    pub fn with_session_timeout_ms(&mut self, session_timeout_ms: i32) -> Result<&mut Self> {
        let value = self.positive(ConfigKey::SessionTimeoutMs, session_timeout_ms)?;
        self.config.session_timeout_ms = Some(value);
        Ok(self)
    }

    /// 设置心跳间隔（毫秒）
    ///
    /// 建议不超过会话超时的 1/3，这里不做强制。
    pub fn with_heartbeat_interval_ms(&mut self, heartbeat_interval_ms: i32) -> Result<&mut Self> {
        let value = self.positive(ConfigKey::HeartbeatIntervalMs, heartbeat_interval_ms)?;
        self.config.heartbeat_interval_ms = Some(value);
        Ok(self)
    }

    /// 设置客户端 DNS 解析模式
    pub fn with_client_dns_lookup(&mut self, mode: ClientDnsLookup) -> Result<&mut Self> {
        let key = ConfigKey::ClientDnsLookup;
        self.note_override(key);
        debug!(key = %key, mode = %mode, "Consumer option set");
        self.config.client_dns_lookup = Some(mode);
        Ok(self)
    }

    /// 当前已收集的配置
    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// 交出配置，不创建客户端
    pub fn into_config(self) -> ConsumerConfig {
        self.config
    }

    /// 将配置交给工厂并返回创建好的客户端
    ///
    /// 构建器不检查必需项，完整性由工厂负责
    pub fn build_with<F: ConsumerFactory>(self, factory: F) -> Result<F::Consumer> {
        if let (Some(heartbeat), Some(session)) = (
            self.config.heartbeat_interval_ms,
            self.config.session_timeout_ms,
        ) {
            if heartbeat >= session {
                warn!(
                    heartbeat_interval_ms = heartbeat,
                    session_timeout_ms = session,
                    "Heartbeat interval is not below session timeout"
                );
            }
        }

        factory.create(&self.config)
    }

    /// 使用 rdkafka 创建 `StreamConsumer`
    #[cfg(feature = "kafka")]
    pub fn build(self) -> Result<crate::kafka::KafkaConsumer> {
        self.build_with(
            crate::kafka::RdKafkaConsumerFactory::<rdkafka::consumer::StreamConsumer>::default(),
        )
    }

    fn positive(&self, key: ConfigKey, value: i32) -> Result<u32> {
        let value = u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                ConsumerError::invalid(key, format!("must be positive, got {}", value))
            })?;

        self.note_override(key);
        debug!(key = %key, value = value, "Consumer option set");
        Ok(value)
    }

    fn note_override(&self, key: ConfigKey) {
        if let Some(previous) = self.config.get(key) {
            debug!(key = %key, previous = ?previous, "Overriding previously set consumer option");
        }
    }
}
