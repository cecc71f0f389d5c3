//! Kafka 消费者配置
//!
//! 每个配置项对应一个具名字段，未设置的字段为 `None`

use std::collections::BTreeMap;

use crate::kafka::options::{ClientDnsLookup, ConfigKey};

/// 读取单个配置项时返回的值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// 地址列表
    List(Vec<String>),
    /// 字符串
    Text(String),
    /// 正整数
    Int(u32),
    /// 枚举值
    DnsLookup(ClientDnsLookup),
}

impl ConfigValue {
    /// 转为 Kafka 属性字符串，列表以逗号拼接
    pub fn to_property_string(&self) -> String {
        match self {
            ConfigValue::List(items) => items.join(","),
            ConfigValue::Text(text) => text.clone(),
            ConfigValue::Int(n) => n.to_string(),
            ConfigValue::DnsLookup(mode) => mode.as_str().to_string(),
        }
    }
}

/// Kafka 消费者配置
///
/// 由 [`KafkaConsumerBuilder`](crate::kafka::KafkaConsumerBuilder) 独占并在构建时交给消费者工厂
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub(crate) bootstrap_servers: Option<Vec<String>>,
    pub(crate) group_id: Option<String>,
    pub(crate) max_poll_records: Option<u32>,
    pub(crate) max_poll_interval_ms: Option<u32>,
    pub(crate) session_timeout_ms: Option<u32>,
    pub(crate) heartbeat_interval_ms: Option<u32>,
    pub(crate) client_dns_lookup: Option<ClientDnsLookup>,
}

impl ConsumerConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bootstrap_servers(&self) -> Option<&[String]> {
        self.bootstrap_servers.as_deref()
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn max_poll_records(&self) -> Option<u32> {
        self.max_poll_records
    }

    pub fn max_poll_interval_ms(&self) -> Option<u32> {
        self.max_poll_interval_ms
    }

    pub fn session_timeout_ms(&self) -> Option<u32> {
        self.session_timeout_ms
    }

    pub fn heartbeat_interval_ms(&self) -> Option<u32> {
        self.heartbeat_interval_ms
    }

    pub fn client_dns_lookup(&self) -> Option<ClientDnsLookup> {
        self.client_dns_lookup
    }

    /// 按键读取配置项
    pub fn get(&self, key: ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::BootstrapServers => self.bootstrap_servers.clone().map(ConfigValue::List),
            ConfigKey::GroupId => self.group_id.clone().map(ConfigValue::Text),
            ConfigKey::MaxPollRecords => self.max_poll_records.map(ConfigValue::Int),
            ConfigKey::MaxPollIntervalMs => self.max_poll_interval_ms.map(ConfigValue::Int),
            ConfigKey::SessionTimeoutMs => self.session_timeout_ms.map(ConfigValue::Int),
            ConfigKey::HeartbeatIntervalMs => self.heartbeat_interval_ms.map(ConfigValue::Int),
            ConfigKey::ClientDnsLookup => self.client_dns_lookup.map(ConfigValue::DnsLookup),
        }
    }

    /// 配置项是否已设置
    pub fn contains(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::BootstrapServers => self.bootstrap_servers.is_some(),
            ConfigKey::GroupId => self.group_id.is_some(),
            ConfigKey::MaxPollRecords => self.max_poll_records.is_some(),
            ConfigKey::MaxPollIntervalMs => self.max_poll_interval_ms.is_some(),
            ConfigKey::SessionTimeoutMs => self.session_timeout_ms.is_some(),
            ConfigKey::HeartbeatIntervalMs => self.heartbeat_interval_ms.is_some(),
            ConfigKey::ClientDnsLookup => self.client_dns_lookup.is_some(),
        }
    }

    /// 已设置的配置键
    pub fn keys(&self) -> Vec<ConfigKey> {
        ConfigKey::ALL
            .into_iter()
            .filter(|key| self.contains(*key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 以 Kafka 属性名渲染已设置的配置项
    pub fn properties(&self) -> BTreeMap<&'static str, String> {
        ConfigKey::ALL
            .into_iter()
            .filter_map(|key| {
                self.get(key)
                    .map(|value| (key.property_name(), value.to_property_string()))
            })
            .collect()
    }
}
