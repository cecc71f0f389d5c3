use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kafka::ConsumerConfig;

/// 配置文件中的消费者配置
///
/// ```toml
/// bootstrap_servers = ["host1:9092", "host2:9092"]
/// group_id = "g1"
/// max_poll_records = 500
/// client_dns_lookup = "USE_ALL_DNS_IPS"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_servers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_poll_records: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_poll_interval_ms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout_ms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_interval_ms: Option<i32>,
    // use_all_dns_ips, resolve_canonical_bootstrap_servers_only, default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_dns_lookup: Option<String>,
}

impl ConsumerSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl ConsumerConfig {
    /// 转回配置文件形式
    pub fn to_settings(&self) -> ConsumerSettings {
        // 已校验的值均为正数，不会超出 i32
        let int = |v: Option<u32>| v.and_then(|v| i32::try_from(v).ok());
        ConsumerSettings {
            bootstrap_servers: self.bootstrap_servers().map(<[String]>::to_vec),
            group_id: self.group_id().map(str::to_string),
            max_poll_records: int(self.max_poll_records()),
            max_poll_interval_ms: int(self.max_poll_interval_ms()),
            session_timeout_ms: int(self.session_timeout_ms()),
            heartbeat_interval_ms: int(self.heartbeat_interval_ms()),
            client_dns_lookup: self.client_dns_lookup().map(|mode| mode.as_str().to_string()),
        }
    }
}
