//! Kafka 消费者配置项定义
//!
//! 固定的配置键集合、DNS 解析模式以及 `host:port` 地址校验

use std::fmt;
use std::str::FromStr;

use crate::error::ConsumerError;

/// 配置键（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    BootstrapServers,
    GroupId,
    MaxPollRecords,
    MaxPollIntervalMs,
    SessionTimeoutMs,
    HeartbeatIntervalMs,
    ClientDnsLookup,
}

impl ConfigKey {
    /// 全部配置键
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::BootstrapServers,
        ConfigKey::GroupId,
        ConfigKey::MaxPollRecords,
        ConfigKey::MaxPollIntervalMs,
        ConfigKey::SessionTimeoutMs,
        ConfigKey::HeartbeatIntervalMs,
        ConfigKey::ClientDnsLookup,
    ];

    /// Kafka 属性名
    pub fn property_name(&self) -> &'static str {
        match self {
            ConfigKey::BootstrapServers => "bootstrap.servers",
            ConfigKey::GroupId => "group.id",
            ConfigKey::MaxPollRecords => "max.poll.records",
            ConfigKey::MaxPollIntervalMs => "max.poll.interval.ms",
            ConfigKey::SessionTimeoutMs => "session.timeout.ms",
            ConfigKey::HeartbeatIntervalMs => "heartbeat.interval.ms",
            ConfigKey::ClientDnsLookup => "client.dns.lookup",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.property_name() == s)
            .ok_or_else(|| format!("Unknown consumer config key: {}", s))
    }
}

/// 客户端 DNS 解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientDnsLookup {
    /// 使用主机名解析出的全部 IP 依次尝试
    UseAllDnsIps,
    /// 将 bootstrap 地址解析为规范名后再逐个展开
    ResolveCanonicalBootstrapServersOnly,
    /// 客户端默认行为
    #[default]
    Default,
}

impl ClientDnsLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientDnsLookup::UseAllDnsIps => "use_all_dns_ips",
            ClientDnsLookup::ResolveCanonicalBootstrapServersOnly => {
                "resolve_canonical_bootstrap_servers_only"
            }
            ClientDnsLookup::Default => "default",
        }
    }
}

impl fmt::Display for ClientDnsLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientDnsLookup {
    type Err = ConsumerError;

    /// 大小写不敏感，同时接受 `USE_ALL_DNS_IPS` 与 `use_all_dns_ips`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "use_all_dns_ips" => Ok(ClientDnsLookup::UseAllDnsIps),
            "resolve_canonical_bootstrap_servers_only" => {
                Ok(ClientDnsLookup::ResolveCanonicalBootstrapServersOnly)
            }
            "default" => Ok(ClientDnsLookup::Default),
            _ => Err(ConsumerError::invalid(
                ConfigKey::ClientDnsLookup,
                format!("unknown dns lookup mode '{}'", s),
            )),
        }
    }
}

/// 校验单个 bootstrap 地址（`host:port`，IPv6 主机需加方括号）
pub(crate) fn validate_address(address: &str) -> Result<(), String> {
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| format!("'{}' is not in host:port form", address))?;

    let host = match host.strip_prefix('[') {
        Some(inner) => inner
            .strip_suffix(']')
            .ok_or_else(|| format!("'{}' has an unterminated IPv6 bracket", address))?,
        None if host.contains(':') => {
            return Err(format!("'{}' must wrap IPv6 hosts in brackets", address));
        }
        None => host,
    };

    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(format!("'{}' has an invalid host", address));
    }

    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' has an invalid port", address));
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("'{}' has an invalid port", address)),
        Ok(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parses_from_property_name() {
        for key in ConfigKey::ALL {
            assert_eq!(key.property_name().parse::<ConfigKey>(), Ok(key));
        }
        assert!("fetch.min.bytes".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_dns_lookup_accepts_upper_and_lower_tokens() {
        assert_eq!(
            "USE_ALL_DNS_IPS".parse::<ClientDnsLookup>().unwrap(),
            ClientDnsLookup::UseAllDnsIps
        );
        assert_eq!(
            "resolve_canonical_bootstrap_servers_only"
                .parse::<ClientDnsLookup>()
                .unwrap(),
            ClientDnsLookup::ResolveCanonicalBootstrapServersOnly
        );
        assert_eq!(
            "DEFAULT".parse::<ClientDnsLookup>().unwrap(),
            ClientDnsLookup::Default
        );
    }

    #[test]
    fn test_dns_lookup_rejects_unknown_token() {
        let err = "round_robin".parse::<ClientDnsLookup>().unwrap_err();
        assert_eq!(err.key(), Some(ConfigKey::ClientDnsLookup));
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("host1:9092").is_ok());
        assert!(validate_address("10.0.0.1:19092").is_ok());
        assert!(validate_address("[::1]:9092").is_ok());

        assert!(validate_address("host1").is_err());
        assert!(validate_address(":9092").is_err());
        assert!(validate_address("host1:").is_err());
        assert!(validate_address("host1:0").is_err());
        assert!(validate_address("host1:70000").is_err());
        assert!(validate_address("host1:+9092").is_err());
        assert!(validate_address("host1:-1").is_err());
        assert!(validate_address("bad host:9092").is_err());
        assert!(validate_address("::1:9092").is_err());
        assert!(validate_address("[::1:9092").is_err());
    }
}
