//! Kafka 消费者构建器集成测试
//!
//! 只使用公开 API；工厂由记录型假实现代替，不需要运行中的 Kafka。
//! 设置 `RUST_LOG=debug` 可以看到每个配置项的写入日志。

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;

use flare_kafka_consumer::{
    ClientDnsLookup, ConfigKey, ConsumerConfig, ConsumerError, ConsumerFactory, ConsumerSettings,
    ErrorCode, KafkaConsumerBuilder, Result,
};

/// 初始化测试日志（多次调用安全）
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 记录收到的配置，并像真实工厂一样要求 bootstrap 地址
#[derive(Default)]
struct RecordingFactory {
    received: RefCell<Vec<ConsumerConfig>>,
}

impl ConsumerFactory for RecordingFactory {
    type Consumer = BTreeMap<&'static str, String>;

    fn create(&self, config: &ConsumerConfig) -> Result<Self::Consumer> {
        self.received.borrow_mut().push(config.clone());
        if config.bootstrap_servers().is_none() {
            return Err(ConsumerError::incomplete(ConfigKey::BootstrapServers));
        }
        Ok(config.properties())
    }
}

#[test]
fn test_end_to_end_three_options() {
    init_tracing();

    let mut builder = KafkaConsumerBuilder::new();
    builder
        .with_bootstrap_servers(["host1:9092", "host2:9092"])
        .unwrap()
        .with_group_id_config("g1")
        .unwrap()
        .with_max_poll_records(500)
        .unwrap();

    let factory = RecordingFactory::default();
    let properties = builder.build_with(&factory).unwrap();

    let expected: BTreeMap<&'static str, String> = [
        ("bootstrap.servers", "host1:9092,host2:9092".to_string()),
        ("group.id", "g1".to_string()),
        ("max.poll.records", "500".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(properties, expected);

    let received = factory.received.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].keys(),
        vec![
            ConfigKey::BootstrapServers,
            ConfigKey::GroupId,
            ConfigKey::MaxPollRecords
        ]
    );
    assert_eq!(
        received[0].bootstrap_servers(),
        Some(&["host1:9092".to_string(), "host2:9092".to_string()][..])
    );
}

#[test]
fn test_build_without_bootstrap_is_incomplete() {
    init_tracing();

    let mut builder = KafkaConsumerBuilder::new();
    builder.with_group_id("g1").unwrap();

    let err = builder.build_with(RecordingFactory::default()).unwrap_err();
    assert!(matches!(
        err,
        ConsumerError::IncompleteConfig {
            key: ConfigKey::BootstrapServers
        }
    ));
    assert_eq!(err.code(), ErrorCode::ConfigurationError);
}

#[test]
fn test_invalid_poll_records_leaves_other_options() {
    init_tracing();

    let mut builder = KafkaConsumerBuilder::new();
    builder
        .with_bootstrap_servers(["host1:9092"])
        .unwrap()
        .with_max_poll_records(50)
        .unwrap();
    let before = builder.config().clone();

    let err = builder.with_max_poll_records(-10).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
    assert_eq!(builder.config(), &before);
}

#[test]
fn test_full_option_set_with_permissive_heartbeat() {
    init_tracing();

    let mut builder = KafkaConsumerBuilder::new();
    builder
        .with_bootstrap_servers(["broker:9092"])
        .unwrap()
        .with_group_id("analytics")
        .unwrap()
        .with_max_poll_records(100)
        .unwrap()
        .with_max_poll_interval_ms(300_000)
        .unwrap()
        .with_session_timeout_ms(10_000)
        .unwrap()
        .with_heartbeat_interval_ms(20_000)
        .unwrap()
        .with_client_dns_lookup("USE_ALL_DNS_IPS".parse().unwrap())
        .unwrap();

    let properties = builder.build_with(RecordingFactory::default()).unwrap();
    assert_eq!(properties.len(), 7);
    assert_eq!(properties["heartbeat.interval.ms"], "20000");
    assert_eq!(properties["session.timeout.ms"], "10000");
    assert_eq!(properties["client.dns.lookup"], "use_all_dns_ips");
}

#[test]
fn test_builder_from_config_file() {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
bootstrap_servers = ["host1:9092", "host2:9092"]
group_id = "g1"
max_poll_interval_ms = 600000
client_dns_lookup = "resolve_canonical_bootstrap_servers_only"
"#
    )
    .unwrap();

    let settings = ConsumerSettings::load_from_file(file.path()).unwrap();
    let builder = KafkaConsumerBuilder::from_settings(&settings).unwrap();
    let config = builder.config();

    assert_eq!(config.group_id(), Some("g1"));
    assert_eq!(config.max_poll_interval_ms(), Some(600_000));
    assert_eq!(
        config.client_dns_lookup(),
        Some(ClientDnsLookup::ResolveCanonicalBootstrapServersOnly)
    );
    assert_eq!(config.to_settings(), settings);
}

#[test]
fn test_config_file_with_bad_address_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consumer.toml");
    std::fs::write(&path, "bootstrap_servers = [\"no-port\"]\n").unwrap();

    let settings = ConsumerSettings::load_from_file(&path).unwrap();
    let err = KafkaConsumerBuilder::from_settings(&settings).unwrap_err();
    assert_eq!(err.key(), Some(ConfigKey::BootstrapServers));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConsumerSettings::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConsumerError::Io(_)));
}

#[cfg(feature = "kafka")]
mod rdkafka_build {
    use super::*;

    #[test]
    fn test_build_without_bootstrap_fails_in_factory() {
        init_tracing();

        let mut builder = KafkaConsumerBuilder::new();
        builder.with_group_id("g1").unwrap();

        let err = builder.build().err().unwrap();
        assert!(matches!(
            err,
            ConsumerError::IncompleteConfig {
                key: ConfigKey::BootstrapServers
            }
        ));
    }
}
