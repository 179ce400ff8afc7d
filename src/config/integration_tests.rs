// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::backends::stub::{AddOne, Collector, Counter, Generator, Multiply};
    use crate::config::{load_and_validate_config, load_config, RuntimeBuilder, StageRegistry};
    use crate::errors::ConfigError;
    use crate::pipeline::StageKind;

    fn registry(counter: &Counter, collector: &Collector) -> StageRegistry<u64> {
        let mut registry = StageRegistry::new();
        registry.register_source("generator", Generator::new(50));
        registry.register_transform("multiply", Multiply::new(3));
        registry.register_transform("add_one", AddOne);
        registry.register_sink("counter", counter.clone());
        registry.register_sink("collector", collector.clone());
        registry
    }

    /// Test that the sample YAML configuration loads with its defaults applied
    #[test]
    fn test_numbers_yaml_loading() {
        let config = load_and_validate_config("configs/numbers.yaml").unwrap();

        assert_eq!(config.name, "numbers");
        assert_eq!(config.conduit_capacity, 1);
        assert_eq!(config.source.workers, 2);
        assert_eq!(config.pipes.len(), 2);
        assert_eq!(config.pipes[1].label(), "increment");
        assert_eq!(config.sinks.stage, "counter");
    }

    /// Test that the sample TOML configuration loads
    #[test]
    fn test_fan_out_toml_loading() {
        let config = load_and_validate_config("configs/fan-out.toml").unwrap();

        assert_eq!(config.name, "fan-out");
        assert_eq!(config.conduit_capacity, 4);
        let kinds: Vec<StageKind> = config.layers().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![StageKind::Source, StageKind::Transform, StageKind::Sink]
        );
    }

    /// Test that a broken configuration reports every structural problem together
    #[test]
    fn test_invalid_config_reports_all_problems() {
        match load_and_validate_config("configs/invalid.yaml") {
            Err(ConfigError::Invalid(problems)) => {
                assert_eq!(problems.len(), 2);
                assert!(problems
                    .iter()
                    .any(|problem| matches!(problem, ConfigError::ZeroCapacity)));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    /// Test that resolution also flags unknown stages once the structure is parsed
    #[test]
    fn test_invalid_config_unknown_stage_at_build() {
        let cfg = load_config("configs/invalid.yaml").unwrap();
        let registry = registry(&Counter::new(), &Collector::new());

        match RuntimeBuilder::from_config(&cfg, &registry) {
            Err(ConfigError::Invalid(problems)) => {
                assert_eq!(problems.len(), 3);
                assert!(problems.iter().any(|problem| matches!(
                    problem,
                    ConfigError::UnknownStage { stage, .. } if stage == "frobnicate"
                )));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    /// Test that a YAML-described pipeline runs end to end
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_numbers_yaml_pipeline_runs() {
        let counter = Counter::new();
        let collector = Collector::new();
        let registry = registry(&counter, &collector);

        let pipeline = RuntimeBuilder::from_file("configs/numbers.yaml", &registry).unwrap();
        assert_eq!(pipeline.name(), "numbers");
        assert_eq!(pipeline.worker_count(), 11);

        let report = pipeline.up().wait().await.unwrap();

        // Two generator workers, fifty items each.
        assert_eq!(counter.count(), 100);
        assert_eq!(report.items_into_sinks(), 100);
    }

    /// Test that a TOML-described fan-out pipeline delivers every value once
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_fan_out_toml_pipeline_runs() {
        let counter = Counter::new();
        let collector = Collector::new();
        let registry = registry(&counter, &collector);

        let pipeline = RuntimeBuilder::from_file("configs/fan-out.toml", &registry).unwrap();
        pipeline.up().wait().await.unwrap();

        let mut expected: Vec<u64> = (0..50).map(|i| i % 10 + 1).collect();
        expected.sort_unstable();
        assert_eq!(collector.sorted().await, expected);
        assert_eq!(counter.count(), 0);
    }
}
