#![allow(dead_code)]

use texwatch::config::{
    ConfigFile, DeliverySection, InferenceSection, PredictorSection, RawConfigFile, WatchSection,
};
use texwatch::types::{OutputFormat, PredictorMode};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                watch: WatchSection::default(),
                predictor: PredictorSection {
                    mode: PredictorMode::Worker,
                    program: "texteller-worker".to_string(),
                    args: Vec::new(),
                    startup_timeout: "300s".to_string(),
                    warmup: false,
                },
                inference: InferenceSection::default(),
                delivery: DeliverySection::default(),
            },
        }
    }

    pub fn target(mut self, target: &str) -> Self {
        self.config.watch.target = target.to_string();
        self
    }

    pub fn debounce(mut self, debounce: &str) -> Self {
        self.config.watch.debounce = debounce.to_string();
        self
    }

    pub fn mode(mut self, mode: PredictorMode) -> Self {
        self.config.predictor.mode = mode;
        self
    }

    pub fn program(mut self, program: &str) -> Self {
        self.config.predictor.program = program.to_string();
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.config.predictor.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn startup_timeout(mut self, timeout: &str) -> Self {
        self.config.predictor.startup_timeout = timeout.to_string();
        self
    }

    pub fn warmup(mut self, val: bool) -> Self {
        self.config.predictor.warmup = val;
        self
    }

    pub fn out_format(mut self, format: OutputFormat) -> Self {
        self.config.inference.out_format = format;
        self
    }

    pub fn num_beams(mut self, beams: u32) -> Self {
        self.config.inference.num_beams = beams;
        self
    }

    pub fn clipboard(mut self, val: bool) -> Self {
        self.config.delivery.clipboard = val;
        self
    }

    pub fn clipboard_command(mut self, argv: &[&str]) -> Self {
        self.config.delivery.clipboard_command = Some(argv.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn notifications(mut self, val: bool) -> Self {
        self.config.delivery.notifications = val;
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
