use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub target_score: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { target_score: 8.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerConfig {
    pub min_clicks: u64,
    pub min_confidence: f64,
}

impl Default for WinnerConfig {
    fn default() -> Self {
        Self {
            min_clicks: 100,
            min_confidence: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub business_type: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            business_type: "esoteric".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub model: String,
    pub max_workers: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            timeout_ms: 30_000,
            model: "gpt-4o-mini".to_string(),
            max_workers: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub optimizer: OptimizerConfig,
    pub winner: WinnerConfig,
    pub predictor: PredictorConfig,
    pub generator: GeneratorConfig,
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(target) = env::var("ADCOPY_TARGET_SCORE") {
            if let Ok(value) = target.parse::<f64>() {
                self.optimizer.target_score = value;
            }
        }
        if let Ok(clicks) = env::var("ADCOPY_MIN_CLICKS") {
            if let Ok(value) = clicks.parse::<u64>() {
                self.winner.min_clicks = value;
            }
        }
        if let Ok(confidence) = env::var("ADCOPY_MIN_CONFIDENCE") {
            if let Ok(value) = confidence.parse::<f64>() {
                self.winner.min_confidence = value;
            }
        }
        if let Ok(business) = env::var("ADCOPY_BUSINESS_TYPE") {
            if !business.trim().is_empty() {
                self.predictor.business_type = business;
            }
        }
        if let Ok(endpoint) = env::var("ADCOPY_API_BASE") {
            if !endpoint.trim().is_empty() {
                self.generator.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("ADCOPY_GENERATOR_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.generator.timeout_ms = value;
            }
        }
        if let Ok(model) = env::var("ADCOPY_MODEL") {
            if !model.trim().is_empty() {
                self.generator.model = model;
            }
        }
        if let Ok(workers) = env::var("ADCOPY_MAX_WORKERS") {
            if let Ok(value) = workers.parse::<usize>() {
                if value > 0 {
                    self.generator.max_workers = value;
                }
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ADCOPY_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/adcopy.toml")))
}
