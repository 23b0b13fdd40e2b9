//! 仿真配置
//!
//! 控制积分频率与报文发布行为，支持从 TOML 文件加载。
//!
//! # Example
//!
//! ```
//! use yumi_sim::SimConfig;
//!
//! // 默认配置（250 Hz，队列深度 1，不限 tick 数）
//! let config = SimConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // 自定义配置
//! let config = SimConfig {
//!     update_rate_hz: 500.0,
//!     channel_capacity: 8,
//!     max_ticks: Some(1000),
//! };
//! ```

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// 仿真配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 积分与发布频率（Hz），默认 250（周期 4 ms）
    pub update_rate_hz: f64,

    /// 报文通道深度，默认 1（最新报文优先，慢消费者只会丢旧数据，
    /// 永远不会阻塞 tick 线程）
    pub channel_capacity: usize,

    /// 最大 tick 数（`None` 表示一直运行直到 stop）
    ///
    /// 用于测试或定时运行。
    pub max_ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            update_rate_hz: 250.0,
            channel_capacity: 1,
            max_ticks: None,
        }
    }
}

impl SimConfig {
    /// 积分步长 dt（秒）
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / self.update_rate_hz
    }

    /// 标称周期
    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(self.dt())
    }

    /// 校验配置
    ///
    /// # Errors
    ///
    /// 频率非正或非有限、通道深度为 0 时返回 [`SimError::Config`]。
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.update_rate_hz.is_finite() || self.update_rate_hz <= 0.0 {
            return Err(SimError::Config(format!(
                "Invalid update_rate_hz: {} (must be > 0)",
                self.update_rate_hz
            )));
        }
        if self.update_rate_hz > 10_000.0 {
            warn!(
                "Very high update rate: {} Hz. This may cause timing issues.",
                self.update_rate_hz
            );
        }
        if self.channel_capacity == 0 {
            return Err(SimError::Config(
                "Invalid channel_capacity: 0 (must be >= 1)".to_string(),
            ));
        }
        Ok(())
    }

    /// 从 TOML 文件加载并校验
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SimError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.update_rate_hz, 250.0);
        assert_eq!(config.channel_capacity, 1);
        assert_eq!(config.max_ticks, None);
        assert!((config.dt() - 0.004).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        let mut config = SimConfig::default();
        config.update_rate_hz = 0.0;
        assert!(config.validate().is_err());

        config.update_rate_hz = -250.0;
        assert!(config.validate().is_err());

        config.update_rate_hz = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = SimConfig {
            channel_capacity: 0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_toml_roundtrip_with_defaults() {
        // 缺省字段回落到默认值
        let config: SimConfig = toml::from_str("update_rate_hz = 500.0").unwrap();
        assert_eq!(config.update_rate_hz, 500.0);
        assert_eq!(config.channel_capacity, 1);

        let full: SimConfig = toml::from_str(
            "update_rate_hz = 100.0\nchannel_capacity = 4\nmax_ticks = 250\n",
        )
        .unwrap();
        assert_eq!(full.max_ticks, Some(250));
    }
}
