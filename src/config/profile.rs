// ==========================================
// 零售空间交互模型 - 运行方案 (Run Profile)
// ==========================================
// 格式: JSON
// 内容: 四张输入表路径 + 模型参数 + 输出目录
// 相对路径以方案文件所在目录为基准
// ==========================================

use crate::config::model_config::SimConfig;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 四张输入表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPaths {
    pub brands: PathBuf,
    pub classifications: PathBuf,
    pub zones: PathBuf,
    pub stores: PathBuf,
}

impl InputPaths {
    fn resolve_against(&mut self, base: &Path) {
        for path in [
            &mut self.brands,
            &mut self.classifications,
            &mut self.zones,
            &mut self.stores,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// 运行方案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunProfile {
    pub inputs: InputPaths,

    #[serde(default)]
    pub model: SimConfig,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

// ==========================================
// ProfileLoader
// ==========================================
pub struct ProfileLoader;

impl ProfileLoader {
    /// 读取并校验运行方案
    ///
    /// # 流程
    /// 1. 读取 JSON
    /// 2. 相对路径按方案文件目录解析
    /// 3. 应用环境变量覆写
    /// 4. 参数校验
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RunProfile, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut profile = Self::parse(&raw)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        profile.inputs.resolve_against(base);
        if let Some(out) = profile.output_dir.as_mut() {
            if out.is_relative() {
                *out = base.join(&*out);
            }
        }

        profile.model.apply_env_overrides()?;
        profile.model.validate()?;

        info!(
            profile = %path.display(),
            decay = %profile.model.decay,
            "运行方案加载完成"
        );
        Ok(profile)
    }

    /// 仅解析 JSON (不做路径解析与环境覆写)
    pub fn parse(raw: &str) -> Result<RunProfile, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}
