use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::SortKey;
use crate::error::{Error, Result};

/// 运行配置（`config.toml`）
///
/// 缺省位置：`$XDG_CONFIG_HOME/cv-index/config.toml`；文件不存在时全部取默认值。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 简历文档目录
    pub docs_dir: PathBuf,
    /// 文件名通配（wildmatch 语法），命中任一即收录
    pub file_patterns: Vec<String>,
    /// 建树排序键
    pub sort_by: SortKey,
    /// 目录递归深度上限（None = 不限）
    pub max_depth: Option<usize>,
    /// 是否跳过隐藏文件
    pub skip_hidden: bool,
    /// 抽取并行度
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            file_patterns: vec!["*.docx".to_string(), "*.txt".to_string()],
            sort_by: SortKey::Id,
            max_depth: None,
            skip_hidden: true,
            threads: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cv-index").join("config.toml"))
    }

    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// 显式路径必须存在；未指定时尝试缺省位置，不存在则用默认值
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
