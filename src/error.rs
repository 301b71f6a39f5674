use std::path::PathBuf;

/// 外围层（配置 / 抽取）错误；AVL 核心本身不产生错误
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("docx container {path:?}: {source}")]
    Docx {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("docx body {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("documents root {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
