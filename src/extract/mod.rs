pub mod docx;
pub mod fields;

pub use fields::FieldParser;

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use wildmatch::WildMatch;

use crate::config::Config;
use crate::core::Record;
use crate::error::{Error, Result};

/// 扫描文档目录，返回匹配任一文件名通配的普通文件（按路径排序，保证抽取顺序确定）
pub fn scan_documents(root: &Path, cfg: &Config) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    // 文件名大小写不敏感：CV.DOCX 与 cv.docx 同等对待
    let patterns: Vec<WildMatch> = cfg
        .file_patterns
        .iter()
        .map(|p| WildMatch::new(&p.to_lowercase()))
        .collect();

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .max_depth(cfg.max_depth)
        .hidden(cfg.skip_hidden)
        .ignore(false)
        .git_ignore(false)
        .parents(false)
        .build()
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("scan: skip entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_lowercase();
            patterns.iter().any(|w| w.matches(&name))
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    tracing::info!("Found {} documents under {:?}", files.len(), root);
    Ok(files)
}

/// 并行抽取记录；读不了的文件记 warn 后跳过，输出顺序与输入一致
pub fn extract_records(files: &[PathBuf], threads: usize) -> Result<Vec<Record>> {
    let parser = FieldParser::new()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()?;

    let records: Vec<Record> = pool.install(|| {
        files
            .par_iter()
            .filter_map(|path| match parser.parse_file(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    None
                }
            })
            .collect()
    });

    tracing::debug!("Extracted {} of {} documents", records.len(), files.len());
    Ok(records)
}

/// 扫描 + 抽取
pub fn load_records(cfg: &Config) -> Result<Vec<Record>> {
    let files = scan_documents(&cfg.docs_dir, cfg)?;
    extract_records(&files, cfg.threads)
}
