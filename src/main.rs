use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use cv_index::config::Config;
use cv_index::query::{to_rows, DisplayRow, Query};
use cv_index::stats::IndexReport;
use cv_index::{extract, SharedIndex, SortKey, Traversal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cv-index", version, about = "Sort and search CV documents with an AVL index")]
struct Cli {
    /// 配置文件（缺省：$XDG_CONFIG_HOME/cv-index/config.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 简历文档目录（覆盖配置）
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// 建树排序键（覆盖配置）
    #[arg(long, value_enum, global = true)]
    sort: Option<SortKey>,

    /// 以 JSON 输出
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出全部记录
    List {
        #[arg(long, value_enum, default_value_t = Traversal::InOrder)]
        order: Traversal,
    },
    /// 按学号或姓名查找；空串列出全部记录
    #[command(group(ArgGroup::new("by").required(true).args(["id", "name"])))]
    Search {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// 姓名模糊匹配
        #[arg(long, requires = "name")]
        fuzzy: bool,
    },
    /// 输出索引结构报告
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = Config::load_or_default(cli.config.as_deref()).context("loading config")?;
    if let Some(dir) = cli.dir {
        cfg.docs_dir = dir;
    }
    if let Some(sort) = cli.sort {
        cfg.sort_by = sort;
    }

    let records = extract::load_records(&cfg)
        .with_context(|| format!("extracting CVs from {:?}", cfg.docs_dir))?;
    let shared = SharedIndex::empty(cfg.sort_by);
    let index = shared.rebuild(cfg.sort_by, records);

    let query = match cli.command {
        Command::Stats => {
            let report = IndexReport::collect(&index);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            return Ok(());
        }
        Command::List { order } => Query::All(order),
        Command::Search { id: Some(id), .. } => Query::from_search(&id, SortKey::Id, false),
        Command::Search {
            name: Some(name),
            fuzzy,
            ..
        } => Query::from_search(&name, SortKey::Name, fuzzy),
        Command::Search { .. } => anyhow::bail!("search needs --id or --name"),
    };

    let rows = to_rows(&query.run(&index));
    info!("{} rows", rows.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&rows);
    }
    Ok(())
}

fn print_table(rows: &[DisplayRow]) {
    let mut widths = DisplayRow::HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    print_line(&DisplayRow::HEADERS, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    print_line(&rule.each_ref().map(String::as_str), &widths);
    for row in rows {
        print_line(&row.cells(), &widths);
    }
}

fn print_line(cells: &[&str; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    println!("{}", padded.join("  ").trim_end());
}
