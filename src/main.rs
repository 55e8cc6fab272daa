use clap::{Parser, Subcommand};
use quillpost::{build, check, config, init};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quillpost", about = "Markdown 博客静态站点生成器", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 构建静态站点
    Build {
        /// 构建前清空输出目录
        #[arg(long)]
        clean: bool,

        /// 项目根目录（默认当前目录）
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// 检查项目完整性
    Check {
        /// 项目根目录（默认当前目录）
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// 创建项目骨架
    Init {
        /// 项目根目录（默认当前目录）
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 使用配置中的日志级别作为默认值，RUST_LOG 优先
    let root = match &cli.command {
        Commands::Build { root, .. } | Commands::Check { root } | Commands::Init { root } => root,
    };
    let default_level = config::SiteConfig::load(root)
        .ok()
        .map(|c| c.build.log_level);
    let default_level = default_level.as_deref().unwrap_or("info");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Build { clean, root } => {
            let root = root.canonicalize()?;
            let site_config = config::SiteConfig::load(&root)?;
            build::run(&root, &site_config, build::BuildParams { clean })?;
        }
        Commands::Check { root } => {
            let root = root.canonicalize()?;
            let result = check::run(&root)?;

            for w in &result.warnings {
                tracing::warn!("{w}");
            }
            for e in &result.errors {
                tracing::error!("{e}");
            }

            if result.errors.is_empty() {
                tracing::info!("检查通过（{} 个警告）", result.warnings.len());
            } else {
                anyhow::bail!(
                    "检查未通过：{} 个错误，{} 个警告",
                    result.errors.len(),
                    result.warnings.len()
                );
            }
        }
        Commands::Init { root } => {
            std::fs::create_dir_all(&root)?;
            if init::ensure_initialized(&root)? {
                tracing::info!("已初始化项目：{}", root.display());
            } else {
                tracing::info!("项目已存在，跳过初始化");
            }
        }
    }

    Ok(())
}
