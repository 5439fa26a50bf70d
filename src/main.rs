use clap::{Parser, Subcommand};
use snipe_core::{AnalysisEngine, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snipe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Repository-aware static analysis for C and scripted sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a workspace and persist a fresh repository symbol index
    Refresh {
        /// Workspace root to scan
        path: PathBuf,
    },

    /// Analyze a file's current contents against the repository index
    Analyze {
        /// Workspace root the file belongs to
        #[arg(long)]
        workspace: PathBuf,

        /// File to analyze; its contents are read from disk
        path: PathBuf,
    },

    /// List repository symbols sharing a name
    Symbols {
        #[arg(long)]
        workspace: PathBuf,

        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    snipe_core::logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Refresh { path } => {
            let settings = Settings::load(&path)?;
            let engine = AnalysisEngine::new(settings);
            engine.refresh(&path)?;
            println!("refreshed index for {}", path.display());
        }
        Commands::Analyze { workspace, path } => {
            let settings = Settings::load(&workspace)?;
            let engine = AnalysisEngine::new(settings);
            engine.refresh(&workspace)?;

            let content = std::fs::read_to_string(&path)?;
            let rel = path.strip_prefix(&workspace).unwrap_or(&path);
            let diagnostics = engine.analyze(&rel.to_string_lossy(), &content)?;

            for d in diagnostics {
                println!("{}:{}: {}: [{}] {}", d.file, d.line, d.severity, d.code, d.message);
            }
        }
        Commands::Symbols { workspace, name } => {
            let settings = Settings::load(&workspace)?;
            let engine = AnalysisEngine::new(settings);
            engine.refresh(&workspace)?;

            for symbol in engine.get_symbols(&name) {
                println!("{}:{} {:?} {}", symbol.file_path, symbol.line, symbol.kind, symbol.name);
            }
        }
    }

    Ok(())
}
