use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use litegen_codegen::GenerationReport;
use std::io;
use std::path::PathBuf;

pub mod config;
mod report;
pub mod run;

pub use config::{GenerateSettings, GeneratorConfig};
pub use run::{run, validate, ErrorKind, GenerateError};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "litegen")]
#[command(about = "Container code generator for litecore Go projects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover components and generate dependency-injection containers
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Project root containing go.mod (and optionally litegen.toml)
    #[arg(short, long, default_value = config::DEFAULT_PROJECT_PATH)]
    project: PathBuf,

    /// Output directory, relative to the project root [default: internal/application]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Go package name of the generated files [default: application]
    #[arg(long)]
    package: Option<String>,

    /// Config file path embedded in engine.go [default: configs/config.yaml]
    #[arg(short, long)]
    config: Option<String>,

    /// Framework module path [default: github.com/lite-lake/litecore-go]
    #[arg(long)]
    framework: Option<String>,

    /// Analyze source areas concurrently
    #[arg(long)]
    parallel: bool,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn settings(&self) -> GenerateSettings {
        GenerateSettings {
            output: self.output.clone(),
            package: self.package.clone(),
            config: self.config.clone(),
            framework: self.framework.clone(),
            parallel: self.parallel.then_some(true),
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Generate(args) => run_generate(args).await?,
    }

    Ok(())
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    match generate(&args).await {
        Ok(report) => {
            let text = if args.json {
                report::render_json(&report)?
            } else {
                report::render_summary(&report)
            };
            print_stdout(&text)
        }
        Err(err) => {
            if args.json {
                print_stdout(&report::render_json_error(err.kind(), &err.to_string())?)?;
            }
            Err(err.into())
        }
    }
}

async fn generate(args: &GenerateArgs) -> std::result::Result<GenerationReport, GenerateError> {
    run::check_path("project path", &args.project)?;
    let config = GeneratorConfig::load(&args.project, &args.settings())?;
    run(&config).await
}
