use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chart_regen::prelude::*;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chart-regen")]
#[command(about = "Regenerate chart artifacts from generator scripts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single generator script
    Run {
        /// Path to the generator script
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Interpreter to launch the script with
        #[arg(short, long, default_value = "python3")]
        interpreter: String,

        /// Time budget in seconds
        #[arg(short, long, default_value_t = 60)]
        timeout: u64,

        /// Expected artifact file name next to the script
        #[arg(short, long)]
        artifact: Option<String>,
    },

    /// Run every generator script under a directory
    RunDir {
        /// Root of the tree to scan
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Path to runner.yaml config file (default: <DIR>/runner.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scripts to run at once (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Per-script timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Directory names to exclude from discovery (adds to config)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Only run scripts whose path contains this substring
        #[arg(short = 'F', long)]
        filter: Option<String>,

        /// Also print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List generator scripts under a directory without running them
    List {
        /// Root of the tree to scan
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Path to runner.yaml config file (default: <DIR>/runner.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "chart_regen=debug"
    } else {
        "chart_regen=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "Runner failed");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Run {
            file,
            interpreter,
            timeout,
            artifact,
        } => run_single(file, interpreter, timeout, artifact).await,
        Commands::RunDir {
            dir,
            config,
            workers,
            timeout,
            exclude,
            filter,
            json,
        } => run_directory(dir, config, workers, timeout, exclude, filter, json).await,
        Commands::List { dir, config } => list_scripts(dir, config),
    }
}

fn load_config(dir: &PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<RunnerConfig> {
    let config_file = config_path.unwrap_or_else(|| dir.join(CONFIG_FILE));
    if config_file.exists() {
        println!("Using config: {}\n", config_file.display());
        Ok(RunnerConfig::load(&config_file)?)
    } else {
        Ok(RunnerConfig::default())
    }
}

async fn run_single(
    file: PathBuf,
    interpreter: String,
    timeout: u64,
    artifact: Option<String>,
) -> anyhow::Result<bool> {
    if !file.exists() {
        anyhow::bail!("Script not found: {}", file.display());
    }

    let spec = match artifact {
        Some(name) => ArtifactSpec::Fixed { name },
        None => ArtifactSpec::None,
    };
    let script = GeneratorScript::from_path(file, &spec);

    println!("Running: {}\n", script.path.display());

    let executor = ScriptExecutor::new(interpreter, Duration::from_secs(timeout));
    let report = executor.run(&script).await;

    let status = if report.outcome.is_success() {
        "✓"
    } else {
        "✗"
    };
    println!(
        "{} {} ({} ms) - {}",
        status,
        script.path.display(),
        report.duration_ms,
        report.outcome.reason()
    );

    Ok(report.outcome.is_success())
}

async fn run_directory(
    dir: PathBuf,
    config_path: Option<PathBuf>,
    workers: Option<usize>,
    timeout: Option<u64>,
    exclude: Vec<String>,
    filter: Option<String>,
    json: bool,
) -> anyhow::Result<bool> {
    if !dir.exists() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    println!("Running generators under: {}\n", dir.display());

    let mut config = load_config(&dir, config_path)?;
    if let Some(w) = workers {
        config.workers = w;
    }
    if let Some(t) = timeout {
        config.timeout_secs = t;
    }
    config.exclude.extend(exclude);

    let mut runner = BatchRunner::with_config(&dir, config).on_report(|report, done, total| {
        let status = if report.outcome.is_success() {
            "✓"
        } else {
            "✗"
        };
        println!(
            "[{}/{}] {} {} ({} ms) - {}",
            done,
            total,
            status,
            report.script.path.display(),
            report.duration_ms,
            report.outcome.reason()
        );
    });

    if let Some(needle) = filter {
        runner = runner.filter(move |path| path.contains(&needle));
    }

    // Ctrl-C stops launching new scripts; the in-flight ones finish or
    // time out.
    let cancel = runner.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupt received; finishing in-flight scripts");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let summary = runner.run().await?;

    println!("\n=== Summary ===\n");
    println!(
        "Total: {}  Succeeded: {}  Failed: {}",
        summary.total(),
        summary.succeeded(),
        summary.failed()
    );

    // Failing scripts are repeated last, after the tally.
    if summary.failed() > 0 {
        println!("\nFailures:");
        for report in summary.failures() {
            println!(
                "  ✗ {} - {}",
                report.script.path.display(),
                report.outcome.reason()
            );
        }
    }

    if !summary.skipped.is_empty() {
        println!("\nSkipped (interrupted):");
        for path in &summary.skipped {
            println!("  - {}", path.display());
        }
    }

    println!(
        "\nOverall: {}",
        if summary.success() { "PASS" } else { "FAIL" }
    );

    if json {
        println!("\n{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(summary.success())
}

fn list_scripts(dir: PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<bool> {
    if !dir.exists() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let config = load_config(&dir, config_path)?;
    let interpreter_found = which::which(&config.interpreter).is_ok();
    let scripts = ScriptScanner::from_config(&config).scan(&dir)?;

    if scripts.is_empty() {
        println!("No generator scripts found in: {}", dir.display());
        return Ok(true);
    }

    println!("Generator scripts in {}:\n", dir.display());
    for script in &scripts {
        match &script.artifact {
            Some(artifact) => println!(
                "  {} -> {}",
                script.relative_to(&dir).display(),
                artifact
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| artifact.display().to_string())
            ),
            None => println!("  {}", script.relative_to(&dir).display()),
        }
    }
    println!("\n{} scripts", scripts.len());

    if !interpreter_found {
        println!(
            "\nWarning: interpreter '{}' not found on PATH",
            config.interpreter
        );
    }

    Ok(true)
}
