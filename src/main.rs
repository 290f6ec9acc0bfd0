use clap::{Parser, Subcommand};
use fragmat::{
    AccessibilityReport, Config, FragError, MaterialReport, MaterialSource, Model,
    ReportFormat, SchemaLayout, resolve, write_report_file,
};
use fragmat_parser::LoadOptions;
use log::{debug, error, info};
use owo_colors::{OwoColorize, Stream};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fragmat", version, about = "Best-effort material extraction from fragments model files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode: suppress explanatory output, show only raw results
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    /// Memory-map model files instead of reading them into memory
    #[arg(long, global = true)]
    mmap: bool,

    /// Field id of the meshes table in the root Model table
    #[arg(long = "meshes-field", global = true)]
    meshes_field: Option<u16>,

    /// Field id of the materials vector in the Meshes table
    #[arg(long = "materials-field", global = true)]
    materials_field: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export information for every material in a model
    Report {
        #[arg(index = 1)]
        file: PathBuf,
        /// Write the report to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Append the structure analysis
        #[arg(long)]
        analyze: bool,
    },
    /// Resolve a single material index
    Material {
        #[arg(index = 1)]
        file: PathBuf,
        #[arg(index = 2)]
        index: usize,
        #[arg(long)]
        json: bool,
    },
    /// Probe which materials decode and describe the pattern
    Analyze {
        #[arg(index = 1)]
        file: PathBuf,
        /// Number of leading materials to probe
        #[arg(long)]
        sample: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print the material schema this reader understands
    Schema,
}

/// Output handler that respects quiet mode
struct OutputHandler {
    quiet: bool,
}

impl OutputHandler {
    fn print_info(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    fn print_result(&self, text: &str) {
        println!("{text}");
    }
}

fn main() {
    if let Err(e) = run_main() {
        error!("{}", e.user_message());
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .format(|buf, record| {
            let level = record.level();
            let label = level.as_str();
            let styled = match level {
                log::Level::Error => label.if_supports_color(Stream::Stderr, |t| t.red()).to_string(),
                log::Level::Warn => label.if_supports_color(Stream::Stderr, |t| t.yellow()).to_string(),
                log::Level::Info => label.if_supports_color(Stream::Stderr, |t| t.green()).to_string(),
                log::Level::Debug => label.if_supports_color(Stream::Stderr, |t| t.cyan()).to_string(),
                log::Level::Trace => label.if_supports_color(Stream::Stderr, |t| t.magenta()).to_string(),
            };
            writeln!(buf, "[{}] {}", styled, record.args())
        })
        .init();
}

fn load_model(path: &Path, config: &Config) -> Result<Model, FragError> {
    debug!("loading {} (mmap: {})", path.display(), config.load.prefer_mmap);
    let model = Model::open(path, &config.load)?;
    info!(
        "loaded {} bytes ({}), {} materials",
        model.byte_len(),
        if model.is_mapped() { "mapped" } else { "in memory" },
        model.material_count()
    );
    Ok(model)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, FragError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| FragError::cli_output_format(format!("Failed to serialize output: {e}")))
}

fn run_main() -> Result<(), FragError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let layout = Config::layout_from(cli.meshes_field, cli.materials_field)?;
    let mut config = Config {
        quiet: cli.quiet,
        load: LoadOptions::default().with_mmap(cli.mmap).with_layout(layout),
        ..Config::default()
    };

    let output = OutputHandler {
        quiet: config.quiet,
    };

    match cli.command {
        Commands::Report {
            file,
            output: out_path,
            format,
            analyze,
        } => {
            config.format = format;
            config.analyze = analyze;
            let config = config.validate();
            let model = load_model(&file, &config)?;
            let report = MaterialReport::collect(&model, config.analyze.then_some(&config.analysis));
            match out_path {
                Some(path) => {
                    write_report_file(&path, &report, config.format)
                        .map_err(|e| e.with_command("report"))?;
                    output.print_info(&format!(
                        "Material information successfully exported to: {}",
                        path.display()
                            .if_supports_color(Stream::Stdout, |t| t.bold())
                    ));
                }
                None => {
                    let stdout = io::stdout();
                    let mut lock = stdout.lock();
                    report.write(config.format, &mut lock)?;
                }
            }
        }
        Commands::Material { file, index, json } => {
            let model = load_model(&file, &config.validate())?;
            let info = resolve(&model, index);
            if json {
                output.print_result(&to_json(&info)?);
            } else {
                output.print_result(info.to_string().trim_end());
            }
        }
        Commands::Analyze { file, sample, json } => {
            if let Some(sample) = sample {
                config = config.with_sample_limit(sample)?;
            }
            let config = config.validate();
            let model = load_model(&file, &config)?;
            let report = AccessibilityReport::analyze_with_options(&model, &config.analysis);
            if json {
                output.print_result(&to_json(&report)?);
            } else {
                output.print_result(report.to_string().trim_end());
            }
        }
        Commands::Schema => {
            let layout: SchemaLayout = config.load.layout;
            output.print_result(layout.describe().trim_end());
        }
    }

    Ok(())
}
