//! formsense CLI - form-field synthesis from OCR block graphs

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use formsense::{parse_blocks_file, ElementType, Formsense, FormsenseAnalysis, JsonFormat};

#[derive(Parser)]
#[command(name = "formsense")]
#[command(version)]
#[command(about = "Synthesize form fields from an OCR block-graph export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize generated form fields
    Fields {
        #[command(flatten)]
        input: AnalyzeArgs,
    },

    /// Emit the normalized form elements
    Elements {
        #[command(flatten)]
        input: AnalyzeArgs,
    },

    /// Emit the reconstructed tables
    Tables {
        #[command(flatten)]
        input: AnalyzeArgs,
    },

    /// Show a summary of the analyzed page
    Info {
        /// Input block-graph JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Input block-graph JSON file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Display language for label translation (e.g. "es")
    #[arg(long, value_name = "LANG")]
    language: Option<String>,

    /// Page pixel size for spatial thresholds, as WIDTHxHEIGHT
    /// (e.g. "1700x2200"); omit for provider-faithful normalized units
    #[arg(long, value_name = "WxH")]
    page_size: Option<String>,
}

impl AnalyzeArgs {
    fn analyze(&self) -> Result<FormsenseAnalysis, String> {
        let mut builder = Formsense::new();
        if let Some(language) = &self.language {
            builder = builder.with_display_language(language);
        }
        if let Some(spec) = &self.page_size {
            let (w, h) = parse_page_size(spec)?;
            log::debug!("Using reference page size {}x{}", w, h);
            builder = builder.with_reference_page(w, h);
        }
        builder
            .analyze_file(&self.input)
            .map_err(|e| e.to_string())
    }

    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }

    fn write(&self, content: &str) -> Result<(), String> {
        match &self.output {
            Some(path) => {
                fs::write(path, content).map_err(|e| format!("write {}: {}", path.display(), e))?;
                eprintln!("{} {}", "Wrote".green(), path.display());
                Ok(())
            }
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}

fn parse_page_size(spec: &str) -> Result<(f32, f32), String> {
    let (w, h) = spec
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid page size '{}', expected WIDTHxHEIGHT", spec))?;
    let width: f32 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let height: f32 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    Ok((width, height))
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Fields { input } => {
            let analysis = input.analyze()?;
            let json = formsense::to_json(&analysis.fields(), input.format())
                .map_err(|e| e.to_string())?;
            input.write(&json)
        }
        Commands::Elements { input } => {
            let analysis = input.analyze()?;
            let json = formsense::to_json(&analysis.elements(), input.format())
                .map_err(|e| e.to_string())?;
            input.write(&json)
        }
        Commands::Tables { input } => {
            let analysis = input.analyze()?;
            let json = formsense::to_json(&analysis.tables(), input.format())
                .map_err(|e| e.to_string())?;
            input.write(&json)
        }
        Commands::Info { input } => {
            let blocks = parse_blocks_file(&input).map_err(|e| e.to_string())?;
            let analysis = Formsense::new()
                .analyze_blocks(&blocks)
                .map_err(|e| e.to_string())?;
            print_info(&input, blocks.len(), &analysis);
            Ok(())
        }
    }
}

fn print_info(path: &PathBuf, block_count: usize, analysis: &FormsenseAnalysis) {
    let checkbox_count = analysis
        .elements()
        .iter()
        .filter(|e| e.element_type == ElementType::Checkbox)
        .count();
    let phi_count = analysis.fields().iter().filter(|f| f.is_phi_field).count();

    println!("{}", path.display().to_string().bold());
    println!("  {} {}", "Blocks:".cyan(), block_count);
    println!("  {} {}", "Elements:".cyan(), analysis.elements().len());
    println!("  {} {}", "Tables:".cyan(), analysis.tables().len());
    println!("  {} {}", "Checkboxes:".cyan(), checkbox_count);
    println!("  {} {}", "Fields:".cyan(), analysis.fields().len());
    println!("  {} {}", "Sections:".cyan(), analysis.sections().len());
    println!("  {} {}", "PHI fields:".cyan(), phi_count);
    let confidence = analysis.page.average_confidence;
    let rendered = format!("{:.1}%", confidence);
    let colored = if confidence < 80.0 {
        rendered.yellow()
    } else {
        rendered.green()
    };
    println!("  {} {}", "Avg confidence:".cyan(), colored);
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }
}
