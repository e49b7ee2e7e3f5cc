// Command-line front end: summarize one document, or every document in a directory.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use walkdir::WalkDir;

use summary_bot::loader::SUPPORTED_EXTENSIONS;
use summary_bot::nlp::{Abstractor, OllamaAbstractor, Passthrough, WordListDictionary};
use summary_bot::{FileLoader, Method, Summarizer, SummarizerConfig, Summary};

#[derive(Parser)]
#[command(name = "summary-bot", about = "Summarize PDF and text documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Summarize {
        #[arg(short, long)]
        file: PathBuf,
        /// Write the summary here instead of printing it.
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the summary and pipeline statistics as JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        /// Defaults to the input directory.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct PipelineArgs {
    #[arg(long, value_enum, default_value_t = MethodArg::Frequency)]
    method: MethodArg,
    /// Ollama model (e.g. gemma3:4b). If omitted the app will probe for a fast model.
    #[arg(short = 'm', long = "model")]
    model: Option<String>,
    /// Skip the model and keep the extracted sentences, cut to --max-length words.
    #[arg(long)]
    offline: bool,
    /// JSON file with pipeline settings; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short = 'n', long)]
    num_sentences: Option<usize>,
    #[arg(long)]
    min_length: Option<usize>,
    #[arg(long)]
    max_length: Option<usize>,
    #[arg(short, long)]
    workers: Option<usize>,
    /// Word list for fused-word correction, most frequent word first.
    #[arg(long)]
    dictionary: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MethodArg {
    Frequency,
    Direct,
    Lsa,
}

impl From<MethodArg> for Method {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Frequency => Method::Frequency,
            MethodArg::Direct => Method::Direct,
            MethodArg::Lsa => Method::Lsa,
        }
    }
}

fn build_config(args: &PipelineArgs) -> Result<SummarizerConfig> {
    let mut config = match &args.config {
        Some(path) => SummarizerConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SummarizerConfig::default(),
    };
    if let Some(n) = args.num_sentences {
        config.num_sentences = n;
    }
    if let Some(n) = args.min_length {
        config.min_length = n;
    }
    if let Some(n) = args.max_length {
        config.max_length = n;
    }
    if let Some(n) = args.workers {
        config.worker_count = n;
    }
    if let Some(p) = &args.dictionary {
        config.dictionary_path = Some(p.clone());
    }
    config.validate()?;
    Ok(config)
}

fn build_abstractor(args: &PipelineArgs) -> Box<dyn Abstractor> {
    if args.offline {
        Box::new(Passthrough)
    } else {
        Box::new(OllamaAbstractor::new(args.model.clone()))
    }
}

fn collect_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .filter(|e| !e.file_name().to_string_lossy().ends_with(".summary.txt"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn summary_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("document"));
    out_dir.join(format!("{}.summary.txt", stem))
}

fn export(summary: &Summary, path: &Path) -> Result<()> {
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    f.write_all(summary.text.as_bytes())?;
    Ok(())
}

fn print_summary(file: &Path, summary: &Summary) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(stdout, "Summary of {}", file.display())?;
    stdout.reset()?;
    if summary.text.is_empty() {
        writeln!(stdout, "(No content to summarize)")?;
    } else {
        writeln!(stdout, "{}", summary.text)?;
    }
    Ok(())
}

fn summarize_one(file: &Path, out: Option<&Path>, json: bool, args: &PipelineArgs) -> Result<()> {
    let config = build_config(args)?;
    let dictionary = WordListDictionary::global(config.dictionary_path.as_deref())?;
    let abstractor = build_abstractor(args);
    let summarizer = Summarizer::new(config, abstractor.as_ref(), dictionary)?;

    let summary = summarizer
        .summarize_file(&FileLoader, file, args.method.into())
        .with_context(|| format!("summarizing {}", file.display()))?;

    if let Some(out) = out {
        export(&summary, out)?;
        println!("Wrote summary to {}", out.display());
    } else if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(file, &summary)?;
    }
    Ok(())
}

/// Summarizes every supported file under `dir`. Returns how many failed.
fn summarize_dir(dir: &Path, out_dir: Option<&Path>, args: &PipelineArgs) -> Result<usize> {
    let config = build_config(args)?;
    let dictionary = WordListDictionary::global(config.dictionary_path.as_deref())?;
    let abstractor = build_abstractor(args);
    let summarizer = Summarizer::new(config, abstractor.as_ref(), dictionary)?;
    let out_dir = out_dir.unwrap_or(dir);
    std::fs::create_dir_all(out_dir)?;

    let files = collect_documents(dir);
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut failed = 0;
    for file in &files {
        pb.set_message(file.file_name().map(|s| s.to_string_lossy().to_string()).unwrap_or_default());
        let result = summarizer
            .summarize_file(&FileLoader, file, args.method.into())
            .map_err(anyhow::Error::from)
            .and_then(|summary| export(&summary, &summary_path(file, out_dir)));
        if let Err(e) = result {
            warn!("skipping {}: {:#}", file.display(), e);
            failed += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message("summarizing files");
    info!("Summarized {} of {} files into {}", files.len() - failed, files.len(), out_dir.display());
    Ok(failed)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize { file, out, json, pipeline } => {
            summarize_one(&file, out.as_deref(), json, &pipeline)?
        }
        Commands::Batch { dir, out_dir, pipeline } => {
            let failed = summarize_dir(&dir, out_dir.as_deref(), &pipeline)?;
            if failed > 0 {
                anyhow::bail!("{} file(s) could not be summarized", failed);
            }
        }
    }
    Ok(())
}
