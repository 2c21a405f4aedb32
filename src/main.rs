use corenorm::{write_documents, AnnotationNormalizer, NormalizerConfig, PayloadParser};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "corenorm")]
#[command(about = "Normalize CoreNLP annotation payloads")]
#[command(version)]
struct Args {
    /// Input file of {text, annotation} records (JSON, JSON Lines, or gzipped)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Annotators the payloads were requested with, comma-separated
    #[arg(short, long)]
    annotators: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => NormalizerConfig::from_yaml(path)?,
        None => NormalizerConfig::default(),
    };
    let annotators = config.resolve_annotators(args.annotators.as_deref());
    let pretty = args.pretty || config.pretty;

    let unknown = annotators.unknown();
    if !unknown.is_empty() {
        log::warn!("Unknown annotators produce no output fields: {:?}", unknown);
    }

    let records = PayloadParser::new().parse_file(&args.input)?;
    log::info!("Normalizing {} record(s) with annotators {}", records.len(), annotators);

    let start_time = Instant::now();
    let normalizer = AnnotationNormalizer::new(annotators);
    let documents = normalizer.normalize_batch(&records)?;

    log::info!(
        "Normalized {} document(s) in {:.3}s",
        documents.len(),
        start_time.elapsed().as_secs_f32()
    );

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_documents(writer, &documents, pretty)
}
