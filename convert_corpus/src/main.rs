use std::fs::File;
use std::io::{prelude::*, stderr, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use cws_feature::table::{index_feature_file, write_corpus_features};
use cws_feature::FeatureModel;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to convert a segmented corpus into CRF training files.")]
struct Args {
    /// The feature model file written by build_features
    #[arg(long)]
    model: PathBuf,

    /// A segmented corpus (words separated by spaces)
    #[arg(long)]
    input: PathBuf,

    /// The file to write characters and their labels to
    #[arg(long)]
    char_tag: PathBuf,

    /// The file to write feature strings and labels to
    #[arg(long)]
    feature: PathBuf,

    /// The file to write feature IDs to
    #[arg(long)]
    feature_index: PathBuf,

    /// The file to write label IDs to
    #[arg(long)]
    tag_index: PathBuf,

    /// Do not write the size header of the index files
    #[arg(long)]
    no_header: bool,

    /// The number of lines annotated in parallel at a time
    #[arg(long, default_value = "10000")]
    chunk_size: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(stderr)
        .init();

    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = FeatureModel::read(&mut f)?;
    let encoder = model.encoder()?;
    tracing::info!(
        n_features = model.vocabulary().len(),
        scheme = ?model.tag_scheme(),
        "model loaded"
    );

    eprintln!("Writing features...");
    let start = Instant::now();
    let rdr = BufReader::new(File::open(args.input)?);
    let mut char_tag_wtr = BufWriter::new(File::create(args.char_tag)?);
    let mut feature_wtr = BufWriter::new(File::create(&args.feature)?);
    let n_lines = write_corpus_features(
        rdr,
        &encoder,
        args.chunk_size,
        &mut char_tag_wtr,
        &mut feature_wtr,
    )?;
    char_tag_wtr.flush()?;
    feature_wtr.flush()?;
    eprintln!("# of sentences: {n_lines}");

    eprintln!("Converting features into indices...");
    let rdr = BufReader::new(File::open(&args.feature)?);
    let mut feature_index_wtr = BufWriter::new(File::create(args.feature_index)?);
    let mut tag_index_wtr = BufWriter::new(File::create(args.tag_index)?);
    let n_groups = index_feature_file(
        rdr,
        model.vocabulary(),
        model.tag_scheme(),
        &mut feature_index_wtr,
        &mut tag_index_wtr,
        !args.no_header,
    )?;
    feature_index_wtr.flush()?;
    tag_index_wtr.flush()?;
    eprintln!("# of groups: {n_groups}");

    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());

    Ok(())
}
