use std::fs::{self, File};
use std::io::{prelude::*, stderr, BufReader, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use cws_feature::table::{write_feature_index, write_list, write_tag_index};
use cws_feature::{FeatureBuilder, FeatureConfig, TagScheme, VocabularyOrder};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to collect dictionaries and features from a segmented corpus.")]
struct Args {
    /// A segmented training corpus (words separated by spaces)
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,

    /// The directory to write the unigram, bigram, feature index, and tag index tables to
    #[arg(long)]
    output_dir: PathBuf,

    /// The file to write the feature model to
    #[arg(long)]
    model: PathBuf,

    /// The label scheme. {bmes, 5tag}
    #[arg(long, default_value = "5tag")]
    scheme: TagScheme,

    /// The order of feature IDs. {first-seen, asc, desc, freq}
    #[arg(long, default_value = "asc")]
    order: VocabularyOrder,

    /// Features occurring fewer times than this value are discarded
    #[arg(long, default_value = "1")]
    min_count: usize,

    /// The shortest word length looked up in the dictionary, in characters
    #[arg(long, default_value = "2")]
    word_min: u8,

    /// The longest word length looked up in the dictionary, in characters
    #[arg(long, default_value = "6")]
    word_max: u8,

    /// Do not write the size header of the index tables
    #[arg(long)]
    no_header: bool,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

fn create(path: PathBuf) -> Result<BufWriter<File>, Box<dyn std::error::Error>> {
    tracing::debug!(?path, "creating file");
    Ok(BufWriter::new(File::create(path)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(stderr)
        .init();

    let args = Args::parse();

    let config = FeatureConfig::default()
        .word_lengths(args.word_min, args.word_max)
        .tag_scheme(args.scheme)
        .vocabulary_order(args.order)
        .min_count(args.min_count);
    let mut builder = FeatureBuilder::new(config)?;

    eprintln!("Loading corpus...");
    for path in args.corpus {
        eprintln!("Loading {path:?} ...");
        let f = File::open(path)?;
        let f = BufReader::new(f);
        for (i, line) in f.lines().enumerate() {
            if i % 10000 == 0 {
                eprint!("# of sentences: {i}\r");
                stderr().flush()?;
            }
            builder.push_line(&line?);
        }
        eprintln!("# of sentences: {}", builder.n_lines());
    }
    eprintln!("# of words: {}", builder.n_words());

    eprintln!("Extracting features...");
    let model = builder.build()?;
    eprintln!("# of features: {}", model.vocabulary().len());

    fs::create_dir_all(&args.output_dir)?;
    let header = !args.no_header;

    let mut f = create(args.output_dir.join("unigram.txt"))?;
    write_list(&mut f, model.dictionary().unigrams())?;
    f.flush()?;

    let mut f = create(args.output_dir.join("bigram.txt"))?;
    write_list(&mut f, model.dictionary().bigrams())?;
    f.flush()?;

    let mut f = create(args.output_dir.join("feature_index.txt"))?;
    write_feature_index(&mut f, model.vocabulary(), header)?;
    f.flush()?;

    let mut f = create(args.output_dir.join("tag_index.txt"))?;
    write_tag_index(&mut f, model.tag_scheme(), header)?;
    f.flush()?;

    let mut f = zstd::Encoder::new(File::create(args.model)?, 19)?;
    f.multithread(args.zstd_workers)?;
    model.write(&mut f)?;
    f.finish()?;
    eprintln!("Finish writing.");

    Ok(())
}
