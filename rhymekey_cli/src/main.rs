// CLI entry point for the rhyming passphrase generator.
//
// Loads the dictionary (bundled, or files given on the command line) into
// the process-wide shared context once, then composes `--count`
// passphrases. A composition that comes back NoAssignment or
// BelowThreshold is retried with fresh randomness up to `max_attempts`
// times before the binary gives up.
//
// Usage:
//   rhymekey [OPTIONS]
//     --parts adj,noun,past-verb,noun   Part layout (default from config)
//     --groups 1,2,3,2                  Rhyme group per part
//     --min-entropy <BITS>              Entropy floor (default 20)
//     --count <N>                       Passphrases to print (default 1)
//     --seed <U64>                      Reproducible output
//     --config <FILE>                   PhraseConfig JSON
//     --parts-file/--phonemes-file      Dictionary files instead of bundled
//     --common-words <FILE>             Restrict pronunciations to a list
//     --stats                           Print vocabulary diagnostics
//     --verbose                         Debug logging

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::{debug, info};
use rhymekey_lang::{
    DataSource, EnglishInflector, PartSpec, PhraseConfig, PhraseContext, PhraseError,
    PhraseRequest, compose_passphrase, shared_context,
};
use rhymekey_prng::PhraseRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rhymekey",
    about = "Generate memorable rhyming passphrases with an entropy estimate"
)]
struct Args {
    /// Comma-separated part layout, e.g. adj,noun,past-verb,noun.
    #[arg(long, value_delimiter = ',')]
    parts: Option<Vec<PartSpec>>,

    /// Comma-separated rhyme group ids, one per part.
    #[arg(long, value_delimiter = ',')]
    groups: Option<Vec<u32>>,

    /// Reject passphrases whose entropy estimate is not above this.
    #[arg(long)]
    min_entropy: Option<f64>,

    /// Number of passphrases to generate.
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Seed for reproducible output. Without it, OS entropy is used.
    #[arg(long)]
    seed: Option<u64>,

    /// PhraseConfig JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parts-of-speech dictionary (`word tag` lines or JSON).
    #[arg(long, requires = "phonemes_file")]
    parts_file: Option<PathBuf>,

    /// Pronunciation dictionary (CMUdict text or JSON).
    #[arg(long, requires = "parts_file")]
    phonemes_file: Option<PathBuf>,

    /// Word list restricting which pronunciations are kept.
    #[arg(long, requires = "parts_file")]
    common_words: Option<PathBuf>,

    /// Print per-role vocabulary sizes and words lacking pronunciations.
    #[arg(long)]
    stats: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn data_source(&self) -> DataSource {
        match (&self.parts_file, &self.phonemes_file) {
            (Some(parts), Some(phonemes)) => DataSource::Files {
                parts: parts.clone(),
                phonemes: phonemes.clone(),
                common_words: self.common_words.clone(),
            },
            _ => DataSource::Bundled,
        }
    }

    /// Command-line overrides applied on top of the config defaults.
    /// Explicit `--parts` without `--groups` means no rhyme constraints.
    fn request(&self, config: &PhraseConfig) -> PhraseRequest {
        let mut request = match &self.parts {
            Some(parts) => PhraseRequest::new(parts.iter().copied())
                .with_minimum_entropy(config.minimum_entropy_bits),
            None => config.request(),
        };
        if let Some(groups) = &self.groups {
            request = request.with_groups(groups.iter().copied());
        }
        if let Some(bits) = self.min_entropy {
            request = request.with_minimum_entropy(bits);
        }
        request
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = match &args.config {
        Some(path) => PhraseConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PhraseConfig::default(),
    };
    let source = args.data_source();
    let ctx = shared_context(&source).context("loading dictionary data")?;

    if args.stats {
        print_stats(ctx);
    }

    let request = args.request(&config);
    let mut rng = match args.seed {
        Some(seed) => PhraseRng::new(seed),
        None => PhraseRng::from_entropy()
            .map_err(|e| anyhow!("failed to read OS entropy: {e}"))?,
    };
    info!(
        "generating {} passphrase(s) for {} part(s), floor {} bits",
        args.count,
        request.parts.len(),
        request.minimum_entropy_bits
    );

    for _ in 0..args.count {
        let phrase = compose_with_retries(ctx, &request, config.max_attempts, &mut rng)?;
        println!("{}  ({:.1} bits)", phrase.text, phrase.entropy_bits);
    }
    Ok(())
}

fn compose_with_retries(
    ctx: &PhraseContext,
    request: &PhraseRequest,
    max_attempts: u32,
    rng: &mut PhraseRng,
) -> Result<rhymekey_lang::Passphrase> {
    let mut last = PhraseError::NoAssignment;
    for attempt in 1..=max_attempts.max(1) {
        match compose_passphrase(ctx, request, &EnglishInflector, rng) {
            Ok(phrase) => return Ok(phrase),
            Err(err @ PhraseError::GroupingMismatch { .. }) => return Err(err.into()),
            Err(err) => {
                debug!("attempt {attempt} failed: {err}");
                last = err;
            }
        }
    }
    match last {
        PhraseError::BelowThreshold { minimum_bits } => bail!(
            "no passphrase exceeded {minimum_bits} bits in {max_attempts} attempt(s); \
             lower --min-entropy or request more words"
        ),
        other => Err(anyhow!(other).context(format!(
            "no word assignment found in {max_attempts} attempt(s); \
             try different --parts or --groups"
        ))),
    }
}

fn print_stats(ctx: &PhraseContext) {
    println!("Vocabulary by role:");
    for (role, count) in ctx.role_counts() {
        println!("  {:<12} {count}", role.name());
    }
    println!(
        "Rhyme buckets: {}  Pararhyme buckets: {}",
        ctx.rhymes().bucket_count(),
        ctx.pararhymes().bucket_count()
    );
    let missing = ctx.lexicon().missing_phonemes();
    if missing.is_empty() {
        println!("Every tagged word has a pronunciation.");
    } else {
        println!("No phonemes for {} word(s): {}", missing.len(), missing.join(", "));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhymekey_lang::Role;

    #[test]
    fn test_defaults_come_from_config() {
        let args = Args::try_parse_from(["rhymekey"]).unwrap();
        let request = args.request(&PhraseConfig::default());
        assert_eq!(request, PhraseConfig::default().request());
        assert_eq!(args.data_source(), DataSource::Bundled);
    }

    #[test]
    fn test_parts_and_groups_parse() {
        let args = Args::try_parse_from([
            "rhymekey",
            "--parts",
            "noun,past-verb,noun",
            "--groups",
            "1,2,1",
            "--min-entropy",
            "5",
        ])
        .unwrap();
        let request = args.request(&PhraseConfig::default());
        assert_eq!(
            request.parts,
            vec![
                PartSpec::Plain(Role::Noun),
                PartSpec::PAST_TENSE_VERB,
                PartSpec::Plain(Role::Noun)
            ]
        );
        assert_eq!(request.groups, Some(vec![1, 2, 1]));
        assert_eq!(request.minimum_entropy_bits, 5.0);
    }

    #[test]
    fn test_explicit_parts_drop_default_groups() {
        let args = Args::try_parse_from(["rhymekey", "--parts", "adj,noun"]).unwrap();
        assert_eq!(args.request(&PhraseConfig::default()).groups, None);
    }

    #[test]
    fn test_unknown_part_rejected() {
        assert!(Args::try_parse_from(["rhymekey", "--parts", "noun,gerund"]).is_err());
    }

    #[test]
    fn test_dictionary_files_must_be_paired() {
        assert!(Args::try_parse_from(["rhymekey", "--parts-file", "parts.txt"]).is_err());
        let args = Args::try_parse_from([
            "rhymekey",
            "--parts-file",
            "parts.txt",
            "--phonemes-file",
            "cmudict",
        ])
        .unwrap();
        assert!(matches!(args.data_source(), DataSource::Files { .. }));
    }

    #[test]
    fn test_retries_report_threshold() {
        let ctx = shared_context(&DataSource::Bundled).unwrap();
        let request = PhraseRequest::new([PartSpec::Plain(Role::Noun)]).with_minimum_entropy(500.0);
        let err = compose_with_retries(ctx, &request, 3, &mut PhraseRng::new(1)).unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
