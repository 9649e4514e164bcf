// Dictionary parsers and data sources.
//
// Two inputs feed a `Lexicon`: word → role tags and word → ARPAbet
// phonemes. Each comes in a raw text form and an optimized JSON form:
//
// - parts of speech: `word tag` per line (split at the last space, so
//   multi-word headwords survive), or `{"word": ["n.", "v."]}`
// - pronunciations: CMUdict 0.7b (`WORD  P1 P2 ...`, `;;;` comments,
//   `WORD(1)` alternates), or `{"word": ["K", "AE1", "T"]}`
// - optional common-word list, one word per line, restricting which
//   pronunciations are kept
//
// `DataSource::Bundled` uses the small JSON dataset embedded at compile
// time; `DataSource::Files` reads from disk and picks the format by
// extension (`.json` or anything else for text).

use crate::Lexicon;
use crate::error::LoadError;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

const BUNDLED_PARTS: &str = include_str!("../data/parts_of_speech.json");
const BUNDLED_PHONEMES: &str = include_str!("../data/pronunciations.json");

/// Where dictionary data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataSource {
    /// The dataset compiled into the crate.
    #[default]
    Bundled,
    /// Dictionary files on disk.
    Files {
        parts: PathBuf,
        phonemes: PathBuf,
        common_words: Option<PathBuf>,
    },
}

impl DataSource {
    /// Load and cross-reference the dictionaries into a `Lexicon`.
    pub fn load_lexicon(&self) -> Result<Lexicon, LoadError> {
        let (roles, phonemes) = match self {
            DataSource::Bundled => (
                roles_from_json(BUNDLED_PARTS, "bundled parts_of_speech.json")?,
                phonemes_from_json(BUNDLED_PHONEMES, "bundled pronunciations.json")?,
            ),
            DataSource::Files {
                parts,
                phonemes,
                common_words,
            } => {
                let filter = match common_words {
                    Some(path) => Some(parse_word_list(&read(path)?)),
                    None => None,
                };
                let roles = if is_json(parts) {
                    roles_from_json(&read(parts)?, &parts.display().to_string())?
                } else {
                    parse_parts_list(&read(parts)?)
                };
                let phonemes = if is_json(phonemes) {
                    let mut map =
                        phonemes_from_json(&read(phonemes)?, &phonemes.display().to_string())?;
                    if let Some(filter) = &filter {
                        map.retain(|word, _| filter.contains(word));
                    }
                    map
                } else {
                    parse_cmudict(&read(phonemes)?, filter.as_ref())
                };
                (roles, phonemes)
            }
        };

        if roles.is_empty() {
            return Err(LoadError::Empty("parts-of-speech dictionary".to_string()));
        }
        if phonemes.is_empty() {
            return Err(LoadError::Empty("pronunciation dictionary".to_string()));
        }
        info!(
            "loaded {} tagged words and {} pronunciations",
            roles.len(),
            phonemes.len()
        );
        Ok(Lexicon::new(roles, phonemes))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse CMUdict text. Headwords are lowercased; alternate pronunciations
/// (`WORD(1)`) are skipped and the first pronunciation of a word wins.
/// With a `filter`, only listed words are kept.
pub fn parse_cmudict(
    text: &str,
    filter: Option<&BTreeSet<String>>,
) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with(";;;") {
            continue;
        }
        let mut fields = line.split_whitespace();
        let Some(head) = fields.next() else {
            continue;
        };
        let symbols: Vec<String> = fields.map(str::to_string).collect();
        if symbols.is_empty() {
            continue;
        }
        if head.ends_with(')') && head.contains('(') {
            continue;
        }
        let word = head.to_lowercase();
        if filter.is_some_and(|f| !f.contains(&word)) {
            continue;
        }
        out.entry(word).or_insert(symbols);
    }
    debug!("parsed {} CMUdict entries", out.len());
    out
}

/// Parse `word tag` lines. A word listed several times accumulates tags.
pub fn parse_parts_list(text: &str) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        let Some(split) = line.rfind(' ') else {
            continue;
        };
        let word = line[..split].trim().to_lowercase();
        let tag = line[split + 1..].trim();
        if word.is_empty() || tag.is_empty() {
            continue;
        }
        let tags = out.entry(word).or_default();
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    out
}

/// Parse a newline-separated word list into a lowercase set.
pub fn parse_word_list(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parse `{"word": ["tag", ...]}`. `name` labels the source in errors.
pub fn roles_from_json(json: &str, name: &str) -> Result<BTreeMap<String, Vec<String>>, LoadError> {
    string_lists_from_json(json, name)
}

/// Parse `{"word": ["PHONEME", ...]}`. `name` labels the source in errors.
pub fn phonemes_from_json(
    json: &str,
    name: &str,
) -> Result<BTreeMap<String, Vec<String>>, LoadError> {
    string_lists_from_json(json, name)
}

fn string_lists_from_json(
    json: &str,
    name: &str,
) -> Result<BTreeMap<String, Vec<String>>, LoadError> {
    let map: BTreeMap<String, Vec<String>> =
        serde_json::from_str(json).map_err(|source| LoadError::Json {
            name: name.to_string(),
            source,
        })?;
    Ok(map
        .into_iter()
        .map(|(word, values)| (word.to_lowercase(), values))
        .collect())
}
