// Rhyming passphrase generator.
//
// Builds memorable passphrases such as "BrightCatSpunHat" from a dictionary
// of words tagged with grammatical roles and ARPAbet pronunciations, and
// reports an estimate of how many bits of entropy the choice carried.
//
// Architecture:
// - `types.rs`: `Role`, `PartSpec`, `Phonemes`, `RhymeKey`
// - `lib.rs` (this file): `Lexicon`, mapping words to roles and phonemes
// - `loader.rs`: dictionary parsers (CMUdict text, `word tag` lists, JSON)
//   and the bundled dataset
// - `index.rs`: `RhymeIndex`, `PararhymeIndex`, `RoleIndex`
// - `context.rs`: `PhraseContext`, the immutable bundle of lexicon + indices,
//   and the process-wide one-shot `shared_context()`
// - `selector.rs`: picks one mutually rhyming word per role for a group
// - `composer.rs`: splits a request into rhyme groups, runs the selector,
//   inflects, capitalizes, concatenates, and applies the entropy threshold
// - `inflect.rs`: `Inflector` trait and the default English past tense
// - `config.rs`: `PhraseConfig`, JSON-loadable defaults
// - `error.rs`: `LoadError`, `PhraseError`, `NoAssignment`
//
// Determinism: every random choice goes through a caller-supplied
// `rhymekey_prng::PhraseRng`, and all maps are ordered (`BTreeMap`,
// `BTreeSet`), so a fixed seed and dataset always give the same passphrase.

pub mod composer;
pub mod config;
pub mod context;
pub mod error;
pub mod index;
pub mod inflect;
pub mod loader;
pub mod selector;
pub mod types;

pub use composer::{Passphrase, PhraseRequest, capitalize_first, compose_passphrase};
pub use config::PhraseConfig;
pub use context::{PhraseContext, shared_context};
pub use error::{LoadError, NoAssignment, PhraseError};
pub use inflect::{EnglishInflector, Inflector};
pub use loader::DataSource;
pub use selector::{RhymeGroup, select_rhyme_group};
pub use types::{PartSpec, Phonemes, RhymeKey, Role};

use log::warn;
use std::collections::{BTreeMap, BTreeSet};

/// Immutable word store: each word's roles and pronunciation.
///
/// Words are lowercase. A word may appear with roles but no pronunciation
/// (it can still be an anchor, but rhymes with nothing) or with a
/// pronunciation but no roles (it is never selected).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    roles: BTreeMap<String, BTreeSet<Role>>,
    phonemes: BTreeMap<String, Phonemes>,
}

impl Lexicon {
    /// Build from the raw dictionary maps.
    ///
    /// Role tags go through `Role::from_tag`; unrecognized tags are dropped
    /// and duplicate tags collapse. Words whose tags are all unrecognized
    /// get no role entry.
    pub fn new(
        roles: BTreeMap<String, Vec<String>>,
        phonemes: BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut unknown_tags = BTreeSet::new();
        let mut role_map: BTreeMap<String, BTreeSet<Role>> = BTreeMap::new();
        for (word, tags) in roles {
            let mut set = BTreeSet::new();
            for tag in tags {
                match Role::from_tag(tag.trim()) {
                    Some(role) => {
                        set.insert(role);
                    }
                    None => {
                        unknown_tags.insert(tag);
                    }
                }
            }
            if !set.is_empty() {
                role_map
                    .entry(word.to_lowercase())
                    .or_default()
                    .extend(set);
            }
        }
        if !unknown_tags.is_empty() {
            warn!(
                "ignored {} unrecognized role tag(s): {:?}",
                unknown_tags.len(),
                unknown_tags
            );
        }

        let phonemes = phonemes
            .into_iter()
            .map(|(word, symbols)| (word.to_lowercase(), Phonemes(symbols)))
            .collect();

        Lexicon {
            roles: role_map,
            phonemes,
        }
    }

    /// Pronunciation of `word`, if known.
    pub fn lookup_phonemes(&self, word: &str) -> Option<&Phonemes> {
        self.phonemes.get(word)
    }

    /// Roles of `word`, if known.
    pub fn lookup_roles(&self, word: &str) -> Option<&BTreeSet<Role>> {
        self.roles.get(word)
    }

    /// Every word with at least one role, in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// Every word with a pronunciation, paired with it, in sorted order.
    pub fn pronunciations(&self) -> impl Iterator<Item = (&str, &Phonemes)> {
        self.phonemes.iter().map(|(w, p)| (w.as_str(), p))
    }

    /// Number of words with at least one role.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Words that have roles but no pronunciation.
    pub fn missing_phonemes(&self) -> Vec<&str> {
        self.roles
            .keys()
            .filter(|w| !self.phonemes.contains_key(*w))
            .map(String::as_str)
            .collect()
    }

    /// A copy holding only words that have both roles and a pronunciation.
    pub fn retain_pronounceable(&self) -> Lexicon {
        let roles: BTreeMap<String, BTreeSet<Role>> = self
            .roles
            .iter()
            .filter(|(w, _)| self.phonemes.contains_key(*w))
            .map(|(w, r)| (w.clone(), r.clone()))
            .collect();
        let phonemes = self
            .phonemes
            .iter()
            .filter(|(w, _)| roles.contains_key(*w))
            .map(|(w, p)| (w.clone(), p.clone()))
            .collect();
        Lexicon { roles, phonemes }
    }
}
