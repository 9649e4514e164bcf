// Immutable lexicon + index bundle shared by the selector and composer.
//
// `PhraseContext::build` derives every index from a `Lexicon` in one pass;
// nothing is mutated afterwards, so a context can be shared across threads
// by reference without locking. `shared_context` adds a process-wide
// one-shot guard for callers that want "load once, reuse forever".

use crate::Lexicon;
use crate::error::LoadError;
use crate::index::{PararhymeIndex, RhymeIndex, RoleIndex};
use crate::loader::DataSource;
use crate::types::Role;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Lexicon plus the indices derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseContext {
    lexicon: Lexicon,
    rhymes: RhymeIndex,
    pararhymes: PararhymeIndex,
    roles: RoleIndex,
}

impl PhraseContext {
    /// Derive all indices from `lexicon`.
    pub fn build(lexicon: Lexicon) -> Self {
        let rhymes = RhymeIndex::build(&lexicon);
        let pararhymes = PararhymeIndex::build(&lexicon);
        let roles = RoleIndex::build(&lexicon);

        let missing = lexicon.missing_phonemes();
        if !missing.is_empty() {
            warn!(
                "{} tagged word(s) have no pronunciation and cannot rhyme",
                missing.len()
            );
        }
        info!(
            "built phrase context: {} words, {} rhyme buckets, {} pararhyme buckets",
            lexicon.len(),
            rhymes.bucket_count(),
            pararhymes.bucket_count()
        );
        info!("words per role: {:?}", roles.role_counts());

        PhraseContext {
            lexicon,
            rhymes,
            pararhymes,
            roles,
        }
    }

    /// Load dictionaries from `source` and build.
    pub fn load(source: &DataSource) -> Result<Self, LoadError> {
        Ok(Self::build(source.load_lexicon()?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rhymes(&self) -> &RhymeIndex {
        &self.rhymes
    }

    pub fn pararhymes(&self) -> &PararhymeIndex {
        &self.pararhymes
    }

    pub fn roles(&self) -> &RoleIndex {
        &self.roles
    }

    /// Words rhyming with `word`, excluding it. A fresh, owned set.
    pub fn candidates_for(&self, word: &str) -> BTreeSet<String> {
        self.rhymes.candidates_for(&self.lexicon, word)
    }

    /// Words sharing `word`'s consonant skeleton, excluding it.
    pub fn pararhymes_for(&self, word: &str) -> BTreeSet<String> {
        self.pararhymes.pararhymes_for(&self.lexicon, word)
    }

    pub fn words_with_role(&self, role: Role) -> &[String] {
        self.roles.words_with_role(role)
    }

    pub fn has_role(&self, word: &str, role: Role) -> bool {
        RoleIndex::has_role(&self.lexicon, word, role)
    }

    /// Vocabulary size per role, for reporting.
    pub fn role_counts(&self) -> BTreeMap<Role, usize> {
        self.roles.role_counts()
    }
}

static SHARED: OnceLock<PhraseContext> = OnceLock::new();

/// The process-wide context, loaded from `source` on first call.
///
/// Later calls return the same instance and ignore their `source`. If two
/// threads race the first load, both load but only one result is kept;
/// every caller observes that one. A load error leaves the slot empty so a
/// later call may retry.
pub fn shared_context(source: &DataSource) -> Result<&'static PhraseContext, LoadError> {
    if let Some(ctx) = SHARED.get() {
        return Ok(ctx);
    }
    let ctx = PhraseContext::load(source)?;
    Ok(SHARED.get_or_init(|| ctx))
}
