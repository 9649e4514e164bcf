// Derived lookup tables over a `Lexicon`.
//
// - `RhymeIndex`: rhyme key → words sharing it. Answers "what rhymes with
//   this word" with one map lookup.
// - `PararhymeIndex`: consonant skeleton → words sharing it ("bell" /
//   "ball"). Looser than rhyme; exposed for callers that want it, not used
//   by the selector.
// - `RoleIndex`: role → words holding it, in sorted order, for indexed
//   random access and vocabulary-size entropy estimates.
//
// All three are built once from an immutable `Lexicon` and never mutated.
// Queries hand back copies or shared slices; callers that need a working
// pool must copy (the selector does).

use crate::Lexicon;
use crate::types::{RhymeKey, Role};
use std::collections::{BTreeMap, BTreeSet};

/// Suffix of `phonemes` from the first primary-stressed symbol (one ending
/// in `1`), space-joined; empty if there is none. Stress digits stay in the
/// key.
pub fn rhyme_key_of(phonemes: &[String]) -> RhymeKey {
    match phonemes.iter().position(|p| p.ends_with('1')) {
        Some(start) => RhymeKey(phonemes[start..].join(" ")),
        None => RhymeKey::default(),
    }
}

/// Rhyme key → set of words with that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RhymeIndex {
    buckets: BTreeMap<RhymeKey, BTreeSet<String>>,
}

impl RhymeIndex {
    /// Bucket every pronounced word by its rhyme key. Words with no primary
    /// stress share the empty key.
    pub fn build(lexicon: &Lexicon) -> Self {
        let mut buckets: BTreeMap<RhymeKey, BTreeSet<String>> = BTreeMap::new();
        for (word, phonemes) in lexicon.pronunciations() {
            buckets
                .entry(phonemes.rhyme_key())
                .or_default()
                .insert(word.to_string());
        }
        RhymeIndex { buckets }
    }

    /// Words rhyming with `word`, excluding `word` itself. Empty if the word
    /// has no pronunciation.
    pub fn candidates_for(&self, lexicon: &Lexicon, word: &str) -> BTreeSet<String> {
        let Some(phonemes) = lexicon.lookup_phonemes(word) else {
            return BTreeSet::new();
        };
        let mut out = self.words_with_key(&phonemes.rhyme_key());
        out.remove(word);
        out
    }

    /// A copy of the bucket for `key`.
    pub fn words_with_key(&self, key: &RhymeKey) -> BTreeSet<String> {
        self.buckets.get(key).cloned().unwrap_or_default()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

/// Consonant skeleton → words with that skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PararhymeIndex {
    buckets: BTreeMap<String, BTreeSet<String>>,
}

impl PararhymeIndex {
    pub fn build(lexicon: &Lexicon) -> Self {
        let mut buckets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (word, phonemes) in lexicon.pronunciations() {
            buckets
                .entry(phonemes.consonant_skeleton())
                .or_default()
                .insert(word.to_string());
        }
        PararhymeIndex { buckets }
    }

    /// Words sharing `word`'s consonant skeleton, excluding `word`.
    pub fn pararhymes_for(&self, lexicon: &Lexicon, word: &str) -> BTreeSet<String> {
        let Some(phonemes) = lexicon.lookup_phonemes(word) else {
            return BTreeSet::new();
        };
        let mut out = self
            .buckets
            .get(&phonemes.consonant_skeleton())
            .cloned()
            .unwrap_or_default();
        out.remove(word);
        out
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

/// Role → words with that role, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleIndex {
    by_role: BTreeMap<Role, Vec<String>>,
}

impl RoleIndex {
    pub fn build(lexicon: &Lexicon) -> Self {
        let mut by_role: BTreeMap<Role, Vec<String>> = BTreeMap::new();
        for word in lexicon.words() {
            if let Some(roles) = lexicon.lookup_roles(word) {
                for role in roles {
                    by_role.entry(*role).or_default().push(word.to_string());
                }
            }
        }
        RoleIndex { by_role }
    }

    /// Words with `role`; empty if none.
    pub fn words_with_role(&self, role: Role) -> &[String] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `word` holds `role`. Unknown words hold no role.
    pub fn has_role(lexicon: &Lexicon, word: &str, role: Role) -> bool {
        lexicon
            .lookup_roles(word)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Vocabulary size per role. Every role appears, with zero if empty.
    pub fn role_counts(&self) -> BTreeMap<Role, usize> {
        Role::ALL
            .into_iter()
            .map(|role| (role, self.words_with_role(role).len()))
            .collect()
    }
}
