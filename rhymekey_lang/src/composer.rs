// Passphrase composition: rhyme groups in, one capitalized string out.
//
// A `PhraseRequest` lists what each position wants (`PartSpec`) and,
// optionally, a group id per position; positions sharing an id must rhyme.
// Composition:
// 1. Partition positions by group id, preserving order within a group.
//    Without ids, every position is its own group.
// 2. Run the selector once per group on the parts' base roles. Any group
//    failing fails the whole passphrase; nothing partial is returned.
// 3. Inflect past-tense positions, capitalize every word, and concatenate
//    in position order with no separator.
// 4. Sum group entropies (groups are independent draws) and release the
//    passphrase only if the sum is strictly above the minimum.

use crate::context::PhraseContext;
use crate::error::PhraseError;
use crate::inflect::Inflector;
use crate::selector::select_rhyme_group;
use crate::types::{PartSpec, Role};
use log::debug;
use rhymekey_prng::PhraseRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum entropy, in bits, a passphrase must exceed by default.
pub const DEFAULT_MINIMUM_ENTROPY_BITS: f64 = 20.0;

/// What to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseRequest {
    /// One entry per output word.
    pub parts: Vec<PartSpec>,
    /// Group id per position; equal ids must rhyme. `None` means no rhyme
    /// constraints at all.
    #[serde(default)]
    pub groups: Option<Vec<u32>>,
    /// The passphrase is withheld unless its entropy is strictly greater.
    #[serde(default = "default_minimum")]
    pub minimum_entropy_bits: f64,
}

fn default_minimum() -> f64 {
    DEFAULT_MINIMUM_ENTROPY_BITS
}

impl PhraseRequest {
    /// Request `parts` with no rhyme groups and the default threshold.
    pub fn new(parts: impl IntoIterator<Item = PartSpec>) -> Self {
        PhraseRequest {
            parts: parts.into_iter().collect(),
            groups: None,
            minimum_entropy_bits: DEFAULT_MINIMUM_ENTROPY_BITS,
        }
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = u32>) -> Self {
        self.groups = Some(groups.into_iter().collect());
        self
    }

    pub fn with_minimum_entropy(mut self, bits: f64) -> Self {
        self.minimum_entropy_bits = bits;
        self
    }

    /// Positions grouped by rhyme id, groups in order of first appearance.
    fn rhyme_groups(&self) -> Result<Vec<Vec<usize>>, PhraseError> {
        let Some(ids) = &self.groups else {
            return Ok((0..self.parts.len()).map(|i| vec![i]).collect());
        };
        if ids.len() != self.parts.len() {
            return Err(PhraseError::GroupingMismatch {
                parts: self.parts.len(),
                groups: ids.len(),
            });
        }
        let mut slot_of: BTreeMap<u32, usize> = BTreeMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (pos, id) in ids.iter().enumerate() {
            let slot = *slot_of.entry(*id).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(pos);
        }
        Ok(groups)
    }
}

/// A generated passphrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passphrase {
    /// The concatenated passphrase, e.g. "BrightCatSpunHat".
    pub text: String,
    /// The final (inflected, capitalized) word at each position.
    pub words: Vec<String>,
    pub entropy_bits: f64,
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Generate a passphrase for `request`.
pub fn compose_passphrase(
    ctx: &PhraseContext,
    request: &PhraseRequest,
    inflector: &dyn Inflector,
    rng: &mut PhraseRng,
) -> Result<Passphrase, PhraseError> {
    let groups = request.rhyme_groups()?;
    let mut chosen = vec![String::new(); request.parts.len()];
    let mut entropy_bits = 0.0;

    for positions in &groups {
        let roles: Vec<Role> = positions
            .iter()
            .map(|&pos| request.parts[pos].base_role())
            .collect();
        let group = select_rhyme_group(ctx, &roles, rng)?;
        entropy_bits += group.entropy_bits;
        for (&pos, word) in positions.iter().zip(group.words) {
            chosen[pos] = word;
        }
    }

    let words: Vec<String> = chosen
        .into_iter()
        .zip(&request.parts)
        .map(|(word, part)| {
            if part.needs_past_tense() {
                capitalize_first(&inflector.to_past_tense(&word))
            } else {
                capitalize_first(&word)
            }
        })
        .collect();
    let text = words.concat();

    if entropy_bits > request.minimum_entropy_bits {
        debug!("composed passphrase with {entropy_bits:.2} bits");
        Ok(Passphrase {
            text,
            words,
            entropy_bits,
        })
    } else {
        debug!(
            "discarding passphrase: {entropy_bits:.2} bits is not above {}",
            request.minimum_entropy_bits
        );
        Err(PhraseError::BelowThreshold {
            minimum_bits: request.minimum_entropy_bits,
        })
    }
}
