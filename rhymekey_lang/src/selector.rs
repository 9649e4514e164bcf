// Rhyme group selection: one mutually rhyming word per requested role.
//
// Algorithm for roles `[r0, r1, ..., rk]`:
// 1. Anchor candidates are all words with role `r0`. None → `NoAssignment`.
// 2. Visit anchors in a uniformly shuffled order. For each anchor, the
//    working pool is a fresh copy of the anchor's rhyme set (anchor
//    excluded).
// 3. For each later role, filter the pool to words with that role. If the
//    filtered set is empty, abandon this anchor and try the next one.
//    Otherwise pick uniformly from it, add `log2(filtered size)` bits, and
//    remove the pick from the pool so no word fills two positions.
// 4. First anchor to satisfy every role wins, with entropy
//    `log2(anchor count) + sum of the per-role terms`.
//
// Backtracking is shallow on purpose: only the anchor is retried, and a
// dead end at any later role abandons the whole anchor rather than
// revisiting earlier picks. The entropy figure counts equally likely
// outcomes at each step along the winning path; it ignores that different
// anchors have different rhyme-set sizes, so it is an estimate, not the
// true information content of the output distribution.

use crate::context::PhraseContext;
use crate::error::NoAssignment;
use crate::types::Role;
use log::debug;
use rhymekey_prng::PhraseRng;

/// Words chosen for one rhyme group, in role order, and the bits of
/// entropy the choice is credited with.
#[derive(Debug, Clone, PartialEq)]
pub struct RhymeGroup {
    pub words: Vec<String>,
    pub entropy_bits: f64,
}

impl RhymeGroup {
    fn empty() -> Self {
        RhymeGroup {
            words: Vec::new(),
            entropy_bits: 0.0,
        }
    }
}

/// Pick one word per role such that all words rhyme with each other.
///
/// An empty `roles` list trivially succeeds with no words and zero bits.
/// Failure is an ordinary outcome: many role combinations have no mutual
/// rhyme in a given vocabulary.
pub fn select_rhyme_group(
    ctx: &PhraseContext,
    roles: &[Role],
    rng: &mut PhraseRng,
) -> Result<RhymeGroup, NoAssignment> {
    let Some((&first, rest)) = roles.split_first() else {
        return Ok(RhymeGroup::empty());
    };

    let anchors = ctx.words_with_role(first);
    if anchors.is_empty() {
        debug!("no words with role {first}; group {roles:?} cannot be filled");
        return Err(NoAssignment);
    }
    let anchor_bits = (anchors.len() as f64).log2();

    'anchors: for idx in rng.permutation(anchors.len()) {
        let anchor = &anchors[idx];
        let mut pool = ctx.candidates_for(anchor);
        let mut words = Vec::with_capacity(roles.len());
        words.push(anchor.clone());
        let mut partial_bits = 0.0;

        for &role in rest {
            let matching: Vec<&String> = pool.iter().filter(|w| ctx.has_role(w, role)).collect();
            let Some(pick) = rng.choose(&matching) else {
                debug!("anchor {anchor:?} has no rhyming {role}; trying next anchor");
                continue 'anchors;
            };
            partial_bits += (matching.len() as f64).log2();
            let pick = (*pick).clone();
            pool.remove(&pick);
            words.push(pick);
        }

        let entropy_bits = anchor_bits + partial_bits;
        debug!("rhyme group {words:?} for {roles:?}: {entropy_bits:.2} bits");
        return Ok(RhymeGroup {
            words,
            entropy_bits,
        });
    }

    debug!(
        "exhausted {} anchors without a rhyme group for {roles:?}",
        anchors.len()
    );
    Err(NoAssignment)
}
