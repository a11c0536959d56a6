//! Debuff distribution pass, tags a quota of generated boxes with each
//! debuff kind.

use indexmap::IndexMap;

use crate::geom::{Debuff, PuzzleBox};
use crate::rand::MixRandom;


/// Requested number of boxes to tag with each debuff kind. This is an ordered
/// map, kinds are processed in insertion order and each kind consumes PRNG
/// draws, so the order is part of the reproducible result for a given seed.
pub type DebuffDistribution = IndexMap<Debuff, usize>;


/// Tag boxes with each kind of the distribution. For each kind the box
/// indices are shuffled with a Fisher-Yates pass and the first `count` of
/// them are flagged, so a kind never tags the same box twice, while distinct
/// kinds are drawn independently and may land on the same box. A count above
/// the box count tags every box.
pub fn distribute_debuffs(
    boxes: &mut [PuzzleBox],
    distribution: &DebuffDistribution,
    rand: &mut MixRandom,
) {
    let mut indices: Vec<usize> = (0..boxes.len()).collect();
    for (&debuff, &count) in distribution {
        rand.shuffle(&mut indices);
        for &index in &indices[..count.min(boxes.len())] {
            boxes[index].debuffs.insert(debuff);
        }
    }
}
