//! Figure assembler, grows a connected cluster of boxes by attaching random
//! boxes face to face, rejecting placements that collide.

use glam::DVec3;
use tracing::trace;

use crate::geom::{Face, Material, PuzzleBox};
use crate::rand::MixRandom;


/// Smallest extent of a generated box along one axis.
pub const MIN_DIMENSION: i32 = 1;
/// Largest extent of a generated box along one axis.
pub const MAX_DIMENSION: i32 = 3;
/// Placement attempts per box before the figure is emitted as-is.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;


/// A generated figure together with the seed that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub seed: u32,
    pub boxes: Vec<PuzzleBox>,
}


/// A generator that grows a connected cluster of `box_count` boxes, or fewer
/// if placement repeatedly fails, recentered around the origin.
#[derive(Debug, Clone)]
pub struct FigureGenerator {
    box_count: usize,
    glass_chance: f64,
}

impl FigureGenerator {

    #[inline]
    pub fn new(box_count: usize) -> Self {
        Self { box_count, glass_chance: 0.0 }
    }

    /// Give each emitted box the given chance of being made of glass, one
    /// extra PRNG draw per box.
    #[inline]
    pub fn with_glass_chance(mut self, chance: f64) -> Self {
        self.glass_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Run the assembler with the given RNG. Every box except the first is
    /// flush against at least one earlier box, no two boxes overlap, and the
    /// cluster's bounding box is centered at the origin.
    pub fn generate(&self, rand: &mut MixRandom) -> Vec<PuzzleBox> {

        let mut boxes = Vec::with_capacity(self.box_count);
        if self.box_count == 0 {
            return boxes;
        }

        boxes.push(PuzzleBox::new(DVec3::ZERO, random_size(rand)));

        'grow: while boxes.len() < self.box_count {

            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let anchor_index = rand.next_int_bounded(boxes.len() as i32) as usize;
                let size = random_size(rand);
                let candidate = attach_candidate(&boxes[anchor_index], size, rand);
                if boxes.iter().any(|existing| existing.overlaps(&candidate)) {
                    continue;
                }
                boxes.push(candidate);
                continue 'grow;
            }

            trace!("placement attempts exhausted, stopping at {} of {} boxes",
                boxes.len(), self.box_count);
            break;

        }

        recenter(&mut boxes);

        if self.glass_chance > 0.0 {
            for b in &mut boxes {
                if rand.next_float() < self.glass_chance {
                    b.material = Material::Glass;
                }
            }
        }

        boxes

    }

}

/// Sample integer extents, each axis independently.
fn random_size(rand: &mut MixRandom) -> DVec3 {
    let range = MAX_DIMENSION - MIN_DIMENSION + 1;
    DVec3 {
        x: (MIN_DIMENSION + rand.next_int_bounded(range)) as f64,
        y: (MIN_DIMENSION + rand.next_int_bounded(range)) as f64,
        z: (MIN_DIMENSION + rand.next_int_bounded(range)) as f64,
    }
}

/// Position a candidate of the given size against a random face of the
/// anchor: flush on the attachment axis, and on each orthogonal axis either
/// jittered within the anchor's span when the candidate is smaller, or
/// centered on the anchor when it is larger.
fn attach_candidate(anchor: &PuzzleBox, size: DVec3, rand: &mut MixRandom) -> PuzzleBox {

    let face = rand.next_choice(&Face::ALL);
    let axis = face.axis();
    let i = axis.index();

    let mut center = anchor.center;
    center += face.delta().as_dvec3() * ((anchor.size[i] + size[i]) / 2.0);

    for ortho in axis.orthogonal() {
        let j = ortho.index();
        let slack = anchor.size[j] - size[j];
        if slack > 0.0 {
            let jitter = rand.next_int_bounded(slack as i32 + 1) as f64;
            center[j] = anchor.min()[j] + size[j] / 2.0 + jitter;
        } else {
            center[j] = anchor.center[j];
        }
    }

    PuzzleBox::new(center, size)
}

/// Shift every box so the cluster's bounding box is centered at the origin.
fn recenter(boxes: &mut [PuzzleBox]) {
    let Some(first) = boxes.first() else { return };
    let mut bound = first.bounding_box();
    for b in &boxes[1..] {
        bound |= b.bounding_box();
    }
    let center = bound.center();
    for b in boxes.iter_mut() {
        b.center -= center;
    }
}


#[cfg(test)]
mod tests {

    use crate::gen::generate_figure;
    use super::*;

    fn assemble(seed: u32, box_count: usize) -> Vec<PuzzleBox> {
        let mut rand = MixRandom::new(seed);
        FigureGenerator::new(box_count).generate(&mut rand)
    }

    /// Walk the face-touch graph from the first box.
    fn connected_component_size(boxes: &[PuzzleBox]) -> usize {
        let mut visited = vec![false; boxes.len()];
        let mut stack = vec![0];
        visited[0] = true;
        let mut count = 0;
        while let Some(index) = stack.pop() {
            count += 1;
            for (other, seen) in visited.iter_mut().enumerate() {
                if !*seen && boxes[index].touches_face(&boxes[other]) {
                    *seen = true;
                    stack.push(other);
                }
            }
        }
        count
    }

    #[test]
    fn deterministic_for_a_given_seed() {
        let first = generate_figure(7, 5);
        let second = generate_figure(7, 5);
        assert_eq!(first, second);
        assert_eq!(first.seed, 7);
    }

    #[test]
    fn different_seeds_likely_differ() {
        let differs = (0..8).any(|offset| {
            generate_figure(8 + offset, 5).boxes != generate_figure(7, 5).boxes
        });
        assert!(differs);
    }

    #[test]
    fn no_pair_of_boxes_overlaps() {
        for seed in 0..20 {
            let boxes = assemble(seed, 12);
            for i in 0..boxes.len() {
                for j in (i + 1)..boxes.len() {
                    assert!(
                        !boxes[i].overlaps(&boxes[j]),
                        "seed {seed}: {:?} overlaps {:?}",
                        boxes[i], boxes[j],
                    );
                }
            }
        }
    }

    #[test]
    fn figure_is_one_connected_component() {
        for seed in 0..20 {
            let boxes = assemble(seed, 12);
            assert!(!boxes.is_empty());
            assert_eq!(connected_component_size(&boxes), boxes.len(), "seed {seed}");
        }
    }

    #[test]
    fn cluster_is_recentered_at_origin() {
        for seed in 0..20 {
            let boxes = assemble(seed, 8);
            let mut bound = boxes[0].bounding_box();
            for b in &boxes[1..] {
                bound |= b.bounding_box();
            }
            let center = bound.center();
            assert!(center.length() < 1e-9, "seed {seed}: cluster center {center}");
        }
    }

    #[test]
    fn never_emits_more_boxes_than_requested() {
        for seed in 0..10 {
            assert!(assemble(seed, 6).len() <= 6);
        }
        assert!(assemble(3, 0).is_empty());
        assert_eq!(assemble(3, 1).len(), 1);
    }

    #[test]
    fn small_requests_are_fully_satisfied() {
        // With 64 attempts per box, failing to place 5 boxes would take an
        // astronomically unlucky seed.
        for seed in 0..20 {
            assert_eq!(assemble(seed, 5).len(), 5);
        }
    }

    #[test]
    fn glass_chance_bounds() {
        let mut rand = MixRandom::new(4);
        let all_glass = FigureGenerator::new(6).with_glass_chance(1.0).generate(&mut rand);
        assert!(all_glass.iter().all(|b| b.material == Material::Glass));

        let mut rand = MixRandom::new(4);
        let none_glass = FigureGenerator::new(6).generate(&mut rand);
        assert!(none_glass.iter().all(|b| b.material == Material::Standard));
    }

    #[test]
    fn integer_extents_within_bounds() {
        for b in assemble(15, 10) {
            for i in 0..3 {
                assert_eq!(b.size[i].fract(), 0.0);
                assert!((MIN_DIMENSION as f64..=MAX_DIMENSION as f64).contains(&b.size[i]));
            }
        }
    }

}
