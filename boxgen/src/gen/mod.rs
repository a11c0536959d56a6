//! Box generation module.
//!
//! Two generators share the same numeric primitives: the splitter tiles a
//! rectangular container exactly by recursive binary cuts, the assembler
//! grows a connected figure by random face attachment. Both are pure
//! functions of a seed and their parameters, each call owns its PRNG.

use thiserror::Error;

use crate::geom::PuzzleBox;
use crate::rand::MixRandom;

mod split;
pub use split::{Container, SplitGenerator};

mod figure;
pub use figure::{Figure, FigureGenerator, MIN_DIMENSION, MAX_DIMENSION, MAX_PLACEMENT_ATTEMPTS};

mod distrib;
pub use distrib::{DebuffDistribution, distribute_debuffs};


/// Error type for box generation. Under-generation is never reported through
/// this, both generators legitimately return fewer boxes than requested when
/// geometry gets in the way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// The container has a zero dimension, so it cannot emit any box with a
    /// positive volume.
    #[error("container {width}x{height}x{depth} has a zero dimension")]
    EmptyContainer { width: u32, height: u32, depth: u32 },
    /// More cuts were requested than the container volume allows, the most
    /// cuts possible reduce the container to unit boxes.
    #[error("requested {cuts} cuts but a container of volume {volume} allows at most {max}")]
    TooManyCuts { cuts: u32, volume: u64, max: u64 },
}


/// Tile the given container into exactly `cuts + 1` boxes. The boxes exactly
/// partition the container volume, centered at the origin.
pub fn generate_tiled_boxes(container: Container, cuts: u32, seed: u32) -> Result<Vec<PuzzleBox>, GenError> {
    let mut rand = MixRandom::new(seed);
    SplitGenerator::new(container, cuts).generate(&mut rand)
}

/// Grow a connected figure of `box_count` boxes, or fewer if placement
/// repeatedly fails, recentered around the origin.
pub fn generate_figure(seed: u32, box_count: usize) -> Figure {
    let mut rand = MixRandom::new(seed);
    Figure {
        seed,
        boxes: FigureGenerator::new(box_count).generate(&mut rand),
    }
}

/// Tile the given container and then tag the requested quota of boxes with
/// each debuff kind, all from the same seeded stream.
pub fn generate_boxes_with_distribution(
    seed: u32,
    cuts: u32,
    container: Container,
    distribution: &DebuffDistribution,
) -> Result<Vec<PuzzleBox>, GenError> {
    let mut rand = MixRandom::new(seed);
    let mut boxes = SplitGenerator::new(container, cuts).generate(&mut rand)?;
    distribute_debuffs(&mut boxes, distribution, &mut rand);
    Ok(boxes)
}
