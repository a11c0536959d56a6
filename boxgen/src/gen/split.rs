//! Container splitter, tiles a rectangular volume into boxes by recursive
//! binary cuts along the longest axis.

use glam::IVec3;
use tracing::trace;

use crate::geom::{Axis, PuzzleBox};
use crate::rand::MixRandom;

use super::GenError;


/// Minimum share of a segment's extent kept on each side of a cut. Cuts are
/// sampled between this ratio and its complement, so children stay balanced.
const MIN_CUT_RATIO: f64 = 0.3;


/// Dimensions of the rectangular volume to tile, in integer world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Container {

    #[inline]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    /// Calculate the volume of the container.
    #[inline]
    pub fn volume(self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }

    /// The maximum number of cuts this container supports, reached when every
    /// emitted box is a unit box.
    #[inline]
    pub fn max_cuts(self) -> u64 {
        self.volume().saturating_sub(1)
    }

    #[inline]
    fn size(self) -> IVec3 {
        IVec3::new(self.width as i32, self.height as i32, self.depth as i32)
    }

}


/// A not-yet-final rectangular region of the container. Segments only exist
/// during generation, each cut replaces one of them by its two children and
/// the final segments become the output boxes.
#[derive(Debug, Clone, Copy)]
struct Segment {
    /// Minimum corner, relative to the container's own minimum corner.
    origin: IVec3,
    /// Extents along each axis, always strictly positive.
    size: IVec3,
}

impl Segment {

    #[inline]
    fn volume(self) -> i64 {
        self.size.x as i64 * self.size.y as i64 * self.size.z as i64
    }

    /// A segment can be split as long as one of its extents is above the
    /// minimum splittable unit.
    #[inline]
    fn splittable(self) -> bool {
        self.size.max_element() > 1
    }

    /// Split this segment at the given interior position along the given
    /// axis. The two children exactly partition this segment.
    fn split(self, axis: Axis, cut: i32) -> (Segment, Segment) {
        let i = axis.index();
        debug_assert!(cut >= 1 && cut < self.size[i]);
        let mut low_size = self.size;
        low_size[i] = cut;
        let mut high_origin = self.origin;
        high_origin[i] += cut;
        let mut high_size = self.size;
        high_size[i] -= cut;
        (
            Segment { origin: self.origin, size: low_size },
            Segment { origin: high_origin, size: high_size },
        )
    }

}


/// A generator that tiles a container into `cuts + 1` boxes, or fewer if the
/// container runs out of splittable segments first.
#[derive(Debug, Clone)]
pub struct SplitGenerator {
    container: Container,
    cuts: u32,
}

impl SplitGenerator {

    #[inline]
    pub fn new(container: Container, cuts: u32) -> Self {
        Self { container, cuts }
    }

    /// Run the splitter with the given RNG. The emitted boxes exactly tile
    /// the container, recentered so the container center sits at the origin.
    ///
    /// A container with a zero dimension is an error, and so is requesting
    /// more cuts than [`Container::max_cuts`], which is never silently
    /// clamped.
    pub fn generate(&self, rand: &mut MixRandom) -> Result<Vec<PuzzleBox>, GenError> {

        let volume = self.container.volume();
        if volume == 0 {
            let Container { width, height, depth } = self.container;
            return Err(GenError::EmptyContainer { width, height, depth });
        }

        let max = self.container.max_cuts();
        if self.cuts as u64 > max {
            return Err(GenError::TooManyCuts { cuts: self.cuts, volume, max });
        }

        let mut segments = vec![Segment {
            origin: IVec3::ZERO,
            size: self.container.size(),
        }];

        for _ in 0..self.cuts {

            let Some(index) = pick_largest_splittable(&segments) else {
                trace!("no splittable segment left, stopping at {} boxes", segments.len());
                break;
            };

            let segment = segments[index];
            let axis = pick_axis(segment.size, rand);
            let cut = pick_cut(segment.size[axis.index()], rand);

            let (low, high) = segment.split(axis, cut);
            segments[index] = low;
            segments.push(high);

        }

        // Shift from container-relative corners to origin-centered boxes.
        let offset = self.container.size().as_dvec3() / 2.0;
        Ok(segments.into_iter()
            .map(|segment| {
                let size = segment.size.as_dvec3();
                PuzzleBox::new(segment.origin.as_dvec3() + size / 2.0 - offset, size)
            })
            .collect())

    }

}

/// Find the segment with the largest volume among splittable ones, ties going
/// to the earliest created.
fn pick_largest_splittable(segments: &[Segment]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (index, segment) in segments.iter().enumerate() {
        if !segment.splittable() {
            continue;
        }
        let volume = segment.volume();
        if best.is_none_or(|(_, best_volume)| volume > best_volume) {
            best = Some((index, volume));
        }
    }
    best.map(|(index, _)| index)
}

/// Pick the cut axis, the one with the largest extent. The RNG is only
/// consumed when several axes are tied for longest.
fn pick_axis(size: IVec3, rand: &mut MixRandom) -> Axis {
    let longest = size.max_element();
    let mut tied = [Axis::X; 3];
    let mut count = 0;
    for axis in Axis::ALL {
        if size[axis.index()] == longest {
            tied[count] = axis;
            count += 1;
        }
    }
    if count == 1 {
        tied[0]
    } else {
        rand.next_choice(&tied[..count])
    }
}

/// Pick an interior cut position in `[1, size - 1]`, from a triangular
/// distribution biased toward the midpoint and bounded by the minimum ratio.
fn pick_cut(size: i32, rand: &mut MixRandom) -> i32 {
    let s = size as f64;
    let low = (s * MIN_CUT_RATIO).ceil().max(1.0);
    let high = (s * (1.0 - MIN_CUT_RATIO)).floor().min(s - 1.0);
    if low > high {
        trace!(size, "degenerate cut range, cutting at 1");
        return 1;
    }
    let t = (rand.next_float() + rand.next_float()) / 2.0;
    (low + t * (high - low)).round() as i32
}
