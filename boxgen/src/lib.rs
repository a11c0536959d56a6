//! Procedural generation of non-overlapping box assemblies: a seeded PRNG, a
//! splitter that tiles a container volume exactly by recursive cuts, an
//! assembler that grows connected figures by face attachment, and a
//! distribution pass that tags a quota of boxes with gameplay debuffs.
//!
//! Everything is deterministic under an explicit seed, each generation call
//! owns its PRNG instance and shares no state, so calls are freely concurrent.

pub mod rand;
pub mod geom;
pub mod gen;
