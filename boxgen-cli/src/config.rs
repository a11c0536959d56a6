//! The configuration for the tool, given from environment variables and lazy
//! initialized when needed.

use once_cell::sync::OnceCell;
use std::env;

use boxgen::gen::DebuffDistribution;
use boxgen::geom::Debuff;


/// Return the chance for each figure box to be made of glass, in `[0, 1]`.
///
/// To change it, set `BOXGEN_GLASS_CHANCE` to a float, default is 0.
pub fn glass_chance() -> f64 {
    static ENV: OnceCell<f64> = OnceCell::new();
    *ENV.get_or_init(|| {
        env::var("BOXGEN_GLASS_CHANCE").ok()
            .and_then(|raw| raw.parse::<f64>().ok())
            .map(|chance| chance.clamp(0.0, 1.0))
            .unwrap_or(0.0)
    })
}

/// Return the debuff distribution applied after tiling, built from the
/// `BOXGEN_FRAGILE`, `BOXGEN_HEAVY` and `BOXGEN_NON_TILTABLE` count
/// variables, in that fixed order. Unset or unparsable variables add nothing.
pub fn debuff_distribution() -> DebuffDistribution {
    let mut distribution = DebuffDistribution::new();
    for (var, debuff) in [
        ("BOXGEN_FRAGILE", Debuff::Fragile),
        ("BOXGEN_HEAVY", Debuff::Heavy),
        ("BOXGEN_NON_TILTABLE", Debuff::NonTiltable),
    ] {
        if let Some(count) = env::var(var).ok().and_then(|raw| raw.parse::<usize>().ok()) {
            if count > 0 {
                distribution.insert(debuff, count);
            }
        }
    }
    distribution
}
