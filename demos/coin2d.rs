//! Flat coin ripple: move the cursor through the coin to scatter pixels.

use pixelfield::prelude::*;

fn main() -> Result<(), EffectError> {
    run_titled(
        Silhouette::coin_2d(),
        EffectConfig::coin_2d(),
        42,
        "pixelfield - coin ripple",
    )
}
