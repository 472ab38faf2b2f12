//! Volumetric coin: the coin tilts toward the cursor and explodes into
//! debris under close contact.

use pixelfield::prelude::*;

fn main() -> Result<(), EffectError> {
    run_titled(
        Silhouette::coin_3d(),
        EffectConfig::coin_3d(),
        42,
        "pixelfield - coin ripple 3d",
    )
}
