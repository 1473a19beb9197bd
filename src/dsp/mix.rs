//! Dry/wet blending.

/*
Dry/Wet Blend
=============

A waveshaper rarely runs fully wet. The blend control crossfades between
the untouched input (dry) and the shaped signal (wet):

    output = dry × (1 - mix) + wet × mix

      mix = 0.0  →  input passes untouched
      mix = 1.0  →  only the shaped signal

The weights sum to 1.0, so blending two signals that stay inside [-1, 1]
stays inside [-1, 1] too.

This is a linear crossfade. Dry and wet are strongly correlated here (the
wet signal IS the dry signal bent by the curve), so the equal-power dip
that matters for unrelated sources is not an issue.

Jumping the mix from one block to the next steps the output level and
clicks. The shaper ramps it sample by sample instead; see `smooth`.
*/

/// Blend one dry and one wet sample.
///
/// output = (dry × (1-mix)) + (wet × mix)
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Blend `dry` into `wet` in place at a fixed mix.
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    let mix = mix.clamp(0.0, 1.0);
    if mix >= 1.0 {
        return;
    }

    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = blend_dry_wet(dry_sample, *wet_sample, mix);
    }
}
