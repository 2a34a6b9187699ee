use crate::{PxSize, SpanSize};

/// How tiles choose a span size when the host supplies no explicit hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingMode {
    /// Derive the span from the tile's intrinsic measured size, clamped to
    /// 1..=2 per axis; tiles without one are 1×1.
    Deterministic,
    /// Draw the span from a seeded distribution. The draw is a pure function
    /// of `(seed, position)`, so repeated traversals and speculative passes
    /// agree without consulting any cache.
    Randomized { seed: u64 },
}

impl Default for SizingMode {
    fn default() -> Self {
        Self::Deterministic
    }
}

/// Resolves the base span for a position from the hint chain:
/// explicit hint → intrinsic size → sizing mode fallback.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SpanResolver {
    mode: SizingMode,
}

impl SpanResolver {
    pub(crate) fn new(mode: SizingMode) -> Self {
        Self { mode }
    }

    pub(crate) fn resolve(
        &self,
        position: usize,
        hint: Option<SpanSize>,
        intrinsic: Option<PxSize>,
        unit: i32,
    ) -> SpanSize {
        if let Some(hint) = hint {
            return hint.clamped();
        }
        match self.mode {
            SizingMode::Randomized { seed } => draw(seed, position),
            SizingMode::Deterministic => match intrinsic {
                Some(size) if unit > 0 => SpanSize {
                    width: (size.width / unit).clamp(1, 2) as u32,
                    height: (size.height / unit).clamp(1, 2) as u32,
                },
                _ => SpanSize::UNIT,
            },
        }
    }
}

fn draw(seed: u64, position: usize) -> SpanSize {
    let mut rng =
        fastrand::Rng::with_seed(seed ^ (position as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let roll = rng.u32(0..100);
    if roll > 80 {
        SpanSize::new(2, 2)
    } else if roll > 60 {
        SpanSize::new(2, 1)
    } else if roll > 40 {
        SpanSize::new(1, 2)
    } else {
        SpanSize::UNIT
    }
}
