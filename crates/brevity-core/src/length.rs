use thiserror::Error;

use crate::types::SummaryLength;

/// Hard floor and ceiling for the `max_length` sent to the provider.
pub const MAX_TOKENS_FLOOR: u32 = 20;
pub const MAX_TOKENS_CEILING: u32 = 1000;

const CUSTOM_MIN_FLOOR: u32 = 10;

/// Resolved token bounds for one provider request.
///
/// Invariant: `MAX_TOKENS_FLOOR <= max_tokens <= MAX_TOKENS_CEILING` and
/// `min_tokens < max_tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_tokens: u32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("length is 'custom' but no maxLength was supplied")]
    MissingCustomMax,

    #[error("maxLength must be a positive integer")]
    ZeroCustomMax,
}

/// Maps a length selector (and optional custom target) to concrete bounds.
///
/// Presets are fixed; a custom target is clamped into
/// [`MAX_TOKENS_FLOOR`, `MAX_TOKENS_CEILING`] and its minimum is derived from
/// the clamped value, which keeps `min < max` for every input.
pub fn resolve(length: SummaryLength, custom_max: Option<u32>) -> Result<LengthBounds, PolicyError> {
    let bounds = match length {
        SummaryLength::Short => LengthBounds {
            min_tokens: 20,
            max_tokens: 60,
        },
        SummaryLength::Medium => LengthBounds {
            min_tokens: 60,
            max_tokens: 150,
        },
        SummaryLength::Long => LengthBounds {
            min_tokens: 150,
            max_tokens: 300,
        },
        SummaryLength::Custom => {
            let requested = custom_max.ok_or(PolicyError::MissingCustomMax)?;
            if requested == 0 {
                return Err(PolicyError::ZeroCustomMax);
            }
            let max_tokens = requested.clamp(MAX_TOKENS_FLOOR, MAX_TOKENS_CEILING);
            let min_tokens = (max_tokens / 3).max(CUSTOM_MIN_FLOOR);
            LengthBounds {
                min_tokens,
                max_tokens,
            }
        }
    };

    debug_assert!(bounds.min_tokens < bounds.max_tokens);
    Ok(bounds)
}
