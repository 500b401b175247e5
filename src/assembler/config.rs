//! Fixed-size bounds applied to every processed line.
use super::error::Error;

pub const MAX_TOKENS: usize = 100;
pub const MAX_TOKEN_LENGTH: usize = 19;
pub const MAX_LINE_LENGTH: usize = 255;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Limits {
    /// Size of a line's token sequence, terminal marker included.
    pub max_tokens: usize,
    /// Characters kept from each field; the rest is dropped silently.
    pub max_token_length: usize,
    /// Characters kept from each raw input line.
    pub max_line_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_tokens: MAX_TOKENS,
            max_token_length: MAX_TOKEN_LENGTH,
            max_line_length: MAX_LINE_LENGTH,
        }
    }
}

impl Limits {
    /// Largest number of whitespace-separated fields a line may carry.
    pub fn max_fields(&self) -> usize {
        self.max_tokens.saturating_sub(1)
    }

    pub fn validate(self) -> Result<Self, Error> {
        if self.max_tokens < 2 {
            return Err(Error::InvalidLimits(format!(
                "max tokens must leave room for the end marker (got {})",
                self.max_tokens
            )));
        }
        if self.max_token_length == 0 {
            return Err(Error::InvalidLimits("max token length must be at least 1".to_owned()));
        }
        if self.max_line_length == 0 {
            return Err(Error::InvalidLimits("max line length must be at least 1".to_owned()));
        }
        Ok(self)
    }
}
