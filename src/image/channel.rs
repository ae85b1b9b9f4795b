//! Color channel selection.

use serde::{Deserialize, Serialize};

/// A color channel in an interleaved RGB pixel layout.
///
/// The set is closed on purpose: invalid channel names cannot exist
/// past the program's edges (CLI flags, config files), where clap and
/// serde perform the only runtime validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red channel (interleaved index 0).
    Red,
    /// Green channel (interleaved index 1).
    Green,
    /// Blue channel (interleaved index 2). The usual hiding spot:
    /// blue-channel noise is the least visible to the eye.
    Blue,
}

impl Channel {
    /// Index of this channel within an interleaved pixel.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// All channels, in interleaved order.
    pub fn all() -> [Channel; 3] {
        [Channel::Red, Channel::Green, Channel::Blue]
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}
