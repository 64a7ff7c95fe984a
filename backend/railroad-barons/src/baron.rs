use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Owner of a route: either one of the players' colors, or nobody yet.
///
/// # Text
/// In map files, barons are written in UPPERCASE (e.g. `RED`, `UNCLAIMED`).
/// Parsing is case-insensitive.
///
/// # JSON
/// Barons are serialized in lowercase.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Baron {
    Unclaimed,
    Red,
    Blue,
    Yellow,
    Green,
}

impl Baron {
    /// The colors players can take, in the default rotation order.
    pub const PLAYERS: [Baron; 4] = [Baron::Red, Baron::Blue, Baron::Yellow, Baron::Green];

    #[inline]
    pub fn is_unclaimed(&self) -> bool {
        *self == Baron::Unclaimed
    }
}
