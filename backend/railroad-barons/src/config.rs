use crate::baron::Baron;
use crate::deck::{StandardDeck, NUM_CARDS_PER_COLOR};
use crate::error::ConfigError;
use crate::player::NUM_OF_PIECES;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Settings of a game, fixed for the lifetime of a [`crate::manager::Manager`].
///
/// # JSON
/// Every field is optional, and falls back to its default:
/// ```
/// use railroad_barons::baron::Baron;
/// use railroad_barons::config::GameConfig;
///
/// let config = GameConfig::from_json(r#"{"barons": ["green", "red"]}"#).unwrap();
/// assert_eq!(config.barons, vec![Baron::Green, Baron::Red]);
/// assert_eq!(config.starting_pieces, 45);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// One player per baron, in rotation order.
    pub barons: Vec<Baron>,
    pub starting_pieces: u8,
    /// Multiplicity of each drawable card (eight colors and wild) in the default deck.
    pub cards_per_color: usize,
    /// Seeds the default deck's shuffles. Every game is different without one.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            barons: Baron::PLAYERS.to_vec(),
            starting_pieces: NUM_OF_PIECES,
            cards_per_color: NUM_CARDS_PER_COLOR,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses a configuration, and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    /// Returns an `Err` if either:
    ///   * There is no player, or more players than barons.
    ///   * A player is assigned [`Baron::Unclaimed`], or shares a baron with another player.
    ///   * Players would start without pieces, or the deck without cards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.barons.is_empty() {
            return Err(ConfigError::NoPlayers);
        }

        if self.barons.len() > Baron::PLAYERS.len() {
            return Err(ConfigError::TooManyPlayers(self.barons.len()));
        }

        let mut seen = HashSet::new();
        for baron in &self.barons {
            if baron.is_unclaimed() {
                return Err(ConfigError::UnclaimedBaron);
            }

            if !seen.insert(*baron) {
                return Err(ConfigError::DuplicateBaron(*baron));
            }
        }

        if self.starting_pieces == 0 {
            return Err(ConfigError::NoPieces);
        }

        if self.cards_per_color == 0 {
            return Err(ConfigError::NoCards);
        }

        Ok(())
    }

    /// A fresh [`StandardDeck`] following this configuration.
    pub fn build_deck(&self) -> StandardDeck {
        match self.seed {
            Some(seed) => StandardDeck::with_seed(self.cards_per_color, seed),
            None => StandardDeck::with_cards_per_color(self.cards_per_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;

    #[test]
    fn default_config() {
        let config = GameConfig::default();
        assert_eq!(
            config.barons,
            vec![Baron::Red, Baron::Blue, Baron::Yellow, Baron::Green]
        );
        assert_eq!(config.starting_pieces, 45);
        assert_eq!(config.cards_per_color, 20);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_takes_defaults() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn json_to_config() {
        let config = GameConfig::from_json(
            r#"{"barons": ["blue", "yellow"], "starting_pieces": 10, "cards_per_color": 3, "seed": 42}"#,
        )
        .unwrap();

        assert_eq!(
            config,
            GameConfig {
                barons: vec![Baron::Blue, Baron::Yellow],
                starting_pieces: 10,
                cards_per_color: 3,
                seed: Some(42),
            }
        );
        assert_eq!(config.build_deck().remaining(), 27);
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            GameConfig::from_json(r#"{"barons": ["purple"]}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn invalid_players() {
        assert!(matches!(
            GameConfig::from_json(r#"{"barons": []}"#),
            Err(ConfigError::NoPlayers)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"barons": ["red", "unclaimed"]}"#),
            Err(ConfigError::UnclaimedBaron)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"barons": ["red", "blue", "red"]}"#),
            Err(ConfigError::DuplicateBaron(Baron::Red))
        ));

        let config = GameConfig {
            barons: vec![
                Baron::Red,
                Baron::Blue,
                Baron::Yellow,
                Baron::Green,
                Baron::Red,
            ],
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyPlayers(5))
        ));
    }

    #[test]
    fn invalid_resources() {
        assert!(matches!(
            GameConfig::from_json(r#"{"starting_pieces": 0}"#),
            Err(ConfigError::NoPieces)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"cards_per_color": 0}"#),
            Err(ConfigError::NoCards)
        ));
    }

    #[test]
    fn seeded_configs_build_same_deck() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        let mut first_deck = config.build_deck();
        let mut second_deck = config.build_deck();

        for _ in 0..20 {
            assert_eq!(first_deck.draw(), second_deck.draw());
        }
    }
}
