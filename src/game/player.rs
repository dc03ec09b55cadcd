use serde::{Deserialize, Serialize};

/// Owner of a placed chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Human,
    Computer,
}

impl Token {
    /// Get the other player
    pub fn other(self) -> Token {
        match self {
            Token::Human => Token::Computer,
            Token::Computer => Token::Human,
        }
    }
}
