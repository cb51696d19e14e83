//! Shared configuration value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Loss function selector understood by the trainer's `--agent_loss_type` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentLossType {
    /// Negative log-likelihood loss
    #[serde(rename = "NLL")]
    Nll,
    /// Hinge loss
    #[serde(rename = "Hinge")]
    Hinge,
}

impl AgentLossType {
    /// The exact spelling the trainer recognizes
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentLossType::Nll => "NLL",
            AgentLossType::Hinge => "Hinge",
        }
    }
}

impl fmt::Display for AgentLossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentLossType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nll" => Ok(AgentLossType::Nll),
            "hinge" => Ok(AgentLossType::Hinge),
            other => Err(format!(
                "Unknown agent loss type '{}' (expected NLL or Hinge)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_type_round_trip() {
        assert_eq!("NLL".parse::<AgentLossType>().unwrap(), AgentLossType::Nll);
        assert_eq!(
            "hinge".parse::<AgentLossType>().unwrap(),
            AgentLossType::Hinge
        );
        assert_eq!(AgentLossType::Nll.to_string(), "NLL");
        assert!("mse".parse::<AgentLossType>().is_err());
    }

    #[test]
    fn test_loss_type_serde_spelling() {
        let json = serde_json::to_string(&AgentLossType::Nll).unwrap();
        assert_eq!(json, "\"NLL\"");
    }
}
