use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FunctionScoreError;

/// Defines how the outputs of the functions of all matching filters are combined
/// into the score of a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// The function of the first matching filter, in declaration order, is used.
    #[default]
    First,
    /// Average of the function outputs.
    Avg,
    /// Maximum of the function outputs.
    Max,
    /// Sum of the function outputs.
    Total,
    /// Minimum of the function outputs.
    Min,
    /// Product of the function outputs.
    Multiply,
}

impl ScoreMode {
    /// All of the score modes.
    pub const ALL: [ScoreMode; 6] = [
        ScoreMode::First,
        ScoreMode::Avg,
        ScoreMode::Max,
        ScoreMode::Total,
        ScoreMode::Min,
        ScoreMode::Multiply,
    ];

    /// Returns the lowercase token of the score mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreMode::First => "first",
            ScoreMode::Avg => "avg",
            ScoreMode::Max => "max",
            ScoreMode::Total => "total",
            ScoreMode::Min => "min",
            ScoreMode::Multiply => "multiply",
        }
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreMode {
    type Err = FunctionScoreError;

    fn from_str(score_mode_str: &str) -> Result<ScoreMode, FunctionScoreError> {
        ScoreMode::ALL
            .into_iter()
            .find(|score_mode| score_mode.as_str() == score_mode_str)
            .ok_or_else(|| FunctionScoreError::UnknownScoreMode(score_mode_str.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreMode;
    use crate::FunctionScoreError;

    #[test]
    fn test_score_mode_from_str() {
        for score_mode in ScoreMode::ALL {
            assert_eq!(score_mode.to_string().parse::<ScoreMode>(), Ok(score_mode));
        }
        assert_eq!("multiply".parse::<ScoreMode>(), Ok(ScoreMode::Multiply));
        assert_eq!(
            "sum".parse::<ScoreMode>(),
            Err(FunctionScoreError::UnknownScoreMode("sum".to_string()))
        );
        assert!("Avg".parse::<ScoreMode>().is_err());
    }

    #[test]
    fn test_score_mode_serde() {
        assert_eq!(serde_json::to_string(&ScoreMode::Avg).unwrap(), r#""avg""#);
        let score_mode: ScoreMode = serde_json::from_str(r#""total""#).unwrap();
        assert_eq!(score_mode, ScoreMode::Total);
        assert!(serde_json::from_str::<ScoreMode>(r#""sum""#).is_err());
    }

    #[test]
    fn test_score_mode_default() {
        assert_eq!(ScoreMode::default(), ScoreMode::First);
    }
}
