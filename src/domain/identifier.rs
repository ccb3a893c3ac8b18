use serde::Deserialize;
use thiserror::Error;

/// How identifier lines are turned into template values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierParsing {
    /// Whitespace split, tokens substituted positionally as-is.
    #[default]
    Legacy,
    /// Each line must read `name [radius]`.
    Strict,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("blank identifier line")]
    Blank,
    #[error("expected `name [radius]`, got {0} tokens")]
    TooManyTokens(usize),
    #[error("radius '{0}' is not a whole number")]
    InvalidRadius(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictIdentifier {
    pub name: String,
    pub radius: Option<u32>,
}

impl StrictIdentifier {
    pub fn parse(line: &str) -> Result<Self, IdentifierError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => Err(IdentifierError::Blank),
            [name] => Ok(StrictIdentifier {
                name: name.to_string(),
                radius: None,
            }),
            [name, radius] => {
                let radius = radius
                    .parse::<u32>()
                    .map_err(|_| IdentifierError::InvalidRadius(radius.to_string()))?;
                Ok(StrictIdentifier {
                    name: name.to_string(),
                    radius: Some(radius),
                })
            }
            _ => Err(IdentifierError::TooManyTokens(tokens.len())),
        }
    }

    pub fn values(&self) -> Vec<String> {
        let mut values = vec![self.name.clone()];
        if let Some(radius) = self.radius {
            values.push(radius.to_string());
        }
        values
    }
}

/// Legacy tokenization: plain whitespace split.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
