use indexmap::IndexMap;
use thiserror::Error;
use url::Url;

use crate::domain::{
    identifier::{tokenize, IdentifierError, IdentifierParsing, StrictIdentifier},
    url_template::{TemplateError, UrlTemplate},
};

/// Raw identifier line -> target url, in first-seen order.
pub type UrlMapping = IndexMap<String, String>;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("cannot build url for identifier {line:?}: {source}")]
    Substitution {
        line: String,
        #[source]
        source: TemplateError,
    },
    #[error("malformed identifier {line:?}: {source}")]
    Identifier {
        line: String,
        #[source]
        source: IdentifierError,
    },
    #[error("identifier {line:?} supplies {found} value(s) but the url template expects {expected}")]
    SlotMismatch {
        line: String,
        expected: usize,
        found: usize,
    },
    #[error("identifier {line:?} produced an invalid url {url:?}: {source}")]
    InvalidUrl {
        line: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub fn build_url_mapping(
    identifiers: &[String],
    template: &UrlTemplate,
    parsing: IdentifierParsing,
) -> Result<UrlMapping, PlanError> {
    let mut mapping = UrlMapping::new();

    for line in identifiers.iter() {
        let url = match parsing {
            IdentifierParsing::Legacy => legacy_url(line, template)?,
            IdentifierParsing::Strict => strict_url(line, template)?,
        };
        // A repeated line keeps its first position and takes the latest value.
        mapping.insert(line.clone(), url);
    }

    log::info!("Planned {} urls from {} identifier lines", mapping.len(), identifiers.len());
    Ok(mapping)
}

fn legacy_url(line: &str, template: &UrlTemplate) -> Result<String, PlanError> {
    template
        .render(&tokenize(line))
        .map_err(|source| PlanError::Substitution {
            line: line.to_string(),
            source,
        })
}

fn strict_url(line: &str, template: &UrlTemplate) -> Result<String, PlanError> {
    let identifier = StrictIdentifier::parse(line).map_err(|source| PlanError::Identifier {
        line: line.to_string(),
        source,
    })?;

    let values = identifier.values();
    if values.len() != template.slot_count() {
        return Err(PlanError::SlotMismatch {
            line: line.to_string(),
            expected: template.slot_count(),
            found: values.len(),
        });
    }

    let url = template
        .render(&values)
        .map_err(|source| PlanError::Substitution {
            line: line.to_string(),
            source,
        })?;

    match Url::parse(&url) {
        Ok(_) => Ok(url),
        Err(source) => Err(PlanError::InvalidUrl {
            line: line.to_string(),
            url,
            source,
        }),
    }
}
