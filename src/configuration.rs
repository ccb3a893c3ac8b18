use std::env;

use chrono::NaiveDate;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

use crate::{dal::join_key, dal::listing_db::output_filename, domain::identifier::IdentifierParsing};

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://www.funda.nl/koop/{}/150000-200000/+{}km/sorteer-prijs-op/";

// Flat variable names understood on top of the `APP__` layout.
const LEGACY_ENV_KEYS: [(&str, &str); 9] = [
    ("S3_INPUT_BUCKET", "input.bucket"),
    ("S3_INPUT_FOLDER_PATH", "input.folder_path"),
    ("NEIGHBORHOODS_FILENAME", "input.filename"),
    ("S3_OUTPUT_BUCKET", "output.bucket"),
    ("S3_OUTPUT_FOLDER_PATH", "output.folder_path"),
    ("FUNDA_URL", "scrape.url_template"),
    ("IDENTIFIER_PARSING", "scrape.identifier_parsing"),
    ("STORAGE_BACKEND", "storage.backend"),
    ("STORAGE_LOCAL_ROOT", "storage.local_root"),
];

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub input: InputSettings,
    pub output: OutputSettings,
    pub scrape: ScrapeSettings,
    pub storage: StorageSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct InputSettings {
    pub bucket: String,
    pub folder_path: String,
    pub filename: String,
}

impl InputSettings {
    pub fn object_key(&self) -> String {
        join_key(&self.folder_path, &self.filename)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputSettings {
    pub bucket: String,
    pub folder_path: String,
}

impl OutputSettings {
    pub fn object_key(&self, run_date: NaiveDate) -> String {
        join_key(&self.folder_path, &output_filename(run_date))
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScrapeSettings {
    pub url_template: String,
    pub identifier_parsing: IdentifierParsing,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub local_root: Option<String>,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let builder = base_builder()?
        .add_source(config::File::with_name("configuration/base").required(false))
        .add_source(config::File::with_name("configuration/local").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        );

    with_legacy_env(builder, |key| env::var(key).ok())?
        .build()?
        .try_deserialize::<Settings>()
}

fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("input.folder_path", "")?
        .set_default("output.folder_path", "")?
        .set_default("scrape.url_template", DEFAULT_URL_TEMPLATE)?
        .set_default("scrape.identifier_parsing", "legacy")?
        .set_default("storage.backend", "s3")
}

fn with_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV_KEYS {
        builder = builder.set_override_option(key, lookup(var))?;
    }
    Ok(builder)
}
