use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use object_store::{aws::AmazonS3Builder, local::LocalFileSystem, ObjectStore};
use reqwest::Client;

use crate::configuration::{Settings, StorageBackend, StorageSettings};

/// Settings plus the clients built from them, shared by one invocation.
pub struct Application {
    settings: Settings,
    input_store: Arc<dyn ObjectStore>,
    output_store: Arc<dyn ObjectStore>,
    http_client: Client,
    run_date: NaiveDate,
}

impl Application {
    pub fn build(settings: Settings, run_date: NaiveDate) -> anyhow::Result<Self> {
        let input_store = build_store(&settings.storage, &settings.input.bucket)?;
        let output_store = build_store(&settings.storage, &settings.output.bucket)?;

        // Default transport settings: no timeout, no custom headers.
        let http_client = Client::new();

        Ok(Self::with_stores(
            settings,
            input_store,
            output_store,
            http_client,
            run_date,
        ))
    }

    pub fn with_stores(
        settings: Settings,
        input_store: Arc<dyn ObjectStore>,
        output_store: Arc<dyn ObjectStore>,
        http_client: Client,
        run_date: NaiveDate,
    ) -> Self {
        Application {
            settings,
            input_store,
            output_store,
            http_client,
            run_date,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_store(&self) -> &dyn ObjectStore {
        self.input_store.as_ref()
    }

    pub fn output_store(&self) -> Arc<dyn ObjectStore> {
        self.output_store.clone()
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn output_key(&self) -> String {
        self.settings.output.object_key(self.run_date)
    }

    /// `<bucket>/<key>` of the results object.
    pub fn output_location(&self) -> String {
        format!("{}/{}", self.settings.output.bucket, self.output_key())
    }
}

fn build_store(storage: &StorageSettings, bucket: &str) -> anyhow::Result<Arc<dyn ObjectStore>> {
    match storage.backend {
        StorageBackend::S3 => {
            let s3 = AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .build()
                .with_context(|| format!("Failed to configure S3 bucket {}", bucket))?;
            Ok(Arc::new(s3))
        }
        StorageBackend::Local => {
            let root = std::path::Path::new(storage.local_root.as_deref().unwrap_or("."))
                .join(bucket);
            std::fs::create_dir_all(&root)
                .with_context(|| format!("Failed to create bucket directory {}", root.display()))?;
            let local = LocalFileSystem::new_with_prefix(&root)
                .with_context(|| format!("Failed to open bucket directory {}", root.display()))?;
            Ok(Arc::new(local))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Application;
    use crate::{
        configuration::{
            InputSettings, OutputSettings, ScrapeSettings, Settings, StorageBackend,
            StorageSettings, DEFAULT_URL_TEMPLATE,
        },
        domain::identifier::IdentifierParsing,
    };

    #[test]
    fn local_backend_builds_and_names_output() {
        let root = std::env::temp_dir().join(format!("funda_scraper_{}", std::process::id()));
        let settings = Settings {
            input: InputSettings {
                bucket: "in".to_string(),
                folder_path: "lists".to_string(),
                filename: "ids.txt".to_string(),
            },
            output: OutputSettings {
                bucket: "out".to_string(),
                folder_path: "funda".to_string(),
            },
            scrape: ScrapeSettings {
                url_template: DEFAULT_URL_TEMPLATE.to_string(),
                identifier_parsing: IdentifierParsing::Legacy,
            },
            storage: StorageSettings {
                backend: StorageBackend::Local,
                local_root: Some(root.to_string_lossy().to_string()),
            },
        };

        let app = Application::build(settings, NaiveDate::from_ymd_opt(2024, 11, 30).unwrap())
            .unwrap();

        assert!(root.join("in").is_dir());
        assert!(root.join("out").is_dir());
        assert_eq!(app.output_location(), "out/funda/rent_data_24_11_30.json");

        std::fs::remove_dir_all(root).unwrap();
    }
}
