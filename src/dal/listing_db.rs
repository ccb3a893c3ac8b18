use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use chrono::NaiveDate;
use object_store::{path::Path, ObjectStore};

use crate::domain::listing::Listing;

pub fn output_filename(run_date: NaiveDate) -> String {
    format!("rent_data_{}.json", run_date.format("%y_%m_%d"))
}

/// Writes the whole result set to one object, replacing what was there.
pub struct ListingSink {
    store: Arc<dyn ObjectStore>,
    key: String,
}

impl ListingSink {
    pub fn new(store: Arc<dyn ObjectStore>, key: String) -> Self {
        ListingSink { store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn write(&self, listings: &[Listing]) -> anyhow::Result<()> {
        let location = Path::parse(&self.key)
            .with_context(|| format!("Invalid listings key {}", self.key))?;
        let body = serde_json::to_vec(listings).context("Failed to serialize listings")?;

        self.store
            .put(&location, Bytes::from(body).into())
            .await
            .with_context(|| format!("Failed to write listings to {}", self.key))?;

        log::info!("Wrote {} listings to {}", listings.len(), self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use object_store::{memory::InMemory, path::Path, ObjectStore};

    use super::{output_filename, ListingSink};
    use crate::domain::listing::Listing;

    fn listing(n: u8) -> Listing {
        Listing {
            title: format!("Damrak {}", n),
            location: "1012 LG Amsterdam".to_string(),
            address: format!("Damrak {} Amsterdam", n),
            link: format!("/koop/amsterdam/huis-{}/", n),
        }
    }

    #[test]
    fn filename_uses_two_digit_year_month_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();

        assert_eq!(output_filename(date), "rent_data_25_01_09.json");
    }

    #[tokio::test]
    async fn writes_compact_json_that_round_trips() {
        let store = Arc::new(InMemory::new());
        let sink = ListingSink::new(store.clone(), "out/rent_data_25_01_09.json".to_string());
        let listings = vec![listing(1), listing(2)];

        sink.write(&listings).await.unwrap();

        let bytes = store
            .get(&Path::from("out/rent_data_25_01_09.json"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();

        assert!(text.starts_with(r#"[{"title":"Damrak 1","location":"#));
        assert!(!text.contains(": ") && !text.contains(", "));
        let parsed: Vec<Listing> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, listings);
    }

    #[tokio::test]
    async fn non_ascii_key_is_written_verbatim() {
        let store = Arc::new(InMemory::new());
        let sink = ListingSink::new(store.clone(), "wijken-é/rent_data_25_01_09.json".to_string());

        sink.write(&[listing(1)]).await.unwrap();

        let bytes = store
            .get(&Path::parse("wijken-é/rent_data_25_01_09.json").unwrap())
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        let parsed: Vec<Listing> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, vec![listing(1)]);
        assert!(store
            .head(&Path::from("wijken-é/rent_data_25_01_09.json"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn later_write_replaces_earlier_one() {
        let store = Arc::new(InMemory::new());
        let sink = ListingSink::new(store.clone(), "rent.json".to_string());

        sink.write(&[listing(1), listing(2)]).await.unwrap();
        sink.write(&[]).await.unwrap();

        let bytes = store
            .get(&Path::from("rent.json"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"[]");
    }
}
