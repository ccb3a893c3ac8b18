use anyhow::Context;
use object_store::{path::Path, ObjectStore};

/// Reads the identifier list and splits it on `\n`. Blank lines, including a
/// trailing one, are kept.
pub async fn read_identifiers(store: &dyn ObjectStore, key: &str) -> anyhow::Result<Vec<String>> {
    let location = Path::parse(key)
        .with_context(|| format!("Invalid identifier list key {}", key))?;

    let bytes = store
        .get(&location)
        .await
        .with_context(|| format!("Failed to fetch identifier list {}", key))?
        .bytes()
        .await
        .with_context(|| format!("Failed to read identifier list {}", key))?;

    let contents = std::str::from_utf8(&bytes)
        .with_context(|| format!("Identifier list {} is not valid UTF-8", key))?;

    let identifiers: Vec<String> = contents.split('\n').map(|s| s.to_string()).collect();
    log::info!("Read {} identifier lines from {}", identifiers.len(), key);

    Ok(identifiers)
}

#[cfg(test)]
mod tests {
    use object_store::{memory::InMemory, path::Path, ObjectStore};

    use super::read_identifiers;

    async fn store_with(key: &str, contents: &'static str) -> InMemory {
        let store = InMemory::new();
        store
            .put(&Path::parse(key).unwrap(), contents.as_bytes().to_vec().into())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn splits_on_newlines_in_order() {
        let store = store_with("lists/ids.txt", "amsterdam 5\nutrecht 10").await;

        let ids = read_identifiers(&store, "lists/ids.txt").await.unwrap();

        assert_eq!(ids, vec!["amsterdam 5", "utrecht 10"]);
    }

    #[tokio::test]
    async fn keeps_blank_and_trailing_segments() {
        let store = store_with("ids.txt", "amsterdam 5\n\nutrecht 10\n").await;

        let ids = read_identifiers(&store, "ids.txt").await.unwrap();

        assert_eq!(ids, vec!["amsterdam 5", "", "utrecht 10", ""]);
    }

    #[tokio::test]
    async fn non_ascii_key_is_read_verbatim() {
        let store = store_with("lijsten/wijken-é.txt", "amsterdam 5").await;

        let ids = read_identifiers(&store, "lijsten/wijken-é.txt").await.unwrap();

        assert_eq!(ids, vec!["amsterdam 5"]);
    }

    #[tokio::test]
    async fn empty_segment_in_key_is_an_error() {
        let store = InMemory::new();

        assert!(read_identifiers(&store, "lijsten//ids.txt").await.is_err());
    }

    #[tokio::test]
    async fn missing_object_is_an_error() {
        let store = InMemory::new();

        assert!(read_identifiers(&store, "nope.txt").await.is_err());
    }

    #[tokio::test]
    async fn invalid_utf8_is_an_error() {
        let store = InMemory::new();
        store
            .put(&Path::from("ids.txt"), vec![0xff, 0xfe, b'\n'].into())
            .await
            .unwrap();

        assert!(read_identifiers(&store, "ids.txt").await.is_err());
    }
}
