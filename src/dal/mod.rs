pub mod identifier_db;
pub mod listing_db;

/// Joins an object key the way a path join does: an empty folder yields the
/// bare name, a trailing `/` is not doubled.
pub fn join_key(folder_path: &str, name: &str) -> String {
    match folder_path.is_empty() || folder_path.ends_with('/') {
        true => format!("{}{}", folder_path, name),
        false => format!("{}/{}", folder_path, name),
    }
}
