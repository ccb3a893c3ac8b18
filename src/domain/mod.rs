pub mod identifier;
pub mod listing;
pub mod url_template;
