use anyhow::Context;
use chrono::Local;
use env_logger::Env;
use funda_scraper::{configuration::get_configuration, handler::handler, startup::Application};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration, Local::now().date_naive())?;

    println!("scraping funda");
    handler(Value::Null, Value::Null, &application).await?;

    println!("Uploaded: {}", application.output_location());
    Ok(())
}
