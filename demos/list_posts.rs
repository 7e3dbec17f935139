use anyhow::Result;
use rooftop::{Client, GetOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG=rooftop=debug shows each request.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Configure via ROOFTOP_URL / ROOFTOP_API_TOKEN or a `.rooftoprc` file.
    let client = Client::from_env()?;

    let opts = GetOptions::new()
        .param("per_page", 5)
        .param("order", "asc")
        .param("orderby", "id");
    let posts = client.resource("posts").get(&opts).await?;

    for post in posts.as_array().into_iter().flatten() {
        println!(
            "{}\t{}",
            post["id"],
            post["title"]["rendered"].as_str().unwrap_or("")
        );
    }
    Ok(())
}
