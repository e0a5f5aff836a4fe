//! Example: resolve tags and build search URLs
//!
//! This example demonstrates:
//! - Exact and fuzzy tag resolution
//! - Handling unknown tags
//! - Sampling random tags
//! - Building the search request for the best match
//!
//! Run with: cargo run --example tag_search -- "hige tits" americam

use redgifs::{Config, GifSearch, RedgifsError, SharedTags, Tags};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== redgifs - Tag search ===\n");

    let config = Config::load_config("")?;
    let base_url = config.get_api_base_url();
    let tags = SharedTags::new(Tags::from_config(&config)?);

    let mut queries: Vec<String> = std::env::args().skip(1).collect();
    if queries.is_empty() {
        queries = vec!["hitomi tanaka".into(), "japanes".into(), "qwxzvbn".into()];
    }

    for query in &queries {
        match tags.search(query).await {
            Ok(found) => {
                println!("'{}' -> {:?}", query, found);
                let url = GifSearch::new(&found[0]).to_url(&base_url)?;
                println!("  GET {}", url);
            }
            Err(RedgifsError::InvalidTag(tag)) => println!("'{}' -> no tag found", tag),
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nRandom tags: {:?}", tags.random_many(5).await);

    Ok(())
}
