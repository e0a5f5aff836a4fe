//! Example: regenerate a tag snapshot from a saved tag list
//!
//! The tag list is the body of `GET https://api.redgifs.com/v1/tags`
//! (`{"tags": [{"name": "...", "count": N}, ...]}`), saved to a file.
//!
//! Run with: cargo run --example refresh_snapshot -- tags_response.json tags.json

use redgifs::snapshot::{self, EmbeddedSnapshot, SnapshotSource};
use redgifs::TagList;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: refresh_snapshot <tag list response> <snapshot output>");
    };

    let list = TagList::from_json(&std::fs::read_to_string(&input)?)?;
    let mapping = snapshot::mapping_from_records(&list.tags);

    let before = EmbeddedSnapshot.load()?;
    let added = snapshot::added_tags(&before, &mapping);

    snapshot::save_snapshot(&output, &mapping)?;

    println!("Before: {}", before.len());
    println!("Now: {}", mapping.len());
    println!("Added {} new tags", added.len());
    if !added.is_empty() {
        println!("{}", added.join(", "));
    }

    Ok(())
}
