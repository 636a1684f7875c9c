//! Dataset card rendering.
//!
//! The card is the YAML-front-matter README the dataset hub renders on the
//! repo page: metadata block first, then a short Markdown description with
//! the source list.

use crate::models::DatasetCard;
use std::error::Error;

/// Render the dataset card as front matter plus Markdown body.
pub fn render_card(card: &DatasetCard) -> Result<String, Box<dyn Error>> {
    let yaml = serde_yaml::to_string(card)?;

    let mut out = format!("---\n{yaml}---\n\n# Dutch RVO open-data content\n\n");
    out.push_str(
        "Text records synced from the RVO (Rijksdienst voor Ondernemend Nederland) \
         Open Data API. One JSON object per line: `url`, `content`, `source`, \
         `content_type`.\n\nSources:\n",
    );
    for source in &card.sources {
        out.push_str("- ");
        out.push_str(source);
        out.push('\n');
    }

    Ok(out)
}
