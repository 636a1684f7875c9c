//! Full article text scraping.
//!
//! Feed items usually carry only a title and intro. When full content is
//! requested (`--fetch-full-content`), the article page itself is fetched and
//! the main content region extracted.
//!
//! # Selector strategy
//!
//! RVO article pages keep their body inside `<main><article>`; older pages
//! only have `<article>` or a bare `<main>`. Selectors are tried in that
//! order and the first region with any text wins, so nested matches are never
//! double-counted.

use crate::normalize::clean_text;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{info, instrument};

/// Fetch one article page and extract its readable text.
///
/// Returns `Ok(None)` when the page has no extractable content.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_full_text(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let text = extract_text(&body);
    info!(
        bytes = text.as_ref().map_or(0, String::len),
        "Parsed article page"
    );
    Ok(text)
}

/// Extract the main content text from an article page.
pub fn extract_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector in ["main article", "article", "main"] {
        let selector = Selector::parse(selector).unwrap();
        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<Vec<_>>().join(" ");
            if let Some(cleaned) = clean_text(&text) {
                return Some(cleaned);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_from_article() {
        let html = r#"
            <html><body>
              <nav>Menu</nav>
              <main>
                <article>
                  <h1>Subsidie aanvragen</h1>
                  <p>Ondernemers kunnen   vanaf maart een aanvraag indienen.</p>
                </article>
              </main>
            </body></html>
        "#;

        let text = extract_text(html).unwrap();
        assert_eq!(
            text,
            "Subsidie aanvragen Ondernemers kunnen vanaf maart een aanvraag indienen."
        );
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_extract_text_falls_back_to_main() {
        let html = "<html><body><main><p>Alleen main</p></main></body></html>";
        assert_eq!(extract_text(html).unwrap(), "Alleen main");
    }

    #[test]
    fn test_extract_text_missing_content_region() {
        let html = "<html><body><div>Geen artikel</div></body></html>";
        assert_eq!(extract_text(html), None);
    }

    #[test]
    fn test_extract_text_empty_article() {
        let html = "<html><body><main><article>   </article></main></body></html>";
        assert_eq!(extract_text(html), None);
    }
}
