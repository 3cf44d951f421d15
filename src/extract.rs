use select::document::Document;
use select::predicate::{Class, Name, Predicate};

/// Collects the `href` of every `div.column ul li a` element, in document order.
///
/// Nothing is filtered: duplicates stay, and an anchor without `href` gives an
/// empty string.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Document::from(html);

    let listing = Name("div")
        .and(Class("column"))
        .descendant(Name("ul"))
        .descendant(Name("li"))
        .descendant(Name("a"));

    document
        .find(listing)
        .map(|a| a.attr("href").unwrap_or_default().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_in_document_order() {
        let html = r#"
            <html><body>
              <div class="column first">
                <ul>
                  <li><a href="https://itunes.apple.com/us/podcast/one/id1">One</a></li>
                  <li><a href="https://itunes.apple.com/us/podcast/two/id2">Two</a></li>
                </ul>
              </div>
              <div class="column">
                <ul><li><a href="https://itunes.apple.com/us/podcast/three/id3">Three</a></li></ul>
              </div>
            </body></html>
        "#;

        assert_eq!(
            vec![
                "https://itunes.apple.com/us/podcast/one/id1",
                "https://itunes.apple.com/us/podcast/two/id2",
                "https://itunes.apple.com/us/podcast/three/id3",
            ],
            extract_links(html)
        );
    }

    #[test]
    fn duplicates_and_empty_hrefs_are_kept() {
        let html = r#"
            <div class="column"><ul>
              <li><a href="/a">A</a></li>
              <li><a href="">Empty</a></li>
              <li><a href="/a">A again</a></li>
              <li><a>No href</a></li>
            </ul></div>
        "#;

        assert_eq!(vec!["/a", "", "/a", ""], extract_links(html));
    }

    #[test]
    fn anchors_outside_listing_are_ignored() {
        let html = r#"
            <div class="header"><ul><li><a href="/nav">Nav</a></li></ul></div>
            <div class="column">
              <a href="/not-in-list">Loose</a>
              <ol><li><a href="/ordered">Ordered</a></li></ol>
              <ul><li><span><a href="/nested">Nested</a></span></li></ul>
            </div>
            <section class="column"><ul><li><a href="/section">Section</a></li></ul></section>
        "#;

        assert_eq!(vec!["/nested"], extract_links(html));
    }

    #[test]
    fn nested_lists_yield_each_anchor_once() {
        let html = r#"
            <div class="column"><ul>
              <li><a href="/outer">Outer</a>
                <ul><li><a href="/inner">Inner</a></li></ul>
              </li>
            </ul></div>
        "#;

        assert_eq!(vec!["/outer", "/inner"], extract_links(html));
    }

    #[test]
    fn no_match_is_empty() {
        assert!(extract_links("<html><body><p>Nothing here</p></body></html>").is_empty());
        assert!(extract_links("").is_empty());
    }
}
