//! `<loc>` extraction from sitemap documents

use quick_xml::events::Event;
use quick_xml::Reader;

/// Extracts the text of every `<loc>` element in a sitemap document
///
/// Elements are matched on their local name, so `<loc>`, `<sm:loc>` and
/// `<image:loc>` all count regardless of the namespace declarations. Text is
/// entity-unescaped and trimmed; CDATA sections are accepted. Parsing is
/// lenient: a malformed document yields the entries read before the error.
///
/// # Examples
///
/// ```
/// use sitemap_scraper::sitemap::parse_locs;
///
/// let xml = br#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/a</loc></url>
///   <url><loc> https://example.com/b?x=1&amp;y=2 </loc></url>
/// </urlset>"#;
/// assert_eq!(
///     parse_locs(xml),
///     vec!["https://example.com/a", "https://example.com/b?x=1&y=2"]
/// );
/// ```
pub fn parse_locs(xml: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut locs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"loc" {
                    current = Some(String::new());
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"loc" {
                    if let Some(text) = current.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            locs.push(text.to_string());
                        }
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(text) = current.as_mut() {
                    match t.unescape() {
                        Ok(unescaped) => text.push_str(&unescaped),
                        Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(
                    "Stopped parsing sitemap at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    locs
}
