#![allow(dead_code)]

pub mod range_server;

/// RSS-like document: `items` filler items, then the given trailer.
pub fn feed_with_trailer(items: usize, trailer: &str) -> Vec<u8> {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rss version=\"2.0\"><channel><title>Bills This Week</title>\n",
    );
    for i in 0..items {
        doc.push_str(&format!(
            "<item><title>H.R. {i} \u{2013} Résumé of measure {i}</title><description>Lorem ipsum dolor sit amet</description></item>\n"
        ));
    }
    doc.push_str(trailer);
    doc.push_str("</channel></rss>\n");
    doc.into_bytes()
}
