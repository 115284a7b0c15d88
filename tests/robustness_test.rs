use std::time::{Duration, Instant};

use rs_gravity::{extract, extract_bytes, Configuration};

#[test]
fn extract_does_not_panic_on_empty_input() {
    match extract("", None) {
        Ok(article) => {
            assert!(article.top_node.is_none());
            assert_eq!(article.cleaned_text, "");
            assert!(article.images.is_empty());
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_malformed_html_unclosed_tags() {
    let html = "<p>text that is long enough to be scored, with a comma<div>more";
    match extract(html, None) {
        Ok(article) => {
            assert!(article.cleaned_text.contains("text"));
            assert!(article.cleaned_text.contains("more"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_malformed_html_invalid_nesting() {
    assert!(extract("<p><div></p></div>", None).is_ok());
    assert!(extract("<table><p>cell<td>x</table></td>", None).is_ok());
}

#[test]
fn extract_does_not_panic_on_broken_attributes() {
    let html = r#"<div class="test id=broken><img src=">"#;
    assert!(extract(html, Some("http://x.com/")).is_ok());
}

#[test]
fn extract_does_not_panic_on_non_html_input() {
    assert!(extract("just some plain text, no markup at all", None).is_ok());
    assert!(extract("{\"json\": true}", None).is_ok());
    assert!(extract("\u{0}\u{1}\u{2}<<<>>>", None).is_ok());
}

#[test]
fn extract_bytes_handles_invalid_utf8() {
    let html = b"<html><body><p>Broken \xFF\xFE bytes inside a paragraph of text.</p></body></html>";
    match extract_bytes(html, None, &Configuration::default()) {
        Ok(article) => assert!(article.cleaned_text.contains('\u{FFFD}')),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_handles_deep_nesting() {
    let depth = 500;
    let html = format!(
        "{}<p>Deeply nested paragraph, with enough text to be scored.</p>{}",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );

    match extract(&html, None) {
        Ok(article) => assert!(article.cleaned_text.contains("Deeply nested")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_handles_many_candidates_quickly() {
    let mut html = String::from("<html><body>");
    for i in 0..2_000 {
        html.push_str(&format!(
            "<div class=\"s{i}\"><p>Paragraph {i}, with a comma and enough text.</p></div>"
        ));
    }
    html.push_str("</body></html>");

    let start = Instant::now();
    let result = extract(&html, None);
    assert!(result.is_ok());
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[test]
fn extract_ignores_unusable_urls() {
    let html = r#"<html><head>
        <link rel="canonical" href="javascript:void(0)">
        <meta property="og:image" content="data:image/png;base64,AAAA">
    </head><body><img src="mailto:someone@example.com"></body></html>"#;

    match extract(html, Some("ftp://x.com/file")) {
        Ok(article) => {
            assert_eq!(article.canonical_link, None);
            assert_eq!(article.final_url, None);
            assert!(article.images.is_empty());
            assert_eq!(article.top_image, None);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}
