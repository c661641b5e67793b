//! HTML fragments embedded in chat messages.

/// Makes a URL safe to place inside a double-quoted `href` attribute.
///
/// Only `"` is rewritten (to `%22`); everything else is kept verbatim so that
/// receivers get back the link they were sent.
pub fn escape_href(url: &str) -> String {
    url.replace('"', "%22")
}

/// Builds an anchor tag in the `<a href="..." >text</a>` shape used by the
/// Telegram HTML parse mode.
pub fn anchor(href: &str, text: &str) -> String {
    format!("<a href=\"{}\" >{}</a>", escape_href(href), text)
}
