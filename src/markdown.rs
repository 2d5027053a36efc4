use pulldown_cmark::{html, Event, Options, Parser};

/// Convert a markdown chat message to HTML.
///
/// Raw HTML in the reply is emitted as text so it is escaped on output.
pub fn markdown_to_html(md: &str) -> String {
    let parser = Parser::new_ext(md, Options::empty()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
