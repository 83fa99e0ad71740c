use pulldown_cmark::{Event, Parser, html};

/// Renders markdown to HTML. Soft breaks are promoted to hard breaks so
/// single newlines in chat replies and journal entries show up as line
/// breaks, matching how the bot formats lists and paragraphs.
pub fn render(text: &str) -> String {
    let parser = Parser::new(text).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
