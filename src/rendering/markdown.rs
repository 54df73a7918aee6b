use pulldown_cmark::{html, Event, Options, Parser, TagEnd};

fn description_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_SMART_PUNCTUATION
}

/// Render a listing description (Markdown or plain text) to sanitized HTML.
///
/// Content files are authored by hand, so the output goes through
/// `ammonia` before it reaches `inner_html`.
pub fn render_description(raw: &str) -> String {
    let parser = Parser::new_ext(raw, description_options());
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

/// Plain-text excerpt of a description for `<meta name="description">`.
///
/// Markdown syntax is dropped, whitespace collapsed, and the result cut at
/// `max_chars` characters on a word boundary with a trailing ellipsis.
pub fn plain_text_excerpt(raw: &str, max_chars: usize) -> String {
    let parser = Parser::new_ext(raw, description_options());
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => text.push(' '),
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_on_word(&collapsed, max_chars)
}

fn truncate_on_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    // Leave room for the ellipsis.
    let cut: String = text.chars().take(max_chars - 1).collect();
    let trimmed = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end_matches([',', ';', ':', '.', ' ']))
}
