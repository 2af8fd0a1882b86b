//! HTML rendering
//!
//! Pages are built by writing into a `String` and dropped into the shared
//! layout at `ui/layout.html`. A render failure is reported to the caller as
//! `fmt::Error` and becomes a 500 for that request only.

use groupie_common::{Artist, ArtistDetail};
use std::fmt::{self, Write};

const LAYOUT_HTML: &str = include_str!("../ui/layout.html");

const TITLE_SLOT: &str = "{{title}}";
const CONTENT_SLOT: &str = "{{content}}";

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap `content` in the site layout
fn page(title: &str, content: &str) -> Result<String, fmt::Error> {
    let (head, rest) = LAYOUT_HTML.split_once(TITLE_SLOT).ok_or(fmt::Error)?;
    let (middle, tail) = rest.split_once(CONTENT_SLOT).ok_or(fmt::Error)?;

    let mut out = String::with_capacity(LAYOUT_HTML.len() + content.len());
    out.push_str(head);
    out.push_str(&escape_html(title));
    out.push_str(middle);
    out.push_str(content);
    out.push_str(tail);
    Ok(out)
}

/// Home page: one card per artist
pub fn render_home(artists: &[Artist]) -> Result<String, fmt::Error> {
    let mut content = String::new();
    writeln!(content, "<h1>Artists</h1>")?;
    writeln!(content, "<section class=\"artists\">")?;
    for artist in artists {
        let name = escape_html(&artist.name);
        writeln!(
            content,
            "<a class=\"card\" href=\"/artist?id={}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"><h2>{}</h2><p>Since {}</p></a>",
            artist.id,
            escape_html(&artist.image),
            name,
            name,
            artist.creation_date,
        )?;
    }
    writeln!(content, "</section>")?;

    page("Artists", &content)
}

/// Artist page: facts, then concerts grouped by location
pub fn render_artist(detail: &ArtistDetail) -> Result<String, fmt::Error> {
    let artist = &detail.artist;
    let name = escape_html(&artist.name);

    let mut content = String::new();
    writeln!(content, "<article class=\"artist\">")?;
    writeln!(
        content,
        "<img class=\"portrait\" src=\"{}\" alt=\"{}\">",
        escape_html(&artist.image),
        name
    )?;
    writeln!(content, "<div class=\"facts\">")?;
    writeln!(content, "<h1>{}</h1>", name)?;
    writeln!(content, "<dl>")?;
    writeln!(content, "<dt>Members</dt><dd>{}</dd>", escape_html(&detail.members))?;
    writeln!(content, "<dt>Creation date</dt><dd>{}</dd>", artist.creation_date)?;
    writeln!(
        content,
        "<dt>First album</dt><dd>{}</dd>",
        escape_html(&artist.first_album)
    )?;
    writeln!(content, "</dl>")?;
    writeln!(content, "</div>")?;

    writeln!(content, "<section class=\"concerts\">")?;
    writeln!(content, "<h2>Concerts</h2>")?;
    if detail.linked_concerts.is_empty() {
        writeln!(content, "<p class=\"empty\">No concerts listed.</p>")?;
    } else {
        writeln!(content, "<table>")?;
        writeln!(content, "<thead><tr><th>Location</th><th>Dates</th></tr></thead>")?;
        writeln!(content, "<tbody>")?;
        for (location, dates) in &detail.linked_concerts {
            let dates = dates
                .iter()
                .map(|d| escape_html(d))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                content,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(location),
                dates
            )?;
        }
        writeln!(content, "</tbody>")?;
        writeln!(content, "</table>")?;
    }
    writeln!(content, "</section>")?;

    write_list(&mut content, "Locations", &detail.locations)?;
    write_list(&mut content, "Dates", &detail.dates)?;
    writeln!(content, "</article>")?;

    page(&artist.name, &content)
}

fn write_list(out: &mut String, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "<section class=\"list\">")?;
    writeln!(out, "<h2>{}</h2>", escape_html(heading))?;
    writeln!(out, "<ul>")?;
    for item in items {
        writeln!(out, "<li>{}</li>", escape_html(item))?;
    }
    writeln!(out, "</ul>")?;
    writeln!(out, "</section>")
}

/// Error page with the status code and an upper-case headline
///
/// Never fails: falls back to a bare page if the layout cannot be used.
pub fn render_error(code: u16, message: &str) -> String {
    let content = format!(
        "<section class=\"error\"><h1>{}</h1><p>{}</p><a href=\"/\">Back to artists</a></section>",
        code,
        escape_html(message)
    );

    page(&format!("{} {}", code, message), &content).unwrap_or_else(|_| {
        format!(
            "<!DOCTYPE html><html><head><title>{code}</title></head><body>{content}</body></html>"
        )
    })
}
