//! Banner composition as a standalone HTML document.
//!
//! The base media fills a 3:4 frame; overlays are absolutely positioned on
//! top of it and movable ones are shifted by their editor offsets.

use std::path::Path;

use crate::banner::{festival_display_name, BannerConfig, CustomTextList};

use super::OverlayEditor;

/// Base media of a composed banner. Image and video are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerMedia<'a> {
    /// Generated image as a `data:` URI.
    Image(&'a str),
    /// Downloaded video file.
    Video(&'a Path),
}

/// What the banner panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerView<'a> {
    Loading,
    GeneratingVideo,
    Error(&'a str),
    Empty,
    Banner(BannerMedia<'a>),
}

const PAGE_STYLE: &str = "body{margin:0;background:#111827;color:#fff;font-family:sans-serif}\
.panel{width:600px;height:800px;margin:32px auto;background:#1f2937;border-radius:8px;position:relative;overflow:hidden}\
.status{display:flex;flex-direction:column;align-items:center;justify-content:center;height:100%;text-align:center}\
.media{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}\
.shade{position:absolute;inset:0;background:rgba(0,0,0,0.1)}\
.overlay{position:absolute}";

/// Render the banner panel for `view`.
pub fn render_banner_html(
    view: &BannerView<'_>,
    config: &BannerConfig,
    texts: &CustomTextList,
    editor: &OverlayEditor,
) -> String {
    let body = match view {
        BannerView::Loading => status_block(&[
            "Generating your beautiful banner...",
            "This might take a moment.",
        ]),
        BannerView::GeneratingVideo => status_block(&[
            "Generating your video...",
            "This can take a few minutes. Please keep this tab open.",
        ]),
        BannerView::Error(message) => format!(
            "<div class=\"status\" style=\"color:#f87171\"><p>{}</p></div>",
            escape_html(message)
        ),
        BannerView::Empty => status_block(&[
            "Your generated banner will appear here.",
            "Fill out the form and click \"Generate Banner\" to start.",
        ]),
        BannerView::Banner(media) => compose(media, config, texts, editor),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} Banner</title>\n<style>{}</style>\n</head>\n<body>\n<div class=\"panel\">\n{}\n</div>\n</body>\n</html>\n",
        escape_html(&config.festival_name),
        PAGE_STYLE,
        body
    )
}

fn status_block(lines: &[&str]) -> String {
    let mut html = String::from("<div class=\"status\">");
    for line in lines {
        html.push_str(&format!("<p>{}</p>", escape_html(line)));
    }
    html.push_str("</div>");
    html
}

fn compose(
    media: &BannerMedia<'_>,
    config: &BannerConfig,
    texts: &CustomTextList,
    editor: &OverlayEditor,
) -> String {
    let accent = escape_html(&config.accent_color);
    let mut html = String::new();

    match media {
        BannerMedia::Image(uri) => html.push_str(&format!(
            "<img class=\"media\" src=\"{}\" alt=\"{} Banner\">\n",
            escape_html(uri),
            escape_html(&config.festival_name)
        )),
        BannerMedia::Video(path) => html.push_str(&format!(
            "<video class=\"media\" src=\"{}\" autoplay loop muted playsinline></video>\n",
            escape_html(&path.display().to_string())
        )),
    }
    html.push_str("<div class=\"shade\"></div>\n");

    if let Some(logo) = &config.logo {
        html.push_str(&format!(
            "<div class=\"overlay\" style=\"top:16px;left:16px;width:128px;height:96px;background:rgba(255,255,255,0.8);border-radius:8px;display:flex;align-items:center;justify-content:center;padding:8px;box-sizing:border-box\"><img src=\"{}\" alt=\"Shop Logo\" style=\"max-width:100%;max-height:100%;object-fit:contain\"></div>\n",
            escape_html(logo)
        ));
    }

    // Title block
    html.push_str(&format!(
        "<div class=\"overlay\" style=\"top:25%;left:0;right:0;text-align:center;text-shadow:2px 2px 8px rgba(0,0,0,0.7)\">\
<h2 style=\"margin:0;font-size:{}rem;line-height:1\">Happy</h2>\
<h1 style=\"margin:-10px 0 0;color:{};font-size:{}rem;line-height:1.1\">{}</h1></div>\n",
        editor.greeting_size().rem(),
        accent,
        editor.festival_size().rem(),
        escape_html(festival_display_name(&config.festival_name))
    ));

    // Offers
    html.push_str(&format!(
        "<div class=\"overlay\" style=\"top:50%;margin-top:32px;right:32px;max-width:45%;text-shadow:1px 1px 6px rgba(0,0,0,0.8)\">\
<h3 style=\"margin:0 0 8px;color:{}\">{} Offer</h3><ul style=\"list-style:none;margin:0;padding:0\">",
        accent,
        escape_html(&config.festival_name)
    ));
    for line in config.offer_lines() {
        html.push_str(&format!("<li>{}</li>", escape_html(line)));
    }
    html.push_str("</ul></div>\n");

    for item in texts.iter() {
        html.push_str(&format!(
            "<div class=\"overlay\" data-id=\"{}\" style=\"left:0;top:0;transform:translate({}px, {}px);text-shadow:1px 1px 4px #000\"><p style=\"margin:0;font-weight:600;font-size:{}rem\">{}</p></div>\n",
            item.id,
            item.position.x,
            item.position.y,
            item.size.rem(),
            escape_html(&item.text)
        ));
    }

    html.push_str(&render_footer(config, editor, &accent));
    html
}

fn render_footer(config: &BannerConfig, editor: &OverlayEditor, accent: &str) -> String {
    let offset = editor.footer_position();
    let mut lines = vec![format!(
        "<p style=\"margin:0;font-size:1.25rem;font-weight:700;text-align:center;letter-spacing:0.1em\">{}</p>",
        escape_html(&config.shop_name)
    )];

    if !config.address.is_empty() {
        lines.push(footer_line("Address", &config.address, accent));
    }
    if let Some(phones) = config.phone_line() {
        lines.push(footer_line("Phone", &phones, accent));
    }
    if !config.email.is_empty() {
        lines.push(footer_line("Email", &config.email, accent));
    }
    if !config.website.is_empty() {
        lines.push(footer_line("Website", &config.website, accent));
    }
    if !config.instagram_handle.is_empty() {
        lines.push(footer_line(
            "Instagram",
            &format!("@{}", config.instagram_handle),
            accent,
        ));
    }
    if !config.facebook_handle.is_empty() {
        lines.push(footer_line("Facebook", &config.facebook_handle, accent));
    }

    format!(
        "<div class=\"overlay\" style=\"bottom:16px;left:16px;right:16px;transform:translate({}px, {}px)\">\
<div style=\"background:rgba(0,0,0,0.7);padding:16px;border-radius:8px;border-top:2px solid {};color:#fef3c7;font-size:12px;display:flex;flex-direction:column;gap:8px\">{}</div></div>\n",
        offset.x,
        offset.y,
        accent,
        lines.join("")
    )
}

fn footer_line(label: &str, value: &str, accent: &str) -> String {
    format!(
        "<div><span style=\"color:{}\">{}:</span> {}</div>",
        accent,
        label,
        escape_html(value)
    )
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BannerConfig;
    use crate::editor::{DragTarget, Point, Rect};

    fn scene() -> (BannerConfig, CustomTextList, OverlayEditor) {
        (BannerConfig::default(), CustomTextList::new(), OverlayEditor::new())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_empty_view_shows_placeholder() {
        let (config, texts, editor) = scene();
        let html = render_banner_html(&BannerView::Empty, &config, &texts, &editor);
        assert!(html.contains("Your generated banner will appear here."));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_error_view_is_escaped() {
        let (config, texts, editor) = scene();
        let html = render_banner_html(&BannerView::Error("<oops>"), &config, &texts, &editor);
        assert!(html.contains("&lt;oops&gt;"));
    }

    #[test]
    fn test_image_banner_has_overlays() {
        let (mut config, mut texts, editor) = scene();
        config.festival_name = "Diwali".to_string();
        config.instagram_handle = "rajnandani".to_string();
        texts.add_at("Open Sunday", 1).unwrap();

        let view = BannerView::Banner(BannerMedia::Image("data:image/jpeg;base64,AAAA"));
        let html = render_banner_html(&view, &config, &texts, &editor);

        assert!(html.contains("src=\"data:image/jpeg;base64,AAAA\""));
        assert!(html.contains("दिवाली"));
        assert!(html.contains("Diwali Offer"));
        assert!(html.contains("Open Sunday"));
        assert!(html.contains("@rajnandani"));
        assert!(html.contains("font-size:6rem"));
        assert!(html.contains("Raj Nandani Jewellers"));
        // Empty email/website are omitted.
        assert!(!html.contains("Email:"));
        assert!(!html.contains("Website:"));
    }

    #[test]
    fn test_video_banner_and_footer_offset() {
        let (config, mut texts, mut editor) = scene();
        let container = Rect::new(0.0, 0.0, 600.0, 800.0);
        editor.begin_drag(DragTarget::Footer, Point::new(10.0, 10.0), container, &texts);
        editor.drag_to(Point::new(30.0, -5.0), container, &mut texts);
        editor.end_drag();

        let path = Path::new("/tmp/banner.mp4");
        let view = BannerView::Banner(BannerMedia::Video(path));
        let html = render_banner_html(&view, &config, &texts, &editor);

        assert!(html.contains("<video class=\"media\" src=\"/tmp/banner.mp4\""));
        assert!(html.contains("translate(20px, -15px)"));
    }
}
