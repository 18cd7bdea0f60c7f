//! Rich text to inline Markdown

use crate::notion::RichText;

/// Render a list of runs as inline Markdown
pub fn rich_text_to_markdown(runs: &[RichText]) -> String {
    runs.iter().map(annotate).collect()
}

fn annotate(run: &RichText) -> String {
    if run.plain_text.is_empty() {
        return String::new();
    }

    let mut text = if run.kind == "equation" {
        format!("${}$", run.plain_text)
    } else {
        run.plain_text.clone()
    };

    let a = &run.annotations;
    if a.code {
        text = wrap(&text, "`");
    }
    if a.bold {
        text = wrap(&text, "**");
    }
    if a.italic {
        text = wrap(&text, "_");
    }
    if a.strikethrough {
        text = wrap(&text, "~~");
    }
    if let Some(href) = run.href.as_deref().filter(|h| !h.is_empty()) {
        text = format!("[{}]({})", text, href);
    }

    text
}

/// Surround text with a marker, keeping edge whitespace outside so that
/// `"bold "` becomes `"**bold** "`.
fn wrap(text: &str, marker: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{}{}{}{}{}", leading, marker, trimmed, marker, trailing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::Annotations;

    fn run(text: &str, annotations: Annotations) -> RichText {
        RichText {
            annotations,
            ..RichText::plain(text)
        }
    }

    #[test]
    fn test_plain_runs_concatenate() {
        let runs = [RichText::plain("Hello, "), RichText::plain("world")];
        assert_eq!(rich_text_to_markdown(&runs), "Hello, world");
    }

    #[test]
    fn test_annotations() {
        let bold = run("strong ", Annotations { bold: true, ..Default::default() });
        let both = run(
            "both",
            Annotations {
                bold: true,
                italic: true,
                ..Default::default()
            },
        );
        let code = run("x = 1", Annotations { code: true, ..Default::default() });
        let struck = run("old", Annotations { strikethrough: true, ..Default::default() });

        assert_eq!(rich_text_to_markdown(&[bold]), "**strong** ");
        assert_eq!(rich_text_to_markdown(&[both]), "_**both**_");
        assert_eq!(rich_text_to_markdown(&[code]), "`x = 1`");
        assert_eq!(rich_text_to_markdown(&[struck]), "~~old~~");
    }

    #[test]
    fn test_link_and_equation() {
        let link = RichText {
            href: Some("https://example.com".to_string()),
            ..RichText::plain("site")
        };
        let equation = RichText {
            kind: "equation".to_string(),
            ..RichText::plain("e=mc^2")
        };
        assert_eq!(
            rich_text_to_markdown(&[link, equation]),
            "[site](https://example.com)$e=mc^2$"
        );
    }
}
