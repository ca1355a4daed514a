use std::fmt::Write;

use crate::frames::frames_model::{ButtonAction, FrameCard};

impl FrameCard {
    /// Renders the card as an HTML document carrying `fc:frame` meta tags.
    pub fn render(&self) -> String {
        let mut head = String::new();
        meta(&mut head, "fc:frame", "vNext");
        meta(&mut head, "fc:frame:image", &self.image);
        if let Some(placeholder) = &self.input_placeholder {
            meta(&mut head, "fc:frame:input:text", placeholder);
        }
        for (i, button) in self.buttons.iter().enumerate() {
            let n = i + 1;
            meta(&mut head, &format!("fc:frame:button:{}", n), &button.label);
            meta(
                &mut head,
                &format!("fc:frame:button:{}:action", n),
                button.action.as_str(),
            );
            if let Some(target) = &button.target {
                let property = match button.action {
                    ButtonAction::Tx => format!("fc:frame:button:{}:target", n),
                    ButtonAction::Post => format!("fc:frame:button:{}:post_url", n),
                };
                meta(&mut head, &property, target);
            }
        }
        if let Some(post_url) = &self.post_url {
            meta(&mut head, "fc:frame:post_url", post_url);
        }

        let mut body = String::new();
        let _ = writeln!(body, "    <h1>{}</h1>", escape_html(&self.title));
        for line in &self.lines {
            let _ = writeln!(body, "    <p>{}</p>", escape_html(line));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n  <head>\n{head}  </head>\n  <body>\n{body}  </body>\n</html>\n"
        )
    }
}

fn meta(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        "    <meta property=\"{}\" content=\"{}\" />",
        escape_html(property),
        escape_html(content)
    );
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
