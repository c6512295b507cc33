// HTML rendering for the single-page front-end.
//
// The page shell lives in web/templates/index.html and is embedded at
// compile time. Each request renders exactly one Page state into the
// `{{content}}` slot; everything user-supplied is escaped on the way in.

use crate::output::threat_label;
use crate::safebrowsing::traits::CheckResult;

const TEMPLATE: &str = include_str!("../../web/templates/index.html");

/// Shown when the submitted string is not a checkable URL.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL. Enter a full address such as https://example.com";

/// Shown when the reputation service could not answer.
pub const CHECK_UNAVAILABLE_MESSAGE: &str = "Check unavailable, please try again later";

/// What the page shows for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// Empty form, nothing checked yet.
    Prompt,
    Safe { url: String },
    Unsafe { url: String, threats: Vec<String> },
    Error { message: String },
}

impl Page {
    /// Page for a completed check.
    pub fn verdict(url: &str, result: &CheckResult) -> Self {
        if result.safe() {
            Page::Safe {
                url: url.to_string(),
            }
        } else {
            Page::Unsafe {
                url: url.to_string(),
                threats: result.threats().to_vec(),
            }
        }
    }

    pub fn error(message: &str) -> Self {
        Page::Error {
            message: message.to_string(),
        }
    }
}

/// Render a full HTML document for `page`.
pub fn render(page: &Page) -> String {
    TEMPLATE.replace("{{content}}", &render_content(page))
}

fn render_content(page: &Page) -> String {
    match page {
        Page::Prompt => String::new(),
        Page::Safe { url } => format!(
            "<div class=\"card result safe\">\n  \
             <h2>Safe</h2>\n  \
             <p>No known threats were found for <code>{}</code>.</p>\n\
             </div>",
            escape_html(url)
        ),
        Page::Unsafe { url, threats } => {
            let items: String = threats
                .iter()
                .map(|t| format!("    <li>{}</li>\n", escape_html(threat_label(t))))
                .collect();
            format!(
                "<div class=\"card result unsafe\">\n  \
                 <h2>Dangerous</h2>\n  \
                 <p><code>{}</code> is listed for:</p>\n  \
                 <ul class=\"threats\">\n{items}  </ul>\n\
                 </div>",
                escape_html(url)
            )
        }
        Page::Error { message } => format!(
            "<div class=\"card result error\">\n  <p>{}</p>\n</div>",
            escape_html(message)
        ),
    }
}

/// Escape text for safe inclusion in HTML element content or quoted attributes.
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

    #[test]
    fn test_prompt_has_form_and_no_result() {
        let html = render(&Page::Prompt);
        assert!(html.contains("<form"));
        assert!(html.contains("action=\"/check\""));
        assert!(!html.contains("class=\"card result"));
        assert!(!html.contains("{{content}}"));
    }

    #[test]
    fn test_unsafe_lists_threats_in_order() {
        let result = CheckResult::from_threats(vec![
            "SOCIAL_ENGINEERING".to_string(),
            "MALWARE".to_string(),
        ]);
        let html = render(&Page::verdict("https://bad.example", &result));
        let phishing = html.find("Social engineering").unwrap();
        let malware = html.find("<li>Malware</li>").unwrap();
        assert!(phishing < malware);
        assert!(html.contains("result unsafe"));
    }

    #[test]
    fn test_reflected_url_is_escaped() {
        let html = render(&Page::Safe {
            url: "https://x.example/<script>alert('x')</script>".to_string(),
        });
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b\"c"), "a&amp;b&quot;c");
        assert_eq!(escape_html("plain"), "plain");
    }
}
