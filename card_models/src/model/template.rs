//! Card templates and the field substitution used to render them.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FIELD_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("field reference pattern"));
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("tag pattern"));

/// A card template: how one card's question and answer are built from a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDef {
    pub name: String,
    pub question_format: String,
    pub answer_format: String,

    /// Inactive templates produce no cards.
    pub active: bool,
}

impl TemplateDef {
    /// Create an active template.
    pub fn new(
        name: impl Into<String>,
        question_format: impl Into<String>,
        answer_format: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            question_format: question_format.into(),
            answer_format: answer_format.into(),
            active: true,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn render_question<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
        render(&self.question_format, lookup)
    }

    pub fn render_answer<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
        render(&self.answer_format, lookup)
    }
}

/// Replace every `{{Name}}` reference with the named field's value.
///
/// Only plain field references are understood. Section markers, cloze
/// references and unknown names render as the empty string.
pub fn render<'a>(format: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    FIELD_REF
        .replace_all(format, |caps: &Captures| {
            lookup(caps[1].trim()).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Reduce field HTML to its visible text.
///
/// Comments and tags are removed, common entities decoded, and the result
/// trimmed.
pub fn strip_html(text: &str) -> String {
    let text = HTML_COMMENT.replace_all(text, "");
    let text = HTML_TAG.replace_all(&text, "");
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "Front" => Some("one"),
            "Back" => Some("two"),
            _ => None,
        }
    }

    #[test]
    fn test_render_substitutes_fields() {
        let template = TemplateDef::new("Forward", "{{Front}}", "Q: {{Front}} / A: {{ Back }}");
        assert_eq!(template.render_question(lookup), "one");
        assert_eq!(template.render_answer(lookup), "Q: one / A: two");
    }

    #[test]
    fn test_render_unknown_references_are_blank() {
        assert_eq!(render("[{{Missing}}]", lookup), "[]");
        assert_eq!(
            render("{{#cloze:1:Text}}<br>{{cloze:1:Text}}<br>{{/cloze:1:Text}}", lookup),
            "<br><br>"
        );
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>bold</b> text"), "bold text");
        assert_eq!(strip_html("a<!-- hidden <i>x</i> -->b"), "ab");
        assert_eq!(strip_html("&nbsp;fish &amp; chips "), "fish & chips");
        assert_eq!(strip_html("<br><div></div>"), "");
    }
}
