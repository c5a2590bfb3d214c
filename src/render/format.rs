//! Cosmetic formatting for bot answers.
//!
//! The input is plain text from the backend; the output is an HTML snippet
//! with paragraphs, line breaks and `<strong>` emphasis. This is a string
//! transform, not a markdown parser: it accepts anything, never fails, and
//! keeps the visible words in their original order.
//!
//! ```
//! use jpia_chat::render::format_bot_response;
//!
//! assert_eq!(format_bot_response("Uno\n\nDos\nTres"), "<p>Uno</p><p>Dos<br>Tres</p>");
//! assert_eq!(
//!     format_bot_response("Ver Art. 5"),
//!     "<p>Ver <strong>Art. 5</strong></p>"
//! );
//! assert_eq!(format_bot_response("1 < 2"), "<p>1 &lt; 2</p>");
//! ```

use super::escape_html;
use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());

static STRONG_DOUBLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static STRONG_SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

/// Tomo numbers, articles, laws and regulations plus the token that follows them.
static LEGAL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(TOMO\s+\d+|Artículo|Art\.|Ley|Reglamento)\s*([^\s,.<]*)").unwrap()
});

// Anchored to line starts, so it only applies to text that still carries raw newlines.
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[•\-*]\s+(.*?)(<br>|$)").unwrap());

/// A capitalised phrase of at least nine characters ending in a colon.
static KEY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-ZÁÉÍÓÚÑ][A-Za-záéíóúñ\s]{8,}?):").unwrap());

/// Turns a raw bot answer into display markup. All text is escaped first.
pub fn format_bot_response(text: &str) -> String {
    let escaped = escape_html(text);

    let body = PARAGRAPH_BREAK.replace_all(&escaped, "</p><p>");
    let body = body.replace('\n', "<br>");
    let formatted = format!("<p>{}</p>", body);

    let formatted = STRONG_DOUBLE.replace_all(&formatted, "<strong>${1}</strong>");
    let formatted = STRONG_SINGLE.replace_all(&formatted, "<strong>${1}</strong>");

    let formatted = LEGAL_REFERENCE.replace_all(&formatted, "<strong>${1} ${2}</strong>");

    let formatted = BULLET.replace_all(&formatted, "• <strong>${1}</strong><br>");

    let formatted = KEY_LABEL.replace_all(&formatted, "<strong>${1}:</strong>");

    formatted.replace("<p></p>", "").replace("<p><br></p>", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_becomes_one_paragraph() {
        assert_eq!(format_bot_response("Hola mundo"), "<p>Hola mundo</p>");
    }

    #[test]
    fn blank_lines_split_paragraphs_and_single_newlines_break() {
        assert_eq!(
            format_bot_response("Uno\n\nDos\nTres"),
            "<p>Uno</p><p>Dos<br>Tres</p>"
        );
        assert_eq!(format_bot_response("a\n\n\nb"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn star_markers_become_strong() {
        assert_eq!(
            format_bot_response("Esto es **importante** y *clave*"),
            "<p>Esto es <strong>importante</strong> y <strong>clave</strong></p>"
        );
    }

    #[test]
    fn legal_references_are_bolded_with_their_token() {
        assert_eq!(
            format_bot_response("Ver Art. 5 del Reglamento"),
            "<p>Ver <strong>Art. 5</strong> del <strong>Reglamento </strong></p>"
        );
        assert_eq!(
            format_bot_response("en el tomo 3"),
            "<p>en el <strong>tomo 3 </strong></p>"
        );
    }

    #[test]
    fn long_capitalised_labels_before_a_colon_are_bolded() {
        assert_eq!(
            format_bot_response("Requisitos generales: tener permiso"),
            "<p><strong>Requisitos generales:</strong> tener permiso</p>"
        );
        assert_eq!(format_bot_response("Nota: corto"), "<p>Nota: corto</p>");
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        assert_eq!(format_bot_response("Hola\n\n\n"), "<p>Hola</p>");
        assert_eq!(format_bot_response("\n\nHola"), "<p>Hola</p>");
        assert_eq!(format_bot_response("\n"), "");
        assert_eq!(format_bot_response(""), "");
    }

    #[test]
    fn markup_in_the_answer_is_escaped() {
        assert_eq!(
            format_bot_response("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn arbitrary_input_is_tolerated() {
        for input in [
            "***",
            "**sin cierre",
            "* \n- \n• ",
            "ÁÉÍÓÚ: ñ",
            "Ley",
            "\u{0}\u{feff}emoji 🤖 **x** : :",
            "TOMO   12, Artículo.",
        ] {
            let out = format_bot_response(input);
            assert_eq!(
                out.matches("<strong>").count(),
                out.matches("</strong>").count(),
                "unbalanced emphasis for {input:?}"
            );
        }
    }
}
