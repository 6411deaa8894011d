//! Greedy first-fit line wrapping over exploded tokens.

use cardstock_core::{StyleState, Token};

/// A maximal run of tokens whose combined pixel width fits the budget.
/// Insertion order is left-to-right rendering order.
#[derive(Debug, Clone, Default)]
pub struct Line {
    pub tokens: Vec<Token>,
    pub width: f32,
}

/// Pixel advance of one token. Icons are atomic units of `icon_advance`
/// (icon square plus its trailing gap); text defers to the measurer. The
/// wrapper and the renderer both use this, so wrapped widths and drawn
/// cursor advances cannot drift apart.
pub fn token_width<F>(token: &Token, icon_advance: f32, measure: &F) -> f32
where
    F: Fn(&str, &StyleState) -> f32,
{
    match token {
        Token::Icon { .. } => icon_advance,
        Token::Text { content, style } => measure(content, style),
    }
}

/// Packs tokens into lines of at most `max_width` pixels.
///
/// A token that alone exceeds `max_width` is never split further; it lands
/// on its own line (no hyphenation). Whitespace tokens wrap like any other
/// token, trailing spaces included: their width counts but has no ink.
pub fn wrap<F>(tokens: &[Token], max_width: f32, icon_advance: f32, measure: F) -> Vec<Line>
where
    F: Fn(&str, &StyleState) -> f32,
{
    let mut lines = Vec::new();
    let mut current = Line::default();

    for token in tokens {
        let width = token_width(token, icon_advance, &measure);
        if current.width + width > max_width && !current.tokens.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current.tokens.push(token.clone());
        current.width += width;
    }

    if !current.tokens.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstock_core::{explode, parse};

    // 10 px per char keeps the arithmetic legible.
    fn measure(content: &str, _style: &StyleState) -> f32 {
        content.chars().count() as f32 * 10.0
    }

    fn words(text: &str) -> Vec<Token> {
        explode(&parse(text))
    }

    fn line_text(line: &Line) -> String {
        line.tokens
            .iter()
            .map(|t| match t {
                Token::Text { content, .. } => content.clone(),
                Token::Icon { name } => format!("[{name}]"),
            })
            .collect()
    }

    #[test]
    fn everything_fits_on_one_line() {
        let lines = wrap(&words("ab cd"), 100.0, 24.0, measure);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "ab cd");
        assert_eq!(lines[0].width, 50.0);
    }

    #[test]
    fn breaks_before_the_overflowing_token() {
        // "aaa" (30) + " " (10) + "bbb" (30) against a 45 px budget.
        let lines = wrap(&words("aaa bbb"), 45.0, 24.0, measure);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["aaa ", "bbb"]);
    }

    #[test]
    fn no_line_exceeds_budget_except_single_token() {
        let lines = wrap(&words("one two three four five sixsix"), 80.0, 24.0, measure);
        for line in &lines {
            if line.tokens.len() > 1 {
                assert!(line.width <= 80.0, "line {:?} overflows", line_text(line));
            }
        }
    }

    #[test]
    fn overlong_token_gets_its_own_line() {
        let lines = wrap(&words("a incomprehensibilities b"), 60.0, 24.0, measure);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["a ", "incomprehensibilities", " b"]);
        assert!(lines[1].width > 60.0);
    }

    #[test]
    fn icon_is_atomic_at_its_reserved_width() {
        let lines = wrap(&words("word {icon:gem}"), 55.0, 24.0, measure);
        // 40 + 10 + 24 > 55, so the icon wraps whole.
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["word ", "[gem]"]);
        assert_eq!(lines[1].width, 24.0);
    }

    #[test]
    fn empty_input_produces_no_lines() {
        assert!(wrap(&[], 100.0, 24.0, measure).is_empty());
    }

    #[test]
    fn style_scopes_survive_wrapping() {
        let lines = wrap(&words("**bold words** here"), 60.0, 24.0, measure);
        let first = &lines[0].tokens[0];
        match first {
            Token::Text { style, .. } => assert!(style.bold),
            Token::Icon { .. } => panic!("expected text"),
        }
    }
}
