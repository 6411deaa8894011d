//! Scope-stack scanner for the inline card markup language.
//!
//! Recognized markers:
//! - `**bold**` / `*italic*` (toggle scopes)
//! - `{color}...{/}` (named color scopes, innermost wins)
//! - `{icon:name}` (inline icon reference)
//!
//! Malformed input never fails: an unterminated `{` is a literal brace, an
//! unclosed scope simply stays open until end of text.

use crate::token::{StyleState, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Bold,
    Italic,
    Color(String),
}

fn style_of(stack: &[Scope]) -> StyleState {
    let mut style = StyleState::plain();
    for scope in stack {
        match scope {
            Scope::Bold => style.bold = true,
            Scope::Italic => style.italic = true,
            // Topmost color wins; later entries overwrite earlier ones.
            Scope::Color(name) => style.color = Some(name.clone()),
        }
    }
    style
}

fn flush(buf: &mut String, stack: &[Scope], out: &mut Vec<Token>) {
    if buf.is_empty() {
        return;
    }
    out.push(Token::Text {
        content: std::mem::take(buf),
        style: style_of(stack),
    });
}

/// Parses one physical line of markup into a flat token stream.
///
/// Bold and italic markers toggle: if the top of the scope stack is already
/// the same scope the marker closes it, otherwise it opens one. This matches
/// the upstream card generator (a second `**` inside an open bold closes it
/// rather than nesting).
pub fn parse(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut stack: Vec<Scope> = Vec::new();
    let mut buf = String::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '*' && chars.get(i + 1) == Some(&'*') {
            // Buffered text belongs to the pre-toggle style.
            flush(&mut buf, &stack, &mut tokens);
            if stack.last() == Some(&Scope::Bold) {
                stack.pop();
            } else {
                stack.push(Scope::Bold);
            }
            i += 2;
        } else if c == '*' {
            flush(&mut buf, &stack, &mut tokens);
            if stack.last() == Some(&Scope::Italic) {
                stack.pop();
            } else {
                stack.push(Scope::Italic);
            }
            i += 1;
        } else if c == '{' {
            let Some(close) = chars[i + 1..].iter().position(|&c| c == '}') else {
                // No closing brace anywhere: literal `{`.
                buf.push('{');
                i += 1;
                continue;
            };
            let tag: String = chars[i + 1..i + 1 + close].iter().collect();
            flush(&mut buf, &stack, &mut tokens);
            if tag == "/" {
                if matches!(stack.last(), Some(Scope::Color(_))) {
                    stack.pop();
                }
            } else if let Some(name) = tag.strip_prefix("icon:") {
                // Icons bypass the style stack entirely.
                tokens.push(Token::icon(name));
            } else {
                stack.push(Scope::Color(tag));
            }
            i += close + 2;
        } else {
            buf.push(c);
            i += 1;
        }
    }

    flush(&mut buf, &stack, &mut tokens);
    tokens
}

/// Splits every text token into alternating non-whitespace / whitespace runs,
/// keeping each run's style. Icon tokens pass through unchanged.
///
/// Whitespace runs stay as their own tokens so the wrapper can treat them as
/// width-bearing separators. Exploding never reorders and never merges.
pub fn explode(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Icon { .. } => out.push(token.clone()),
            Token::Text { content, style } => {
                let mut run = String::new();
                let mut run_ws = false;
                for c in content.chars() {
                    let ws = c.is_whitespace();
                    if !run.is_empty() && ws != run_ws {
                        out.push(Token::text(std::mem::take(&mut run), style.clone()));
                    }
                    run_ws = ws;
                    run.push(c);
                }
                if !run.is_empty() {
                    out.push(Token::text(run, style.clone()));
                }
            }
        }
    }
    out
}
