//! Title extraction.
//!
//! The title of a document is the text of its first heading, whatever that
//! heading's level. Only literal text counts: images, code spans and raw HTML
//! inside the heading are skipped.

use crate::token::Token;

/// Returns the trimmed text of the first heading in `tokens`, or an empty
/// string when there is no heading.
///
/// Text is collected from every token after the first
/// [`Token::HeadingOpen`] up to the [`Token::HeadingClose`] of the same
/// level. If that close never comes, collection runs to the end of the
/// stream.
///
/// ```
/// use mdview::{extract_title, Token};
///
/// let tokens = vec![
///     Token::HeadingOpen { level: 1 },
///     Token::Text("Hello ".into()),
///     Token::Inline(vec![Token::Text("World".into())]),
///     Token::HeadingClose { level: 1 },
/// ];
/// assert_eq!(extract_title(&tokens), "Hello World");
/// ```
pub fn extract_title(tokens: &[Token]) -> String {
    let first_heading = tokens.iter().enumerate().find_map(|(i, token)| match *token {
        Token::HeadingOpen { level } => Some((i, level)),
        _ => None,
    });

    let (start, level) = match first_heading {
        Some(found) => found,
        None => return String::new(),
    };

    let mut title = String::new();
    for token in &tokens[start + 1..] {
        if let Token::HeadingClose { level: closing } = *token {
            if closing == level {
                break;
            }
        }
        collect_text(token, &mut title);
    }

    title.trim().to_string()
}

/// The literal text carried by `token`: its content for [`Token::Text`], the
/// concatenated text of its children for [`Token::Inline`], and nothing for
/// every other kind.
pub fn text_of(token: &Token) -> String {
    let mut text = String::new();
    collect_text(token, &mut text);
    text
}

fn collect_text(token: &Token, buffer: &mut String) {
    let mut pending = vec![token];
    while let Some(token) = pending.pop() {
        match *token {
            Token::Text(ref text) => buffer.push_str(text),
            Token::Inline(ref children) => pending.extend(children.iter().rev()),
            Token::HeadingOpen { .. } | Token::HeadingClose { .. } | Token::Other => {}
        }
    }
}
