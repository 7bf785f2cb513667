//! Argument Splitter
//!
//! Tokenizes the text between the outer parentheses of an action expression into
//! top-level arguments. Commas only split at bracket depth zero and outside of
//! quotes. Quote characters stay in the token so the literal parser can see them.

/// Split a raw argument list into trimmed, non-empty top-level tokens.
///
/// Unbalanced closers are tolerated: depth saturates at zero instead of going
/// negative. Empty tokens (trailing commas, blank input) are dropped.
pub fn split_args(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;
    let mut escaped = false;
    let mut depth: usize = 0;

    for c in args.chars() {
        // Inside a quote everything is copied; only the matching quote closes it
        if let Some(quote) = in_quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                in_quote = Some(c);
                current.push(c);
            }
            '{' | '[' | '(' => {
                depth += 1;
                current.push(c);
            }
            '}' | ']' | ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                push_token(&mut tokens, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }

    push_token(&mut tokens, &current);
    tokens
}

fn push_token(tokens: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}
