//! Same-line bracket matching over char indices.

pub fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}')
}

fn partner(c: char) -> Option<(char, bool)> {
    match c {
        '(' => Some((')', true)),
        '[' => Some((']', true)),
        '{' => Some(('}', true)),
        ')' => Some(('(', false)),
        ']' => Some(('[', false)),
        '}' => Some(('{', false)),
        _ => None,
    }
}

/// Char index of the bracket matching the one at `pos`, counting nesting of
/// the same bracket type only. Openers scan forward, closers backward.
pub fn find_matching_bracket(line: &str, pos: usize) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    let target = *chars.get(pos)?;
    let (want, forward) = partner(target)?;
    let mut depth = 1usize;
    let step = |i: usize| -> Option<usize> {
        if forward {
            (i + 1 < chars.len()).then_some(i + 1)
        } else {
            i.checked_sub(1)
        }
    };
    let mut i = pos;
    while let Some(next) = step(i) {
        i = next;
        if chars[i] == target {
            depth += 1;
        } else if chars[i] == want {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_parens_match() {
        let line = "foo(bar(baz))";
        assert_eq!(find_matching_bracket(line, 3), Some(12));
        assert_eq!(find_matching_bracket(line, 7), Some(11));
        assert_eq!(find_matching_bracket(line, 12), Some(3));
        assert_eq!(find_matching_bracket(line, 11), Some(7));
    }

    #[test]
    fn other_bracket_types_are_ignored() {
        assert_eq!(find_matching_bracket("{ ( }", 0), Some(4));
        assert_eq!(find_matching_bracket("[(])", 1), Some(3));
    }

    #[test]
    fn unmatched_and_non_brackets() {
        assert_eq!(find_matching_bracket("((", 0), None);
        assert_eq!(find_matching_bracket("abc", 1), None);
        assert_eq!(find_matching_bracket("()", 9), None);
        assert_eq!(find_matching_bracket(")", 0), None);
    }

    #[test]
    fn indices_are_chars() {
        assert_eq!(find_matching_bracket("é(ü)", 1), Some(3));
        assert!(is_bracket('}'));
        assert!(!is_bracket('<'));
    }
}
