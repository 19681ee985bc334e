//! Name normalization for command groups, subcommands and flags.

/// Lower-case a tag name and join its alphanumeric runs with `-`.
///
/// `"Access tokens"` → `"access-tokens"`, `"My/Group"` → `"my-group"`.
pub fn normalize_group(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }
    while result.ends_with('-') {
        result.pop();
    }
    result
}

/// Split a camel/Pascal case identifier on case boundaries.
///
/// `"getHTTPStatus"` → `"get-http-status"`. Other characters pass through.
pub fn normalize_operation_id(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower)
                {
                    result.push('-');
                }
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Kebab-case any identifier: case boundaries and separators both become `-`.
///
/// Used for subcommand names (`"getTeam"` → `"get-team"`) and long flag names
/// (`"teamKey"` → `"team-key"`, `"filter_by"` → `"filter-by"`).
pub fn kebab_case(s: &str) -> String {
    normalize_group(&normalize_operation_id(s))
}
