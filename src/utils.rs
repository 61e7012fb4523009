// Utility functions

/// Parses a money amount that may carry a currency sign and thousands
/// separators, e.g. `"$1,299.99"`.
pub fn parse_money(text: &str) -> Option<f64> {
    let cleaned = text.replace('$', "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Rounds a price to cents.
pub fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Splits one CSV line into fields, honoring double-quoted fields with
/// embedded commas and doubled quotes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Quotes a CSV field when it needs it.
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_decorated_amounts() {
        assert_eq!(parse_money("499.99"), Some(499.99));
        assert_eq!(parse_money("$1,299.99"), Some(1299.99));
        assert_eq!(parse_money("  $550 "), Some(550.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("  "), None);
        assert_eq!(parse_money("n/a"), None);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(101.005), 101.01);
        assert_eq!(round_cents(99.994), 99.99);
    }

    #[test]
    fn splits_plain_and_quoted_lines() {
        assert_eq!(
            split_csv_line("RTX 4090,1599.99,1499.00"),
            vec!["RTX 4090", "1599.99", "1499.00"]
        );
        assert_eq!(
            split_csv_line(r#""GPU, 16GB","$1,299.99",999"#),
            vec!["GPU, 16GB", "$1,299.99", "999"]
        );
        assert_eq!(
            split_csv_line(r#"a,"say ""hi""",c"#),
            vec!["a", "say \"hi\"", "c"]
        );
    }

    #[test]
    fn quotes_fields_that_need_it() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
