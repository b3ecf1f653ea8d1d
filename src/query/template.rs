/// SQL text whose `:name` parameters have been rewritten to numbered SQLite
/// placeholders (`?1`, `?2`, ...), together with the parameter names in
/// placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    sql: String,
    params: Vec<String>,
}

impl Template {
    /// A name that appears more than once keeps the number of its first
    /// occurrence. Text inside single-quoted literals is copied as is.
    pub fn compile(source: &str) -> Self {
        let mut sql = String::with_capacity(source.len());
        let mut params: Vec<String> = Vec::new();
        let mut chars = source.chars().peekable();
        let mut in_literal = false;

        while let Some(c) = chars.next() {
            if in_literal {
                sql.push(c);
                if c == '\'' {
                    in_literal = false;
                }
                continue;
            }

            match c {
                '\'' => {
                    in_literal = true;
                    sql.push(c);
                }
                ':' if chars.peek().is_some_and(|&n| n.is_ascii_alphabetic() || n == '_') => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if !(n.is_ascii_alphanumeric() || n == '_') {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }

                    let number = match params.iter().position(|p| *p == name) {
                        Some(i) => i + 1,
                        None => {
                            params.push(name);
                            params.len()
                        }
                    };
                    sql.push('?');
                    sql.push_str(&number.to_string());
                }
                _ => sql.push(c),
            }
        }

        Template { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}
