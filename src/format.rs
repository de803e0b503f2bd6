use colored::Colorize;
use serde_json::Value;

use crate::step::Step;
use crate::transcript::{Entry, Role};

/// Format a transcript entry for terminal display with role label and colors.
///
/// Entries that hold a valid step are shown as that step rather than as
/// raw JSON.
pub fn format_entry(entry: &Entry) -> String {
    let label = format_role_label(&entry.role);
    let body = match Step::parse(&entry.content) {
        Ok(step) => format_step(&step),
        Err(_) => entry.content.dimmed().to_string(),
    };
    format!("{}\n{}", label, body)
}

fn format_role_label(role: &Role) -> String {
    let label = format!("{}:", role);
    match role {
        Role::User => label.green().bold().to_string(),
        Role::Assistant => label.cyan().bold().to_string(),
        Role::System => label.dimmed().to_string(),
        Role::Developer => label.yellow().to_string(),
    }
}

fn format_step(step: &Step) -> String {
    match step {
        Step::User { user } => user.clone(),
        Step::Plan { plan } => format!("{} {}", "plan".magenta(), plan),
        Step::Action { function, input } => {
            format!("{} {}", "action".blue(), format_call(function, input))
        }
        Step::Observation { observation } => {
            format!("{} {}", "observation".green(), observation.dimmed())
        }
        Step::Output { output } => render_markdown_lite(output),
    }
}

/// `name(input)` with the input as compact JSON.
pub fn format_call(function: &str, input: &Value) -> String {
    format!("{}({})", function, input)
}

/// Minimal markdown renderer for terminal output.
/// Not a full parser. Handles the three most common patterns
/// in LLM output: bold, inline code, and fenced code blocks.
pub fn render_markdown_lite(text: &str) -> String {
    let mut output = String::new();
    let mut in_code_block = false;

    for line in text.lines() {
        if line.starts_with("```") {
            if in_code_block {
                in_code_block = false;
                output.push('\n');
            } else {
                in_code_block = true;
                let lang = line.trim_start_matches('`');
                if !lang.is_empty() {
                    output.push_str(&format!("  {}\n", lang.dimmed()));
                }
            }
            continue;
        }

        if in_code_block {
            output.push_str(&format!("  {}\n", line.dimmed()));
            continue;
        }

        output.push_str(&render_inline(line));
        output.push('\n');
    }

    if output.ends_with('\n') {
        output.pop();
    }
    output
}

/// Handle **bold** and `inline code` within a single line.
fn render_inline(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        if i + 1 < len && chars[i] == '*' && chars[i + 1] == '*' {
            if let Some(end) = find_closing(&chars, i + 2, &['*', '*']) {
                let bold_text: String = chars[i + 2..end].iter().collect();
                result.push_str(&bold_text.bold().to_string());
                i = end + 2;
                continue;
            }
        }

        if chars[i] == '`' {
            if let Some(end) = find_closing(&chars, i + 1, &['`']) {
                let code_text: String = chars[i + 1..end].iter().collect();
                result.push_str(&code_text.dimmed().to_string());
                i = end + 1;
                continue;
            }
        }

        result.push(chars[i]);
        i += 1;
    }

    result
}

fn find_closing(chars: &[char], start: usize, pat: &[char]) -> Option<usize> {
    if chars.len() < pat.len() {
        return None;
    }
    (start..=chars.len() - pat.len()).find(|&i| chars[i..i + pat.len()] == *pat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_call() {
        assert_eq!(
            format_call("getWeatherDetails", &json!("Dubai")),
            r#"getWeatherDetails("Dubai")"#
        );
        assert_eq!(
            format_call("writeFile", &json!({"path": "a.txt", "content": "x"})),
            r#"writeFile({"content":"x","path":"a.txt"})"#
        );
    }

    #[test]
    fn test_markdown_lite_strips_markers() {
        plain();
        assert_eq!(render_markdown_lite("a **b** `c`"), "a b c");
        assert_eq!(render_markdown_lite("```rust\nfn x() {}\n```"), "  rust\n  fn x() {}\n");
        assert_eq!(render_markdown_lite("**unclosed"), "**unclosed");
        assert_eq!(render_markdown_lite("*"), "*");
    }

    #[test]
    fn test_format_entry_reads_steps() {
        plain();
        let shown = format_entry(&Entry::observation("10°"));
        assert_eq!(shown, "tool:\nobservation 10°");
        let shown = format_entry(&Entry::assistant("not json"));
        assert_eq!(shown, "model:\nnot json");
    }
}
