use terminal_size::{terminal_size, Width};

use crate::api::{OptionSpec, Spec};
use crate::constant::*;

const INDENT: usize = 2;
const PADDING_WIDTH: usize = 2;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_MIDDLE_WIDTH: usize = 17;

pub(crate) fn terminal_width() -> Option<usize> {
    if let Some((Width(terminal_width), _)) = terminal_size() {
        Some(terminal_width as usize)
    } else {
        None
    }
}

/// Render the options of `spec` as a help table, wrapping descriptions to the terminal width.
///
/// See [`format_opts_width`] for the layout.
pub fn format_opts(spec: &Spec) -> String {
    format_opts_width(spec, terminal_width())
}

/// Render the options of `spec` as a help table, wrapping descriptions at `width` (never when `None`).
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::{format_opts_width, CoerceType, Spec};
///
/// let spec = Spec::new()
///     .option("port", |o| o.alias("p").reference("<port>").desc("Port to listen on.").default(8080i64))
///     .option("verbose", |o| o.coerce(CoerceType::Boolean).desc("Log more."));
///
/// assert_eq!(
///     format_opts_width(&spec, None),
///     "  -p, --port <port>  Port to listen on. (default: 8080)\n      --verbose      Log more."
/// );
/// ```
pub fn format_opts_width(spec: &Spec, width: Option<usize>) -> String {
    render(&option_rows(spec), width).join("\n")
}

/// Render `rows` as left aligned columns, each padded to its widest cell.
///
/// ### Example
/// ```
/// # use cliopts_builder as cliopts;
/// use cliopts::format_table;
///
/// let rows = vec![
///     vec!["a".to_string(), "bb".to_string(), "c".to_string()],
///     vec!["aaa".to_string(), "b".to_string()],
/// ];
///
/// assert_eq!(format_table(&rows, 1), " a    bb  c\n aaa  b");
/// ```
pub fn format_table(rows: &[Vec<String>], indent: usize) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    let padding = format!("{:PADDING_WIDTH$}", "");

    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .enumerate()
                .map(|(c, cell)| format!("{cell:width$}", width = widths[c]))
                .collect::<Vec<String>>()
                .join(&padding);
            format!("{:indent$}{}", "", line.trim_end())
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// The `usage` message shown by [`CommandLine`](crate::CommandLine).
pub(crate) fn help_message(
    program: &str,
    about: Option<&str>,
    spec: Option<&Spec>,
    width: Option<usize>,
) -> Vec<String> {
    let mut out = vec![format!("usage: {program} [-{HELP_SHORT}] [OPTIONS] [ARGS ...]")];

    if let Some(about) = about {
        out.push(String::default());
        let about_width = width.map(|w| std::cmp::max(w, MINIMUM_MIDDLE_WIDTH));

        match about_width {
            Some(w) => out.extend(chunk(about, w)),
            None => out.push(about.to_string()),
        }
    }

    let mut rows = vec![(
        format!("-{HELP_SHORT}, --{HELP_NAME}"),
        HELP_MESSAGE.to_string(),
    )];

    if let Some(spec) = spec {
        rows.extend(option_rows(spec));
    }

    out.push(String::default());
    out.push("options:".to_string());
    out.extend(render(&rows, width));
    out
}

fn option_rows(spec: &Spec) -> Vec<(String, String)> {
    let aliased = spec.iter().any(|(_, o)| o.alias.is_some());

    spec.iter()
        .map(|(name, option_spec)| {
            let OptionSpec {
                alias,
                desc,
                reference,
                default,
                default_desc,
                ..
            } = option_spec;
            let mut left = match alias {
                Some(a) if a.chars().count() == 1 => format!("-{a}, --{name}"),
                Some(a) => format!("--{a}, --{name}"),
                None if aliased => format!("    --{name}"),
                None => format!("--{name}"),
            };

            if let Some(reference) = reference {
                left.push(' ');
                left.push_str(reference);
            }

            let mut middle = desc.clone().unwrap_or_default();
            let shown_default = match (default_desc, default) {
                (Some(dd), _) => Some(dd.clone()),
                (None, Some(d)) => Some(d.to_string()),
                (None, None) => None,
            };

            if let Some(shown_default) = shown_default {
                if !middle.is_empty() {
                    middle.push(' ');
                }

                middle.push_str(&format!("(default: {shown_default})"));
            }

            (left, middle)
        })
        .collect()
}

fn render(rows: &[(String, String)], width: Option<usize>) -> Vec<String> {
    let left_width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    let padding = format!("{:PADDING_WIDTH$}", "");
    let middle_width = width.map(|w| {
        let non_middle = INDENT + left_width + PADDING_WIDTH;
        std::cmp::max(w.saturating_sub(non_middle), MINIMUM_MIDDLE_WIDTH)
    });
    let mut out = Vec::default();

    for (left, middle) in rows {
        let parts = match middle_width {
            Some(w) => chunk(middle, w),
            None if middle.is_empty() => Vec::default(),
            None => vec![middle.clone()],
        };

        if parts.is_empty() {
            out.push(format!("{:INDENT$}{left}", ""));
        }

        for (i, part) in parts.iter().enumerate() {
            if i == 0 {
                out.push(format!("{:INDENT$}{left:left_width$}{padding}{part}", ""));
            } else {
                out.push(format!("{:INDENT$}{:left_width$}{padding}{part}", "", ""));
            }
        }
    }

    out
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoerceType;
    use rstest::rstest;

    #[rstest]
    #[case("", 5, vec![])]
    #[case("a b c", 5, vec!["a b c"])]
    #[case("abc def", 5, vec!["abc", "def"])]
    #[case("abcdef", 5, vec!["abcd-", "ef"])]
    #[case("abcde", 5, vec!["abcde"])]
    #[case("a  b", 5, vec!["a b"])]
    #[case("ab abcdefghij", 5, vec!["ab", "abcd-", "efgh-", "ij"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[test]
    fn format_opts_wraps() {
        let spec = Spec::new().option("name", |o| {
            o.desc("one two three four five six seven eight nine ten")
        });
        let table = format_opts_width(&spec, Some(30));

        // 2 indent + 6 left + 2 padding leaves 20 for the description.
        assert_eq!(
            table,
            [
                "  --name  one two three four",
                "          five six seven eight",
                "          nine ten",
            ]
            .join("\n")
        );
    }

    #[test]
    fn format_opts_minimum_middle() {
        let spec = Spec::new().option("a-very-long-option-name", |o| o.desc("x y"));
        let table = format_opts_width(&spec, Some(10));
        assert_eq!(table, "  --a-very-long-option-name  x y");
    }

    #[test]
    fn format_opts_default_desc() {
        let spec = Spec::new()
            .option("a", |o| o.default(1i64).default_desc("one"))
            .option("b", |o| o.default(false))
            .option("c", |o| o.coerce(CoerceType::Long));

        assert_eq!(
            format_opts_width(&spec, None),
            ["  --a  (default: one)", "  --b  (default: false)", "  --c"].join("\n")
        );
    }

    #[test]
    fn format_opts_empty() {
        assert_eq!(format_opts_width(&Spec::new(), Some(80)), "");
    }

    #[test]
    fn format_table_ragged() {
        let rows = vec![
            vec!["x".to_string()],
            vec!["long".to_string(), "y".to_string()],
        ];
        assert_eq!(format_table(&rows, 0), "x\nlong  y");
        assert_eq!(format_table(&[], 2), "");
    }

    #[test]
    fn help() {
        let spec = Spec::new().option("port", |o| o.alias("p").desc("The port."));
        let message = help_message("serve", Some("Serve files."), Some(&spec), None);

        assert_eq!(
            message,
            vec![
                "usage: serve [-h] [OPTIONS] [ARGS ...]",
                "",
                "Serve files.",
                "",
                "options:",
                "  -h, --help  Show this help message and exit.",
                "  -p, --port  The port.",
            ]
        );
    }
}
