use super::RankEntry;

/// Renders the title line followed by one `line_format` line per entry.
///
/// `{index}` (1-based), `{name}` and `{value}` are replaced literally wherever
/// they appear. Trailing newlines are trimmed from the result.
pub fn format(title: &str, line_format: &str, entries: &[RankEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(title.to_string());

    for (index, entry) in entries.iter().enumerate() {
        lines.push(
            line_format
                .replace("{index}", &(index + 1).to_string())
                .replace("{name}", &entry.name)
                .replace("{value}", &entry.value.to_string()),
        );
    }

    lines.join("\n").trim_end_matches('\n').to_string()
}
