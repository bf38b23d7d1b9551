//! ANSI color helpers for terminal output

use colored::Colorize;
use docset_core::category;

/// Get colored entry type indicator
pub fn colored_type(entry_type: &str) -> String {
    match entry_type {
        category::NAMESPACE => entry_type.magenta().to_string(),
        category::CLASS | category::STRUCT | category::UNION | category::FILE => {
            entry_type.cyan().to_string()
        }
        category::ENUM | category::VALUE | category::TYPE | category::VARIABLE => {
            entry_type.red().to_string()
        }
        category::METHOD | category::FUNCTION | category::DEFINE | category::MACRO => {
            entry_type.green().to_string()
        }
        category::GUIDE | category::SECTION | category::SAMPLE | category::INSTRUCTION => {
            entry_type.yellow().to_string()
        }
        category::COMMAND | category::PLUGIN | category::SERVICE => entry_type.blue().to_string(),
        _ => entry_type.white().dimmed().to_string(),
    }
}

/// Get colored path
pub fn colored_path(path: &str) -> String {
    path.white().dimmed().to_string()
}

/// Get colored header
pub fn header(text: &str) -> String {
    text.bold().underline().to_string()
}

/// Get colored label
pub fn label(text: &str) -> String {
    text.white().dimmed().to_string()
}

/// Get colored value
pub fn value(text: &str) -> String {
    text.white().to_string()
}

/// Get colored success message
pub fn success(text: &str) -> String {
    format!("{} {}", "✓".green(), text)
}

/// Get colored warning message
pub fn warning(text: &str) -> String {
    format!("{} {}", "⚠".yellow(), text)
}

/// Get colored error message
pub fn error(text: &str) -> String {
    format!("{} {}", "✗".red(), text)
}

/// Format size in human-readable form
pub fn format_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes < 1024.0 {
        format!("{:.0} B", bytes)
    } else if bytes < 1024.0 * 1024.0 {
        format!("{:.1} KB", bytes / 1024.0)
    } else if bytes < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1} MB", bytes / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format count with comma separators
pub fn format_count<N: ToString>(n: N) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567u64), "1,234,567");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_colored_type_keeps_label() {
        colored::control::set_override(false);
        assert_eq!(colored_type("Class"), "Class");
        assert_eq!(colored_type(category::VARIABLE), "Variable");
        assert_eq!(colored_type(category::SERVICE), "Service");
        assert_eq!(colored_type("Unknown"), "Unknown");
    }
}
