//! Event rendering for the terminal

use owo_colors::OwoColorize;
use watcher::{EventKind, WatchEvent};

/// One-character marker for an event kind
pub fn marker(kind: EventKind) -> char {
    match kind {
        EventKind::Created => '+',
        EventKind::Removed => '-',
        EventKind::Modified => '~',
    }
}

/// Uncolored line: marker, path, and a trailing `/` for directories
pub fn plain_line(event: &WatchEvent) -> String {
    let suffix = if event.is_dir { "/" } else { "" };
    format!("{} {}{}", marker(event.kind), event.path.display(), suffix)
}

/// Colored line for interactive output
pub fn colored_line(event: &WatchEvent) -> String {
    let line = plain_line(event);
    match event.kind {
        EventKind::Created => line.green().to_string(),
        EventKind::Removed => line.red().to_string(),
        EventKind::Modified => line.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line() {
        assert_eq!(plain_line(&WatchEvent::created("/w/a.txt", false)), "+ /w/a.txt");
        assert_eq!(plain_line(&WatchEvent::removed("/w/d", true)), "- /w/d/");
        assert_eq!(plain_line(&WatchEvent::modified("/w/a.txt", false)), "~ /w/a.txt");
    }

    #[test]
    fn test_colored_line_keeps_text() {
        let line = colored_line(&WatchEvent::created("/w/a.txt", false));
        assert!(line.contains("+ /w/a.txt"));
        assert_ne!(line, "+ /w/a.txt");
    }
}
