//! Progress indicators for reload
//!
//! Bars draw on stderr and hide themselves when it is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})";

/// Progress bar over the release notes checked during a reload
pub fn create_reload_progress(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reload_progress() {
        let pb = create_reload_progress(120, "Checking release notes");
        assert_eq!(pb.length(), Some(120));
        pb.inc(3);
        assert_eq!(pb.position(), 3);
        pb.finish_and_clear();
    }
}
