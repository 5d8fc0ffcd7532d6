use crate::utils::archive_url;
use chrono::{Datelike, Local};

/// Endless sequence of yearly archive roots, newest first
///
/// Yields `{host}/{year}/` for the current year, then the year before, and so
/// on. It has no natural end; the consumer decides when to stop pulling.
#[derive(Debug, Clone)]
pub struct YearWalker {
    host: String,
    next_year: Option<i32>,
}

impl YearWalker {
    /// Start at the current local calendar year
    pub fn new(host: &str) -> Self {
        Self::starting_at(host, Local::now().year())
    }

    pub fn starting_at(host: &str, year: i32) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            next_year: Some(year),
        }
    }
}

impl Iterator for YearWalker {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let year = self.next_year?;
        self.next_year = year.checked_sub(1);
        Some(archive_url(&self.host, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_years() {
        let urls: Vec<String> = YearWalker::starting_at("https://www.nfcw.com/", 2024)
            .take(3)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://www.nfcw.com/2024/",
                "https://www.nfcw.com/2023/",
                "https://www.nfcw.com/2022/",
            ]
        );
    }

    #[test]
    fn test_starts_at_current_year() {
        let first = YearWalker::new("https://www.nfcw.com").next().unwrap();
        assert_eq!(first, format!("https://www.nfcw.com/{}/", Local::now().year()));
    }

    #[test]
    fn test_no_lower_bound() {
        let mut walker = YearWalker::starting_at("https://h.example", 1);
        assert_eq!(walker.next().unwrap(), "https://h.example/1/");
        assert_eq!(walker.next().unwrap(), "https://h.example/0/");
        assert_eq!(walker.next().unwrap(), "https://h.example/-1/");
    }
}
