//! Writers for crawl results.
//!
//! # Submodules
//!
//! - [`json`]: the records as a pretty-printed JSON array
//! - [`markdown`]: a readable digest of the records
//! - [`csv`]: one row per record, for spreadsheets
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── fortunechina_2025-12-07.json
//!
//! markdown_output_dir/
//! └── fortunechina_2025-12-07.md
//!
//! csv_output_dir/
//! └── fortunechina_2025-12-07.csv
//! ```

pub mod csv;
pub mod json;
pub mod markdown;

/// File name shared by both writers, e.g. `fortunechina_2025-12-07.json`.
pub fn output_filename(local_date: &str, extension: &str) -> String {
    format!("fortunechina_{local_date}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("2025-12-07", "md"),
            "fortunechina_2025-12-07.md"
        );
    }
}
