//! Helpers for spreadsheet-exported tabular files
//!
//! Column headers vary between data drops ("Latitude" vs "Lat", typos in the
//! workshop column), so columns are located by candidate name instead of
//! position.

use std::borrow::Cow;

use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::warn;

pub const WORKSHOP_NAME_COLUMNS: &[&str] = &[
    "Mahindra Workshop Location",
    "Mabindra Workshop Location",
    "Workshop Name",
    "Workshop",
    "Name",
];
pub const LATITUDE_COLUMNS: &[&str] = &["Latitude", "Lat"];
pub const LONGITUDE_COLUMNS: &[&str] = &["Longitude", "Lon", "Lng"];
pub const PINCODE_COLUMNS: &[&str] = &["Customer Pin Code", "Pincode", "Pin Code"];
pub const VIN_COLUMNS: &[&str] = &["VIN", "Vin No", "Chassis"];
pub const NRC_COUNT_COLUMNS: &[&str] = &[
    "NRC VIN Count",
    "NRC_VIN_Count",
    "NRC VIN",
    "NRC_Vin",
    "NRC_Projected_RO_Yearly",
    "NRC_Projected_RO",
];

/// Decode raw file bytes to text.
///
/// A BOM wins; otherwise UTF-8 is tried and Windows-1252 is the fallback,
/// which is what spreadsheet "Save as CSV" produces on most desktops.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            warn!(encoding = encoding.name(), "some characters could not be decoded");
        }
        return text;
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            warn!("input is not UTF-8, decoded as Windows-1252");
            text
        }
    }
}

/// Resolves columns by candidate names without handing the same column out twice.
///
/// `resolve` runs three passes over the candidates: exact, case-insensitive,
/// then "header contains candidate" (case-insensitive). `resolve_exact` stops
/// after the second.
#[derive(Debug)]
pub struct ColumnResolver {
    headers: Vec<String>,
    taken: Vec<usize>,
}

impl ColumnResolver {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|h| h.as_ref().trim().to_string())
                .collect(),
            taken: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn resolve(&mut self, candidates: &[&str]) -> Option<usize> {
        let found = self
            .find_exact(candidates)
            .or_else(|| self.find_contains(candidates))?;
        self.taken.push(found);
        Some(found)
    }

    /// Exact and case-insensitive passes only. For short identifiers such as
    /// "VIN" that occur inside unrelated headers ("State/Province").
    pub fn resolve_exact(&mut self, candidates: &[&str]) -> Option<usize> {
        let found = self.find_exact(candidates)?;
        self.taken.push(found);
        Some(found)
    }

    fn is_free(&self, i: usize) -> bool {
        !self.taken.contains(&i)
    }

    fn find_exact(&self, candidates: &[&str]) -> Option<usize> {
        for cand in candidates {
            if let Some(i) = (0..self.headers.len()).find(|&i| self.is_free(i) && self.headers[i] == *cand) {
                return Some(i);
            }
        }
        for cand in candidates {
            if let Some(i) = (0..self.headers.len())
                .find(|&i| self.is_free(i) && self.headers[i].eq_ignore_ascii_case(cand))
            {
                return Some(i);
            }
        }
        None
    }

    fn find_contains(&self, candidates: &[&str]) -> Option<usize> {
        let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
        (0..self.headers.len()).find(|&i| {
            let header = self.headers[i].to_lowercase();
            self.is_free(i) && !header.is_empty() && lowered.iter().any(|c| header.contains(c.as_str()))
        })
    }
}

/// Parse a coordinate cell; `None` for empty or non-numeric text
pub fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Parse a count cell, allowing thousands separators. Empty or garbage reads as 0.
pub fn parse_count(s: &str) -> f64 {
    let cleaned = s.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let bytes = b"\xEF\xBB\xBFName,Lat\n";
        assert_eq!(decode_text(bytes), "Name,Lat\n");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Caf\xe9" is not valid UTF-8
        let bytes = b"Caf\xe9";
        assert_eq!(decode_text(bytes), "Café");
    }

    #[test]
    fn test_decode_plain_utf8_borrows() {
        assert!(matches!(decode_text(b"abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_resolver_prefers_exact_then_case_insensitive() {
        let mut r = ColumnResolver::new(["lat", "Latitude ", "LONGITUDE"]);
        assert_eq!(r.resolve(LATITUDE_COLUMNS), Some(1));
        assert_eq!(r.resolve(LONGITUDE_COLUMNS), Some(2));
    }

    #[test]
    fn test_resolver_substring_match() {
        let mut r = ColumnResolver::new(["Sr", "Mahindra Workshop Location (City)", "Cust Lat"]);
        assert_eq!(r.resolve(WORKSHOP_NAME_COLUMNS), Some(1));
        assert_eq!(r.resolve(LATITUDE_COLUMNS), Some(2));
    }

    #[test]
    fn test_resolver_does_not_reuse_columns() {
        let mut r = ColumnResolver::new(["NRC VIN Count", "Pincode"]);
        assert_eq!(r.resolve(NRC_COUNT_COLUMNS), Some(0));
        // "VIN" would otherwise match "NRC VIN Count" by substring
        assert_eq!(r.resolve(VIN_COLUMNS), None);
    }

    #[test]
    fn test_resolve_exact_skips_substring_matches() {
        let mut r = ColumnResolver::new(["State/Province", "Latitude"]);
        assert_eq!(r.resolve_exact(VIN_COLUMNS), None);
        let mut r = ColumnResolver::new(["State/Province", "vin"]);
        assert_eq!(r.resolve_exact(VIN_COLUMNS), Some(1));
    }

    #[test]
    fn test_resolver_missing() {
        let mut r = ColumnResolver::new(["a", "b"]);
        assert_eq!(r.resolve(LATITUDE_COLUMNS), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1,234"), 1234.0);
        assert_eq!(parse_count(" 12.5 "), 12.5);
        assert_eq!(parse_count(""), 0.0);
        assert_eq!(parse_count("n/a"), 0.0);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(" 19.076 "), Some(19.076));
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("abc"), None);
    }
}
