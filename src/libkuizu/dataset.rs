use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::libkuizu::Error;

/// One ccTLD record. The JSON keys are the dataset's own spelling,
/// `ccTDL` included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    #[serde(rename = "ccTDL")]
    pub code: String,
    #[serde(rename = "country_name_jp")]
    pub name: String,
}

pub fn load(path: &Path) -> Result<Vec<Entry>, Error> {
    debug!("[Dataset] Reading {:?}", path);
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<Vec<Entry>, Error> {
    let entries: Vec<Entry> = serde_json::from_str(raw)?;
    debug!("[Dataset] Parsed {} entries.", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_dataset_keys() {
        let raw = r#"[
            {"ccTDL": "jp", "country_name_jp": "日本"},
            {"ccTDL": "fr", "country_name_jp": "フランス"}
        ]"#;
        let entries = parse(raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "jp");
        assert_eq!(entries[0].name, "日本");
        assert_eq!(entries[1].code, "fr");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse("{\"ccTDL\": \"jp\"").unwrap_err();
        assert!(matches!(err, Error::DatasetParse(_)));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load(&PathBuf::from("no-such-dataset.json")).unwrap_err();
        assert!(matches!(err, Error::DatasetLoad(_)));
    }
}
