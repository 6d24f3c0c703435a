use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages, so a parse failure
/// deep in a document reads `at JSON path .items[3].price → invalid number`
/// instead of a bare offset.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}
