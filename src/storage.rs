use crate::config::RenderConfig;
use crate::models::VectorCollection;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Load a vector collection from a JSON object (`{"V1": {...}, ...}`), keeping key order.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<VectorCollection> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading vectors from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing vectors in {}", path.display()))
}

/// Save a vector collection as pretty JSON.
pub fn save_collection<P: AsRef<Path>>(vectors: &VectorCollection, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(vectors)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load a render config; missing fields take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DashStyle, Point, Vector};
    use tempfile::tempdir;

    #[test]
    fn collection_round_trips_in_order() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("v.json");
        let mut vectors = VectorCollection::new();
        vectors.insert(
            "Vb".into(),
            Vector::new("b", Point::ORIGIN, Point::new(1.0, 2.0)).with_dash(DashStyle::Dotted),
        );
        vectors.insert("Va".into(), Vector::new("a", Point::ORIGIN, Point::new(-3.0, 4.0)));
        save_collection(&vectors, &p).unwrap();
        let back = load_collection(&p).unwrap();
        assert_eq!(back, vectors);
        assert_eq!(back.keys().collect::<Vec<_>>(), ["Vb", "Va"]);
    }

    #[test]
    fn unknown_dash_name_fails_to_load() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.json");
        fs::write(
            &p,
            r#"{"V1": {"label": "V1", "start": {"x": 0, "y": 0}, "end": {"x": 1, "y": 1}, "dash": "wavy"}}"#,
        )
        .unwrap();
        let err = load_collection(&p).unwrap_err();
        assert!(format!("{err:#}").contains("unknown dash style `wavy`"));
    }
}
