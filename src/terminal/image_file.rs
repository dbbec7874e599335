use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::{Path, PathBuf};

fn deduplicate_filename(dir: &Path, stem: &str, ext: &str) -> String {
    let first = format!("{}.{}", stem, ext);
    if !dir.join(&first).exists() {
        return first;
    }
    (1..)
        .map(|n| format!("{}_{}.{}", stem, n, ext))
        .find(|name| !dir.join(name).exists())
        .unwrap_or(first)
}

fn decode_data_uri(uri: &str) -> Result<(&str, Vec<u8>)> {
    let (meta, data) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .context("Not a data URI")?;
    let mime = meta
        .strip_suffix(";base64")
        .context("Data URI is not base64-encoded")?;
    let bytes = STANDARD.decode(data).context("Invalid base64 image data")?;
    Ok((mime, bytes))
}

pub async fn save_data_uri(uri: &str, dir: &Path) -> Result<PathBuf> {
    let (mime, bytes) = decode_data_uri(uri)?;
    let ext = match mime {
        "image/png" => "png",
        _ => "jpg",
    };

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create image directory: {}", dir.display()))?;

    let stem = format!("eyecatch_{}", chrono::Local::now().format("%Y%m%d%H%M%S"));
    let path = dir.join(deduplicate_filename(dir, &stem, ext));
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write image: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_payload() {
        let (mime, bytes) = decode_data_uri("data:image/jpeg;base64,QUJD").unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(bytes, b"ABC");
    }

    #[test]
    fn rejects_other_uris() {
        assert!(decode_data_uri("https://example.com/a.jpg").is_err());
        assert!(decode_data_uri("data:image/jpeg,raw").is_err());
    }

    #[tokio::test]
    async fn saved_files_never_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let uri = "data:image/jpeg;base64,QUJD";

        let first = save_data_uri(uri, dir.path()).await.unwrap();
        let second = save_data_uri(uri, dir.path()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"ABC");
        assert_eq!(first.extension().unwrap(), "jpg");
    }
}
