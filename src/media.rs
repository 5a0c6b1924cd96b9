use std::path::Path;

use rand::{distributions::Alphanumeric, Rng};
use tracing::debug;

use crate::data_formats::UploadedImage;

const UPLOAD_DIR: &str = "posts";
const PREFIX_LEN: usize = 7;

/// Keeps the basename's safe characters so the stored name stays recognisable.
fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Writes an upload under `<media_root>/posts/` and returns its path relative
/// to the media root. A random prefix keeps equal file names apart.
pub async fn save_upload(media_root: &Path, image: &UploadedImage) -> std::io::Result<String> {
    let prefix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PREFIX_LEN)
        .map(char::from)
        .collect();
    let file_name = format!("{prefix}_{}", sanitize_file_name(&image.file_name));

    let directory = media_root.join(UPLOAD_DIR);
    tokio::fs::create_dir_all(&directory).await?;
    tokio::fs::write(directory.join(&file_name), &image.content).await?;
    debug!("Stored upload {file_name} ({} bytes)", image.content.len());

    Ok(format!("{UPLOAD_DIR}/{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_lose_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("small.gif"), "small.gif");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("my photo (1).png"), "myphoto1.png");
        assert_eq!(sanitize_file_name(".."), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
