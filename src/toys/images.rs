use anyhow::Context;
use bytes::Bytes;
use uuid::Uuid;

use crate::state::AppState;

use super::repo::Toy;

pub struct UploadItem<'a> {
    pub body: Bytes,
    pub content_type: &'a str,
}

/// Store uploaded toy photos and append their keys to the toy record.
pub async fn upload_toy_images(
    st: &AppState,
    toy_id: Uuid,
    images: Vec<UploadItem<'_>>,
) -> anyhow::Result<Vec<String>> {
    anyhow::ensure!(!images.is_empty(), "no images provided");

    let mut keys = Vec::with_capacity(images.len());
    for img in images {
        let ext = ext_from_mime(img.content_type).unwrap_or("bin");
        let key = format!("toys/{}/{}.{}", toy_id, Uuid::new_v4(), ext);
        st.storage
            .put_object(&key, img.body, img.content_type)
            .await
            .with_context(|| format!("put_object {}", key))?;
        keys.push(key);
    }

    Toy::append_image_keys(&st.db, toy_id, &keys).await?;
    Ok(keys)
}

pub async fn presign_many(
    st: &AppState,
    keys: &[String],
    expires_seconds: u64,
) -> anyhow::Result<Vec<String>> {
    let mut out = Vec::with_capacity(keys.len());
    for k in keys {
        out.push(st.storage.presign_get(k, expires_seconds).await?);
    }
    Ok(out)
}

/// Best-effort cleanup when a toy is removed; a dangling object is not fatal.
pub async fn delete_images(st: &AppState, keys: &[String]) {
    for k in keys {
        if let Err(e) = st.storage.delete_object(k).await {
            tracing::warn!(error = %e, key = %k, "delete toy image failed");
        }
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::state::AppState;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(super::ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(super::ext_from_mime("image/png"), Some("png"));
        assert_eq!(super::ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(super::ext_from_mime("application/octet-stream"), None);
    }

    #[tokio::test]
    async fn test_presign_many() {
        let state = AppState::fake();
        let urls = super::presign_many(
            &state,
            &["toys/a/b.jpg".to_string(), "toys/x/y.png".to_string()],
            1800,
        )
        .await
        .unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("toys/a/b.jpg"));
        assert!(urls[1].contains("toys/x/y.png"));
    }
}
