//! Recipe image URL resolution.
//!
//! Upstream image references arrive in three shapes: an absolute URL, a
//! bare filename, or nothing at all alongside a recipe id and a declared
//! image type. Resolution order: absolute URLs pass through, bare
//! filenames get the CDN base prefixed, and id+type synthesize a CDN
//! URL. Anything else resolves to absent — consumers treat absent as
//! "do not render", never as a broken reference.

/// Fixed size suffix the CDN serves for synthesized listing images.
const CDN_SIZE_SUFFIX: &str = "556x370";

/// Resolve an image reference to an absolute URL, if possible.
pub fn resolve_image(
    raw: Option<&str>,
    id: Option<u64>,
    image_type: Option<&str>,
    cdn_base: &str,
) -> Option<String> {
    if let Some(value) = raw {
        let v = value.trim();
        if v.starts_with("http://") || v.starts_with("https://") || v.starts_with("data:") {
            return Some(v.to_string());
        }
        if !v.contains('/')
            && (v.ends_with(".jpg") || v.ends_with(".jpeg") || v.ends_with(".png"))
        {
            return Some(format!("{}/{}", cdn_base.trim_end_matches('/'), v));
        }
    }
    build_from_id(id, image_type, cdn_base)
}

/// Synthesize a CDN URL from a recipe id and declared image type.
fn build_from_id(id: Option<u64>, image_type: Option<&str>, cdn_base: &str) -> Option<String> {
    let id = id?;
    let image_type = image_type?.trim();
    if image_type.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}-{}.{}",
        cdn_base.trim_end_matches('/'),
        id,
        CDN_SIZE_SUFFIX,
        image_type
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://img.example.com/recipes";

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://cdn.example.com/pic.jpg";
        assert_eq!(
            resolve_image(Some(url), Some(1), Some("jpg"), CDN).as_deref(),
            Some(url)
        );
    }

    #[test]
    fn bare_filename_gets_cdn_prefix() {
        assert_eq!(
            resolve_image(Some("abc.jpg"), None, None, CDN).as_deref(),
            Some("https://img.example.com/recipes/abc.jpg")
        );
    }

    #[test]
    fn id_and_type_synthesize_cdn_url() {
        assert_eq!(
            resolve_image(None, Some(123), Some("jpg"), CDN).as_deref(),
            Some("https://img.example.com/recipes/123-556x370.jpg")
        );
    }

    #[test]
    fn filename_with_path_falls_back_to_id() {
        assert_eq!(
            resolve_image(Some("sub/dir.jpg"), Some(7), Some("png"), CDN).as_deref(),
            Some("https://img.example.com/recipes/7-556x370.png")
        );
    }

    #[test]
    fn fully_absent_resolves_to_absent() {
        assert_eq!(resolve_image(None, None, None, CDN), None);
        assert_eq!(resolve_image(Some("   "), Some(5), None, CDN), None);
    }
}
