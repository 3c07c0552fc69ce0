use constants::model::{BIN_EXTENSION, BIN_SIBLING_SUFFIX};

/// Rewrite a binary-buffer request to its JSON-wrapped sibling name:
/// `model.bin` becomes `model_bin.json`. URLs already in sibling form and
/// URLs without a `.bin` component pass through unchanged, so the rewrite is
/// total and idempotent.
pub fn rewrite_bin_path(url: &str) -> String {
    if !url.contains(BIN_EXTENSION) || url.contains(BIN_SIBLING_SUFFIX) {
        return url.to_string();
    }

    let file_name = url.rsplit('/').next().unwrap_or(url);
    let stem = file_name.split('.').next().unwrap_or(file_name);
    url.replacen(file_name, &format!("{stem}{BIN_SIBLING_SUFFIX}"), 1)
}

/// Map the engine-side descriptor request (`{id}.gltf`, which routes to the
/// glTF loader) onto the storage host's JSON-suffixed descriptor name.
pub fn descriptor_fetch_path(path: &str) -> String {
    match path.strip_suffix(".gltf") {
        Some(stem) => format!("{stem}.json"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_requests_are_rewritten_to_siblings() {
        assert_eq!(rewrite_bin_path("3/scene.bin"), "3/scene_bin.json");
        assert_eq!(
            rewrite_bin_path("https://host.test/models/7/chair.bin"),
            "https://host.test/models/7/chair_bin.json"
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let once = rewrite_bin_path("3/scene.bin");
        assert_eq!(rewrite_bin_path(&once), once);
        assert_eq!(
            rewrite_bin_path("3/scene_bin.json"),
            "3/scene_bin.json"
        );
    }

    #[test]
    fn test_non_bin_urls_pass_through() {
        assert_eq!(rewrite_bin_path("3/3.json"), "3/3.json");
        assert_eq!(rewrite_bin_path("textures/wood.png"), "textures/wood.png");
        assert_eq!(rewrite_bin_path(""), "");
    }

    #[test]
    fn test_multi_dot_names_keep_the_leading_stem() {
        assert_eq!(
            rewrite_bin_path("3/scene.draft.bin"),
            "3/scene_bin.json"
        );
    }

    #[test]
    fn test_descriptor_requests_map_to_json() {
        assert_eq!(descriptor_fetch_path("3/3.gltf"), "3/3.json");
        assert_eq!(descriptor_fetch_path("3/scene.bin"), "3/scene.bin");
    }
}
