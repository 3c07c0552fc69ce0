//! Prepares an exported glTF model directory for the storage host, which
//! only serves JSON-suffixed names: every `.bin` buffer gets a `_bin.json`
//! sibling with identical bytes, and descriptor `buffers[].uri` references
//! are rewritten to the sibling names.

use indicatif::ProgressBar;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use constants::model::{BIN_EXTENSION, BIN_SIBLING_SUFFIX};

pub struct ModelPackager {
    model_dir: PathBuf,
    bin_files: Vec<PathBuf>,
    descriptors: Vec<PathBuf>,
}

impl ModelPackager {
    pub fn new(model_dir: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let model_dir = PathBuf::from(model_dir);
        if !model_dir.is_dir() {
            return Err(format!("not a directory: {}", model_dir.display()).into());
        }

        let mut bin_files = Vec::new();
        let mut descriptors = Vec::new();
        for entry in fs::read_dir(&model_dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.ends_with(BIN_EXTENSION) {
                bin_files.push(path);
            } else if (name.ends_with(".gltf") || name.ends_with(".json"))
                && !name.ends_with(BIN_SIBLING_SUFFIX)
            {
                descriptors.push(path);
            }
        }

        Ok(Self {
            model_dir,
            bin_files,
            descriptors,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let bar = ProgressBar::new((self.bin_files.len() + self.descriptors.len()) as u64);

        for bin in &self.bin_files {
            let Some(name) = bin.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let sibling = self.model_dir.join(sibling_name(name));
            fs::copy(bin, &sibling)?;
            bar.inc(1);
        }

        for descriptor in &self.descriptors {
            let text = fs::read_to_string(descriptor)?;
            let mut document: Value = serde_json::from_str(&text)?;
            if rewrite_buffer_uris(&mut document) > 0 {
                fs::write(descriptor, serde_json::to_string_pretty(&document)?)?;
            }
            bar.inc(1);
        }

        bar.finish_with_message("done");
        println!(
            "✓ Packaged {} buffer(s), {} descriptor(s) in {}",
            self.bin_files.len(),
            self.descriptors.len(),
            self.model_dir.display()
        );
        Ok(())
    }
}

/// `scene.bin` → `scene_bin.json`; the same rule the viewer applies on fetch.
pub fn sibling_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    format!("{stem}{BIN_SIBLING_SUFFIX}")
}

/// Rewrite `buffers[].uri` references pointing at `.bin` payloads. Returns
/// the number of rewritten references. Embedded `data:` URIs and already
/// wrapped names pass through.
pub fn rewrite_buffer_uris(document: &mut Value) -> usize {
    let Some(buffers) = document.get_mut("buffers").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut rewritten = 0;
    for buffer in buffers {
        let Some(uri) = buffer.get("uri").and_then(Value::as_str) else {
            continue;
        };
        if uri.ends_with(BIN_EXTENSION) && !uri.ends_with(BIN_SIBLING_SUFFIX) {
            let file_name = uri.rsplit('/').next().unwrap_or(uri);
            let updated = uri.replacen(file_name, &sibling_name(file_name), 1);
            buffer["uri"] = Value::String(updated);
            rewritten += 1;
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_names_match_the_viewer_convention() {
        assert_eq!(sibling_name("scene.bin"), "scene_bin.json");
        assert_eq!(sibling_name("chair.draft.bin"), "chair_bin.json");
    }

    #[test]
    fn test_buffer_uris_are_rewritten_in_place() {
        let mut document = serde_json::json!({
            "asset": { "version": "2.0" },
            "buffers": [
                { "uri": "scene.bin", "byteLength": 1024 },
                { "uri": "nested/part.bin", "byteLength": 64 }
            ]
        });

        assert_eq!(rewrite_buffer_uris(&mut document), 2);
        assert_eq!(document["buffers"][0]["uri"], "scene_bin.json");
        assert_eq!(document["buffers"][1]["uri"], "nested/part_bin.json");
    }

    #[test]
    fn test_wrapped_and_embedded_uris_pass_through() {
        let mut document = serde_json::json!({
            "buffers": [
                { "uri": "scene_bin.json" },
                { "uri": "data:application/octet-stream;base64,AAAA" },
                { "byteLength": 16 }
            ]
        });

        assert_eq!(rewrite_buffer_uris(&mut document), 0);
        assert_eq!(document["buffers"][0]["uri"], "scene_bin.json");
    }

    #[test]
    fn test_documents_without_buffers_are_untouched() {
        let mut document = serde_json::json!({ "asset": { "version": "2.0" } });
        assert_eq!(rewrite_buffer_uris(&mut document), 0);
    }
}
