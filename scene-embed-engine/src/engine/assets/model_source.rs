//! Dedicated asset source for model descriptors and buffers.
//!
//! The reader owns the sibling-name rewrite, so the redirect applies to
//! every read of this source and to nothing else: unrelated asset loads and
//! concurrent viewer instances never observe it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy::asset::io::{
    AssetReader, AssetReaderError, AssetSource, AssetSourceBuilder, ErasedAssetReader, PathStream,
    Reader, VecReader,
};
use bevy::prelude::*;

use crate::engine::assets::path_rewrite::{descriptor_fetch_path, rewrite_bin_path};

/// Source name for model descriptor/buffer requests.
pub const MODEL_SOURCE: &str = "models";

/// Engine-side asset path of a model's root descriptor.
pub fn descriptor_asset_path(model_id: &str) -> String {
    format!("{MODEL_SOURCE}://{model_id}/{model_id}.gltf")
}

/// Bytes observed by the model source's reader, feeding the loading
/// indicator. Shared between the reader (render-independent task pool) and
/// the progress systems.
#[derive(Resource, Clone, Default)]
pub struct ModelFetchStats {
    bytes: Arc<AtomicU64>,
}

impl ModelFetchStats {
    pub fn reset(&self) {
        self.bytes.store(0, Ordering::Relaxed);
    }

    pub fn add(&self, count: u64) {
        self.bytes.fetch_add(count, Ordering::Relaxed);
    }

    pub fn loaded_bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

/// Reader over the model storage host that maps descriptor requests to their
/// JSON-suffixed names and binary requests to their `_bin.json` siblings.
pub struct ModelAssetReader {
    inner: Box<dyn ErasedAssetReader>,
    stats: ModelFetchStats,
}

impl ModelAssetReader {
    pub fn new(stats: ModelFetchStats) -> Self {
        #[cfg(target_arch = "wasm32")]
        let inner: Box<dyn ErasedAssetReader> = Box::new(
            bevy::asset::io::wasm::HttpWasmAssetReader::new(constants::model::MODEL_BASE_URL),
        );
        #[cfg(not(target_arch = "wasm32"))]
        let inner: Box<dyn ErasedAssetReader> =
            Box::new(bevy::asset::io::file::FileAssetReader::new(MODEL_SOURCE));

        Self { inner, stats }
    }
}

impl AssetReader for ModelAssetReader {
    async fn read<'a>(&'a self, path: &'a Path) -> Result<impl Reader + 'a, AssetReaderError> {
        let requested = path.to_string_lossy();
        let fetch_path = PathBuf::from(rewrite_bin_path(&descriptor_fetch_path(&requested)));

        let mut reader = self.inner.read(&fetch_path).await?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|err| AssetReaderError::Io(Arc::new(err)))?;
        self.stats.add(bytes.len() as u64);
        Ok(VecReader::new(bytes))
    }

    async fn read_meta<'a>(&'a self, path: &'a Path) -> Result<impl Reader + 'a, AssetReaderError> {
        Err::<VecReader, _>(AssetReaderError::NotFound(path.to_path_buf()))
    }

    async fn read_directory<'a>(
        &'a self,
        path: &'a Path,
    ) -> Result<Box<PathStream>, AssetReaderError> {
        Err(AssetReaderError::NotFound(path.to_path_buf()))
    }

    async fn is_directory<'a>(&'a self, _path: &'a Path) -> Result<bool, AssetReaderError> {
        Ok(false)
    }
}

/// Builder registered under `models://` before the asset plugin is added.
pub fn model_asset_source(stats: ModelFetchStats) -> AssetSourceBuilder {
    AssetSource::build().with_reader(move || Box::new(ModelAssetReader::new(stats.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_asset_path_targets_the_model_source() {
        assert_eq!(descriptor_asset_path("3"), "models://3/3.gltf");
    }

    #[test]
    fn test_fetch_stats_accumulate_and_reset() {
        let stats = ModelFetchStats::default();
        stats.add(512);
        stats.add(512);
        assert_eq!(stats.loaded_bytes(), 1024);

        let shared = stats.clone();
        shared.add(1);
        assert_eq!(stats.loaded_bytes(), 1025);

        stats.reset();
        assert_eq!(shared.loaded_bytes(), 0);
    }
}
