use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod mock;

pub use mock::{
    AppliedPose, ManualClock, MemoryAssets, MockData, MockRuntime, MockSkeleton, MockState,
    RecordingRenderer, RenderCall, SkeletonFixture,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    skeletons: HashMap<String, SkeletonEntry>,
}

#[derive(Debug, Deserialize)]
struct SkeletonEntry {
    skeleton: String,
    atlas: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod skeletons {
    use super::*;
    use vizij_skel_player::PlayerConfig;

    pub fn keys() -> Vec<String> {
        MANIFEST.skeletons.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.skeletons, "skeleton", name)?;
        read_to_string(&entry.skeleton)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.skeletons, "skeleton", name)?;
        super::load_json(&entry.skeleton)
    }

    pub fn atlas(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.skeletons, "skeleton", name)?;
        read_to_string(&entry.atlas)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.skeletons, "skeleton", name)?;
        Ok(resolve_path(&entry.skeleton))
    }

    /// Skeleton and atlas URLs, as used by [`assets`] and [`config`].
    pub fn urls(name: &str) -> Result<(String, String)> {
        let entry = lookup(&MANIFEST.skeletons, "skeleton", name)?;
        Ok((entry.skeleton.clone(), entry.atlas.clone()))
    }

    /// In-memory asset source serving the fixture under its manifest paths.
    pub fn assets(name: &str) -> Result<MemoryAssets> {
        let (skeleton_url, atlas_url) = urls(name)?;
        Ok(MemoryAssets::new()
            .with(skeleton_url, json(name)?)
            .with(atlas_url, atlas(name)?))
    }

    /// Player config pointing at the fixture; everything else left to defaults.
    pub fn config(name: &str) -> Result<PlayerConfig> {
        let (skeleton_url, atlas_url) = urls(name)?;
        Ok(PlayerConfig {
            skeleton: Some(skeleton_url),
            atlas: Some(atlas_url),
            ..PlayerConfig::default()
        })
    }
}
