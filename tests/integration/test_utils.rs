//! Shared test utilities for integration tests

use assetgen::dirty::DirtyPolicy;
use assetgen::generator::GeneratorContext;
use assetgen::platform::TargetPlatform;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A scratch workspace with an `assets/` source directory and a `deploy/` target.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn assets(&self) -> PathBuf {
        self.root().join("assets")
    }

    pub fn header(&self, name: &str) -> PathBuf {
        self.root().join("gen").join(name)
    }

    pub fn deploy(&self) -> PathBuf {
        self.root().join("deploy")
    }

    /// Write a file under `assets/`, creating parents.
    pub fn asset(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.assets().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn descriptor(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.assets().join(name);
        fs::write(&path, yaml).unwrap();
        path
    }

    pub fn context(&self, platform: TargetPlatform) -> GeneratorContext {
        GeneratorContext {
            deploy_dir: self.deploy(),
            target_platform: platform,
            dirty_policy: DirtyPolicy::Mtime,
        }
    }

    /// Move every file in the workspace one hour into the past, so the next
    /// write is strictly newer regardless of timestamp granularity.
    pub fn age_all(&self) {
        let past = SystemTime::now() - Duration::from_secs(3600);
        age_tree(self.root(), past);
    }
}

fn age_tree(dir: &Path, time: SystemTime) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            age_tree(&path, time);
        } else {
            set_mtime(&path, time);
        }
    }
}

pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Mark a file as modified now.
pub fn touch(path: &Path) {
    set_mtime(path, SystemTime::now());
}

/// Decode the bytes of `unsigned char <name>[N] = { ... };` from a generated header.
pub fn decode_array(header: &str, name: &str) -> Vec<u8> {
    let open = format!("unsigned char {}[", name);
    let start = header.find(&open).expect("array not found");
    let body_start = start + header[start..].find('{').unwrap() + 1;
    let body_end = body_start + header[body_start..].find("};").unwrap();
    header[body_start..body_end]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| u8::from_str_radix(t.trim_start_matches("0x"), 16).unwrap())
        .collect()
}

/// Declared size `N` of `unsigned char <name>[N]`.
pub fn declared_len(header: &str, name: &str) -> usize {
    let open = format!("unsigned char {}[", name);
    let start = header.find(&open).expect("array not found") + open.len();
    let end = start + header[start..].find(']').unwrap();
    header[start..end].parse().unwrap()
}
