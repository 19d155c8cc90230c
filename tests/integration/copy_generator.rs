//! Copy generator: staging, platform overrides, header stamp.

use super::test_utils::Workspace;
use assetgen::generator::CopyGenerator;
use assetgen::platform::TargetPlatform;
use assetgen::runner::{generate, GenerateOutcome, GenerateRequest};
use assetgen::GeneratorError;
use std::fs;

#[test]
fn test_copy_into_missing_nested_directory_is_byte_identical() {
    let ws = Workspace::new();
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    ws.asset("data/fonts/deep/font.bin", &payload);
    let desc = ws.descriptor(
        "files.yml",
        "root: data\nfiles:\n  - fonts/deep/font.bin\n",
    );
    assert!(!ws.deploy().exists());

    let request = GenerateRequest::new(&desc, ws.header("files.h"));
    generate(&CopyGenerator, &request, &ws.context(TargetPlatform::Linux)).unwrap();

    let copied = ws.deploy().join("fonts").join("deep").join("font.bin");
    assert_eq!(fs::read(copied).unwrap(), payload);
}

#[test]
fn test_platform_destination_overrides() {
    let yaml = r#"
files:
  - icon.png
options:
  ios:
    dst_dir: Payload
  macos:
    dst_dir: Contents/Resources
  emscripten:
    dst_dir: web
"#;
    let osx_only = r#"
files:
  - icon.png
options:
  osx:
    dst_dir: Legacy
"#;
    for (descriptor, platform, expected) in [
        (yaml, TargetPlatform::Ios, vec!["Payload", "icon.png"]),
        (yaml, TargetPlatform::Osx, vec!["Contents", "Resources", "icon.png"]),
        (yaml, TargetPlatform::Emscripten, vec!["web", "icon.png"]),
        (yaml, TargetPlatform::Linux, vec!["icon.png"]),
        (osx_only, TargetPlatform::Osx, vec!["Legacy", "icon.png"]),
    ] {
        let ws = Workspace::new();
        ws.asset("icon.png", b"png");
        let desc = ws.descriptor("files.yml", descriptor);
        let request = GenerateRequest::new(&desc, ws.header("files.h"));
        generate(&CopyGenerator, &request, &ws.context(platform)).unwrap();

        let target = expected
            .iter()
            .fold(ws.deploy(), |path, part| path.join(part));
        assert!(target.exists(), "{} should stage into {}", platform, target.display());
    }
}

#[test]
fn test_header_is_stamped() {
    let ws = Workspace::new();
    ws.asset("a.txt", b"a");
    let desc = ws.descriptor("files.yml", "files: [a.txt]\n");
    generate(
        &CopyGenerator,
        &GenerateRequest::new(&desc, ws.header("files.h")),
        &ws.context(TargetPlatform::Linux),
    )
    .unwrap();

    let header = fs::read_to_string(ws.header("files.h")).unwrap();
    let mut lines = header.lines();
    assert_eq!(lines.next(), Some("// #version:3#"));
    assert_eq!(lines.next(), Some("// machine generated, do not edit!"));
    assert!(header.contains("#pragma once"));
}

#[test]
fn test_missing_source_is_reported_by_name() {
    let ws = Workspace::new();
    let desc = ws.descriptor("files.yml", "files: [gone.txt]\n");
    let err = generate(
        &CopyGenerator,
        &GenerateRequest::new(&desc, ws.header("files.h")),
        &ws.context(TargetPlatform::Linux),
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::MissingInput(ref p) if p.ends_with("gone.txt")));
    assert!(err.to_string().contains("gone.txt"));
}

#[test]
fn test_staged_header_with_version_stamp_stays_clean() {
    let ws = Workspace::new();
    ws.asset(
        "font.h",
        b"// #version:1#\n// machine generated, do not edit!\nunsigned char font[1] = { 0x00 };\n",
    );
    let desc = ws.descriptor("files.yml", "files: [font.h]\n");
    let request = GenerateRequest::new(&desc, ws.header("files.h"));
    let ctx = ws.context(TargetPlatform::Linux);

    assert!(generate(&CopyGenerator, &request, &ctx).unwrap().regenerated());
    assert_eq!(
        generate(&CopyGenerator, &request, &ctx).unwrap(),
        GenerateOutcome::Skipped
    );
    assert_eq!(
        generate(&CopyGenerator, &request, &ctx).unwrap(),
        GenerateOutcome::Skipped
    );
}

#[test]
fn test_unreadable_source_is_io_error() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.assets().join("blob.bin")).unwrap();
    let desc = ws.descriptor("files.yml", "files: [blob.bin]\n");
    let err = generate(
        &CopyGenerator,
        &GenerateRequest::new(&desc, ws.header("files.h")),
        &ws.context(TargetPlatform::Linux),
    )
    .unwrap_err();
    assert!(
        matches!(err, GeneratorError::Io { ref path, .. } if path.ends_with("blob.bin")),
        "unexpected error: {err:?}"
    );
    assert!(!ws.header("files.h").exists());
}
