//! Loading a workspace directory from disk.

use std::fs;
use std::path::Path;

use mapperlink::ide::{AnalysisHost, ResolutionEngine};
use mapperlink::project::{LoadError, LoadOptions, WorkspaceLoader};
use tempfile::TempDir;

use crate::helpers::fixtures::{CONFIG_XML, USER_MAPPER_XML, model_sources};

const POM_XML: &str = r#"<?xml version="1.0"?>
<project><modelVersion>4.0.0</modelVersion></project>
"#;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/main/resources/mybatis-config.xml", CONFIG_XML);
    write(dir.path(), "src/main/resources/mapper/UserMapper.xml", USER_MAPPER_XML);
    write(dir.path(), "pom.xml", POM_XML);
    write(dir.path(), "README.txt", "not xml");
    write(dir.path(), ".idea/workspace.xml", USER_MAPPER_XML);
    dir
}

fn host() -> AnalysisHost {
    let mut host = AnalysisHost::new();
    for (path, decls) in model_sources() {
        host.set_file_types(path, decls);
    }
    host
}

#[test]
fn test_loads_recognised_documents() {
    let dir = workspace();
    let mut host = host();

    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();
    assert_eq!(loaded, 2);

    let ctx = host.context();
    assert_eq!(ctx.markup().all_mapping_documents(ctx.scope()).len(), 1);
    assert!(ResolutionEngine::new().resolve_alias(&ctx, "Member").is_some());
}

#[test]
fn test_hidden_directories_can_be_included() {
    let dir = workspace();
    let mut host = host();

    let loader = WorkspaceLoader::with_options(LoadOptions {
        skip_hidden: false,
        ..LoadOptions::default()
    });
    let loaded = loader.load_directory_into_host(dir.path(), &mut host).unwrap();
    assert_eq!(loaded, 3);

    let ctx = host.context();
    assert_eq!(ctx.markup().all_mapping_documents(ctx.scope()).len(), 2);
}

#[test]
fn test_broken_file_does_not_stop_the_load() {
    let dir = workspace();
    write(
        dir.path(),
        "src/main/resources/mapper/Broken.xml",
        r#"<mapper namespace="a.B"><select id="x"></mapper>"#,
    );
    let mut host = host();

    let failures = match WorkspaceLoader::new().load_directory_into_host(dir.path(), &mut host) {
        Err(LoadError::Multiple(failures)) => failures,
        other => panic!("expected aggregated failures, got {other:?}"),
    };
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("Broken.xml"));

    let ctx = host.context();
    assert_eq!(ctx.markup().all_mapping_documents(ctx.scope()).len(), 1);
}

#[test]
fn test_single_file_load() {
    let dir = workspace();
    let mut host = host();
    let path = dir.path().join("src/main/resources/mapper/UserMapper.xml");

    WorkspaceLoader::new().load_file_into_host(&path, &mut host).unwrap();
    assert!(host.lookup_file(&path.to_string_lossy()).is_some());
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut host = host();
    let result = WorkspaceLoader::new().load_directory_into_host(dir.path().join("nope"), &mut host);
    assert!(matches!(result, Err(LoadError::NotADirectory(_))));
}
