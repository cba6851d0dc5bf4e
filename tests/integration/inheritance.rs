//! Parent chains resolved from disk.

use std::fs;

use anyhow::Result;
use pomres::core::PomError;
use pomres::pom::{Coordinate, Pom};
use pomres::resolver::{LocalRepository, ProjectResolver};
use pomres::test_utils::{PomFixture, init_test_logging, install_pom};
use tempfile::TempDir;
use url::Url;

fn no_lookup(_: &Coordinate, _: &[Url]) -> Result<Option<Pom>> {
    Ok(None)
}

#[test]
fn test_three_level_chain() {
    init_test_logging(None);
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    PomFixture::new("org.example", "grandparent", "3.0")
        .description("GP")
        .property("a", "grandparent")
        .property("only.gp", "gp")
        .repository("https://gp.example/repo")
        .dependency("org.lib", "gp-lib", "1")
        .write_to(root)
        .unwrap();
    PomFixture::child("parent")
        .parent("org.example", "grandparent", "3.0")
        .description("P")
        .property("a", "parent")
        .property("b", "parent")
        .repository("../repo")
        .dependency("org.lib", "p-lib", "1")
        .write_to(&root.join("parent"))
        .unwrap();
    let leaf = PomFixture::child("leaf")
        .parent("org.example", "parent", "3.0")
        .description("L")
        .property("b", "leaf")
        .dependency("org.lib", "leaf-lib", "1")
        .write_to(&root.join("parent").join("leaf"))
        .unwrap();

    let project = ProjectResolver::new(&no_lookup).resolve(&leaf).unwrap();

    assert_eq!(project.pom().coordinate(), Coordinate::new("org.example", "leaf", "3.0"));
    assert_eq!(project.pom().description(), Some("GP\nP\nL"));

    let props = project.properties();
    assert_eq!(props["a"], "parent");
    assert_eq!(props["b"], "leaf");
    assert_eq!(props["only.gp"], "gp");

    let repos: Vec<String> = project.repositories().iter().map(ToString::to_string).collect();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0], "https://gp.example/repo");
    assert_eq!(project.repositories()[1].to_file_path().unwrap(), root.join("repo"));

    let deps: Vec<&str> = project.pom().dependencies().iter().map(|d| d.artifact_id.as_str()).collect();
    assert_eq!(deps, vec!["leaf-lib", "p-lib", "gp-lib"]);
}

#[test]
fn test_relative_path_to_sibling_directory() {
    let temp = TempDir::new().unwrap();
    PomFixture::new("org.example", "build", "1.0")
        .property("from", "build")
        .write_to(&temp.path().join("build"))
        .unwrap();
    let app = PomFixture::child("app")
        .parent_at("org.example", "build", "1.0", "../build")
        .write_to(&temp.path().join("app"))
        .unwrap();

    let project = ProjectResolver::new(&no_lookup).resolve(&app).unwrap();
    assert_eq!(project.properties()["from"], "build");
    assert_eq!(project.pom().group_id(), Some("org.example"));
}

#[test]
fn test_parent_from_local_repository() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("m2");
    install_pom(
        &repo,
        &PomFixture::new("org.corp", "corp-parent", "7")
            .description("corporate")
            .property("hidden", "x")
            .repository("https://corp.example/repo")
            .dependency("org.corp", "logging", "7"),
    )
    .unwrap();

    let app = PomFixture::child("app")
        .parent("org.corp", "corp-parent", "7")
        .write_to(&temp.path().join("workspace").join("app"))
        .unwrap();

    let repository = LocalRepository::new(&repo);
    let project = ProjectResolver::new(&repository).resolve(&app).unwrap();

    assert_eq!(project.pom().coordinate(), Coordinate::new("org.corp", "app", "7"));
    assert_eq!(project.pom().dependencies().len(), 1);
    assert!(project.properties().is_empty());
    assert!(project.repositories().is_empty());
    assert_eq!(project.pom().description(), None);
}

#[test]
fn test_unknown_remote_parent_fails() {
    let temp = TempDir::new().unwrap();
    let app = PomFixture::child("app")
        .parent("org.nowhere", "ghost", "1")
        .write_to(&temp.path().join("app"))
        .unwrap();

    let repository = LocalRepository::new(temp.path().join("empty-m2"));
    let err = ProjectResolver::new(&repository).resolve(&app).unwrap_err();
    match err.downcast_ref::<PomError>() {
        Some(PomError::ParentNotFound {
            coordinate,
        }) => assert_eq!(coordinate, "org.nowhere:ghost:1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_self_parent_is_a_cycle() {
    let temp = TempDir::new().unwrap();
    let path = PomFixture::new("g", "loop", "1")
        .parent_at("g", "loop", "1", "pom.xml")
        .write_to(temp.path())
        .unwrap();

    let err = ProjectResolver::new(&no_lookup).resolve(&path).unwrap_err();
    assert!(matches!(err.downcast_ref::<PomError>(), Some(PomError::CircularParent { .. })));
}

#[test]
fn test_malformed_grandparent_aborts_everything() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pom.xml"), "<project><artifactId>gp</artifactId>").unwrap();
    PomFixture::child("parent")
        .parent("g", "gp", "1")
        .write_to(&temp.path().join("parent"))
        .unwrap();
    let leaf = PomFixture::child("leaf")
        .parent("g", "parent", "1")
        .write_to(&temp.path().join("parent").join("leaf"))
        .unwrap();

    let err = ProjectResolver::new(&no_lookup).resolve(&leaf).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PomError>(),
        Some(PomError::MalformedDescriptor { .. })
    ));
}

#[test]
fn test_resolved_parent_is_not_mutated_by_children() {
    let temp = TempDir::new().unwrap();
    let parent_path = PomFixture::new("g", "parent", "1")
        .property("shared", "parent")
        .dependency("g", "base", "1")
        .write_to(temp.path())
        .unwrap();
    let child = PomFixture::child("child")
        .parent("g", "parent", "1")
        .property("shared", "child")
        .dependency("g", "extra", "1")
        .write_to(&temp.path().join("child"))
        .unwrap();

    let resolver = ProjectResolver::new(&no_lookup);
    let before = resolver.resolve(&parent_path).unwrap();
    let project = resolver.resolve(&child).unwrap();
    let after = resolver.resolve(&parent_path).unwrap();

    assert_eq!(project.properties()["shared"], "child");
    assert_eq!(before.properties(), after.properties());
    assert_eq!(after.pom().dependencies().len(), 1);
}
