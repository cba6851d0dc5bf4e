//! Transitive dependency walks against an on-disk repository.

use std::path::Path;

use pomres::pom::Scope;
use pomres::resolver::{LocalRepository, ProjectPom, ProjectResolver};
use pomres::substitution::NoProperties;
use pomres::test_utils::{DependencyFixture, PomFixture, init_test_logging, install_pom};
use tempfile::TempDir;
use url::Url;

fn resolve(path: &Path, repository: &LocalRepository) -> ProjectPom {
    ProjectResolver::new(repository).resolve(path).unwrap()
}

fn coordinates(project: &ProjectPom, scope: Scope, extra: &[Url], repository: &LocalRepository) -> Vec<String> {
    project
        .dependencies(scope, extra, repository, &NoProperties)
        .iter()
        .map(|pom| pom.coordinate().to_string())
        .collect()
}

#[test]
fn test_walk_with_versions_from_properties() {
    init_test_logging(None);
    let temp = TempDir::new().unwrap();
    let m2 = temp.path().join("m2");

    install_pom(&m2, &PomFixture::new("org.web", "server", "9").dependency("org.web", "codec", "2")).unwrap();
    install_pom(&m2, &PomFixture::new("org.web", "codec", "2")).unwrap();
    install_pom(&m2, &PomFixture::new("org.test", "harness", "1")).unwrap();

    let app = PomFixture::new("org.example", "app", "1.0")
        .property("server.version", "9")
        .dependency("org.web", "server", "${server.version}")
        .with_dependency(DependencyFixture::new("org.test", "harness", "1").scope("test"))
        .with_dependency(DependencyFixture::new("org.web", "codec", "2").optional())
        .write_to(&temp.path().join("app"))
        .unwrap();

    let repository = LocalRepository::new(&m2);
    let project = resolve(&app, &repository);

    assert_eq!(coordinates(&project, Scope::Compile, &[], &repository), vec![
        "org.web:server:9",
        "org.web:codec:2"
    ]);
    assert_eq!(coordinates(&project, Scope::Test, &[], &repository), vec!["org.test:harness:1"]);
}

#[test]
fn test_exclusion_must_hold_along_the_whole_chain() {
    let temp = TempDir::new().unwrap();
    let m2 = temp.path().join("m2");

    // a -> b -> noisy, where a also asks to exclude noisy under b
    install_pom(
        &m2,
        &PomFixture::new("g", "a", "1")
            .with_dependency(DependencyFixture::new("g", "b", "1").exclude("g", "noisy")),
    )
    .unwrap();
    install_pom(&m2, &PomFixture::new("g", "b", "1").dependency("g", "noisy", "1")).unwrap();
    install_pom(&m2, &PomFixture::new("g", "noisy", "1")).unwrap();
    let repository = LocalRepository::new(&m2);

    let both = PomFixture::new("g", "root", "1")
        .with_dependency(DependencyFixture::new("g", "a", "1").exclude("g", "noisy"))
        .write_to(&temp.path().join("both"))
        .unwrap();
    assert_eq!(coordinates(&resolve(&both, &repository), Scope::Compile, &[], &repository), vec![
        "g:a:1", "g:b:1"
    ]);

    // Without the exclusion on the top link the chain no longer excludes
    let inner_only = PomFixture::new("g", "root", "1")
        .dependency("g", "a", "1")
        .write_to(&temp.path().join("inner-only"))
        .unwrap();
    assert_eq!(
        coordinates(&resolve(&inner_only, &repository), Scope::Compile, &[], &repository),
        vec!["g:a:1", "g:b:1", "g:noisy:1"]
    );
}

#[test]
fn test_project_and_extra_file_repositories() {
    let temp = TempDir::new().unwrap();
    let m2 = temp.path().join("m2");
    let vendored = temp.path().join("app").join("vendor");
    let extra = temp.path().join("extra");

    install_pom(&vendored, &PomFixture::new("org.vendor", "lib", "1")).unwrap();
    install_pom(&extra, &PomFixture::new("org.extra", "lib", "1")).unwrap();

    let app = PomFixture::new("g", "app", "1")
        .repository("vendor")
        .dependency("org.vendor", "lib", "1")
        .dependency("org.extra", "lib", "1")
        .dependency("org.missing", "lib", "1")
        .write_to(&temp.path().join("app"))
        .unwrap();

    let repository = LocalRepository::new(&m2);
    let project = resolve(&app, &repository);

    assert_eq!(coordinates(&project, Scope::Compile, &[], &repository), vec!["org.vendor:lib:1"]);

    let extra_url = Url::from_directory_path(&extra).unwrap();
    assert_eq!(coordinates(&project, Scope::Compile, &[extra_url], &repository), vec![
        "org.vendor:lib:1",
        "org.extra:lib:1"
    ]);
}
