//! The `pomres` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use pomres::test_utils::{PomFixture, install_pom};
use predicates::prelude::*;
use tempfile::TempDir;

/// A project tree plus a config file pointing at an isolated local repository.
struct Workspace {
    temp: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let m2 = temp.path().join("m2");
        let config = temp.path().join("config.toml");
        fs::write(
            &config,
            format!(
                "local_repository = {:?}\n\n[properties]\n\"build.tool\" = \"pomres\"\n",
                m2.display().to_string()
            ),
        )
        .unwrap();
        Self {
            temp,
            config,
        }
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn m2(&self) -> PathBuf {
        self.root().join("m2")
    }

    fn pomres(&self) -> Command {
        let mut cmd = Command::cargo_bin("pomres").unwrap();
        cmd.arg("--config").arg(&self.config).env_remove("RUST_LOG").env("NO_COLOR", "1");
        cmd
    }

    fn project(&self) -> PathBuf {
        PomFixture::new("org.example", "parent", "2.0")
            .description("Parent project")
            .property("greeting", "hello")
            .property("lib.version", "3.1")
            .write_to(self.root())
            .unwrap();
        PomFixture::child("app")
            .parent("org.example", "parent", "2.0")
            .packaging("war")
            .property("message", "${greeting} from ${pom.artifactId}")
            .dependency("org.lib", "core", "${lib.version}")
            .write_to(&self.root().join("app"))
            .unwrap()
    }
}

#[test]
fn test_resolve_text() {
    let ws = Workspace::new();
    let pom = ws.project();

    ws.pomres()
        .arg("resolve")
        .arg(&pom)
        .assert()
        .success()
        .stdout(predicate::str::contains("org.example:app:2.0"))
        .stdout(predicate::str::contains("packaging: war"))
        .stdout(predicate::str::contains("greeting = hello"))
        .stdout(predicate::str::contains("org.lib:core:${lib.version} (compile)"));
}

#[test]
fn test_resolve_json() {
    let ws = Workspace::new();
    let pom = ws.project();

    let output = ws.pomres().args(["resolve", "--format", "json"]).arg(&pom).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["artifactId"], "app");
    assert_eq!(json["groupId"], "org.example");
    assert_eq!(json["description"], "Parent project");
    assert_eq!(json["properties"]["lib.version"], "3.1");
    assert_eq!(json["dependencies"][0]["scope"], "compile");
    assert_eq!(json["dependencies"][0]["type"], "jar");
}

#[test]
fn test_property_and_eval() {
    let ws = Workspace::new();
    let pom = ws.project();

    ws.pomres()
        .arg("property")
        .arg(&pom)
        .arg("message")
        .assert()
        .success()
        .stdout("hello from app\n");

    ws.pomres()
        .arg("eval")
        .arg(&pom)
        .arg("${pom.groupId}/${lib.version} by ${build.tool} ${unknown}")
        .assert()
        .success()
        .stdout("org.example/3.1 by pomres ${unknown}\n");
}

#[test]
fn test_undeclared_property_fails() {
    let ws = Workspace::new();
    let pom = ws.project();

    ws.pomres()
        .arg("property")
        .arg(&pom)
        .arg("missing")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Property 'missing' is not declared"));
}

#[test]
fn test_deps_walks_local_repository() {
    let ws = Workspace::new();
    let pom = ws.project();
    install_pom(&ws.m2(), &PomFixture::new("org.lib", "core", "3.1").dependency("org.lib", "util", "1"))
        .unwrap();
    install_pom(&ws.m2(), &PomFixture::new("org.lib", "util", "1")).unwrap();

    ws.pomres()
        .arg("deps")
        .arg(&pom)
        .assert()
        .success()
        .stdout("org.lib:core:3.1\norg.lib:util:1\n");

    ws.pomres().arg("deps").arg(&pom).args(["--scope", "test"]).assert().success().stdout("");
}

#[test]
fn test_empty_property_reports_error() {
    let ws = Workspace::new();
    let pom = ws.root().join("pom.xml");
    fs::write(&pom, "<project><artifactId>a</artifactId><properties><foo></foo></properties></project>")
        .unwrap();

    ws.pomres()
        .arg("resolve")
        .arg(&pom)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty value for property 'foo'"))
        .stderr(predicate::str::contains("1: Failed to resolve"))
        .stderr(predicate::str::contains("empty value for property 'foo'").count(1))
        .stderr(predicate::str::contains("Give <foo> a value"));
}

#[test]
fn test_missing_file_reports_error() {
    let ws = Workspace::new();

    ws.pomres()
        .arg("resolve")
        .arg(ws.root().join("nope").join("pom.xml"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_invalid_scope_is_rejected() {
    let ws = Workspace::new();
    let pom = ws.project();

    ws.pomres().arg("deps").arg(&pom).args(["--scope", "banana"]).assert().failure();
}
