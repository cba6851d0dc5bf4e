//! Macro substitution through resolved projects.

use std::collections::BTreeMap;

use anyhow::Result;
use pomres::pom::{Coordinate, Pom};
use pomres::resolver::ProjectResolver;
use pomres::substitution::{NoProperties, SystemProperties, substitute};
use pomres::test_utils::PomFixture;
use serial_test::serial;
use tempfile::TempDir;
use url::Url;

fn no_lookup(_: &Coordinate, _: &[Url]) -> Result<Option<Pom>> {
    Ok(None)
}

#[test]
fn test_substitute_properties() {
    let lookup = |key: &str| (key == "k").then(|| "V".to_string());

    for plain in ["", "plain text", "$ {k}", "{k}", "$k"] {
        assert_eq!(substitute(plain, lookup), plain);
    }
    assert_eq!(substitute("${k}", lookup), "V");
    assert_eq!(substitute("${  k \t}", lookup), "V");
    assert_eq!(substitute("${undefined}", lookup), "${undefined}");
    assert_eq!(substitute("a${k}b${k}c", lookup), "aVbVc");
}

#[test]
fn test_substitution_is_not_recursive() {
    let lookup = |key: &str| match key {
        "outer" => Some("${inner}".to_string()),
        "inner" => Some("deep".to_string()),
        _ => None,
    };
    assert_eq!(substitute("${outer}", lookup), "${inner}");
}

#[test]
fn test_inherited_property_with_child_identity() {
    let temp = TempDir::new().unwrap();
    PomFixture::new("org.example", "parent", "5.1")
        .property("final.name", "${pom.artifactId}-${pom.version}")
        .write_to(temp.path())
        .unwrap();
    let child = PomFixture::child("service")
        .parent("org.example", "parent", "5.1")
        .name("Service")
        .write_to(&temp.path().join("service"))
        .unwrap();

    let project = ProjectResolver::new(&no_lookup).resolve(&child).unwrap();
    assert_eq!(project.property("final.name", &NoProperties).as_deref(), Some("service-5.1"));
    assert_eq!(project.replace("${pom.name} (${pom.groupId})", &NoProperties), "Service (org.example)");
}

#[test]
#[serial]
fn test_system_properties_are_the_last_fallback() {
    let temp = TempDir::new().unwrap();
    let path = PomFixture::new("g", "a", "1")
        .property("declared", "from-pom")
        .write_to(temp.path())
        .unwrap();
    let project = ProjectResolver::new(&no_lookup).resolve(&path).unwrap();

    let mut overrides = BTreeMap::new();
    overrides.insert("declared".to_string(), "from-config".to_string());
    overrides.insert("java.version".to_string(), "21".to_string());
    let system = SystemProperties::new(overrides);

    // SAFETY: serialized with other env-mutating tests
    unsafe { std::env::set_var("POMRES_IT_VALUE", "env-value") };
    let text = project.replace("${declared} ${java.version} ${env.POMRES_IT_VALUE} ${nope}", &system);
    unsafe { std::env::remove_var("POMRES_IT_VALUE") };

    assert_eq!(text, "from-pom 21 env-value ${nope}");
}
