//! Integration tests for the tomlpath library
//!
//! These drive the CLI command handlers end-to-end over real temp files and
//! check the resolver's observable behavior: values read back, files
//! rewritten (or deliberately left untouched), and formatting preserved.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use tomlpath::args::{
    AddSectionArgs, GetArgs, SearchArgs, SetArgs, UnsetArgs, UpdateDependencyListArgs,
};
use tomlpath::io::load_document;
use tomlpath::{ops, query, resolver, KeyPath, TomlPathError};

const PERSON: &str = r#"[person]
name = "MyName"
age = 12
happy = false
addresses = ["Rotterdam", "Amsterdam"]

[person.education]
name = "University"

[[person.vehicles]]
model = "Golf"
year = 2020

[[person.vehicles]]
model = "Prius"
year = 2016
"#;

fn fixture(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("test.toml");
    fs::write(&path, content).unwrap();
    path
}

fn read_back(path: &Path, key: &str) -> Result<serde_json::Value, TomlPathError> {
    let document = load_document(path)?;
    resolver::get(&document, &KeyPath::parse(key)?, None)
}

fn set_args(path: &Path, key: &str, value: &str) -> SetArgs {
    SetArgs {
        key: key.to_string(),
        value: value.to_string(),
        to_int: false,
        to_float: false,
        to_bool: false,
        to_array: false,
        toml_path: path.to_path_buf(),
    }
}

#[test]
fn get_resolves_fields_indices_and_tables() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    assert_eq!(read_back(&path, "person.vehicles[0].model").unwrap(), json!("Golf"));
    assert_eq!(read_back(&path, "person.education.name").unwrap(), json!("University"));
    assert_eq!(read_back(&path, "person.age").unwrap(), json!(12));
    assert_eq!(
        read_back(&path, "person.addresses").unwrap(),
        json!(["Rotterdam", "Amsterdam"])
    );
    assert_eq!(
        read_back(&path, "person.vehicles[1]").unwrap(),
        json!({"model": "Prius", "year": 2016})
    );
    assert_eq!(
        read_back(&path, "person.education").unwrap(),
        json!({"name": "University"})
    );

    assert!(matches!(
        read_back(&path, "person.not_existing_key"),
        Err(TomlPathError::KeyNotFound { .. })
    ));
    assert!(matches!(
        read_back(&path, "person.vehicles[122]"),
        Err(TomlPathError::IndexNotFound { .. })
    ));
    assert!(matches!(
        read_back(&path, "person.not_existing_key[122]"),
        Err(TomlPathError::KeyNotFound { .. })
    ));
}

#[test]
fn get_default_substitutes_without_touching_the_file() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    let result = ops::run_get(GetArgs {
        key: "missing.key".to_string(),
        default: Some("programming".to_string()),
        toml_path: path.clone(),
    });
    assert!(result.is_ok());
    assert_eq!(fs::read_to_string(&path).unwrap(), PERSON);

    // Without a default the same lookup is a hard failure.
    let result = ops::run_get(GetArgs {
        key: "missing.key".to_string(),
        default: None,
        toml_path: path.clone(),
    });
    assert!(result.is_err());
}

#[test]
fn get_requires_the_file_to_exist() {
    let dir = TempDir::new().unwrap();
    let result = ops::run_get(GetArgs {
        key: "person.age".to_string(),
        default: None,
        toml_path: dir.path().join("absent.toml"),
    });
    assert!(matches!(result, Err(TomlPathError::FileNotFound { .. })));
}

#[test]
fn set_round_trips_raw_strings() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    // No coercion flag: the value stays a string, even when numeric.
    ops::run_set(set_args(&path, "person.age", "15")).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("age = \"15\""));
    assert_eq!(read_back(&path, "person.age").unwrap(), json!("15"));
}

#[test]
fn set_appends_new_keys_at_the_end() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    ops::run_set(set_args(&path, "person.gender", "male")).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("gender = \"male\""));
    assert_eq!(read_back(&path, "person.gender").unwrap(), json!("male"));
}

#[test]
fn set_coerces_ints_floats_and_arrays() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    ops::run_set(SetArgs {
        to_int: true,
        ..set_args(&path, "person.age", "15")
    })
    .unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("age = 15"));
    assert_eq!(read_back(&path, "person.age").unwrap(), json!(15));

    ops::run_set(SetArgs {
        to_float: true,
        ..set_args(&path, "person.age", "15")
    })
    .unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("age = 15.0"));

    ops::run_set(SetArgs {
        to_array: true,
        ..set_args(&path, "person.addresses", r#"["Amsterdam","London"]"#)
    })
    .unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains(r#"addresses = ["Amsterdam", "London"]"#));
    assert_eq!(
        read_back(&path, "person.addresses").unwrap(),
        json!(["Amsterdam", "London"])
    );
}

#[test]
fn set_coerces_bools() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    for truthy in ["True", "1", "yes"] {
        ops::run_set(SetArgs {
            to_bool: true,
            ..set_args(&path, "person.happy", truthy)
        })
        .unwrap();
        assert_eq!(read_back(&path, "person.happy").unwrap(), json!(true));
    }

    ops::run_set(SetArgs {
        to_bool: true,
        ..set_args(&path, "person.happy", "no")
    })
    .unwrap();
    assert_eq!(read_back(&path, "person.happy").unwrap(), json!(false));
    assert!(fs::read_to_string(&path).unwrap().contains("happy = false"));
}

#[test]
fn failed_sets_never_touch_the_file() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    // Missing prefix key.
    let result = ops::run_set(set_args(&path, "person.KEY_THAT_DOES_NOT_EXIST.name", "15"));
    assert!(matches!(result, Err(TomlPathError::KeyNotFound { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), PERSON);

    // Coercion failure.
    let result = ops::run_set(SetArgs {
        to_int: true,
        ..set_args(&path, "person.age", "a")
    });
    assert!(matches!(result, Err(TomlPathError::InvalidValue { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), PERSON);

    // Index into a missing array.
    let result = ops::run_set(set_args(&path, "person.KEY_THAT_DOES_NOT_EXIST[0]", "git"));
    assert!(matches!(result, Err(TomlPathError::KeyNotFound { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), PERSON);
}

#[test]
fn set_array_elements_upsert_or_append() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "[person]\nname = \"MyName\"\nskills = [\"python\", \"pip\"]\n",
    );

    ops::run_set(set_args(&path, "person.skills[1]", "toml")).unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains(r#"skills = ["python", "toml"]"#));

    ops::run_set(set_args(&path, "person.skills[2]", "git")).unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains(r#"skills = ["python", "toml", "git"]"#));

    // Any position past the end appends exactly one element.
    ops::run_set(set_args(&path, "person.skills[1337]", "h4ck3rm4n")).unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains(r#"skills = ["python", "toml", "git", "h4ck3rm4n"]"#));
    assert_eq!(
        read_back(&path, "person.skills").unwrap(),
        json!(["python", "toml", "git", "h4ck3rm4n"])
    );
}

#[test]
fn set_preserves_comments_and_out_of_order_tables() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "# top comment\n[root.d1]\nf1 = \"f1\" # keep me\n[root]\nf2 = \"f2\"\n",
    );

    ops::run_set(set_args(&path, "root.f3", "f3")).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("# top comment"));
    assert!(text.contains("f1 = \"f1\" # keep me"));
    // The new key lands in the [root] section, not under [root.d1].
    assert!(text.contains("[root]\nf2 = \"f2\"\nf3 = \"f3\"\n"));
}

#[test]
fn add_section_creates_nested_tables_idempotently() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    ops::run_add_section(AddSectionArgs {
        key: "address".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("[address]"));

    ops::run_add_section(AddSectionArgs {
        key: "address.work".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    let once = fs::read_to_string(&path).unwrap();
    assert!(once.contains("[address.work]"));

    // Re-adding changes nothing, byte for byte.
    ops::run_add_section(AddSectionArgs {
        key: "address.work".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), once);
}

#[test]
fn add_section_over_a_scalar_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    let result = ops::run_add_section(AddSectionArgs {
        key: "person.name.sub".to_string(),
        toml_path: path.clone(),
    });
    assert!(matches!(result, Err(TomlPathError::TypeMismatch { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), PERSON);
}

#[test]
fn unset_deletes_keys_and_fails_fast_on_missing_ones() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);

    ops::run_unset(UnsetArgs {
        key: "person.age".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    assert!(matches!(
        read_back(&path, "person.age"),
        Err(TomlPathError::KeyNotFound { .. })
    ));

    // Emptying a nested table keeps its header.
    ops::run_unset(UnsetArgs {
        key: "person.education.name".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[person.education]"));
    assert!(!text.contains("University"));

    // A missing key or prefix aborts before the write.
    let before = fs::read_to_string(&path).unwrap();
    let result = ops::run_unset(UnsetArgs {
        key: "person.nope.deeper".to_string(),
        toml_path: path.clone(),
    });
    assert!(matches!(result, Err(TomlPathError::KeyNotFound { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    // Removing a whole table is allowed.
    ops::run_unset(UnsetArgs {
        key: "person".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    assert!(!fs::read_to_string(&path).unwrap().contains("MyName"));
}

#[test]
fn search_queries_the_unwrapped_document() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, PERSON);
    let document = load_document(&path).unwrap();

    assert_eq!(
        query::search(&document, "person.vehicles[*].model").unwrap(),
        Some(r#"["Golf","Prius"]"#.to_string())
    );
    assert_eq!(
        query::search(&document, "person.vehicles[*].not_existing_property").unwrap(),
        None
    );

    // The handler succeeds for both match and no-match outcomes and never
    // writes the file.
    ops::run_search(SearchArgs {
        expression: "person.vehicles[*].model".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    ops::run_search(SearchArgs {
        expression: "person.vehicles[*].not_existing_property".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), PERSON);

    let result = ops::run_search(SearchArgs {
        expression: "wrong-expression".to_string(),
        toml_path: path.clone(),
    });
    assert!(matches!(result, Err(TomlPathError::InvalidQuery { .. })));
}

#[test]
fn update_dependency_list_rewrites_the_array() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "[project]\ndependencies = [\"requests>=2.0.0\", \"click\"]\n",
    );

    ops::run_update_dependency_list(UpdateDependencyListArgs {
        key: "project.dependencies".to_string(),
        value: "requests".to_string(),
        version: "2.31.0".to_string(),
        toml_path: path.clone(),
    })
    .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"requests>=2.31.0\""));
    assert!(text.contains("\"click\""));
    assert_eq!(
        read_back(&path, "project.dependencies").unwrap(),
        json!(["requests>=2.31.0", "click"])
    );

    // Non-array targets abort before the write.
    let before = fs::read_to_string(&path).unwrap();
    let result = ops::run_update_dependency_list(UpdateDependencyListArgs {
        key: "project".to_string(),
        value: "requests".to_string(),
        version: "1.0".to_string(),
        toml_path: path.clone(),
    });
    assert!(matches!(result, Err(TomlPathError::TypeMismatch { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}
