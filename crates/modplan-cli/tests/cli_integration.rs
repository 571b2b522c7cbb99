//! Integration tests for the modplan command line
//!
//! Commands run through `run` against settings and configs in temporary directories.

use std::{fs, path::Path};

use clap::Parser;
use modplan_cli::{run, Cli, CliError};
use modplan_core::PlanError;
use tempfile::TempDir;

struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");
        fs::create_dir_all(&config_dir).unwrap();

        fs::write(
            config_dir.join("page.json"),
            r#"{
                "name": "ModuleWithArea",
                "customData": { "test": "result" },
                "areas": {
                    "area51": [{ "name": "SingleModule", "customData": { "test": "child" } }]
                }
            }"#,
        )
        .unwrap();
        fs::write(
            config_dir.join("page.yaml"),
            "name: SingleModule\ncustomData:\n  test: from yaml\n",
        )
        .unwrap();

        fs::write(
            dir.path().join("settings.toml"),
            format!(
                "modules_dir = \"/site/modules\"\nconfig_dir = {:?}\n\n[[modules]]\nname = \"SingleModule\"\n",
                config_dir.display().to_string()
            ),
        )
        .unwrap();

        Self { dir }
    }

    fn settings(&self) -> String {
        self.dir.path().join("settings.toml").display().to_string()
    }

    fn run(&self, args: &[&str]) -> Result<String, CliError> {
        let settings = self.settings();
        let mut argv = vec!["modplan", "--settings", settings.as_str()];
        argv.extend_from_slice(args);
        run(&Cli::try_parse_from(argv).unwrap())
    }
}

#[test]
fn test_render_config() {
    let site = Site::new();
    let html = site
        .run(&["--module", "ModuleWithArea", "render", "page.json"])
        .unwrap();

    assert_eq!(
        html,
        "<div>ModuleWithArea result<div>SingleModule child</div>\n</div>\n"
    );
}

#[test]
fn test_render_yaml_config() {
    let site = Site::new();
    let html = site.run(&["render", "page.yaml"]).unwrap();
    assert_eq!(html, "<div>SingleModule from yaml</div>\n");
}

#[test]
fn test_render_requires_registered_modules() {
    let site = Site::new();
    let result = site.run(&["render", "page.json"]);

    match result {
        Err(CliError::Plan(PlanError::UnregisteredModule(name))) => {
            assert_eq!(name, "ModuleWithArea");
        }
        other => panic!("Expected unregistered module error, got {other:?}"),
    }
}

#[test]
fn test_plan_json_includes_paths() {
    let site = Site::new();
    let output = site
        .run(&["--module", "ModuleWithArea=/custom/area/", "plan", "page.json"])
        .unwrap();
    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(plan["path"], "/custom/area/");
    assert_eq!(plan["data"]["test"], "result");
    assert_eq!(plan["areas"]["area51"][0]["path"], "/site/modules/SingleModule/");
}

#[test]
fn test_plan_yaml() {
    let site = Site::new();
    let output = site.run(&["plan", "page.yaml", "--format", "yaml"]).unwrap();

    assert_eq!(
        output,
        "name: SingleModule\npath: /site/modules/SingleModule/\ndata:\n  test: from yaml\n"
    );
}

#[test]
fn test_missing_config_file() {
    let site = Site::new();
    let result = site.run(&["render", "missing.json"]);
    assert!(matches!(result, Err(CliError::Plan(PlanError::FileNotFound(_)))));
}

#[test]
fn test_config_dir_override() {
    let site = Site::new();
    let other = tempfile::tempdir().unwrap();
    fs::write(other.path().join("page.json"), r#"{ "name": "SingleModule" }"#).unwrap();

    let other_dir = other.path().display().to_string();
    let html = site
        .run(&["--config-dir", other_dir.as_str(), "render", "page.json"])
        .unwrap();
    assert_eq!(html, "<div>SingleModule </div>\n");
}

#[test]
fn test_modules_listing() {
    let site = Site::new();
    let output = site
        .run(&["--module", "Card=/theme/card/", "modules", "--format", "json"])
        .unwrap();
    let modules: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        modules,
        serde_json::json!([
            { "name": "SingleModule", "path": "/site/modules/SingleModule/" },
            { "name": "Card", "path": "/theme/card/" }
        ])
    );

    let table = site.run(&["modules"]).unwrap();
    assert!(table.contains("SingleModule | /site/modules/SingleModule/"));
}

#[test]
fn test_settings_command_prints_toml() {
    let site = Site::new();
    let output = site.run(&["--modules-dir", "components", "settings"]).unwrap();

    assert!(output.contains("modules_dir = \"components\""));
    assert!(output.contains("name = \"SingleModule\""));
}

#[test]
fn test_missing_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("missing.toml");
    let cli = Cli::try_parse_from([
        "modplan",
        "--settings",
        settings.to_str().unwrap(),
        "modules",
    ])
    .unwrap();

    assert!(matches!(run(&cli), Err(CliError::Settings(_))));
    assert!(!Path::new(&settings).exists());
}
