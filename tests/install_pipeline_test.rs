//! End-to-end install pipeline tests over a real temporary project.

use kitbag::config::{self, ProjectConfig};
use kitbag::install::{install, InstallOptions};
use kitbag::materialize::{FileOutcome, OverwritePolicy};
use kitbag::KitbagError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_item(root: &Path, name: &str, json: &str) {
    let dir = root.join(".kitbag/registry");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.json", name)), json).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    config::save_config(temp.path(), &ProjectConfig::default()).unwrap();
    temp
}

const BUTTON: &str = r#"{
    "name": "button",
    "type": "ui",
    "files": [{
        "sourcePath": "ui/button.tsx",
        "targetPath": "@/registry/ui/button.tsx",
        "content": "import { RegistryIcon } from \"@/registry/icons\"\nimport { cn } from \"@/registry/lib/utils\"\n\nexport function Button() {\n  return (\n    <button className={cn(\"STYLE_RADIUS STYLE_FOCUS_RING\")}>\n      <RegistryIcon name=\"chevron-right\" />\n    </button>\n  )\n}\n"
    }],
    "registryDependencies": ["utils"],
    "dependencies": ["clsx@^2.1.0"]
}"#;

const UTILS: &str = r#"{
    "name": "utils",
    "type": "lib",
    "files": [{
        "sourcePath": "lib/utils.ts",
        "targetPath": "@/registry/lib/utils.ts",
        "content": "export function cn(...inputs: string[]) {\n  return inputs.filter(Boolean).join(\" \")\n}\n"
    }]
}"#;

#[test]
fn install_transforms_and_places_files() {
    let temp = project();
    write_item(temp.path(), "button", BUTTON);
    write_item(temp.path(), "utils", UTILS);

    let report = install(
        temp.path(),
        &["button".to_string()],
        &InstallOptions::default(),
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(report.items, vec!["button", "utils"]);

    let button = fs::read_to_string(temp.path().join("components/ui/button.tsx")).unwrap();
    // Style tokens resolved for the default style.
    assert!(button.contains("rounded-md"));
    assert!(!button.contains("STYLE_"));
    // Icon placeholder resolved for the default library.
    assert!(button.contains(r#"import { ChevronRight } from "lucide-react""#));
    assert!(button.contains("<ChevronRight />"));
    assert!(!button.contains("RegistryIcon"));
    // Alias paths rewritten to the consumer's aliases.
    assert!(button.contains(r#"import { cn } from "@/lib/utils""#));

    assert!(temp.path().join("lib/utils.ts").exists());
    assert_eq!(report.dependencies[0].to_string(), "clsx@^2.1.0");
}

#[test]
fn repeated_installs_are_byte_identical() {
    let temp = project();
    write_item(temp.path(), "button", BUTTON);
    write_item(temp.path(), "utils", UTILS);
    let options = InstallOptions::default();

    install(temp.path(), &["button".to_string()], &options).unwrap();
    let first = fs::read(temp.path().join("components/ui/button.tsx")).unwrap();

    let report = install(temp.path(), &["button".to_string()], &options).unwrap();
    let second = fs::read(temp.path().join("components/ui/button.tsx")).unwrap();

    assert_eq!(first, second);
    assert!(report
        .writes
        .entries
        .iter()
        .all(|e| e.outcome == FileOutcome::Unchanged));
}

#[test]
fn third_run_skips_manually_edited_file_but_reports_it() {
    let temp = project();
    write_item(temp.path(), "button", BUTTON);
    write_item(temp.path(), "utils", UTILS);
    let options = InstallOptions {
        policy: OverwritePolicy::SkipExisting,
    };

    install(temp.path(), &["button".to_string()], &options).unwrap();
    install(temp.path(), &["button".to_string()], &options).unwrap();

    let path = temp.path().join("components/ui/button.tsx");
    fs::write(&path, "// customized by the consumer\n").unwrap();

    let report = install(temp.path(), &["button".to_string()], &options).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "// customized by the consumer\n"
    );
    assert_eq!(report.writes.skipped(), vec!["@/registry/ui/button.tsx"]);
}

#[test]
fn target_collision_fails_before_any_write() {
    let temp = project();
    write_item(
        temp.path(),
        "widget-a",
        r#"{"name":"widget-a","type":"ui","files":[{
            "sourcePath":"a/widget.ts","targetPath":"components/widget.ts","content":"a"}]}"#,
    );
    write_item(
        temp.path(),
        "widget-b",
        r#"{"name":"widget-b","type":"ui","files":[{
            "sourcePath":"b/widget.ts","targetPath":"components/widget.ts","content":"b"}]}"#,
    );

    let err = install(
        temp.path(),
        &["widget-a".to_string(), "widget-b".to_string()],
        &InstallOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, KitbagError::TargetCollision { .. }));
    assert!(!temp.path().join("components/widget.ts").exists());
}

#[test]
fn cycle_fails_before_any_write() {
    let temp = project();
    write_item(
        temp.path(),
        "a",
        r#"{"name":"a","type":"ui","registryDependencies":["b"],"files":[{
            "sourcePath":"a.tsx","targetPath":"@/registry/ui/a.tsx","content":"export {}"}]}"#,
    );
    write_item(
        temp.path(),
        "b",
        r#"{"name":"b","type":"ui","registryDependencies":["c"],"files":[{
            "sourcePath":"b.tsx","targetPath":"@/registry/ui/b.tsx","content":"export {}"}]}"#,
    );
    write_item(
        temp.path(),
        "c",
        r#"{"name":"c","type":"ui","registryDependencies":["a"],"files":[{
            "sourcePath":"c.tsx","targetPath":"@/registry/ui/c.tsx","content":"export {}"}]}"#,
    );

    let err = install(temp.path(), &["a".to_string()], &InstallOptions::default()).unwrap_err();

    match err {
        KitbagError::CircularDependency { chain } => assert_eq!(chain, "a -> b -> c -> a"),
        other => panic!("expected cycle, got {:?}", other),
    }
    assert!(!temp.path().join("components").exists());
}

#[test]
fn css_vars_merge_into_config_across_installs() {
    let temp = project();
    write_item(
        temp.path(),
        "theme-base",
        r##"{"name":"theme-base","type":"theme","cssVars":{"dark":{"primary":"#000"}}}"##,
    );
    write_item(
        temp.path(),
        "theme-accent",
        r##"{"name":"theme-accent","type":"theme","cssVars":{"dark":{"accent":"#111"}}}"##,
    );
    write_item(
        temp.path(),
        "theme-accent-v2",
        r##"{"name":"theme-accent-v2","type":"theme","cssVars":{"dark":{"accent":"#222"}}}"##,
    );
    let options = InstallOptions::default();

    install(temp.path(), &["theme-base".to_string()], &options).unwrap();
    let report = install(temp.path(), &["theme-accent".to_string()], &options).unwrap();
    assert!(report.config_warnings.is_empty());

    // Sibling keys from both installs coexist.
    let config = config::load_config(temp.path()).unwrap();
    assert_eq!(config.css_vars["dark"]["primary"], "#000");
    assert_eq!(config.css_vars["dark"]["accent"], "#111");

    // A conflicting later value wins, with a warning.
    let report = install(temp.path(), &["theme-accent-v2".to_string()], &options).unwrap();
    assert_eq!(report.config_warnings.len(), 1);
    assert_eq!(report.config_warnings[0].path, "cssVars.dark.accent");

    let config = config::load_config(temp.path()).unwrap();
    assert_eq!(config.css_vars["dark"]["accent"], "#222");
}

#[test]
fn internal_dependency_files_are_materialized() {
    let temp = project();
    write_item(
        temp.path(),
        "chart",
        r#"{"name":"chart","type":"ui","registryDependencies":["chart-helpers"],"files":[{
            "sourcePath":"ui/chart.tsx","targetPath":"@/registry/ui/chart.tsx",
            "content":"import { scale } from \"@/registry/lib/chart-helpers\"\nexport const c = scale\n"}]}"#,
    );
    write_item(
        temp.path(),
        "chart-helpers",
        r#"{"name":"chart-helpers","type":"internal","files":[{
            "sourcePath":"lib/chart-helpers.ts","targetPath":"@/registry/lib/chart-helpers.ts",
            "content":"export const scale = (v: number) => v\n"}]}"#,
    );

    let report = install(
        temp.path(),
        &["chart".to_string()],
        &InstallOptions::default(),
    )
    .unwrap();

    assert!(report.is_success());
    // The internal helper's file lands so the dependent's import resolves.
    assert!(temp.path().join("lib/chart-helpers.ts").exists());
}

#[test]
fn config_file_stays_stable_json() {
    let temp = project();
    write_item(
        temp.path(),
        "theme-base",
        r##"{"name":"theme-base","type":"theme","cssVars":{"dark":{"primary":"#000"}}}"##,
    );

    install(
        temp.path(),
        &["theme-base".to_string()],
        &InstallOptions::default(),
    )
    .unwrap();

    let content = fs::read_to_string(temp.path().join("kitbag.json")).unwrap();
    assert!(content.starts_with("{\n  \"style\""));
    assert!(content.ends_with("\n"));
    // Still parseable as strict JSON.
    let _: serde_json::Value = serde_json::from_str(&content).unwrap();
}
