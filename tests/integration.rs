use doxymdx::{DiagnosticKind, Options, PageFormat};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doxymdx")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read(dir: &Path, relative: &str) -> String {
    std::fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("cannot read {relative}: {e}"))
}

fn convert(out: &Path) {
    cmd()
        .args(["-i", &fixture_path("basic"), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("pages written"));
}

// -- command line --

#[test]
fn class_page_lists_public_functions() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let page = read(&out, "classes/a/b.mdx");
    assert!(page.starts_with("---\nslug: \"/api/classes/a/b\"\ntitle: \"The A::B Class Reference\"\n"));
    assert!(page.contains("description: \"The B class.\""));
    assert!(page.contains("{/* DO NOT EDIT! Automatically generated from the Doxygen XML files. */}"));
    assert!(page.contains("## Public Member Functions\n\n- int [**f**](#f)(int x)<br/>Compute f."));
    assert!(page.contains("### f() {#f}"));
    assert!(page.contains("Uses [A::g](/api/namespaces/a#g) internally."));
    assert!(page.contains("`f()`"));
    assert!(page.contains("&#123;details&#125;"));
}

#[test]
fn class_page_matches_expected() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let output = read(&out, "classes/a/b.mdx");
    let expected = std::fs::read_to_string(fixture_path("class-a-b.expected.mdx")).unwrap();
    pretty_assertions::assert_eq!(output, expected);
}

#[test]
fn notes_become_admonitions() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let page = read(&out, "classes/a/b.mdx");
    let note = page.find(":::info").expect("note admonition");
    let text = page.find("Thread safe.").unwrap();
    assert!(note < text);
    assert!(page[text..].contains(":::"));
    assert!(page.contains("**Returns**"));
    assert!(page.contains("**Parameters**"));
}

#[test]
fn anonymous_namespaces_get_distinct_pages() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    assert!(out.join("namespaces/anonymous-namespace-1.mdx").exists());
    assert!(out.join("namespaces/anonymous-namespace-2.mdx").exists());
    assert!(!out.join("namespaces/anonymous-namespace.mdx").exists());
}

#[test]
fn brief_refs_link_to_the_class_page() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let page = read(&out, "namespaces/a.mdx");
    assert!(page.contains("Home of [A::B](/api/classes/a/b)."));
    assert!(page.contains("- class [A::B](/api/classes/a/b)"));
}

#[test]
fn file_listing_links_its_tokens() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let page = read(&out, "files/include/b-h.mdx");
    assert!(page.contains("## File Listing"));
    assert!(page.contains(r#"<a href="/api/classes/a/b">B</a>"#));
    assert!(page.contains("<pre><code>&#35;pragma once<br/>"));

    let folder = read(&out, "folders/include.mdx");
    assert!(folder.contains("- [b.h](/api/files/include/b-h)"));
}

#[test]
fn main_index_uses_project_details() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let index = read(&out, "index.mdx");
    assert!(index.contains("slug: \"/api\"\ntitle: \"Basic Lib\""));
    assert!(index.contains("A tiny test library"));
    assert!(index.contains("Version 1.2.3."));
    assert!(index.contains("Start with [A::B](/api/classes/a/b)."));
    assert!(index.contains("- [Classes](/api/classes)"));
    assert!(out.join("classes/index.mdx").exists());
    assert!(!out.join("groups/index.mdx").exists());
}

#[test]
fn sidebar_nests_classes_under_namespaces() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    convert(&out);

    let sidebar: serde_json::Value =
        serde_json::from_str(&read(&out, "sidebar-category.json")).unwrap();
    assert_eq!(sidebar["label"], "API Reference");
    assert_eq!(sidebar["link"]["id"], "api/index");

    let categories = sidebar["items"].as_array().unwrap();
    let labels: Vec<&str> = categories
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Namespaces", "Classes", "Files"]);

    let classes = &categories[1]["items"];
    assert_eq!(classes[0]["label"], "A");
    assert_eq!(classes[0]["items"][0]["type"], "doc");
    assert_eq!(classes[0]["items"][0]["label"], "B");
    assert_eq!(classes[0]["items"][0]["id"], "api/classes/a/b");
}

#[test]
fn markdown_format() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");

    cmd()
        .args(["-i", &fixture_path("basic"), "-o", out.to_str().unwrap(), "-f", "md"])
        .assert()
        .success();

    let page = read(&out, "classes/a/b.md");
    assert!(page.contains("<!-- DO NOT EDIT!"));
    assert!(page.contains("{details}"));
    assert!(!out.join("classes/a/b.mdx").exists());
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("basic"), "-o", dir.path().to_str().unwrap(), "-f", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-i", &fixture_path("nope"), "-o", dir.path().join("api").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read the Doxygen index"));
}

#[test]
fn output_is_recreated_unless_kept() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("stale.mdx"), "old").unwrap();

    cmd()
        .args(["-i", &fixture_path("basic"), "-o", out.to_str().unwrap(), "--keep-output"])
        .assert()
        .success();
    assert!(out.join("stale.mdx").exists());

    convert(&out);
    assert!(!out.join("stale.mdx").exists());
}

#[test]
fn config_file_sets_folder_and_label() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reference");
    let config = dir.path().join("doxymdx.json");
    std::fs::write(
        &config,
        r#"{"apiFolder": "reference", "sidebarLabel": "C++ Reference", "keywords": ["basic"]}"#,
    )
    .unwrap();

    cmd()
        .args(["-c", config.to_str().unwrap()])
        .args(["-i", &fixture_path("basic"), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let page = read(&out, "classes/a/b.mdx");
    assert!(page.contains("slug: \"/reference/classes/a/b\""));
    assert!(page.contains("  - \"basic\"\n"));
    assert!(read(&out, "sidebar-category.json").contains("\"C++ Reference\""));
}

// -- library --

#[tokio::test]
async fn run_reports_degraded_input() {
    let dir = TempDir::new().unwrap();
    let options = Options {
        input_folder: PathBuf::from(fixture_path("basic")),
        output_folder: dir.path().join("api"),
        format: PageFormat::Mdx,
        ..Options::default()
    };

    let summary = doxymdx::run(&options).await.unwrap();
    // Six compound pages (the main page becomes `index`) plus the index,
    // namespace, class and file collections.
    assert_eq!(summary.pages_written, 10);
    assert_eq!(summary.count(DiagnosticKind::UnsupportedConstruct), 1);
    assert_eq!(summary.count(DiagnosticKind::PermalinkCollision), 1);
    assert_eq!(summary.count(DiagnosticKind::UnresolvedLink), 0);
    assert_eq!(summary.count(DiagnosticKind::MissingInput), 0);
}
