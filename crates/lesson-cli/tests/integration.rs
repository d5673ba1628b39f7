#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const PLAN: &str = r#"{
    "title": "Docker Basics",
    "description": "Containers from zero.",
    "steps": [
        {"title": "Setup", "section": "Intro", "content": "Install Docker.", "order": 1},
        {"title": "Run", "content": "docker run hello-world", "order": 2}
    ]
}"#;

fn lessons(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lessons").unwrap();
    cmd.current_dir(dir.path())
        .env("LESSONS_ROOT", dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_ACTOR")
        .env_remove("RUST_LOG");
    cmd
}

fn lesson_dir(dir: &TempDir, slug: &str) -> PathBuf {
    dir.path().join("src/main/resources/lessons").join(slug)
}

/// Chat-completions body whose first choice carries `content`.
fn completion(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
    .to_string()
}

fn completion_server(content: &str) -> mockito::ServerGuard {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(content))
        .create();
    server
}

// ---------------------------------------------------------------------------
// lessons create
// ---------------------------------------------------------------------------

#[test]
fn create_writes_metadata_and_numbered_steps() {
    let dir = TempDir::new().unwrap();
    let server = completion_server(PLAN);

    lessons(&dir)
        .args(["create", "--name", "docker-basics", "--topic", "Docker"])
        .args(["--api-base", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created tutorial 'docker-basics'"))
        .stdout(predicate::str::contains("01-setup.mdx"))
        .stdout(predicate::str::contains("02-run.mdx"));

    let lesson = lesson_dir(&dir, "docker-basics");
    let meta = std::fs::read_to_string(lesson.join("lesson.yml")).unwrap();
    let meta: serde_yaml::Value = serde_yaml::from_str(&meta).unwrap();
    assert_eq!(meta["title"].as_str(), Some("Docker Basics"));
    assert_eq!(meta["description"].as_str(), Some("Containers from zero."));

    let run = std::fs::read_to_string(lesson.join("02-run.mdx")).unwrap();
    assert_eq!(
        run,
        "---\ntitle: Run\nsection: General\norder: 2\n---\n\ndocker run hello-world"
    );
}

#[test]
fn create_json_reports_written_steps() {
    let dir = TempDir::new().unwrap();
    let server = completion_server(PLAN);

    let output = lessons(&dir)
        .args(["create", "--name", "docker-basics", "--topic", "Docker", "--json"])
        .args(["--api-base", &server.url()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["slug"], "docker-basics");
    assert_eq!(value["mode"], "fresh");
    assert_eq!(value["report"]["start_order"], 1);
    assert_eq!(value["report"]["steps"][1]["file_name"], "02-run.mdx");
    assert_eq!(value["report"]["steps"][1]["suggested_order"], 2);
}

#[test]
fn create_standalone_writes_dockerfile() {
    let dir = TempDir::new().unwrap();
    let server = completion_server(PLAN);

    lessons(&dir)
        .args(["create", "--name", "docker-basics", "--topic", "Docker", "--standalone"])
        .args(["--api-base", &server.url()])
        .assert()
        .success();

    let dockerfile =
        std::fs::read_to_string(lesson_dir(&dir, "docker-basics").join("Dockerfile")).unwrap();
    assert!(dockerfile.starts_with("FROM turtorial:latest\n"));
    assert!(dockerfile.contains("ENV TURTORIAL_LESSONS_DIRECTORY=classpath:/lessons/docker-basics"));
}

#[test]
fn create_grounds_on_url() {
    let dir = TempDir::new().unwrap();
    let mut server = completion_server(r#"{"title": "Volumes", "steps": []}"#);
    server
        .mock("GET", "/docs/volumes")
        .with_status(200)
        .with_body("<html><body><article><p>Volumes persist data.</p></article></body></html>")
        .create();
    let url = format!("{}/docs/volumes", server.url());

    lessons(&dir)
        .args(["create", "--name", "volumes", "--url", &url])
        .args(["--api-base", &server.url()])
        .assert()
        .success();

    assert!(lesson_dir(&dir, "volumes").join("lesson.yml").exists());
}

#[test]
fn create_requires_topic_or_url() {
    let dir = TempDir::new().unwrap();
    lessons(&dir)
        .args(["create", "--name", "empty"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("either --topic or --url"));
}

#[test]
fn create_without_api_key_fails() {
    let dir = TempDir::new().unwrap();
    lessons(&dir)
        .env_remove("OPENAI_API_KEY")
        .args(["create", "--name", "docker-basics", "--topic", "Docker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API key"));
}

#[test]
fn malformed_completion_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let server = completion_server("Sorry, I can only answer in prose.");

    lessons(&dir)
        .args(["create", "--name", "docker-basics", "--topic", "Docker"])
        .args(["--api-base", &server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not decode lesson plan"));

    assert!(!lesson_dir(&dir, "docker-basics").exists());
}

#[test]
fn provider_error_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
        .create();

    lessons(&dir)
        .args(["create", "--name", "docker-basics", "--topic", "Docker"])
        .args(["--api-base", &server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect API key provided"));
}

// ---------------------------------------------------------------------------
// lessons add
// ---------------------------------------------------------------------------

#[test]
fn add_continues_after_existing_steps() {
    let dir = TempDir::new().unwrap();
    let lesson = lesson_dir(&dir, "foo");
    std::fs::create_dir_all(&lesson).unwrap();
    std::fs::write(lesson.join("lesson.yml"), "title: Foo\ndescription: ''\n").unwrap();
    std::fs::write(lesson.join("01-intro.mdx"), "intro").unwrap();
    let server = completion_server(PLAN);

    lessons(&dir)
        .args(["add", "--tutorial", "foo", "--topic", "Docker", "--objectives", "Run it"])
        .args(["--api-base", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 steps to tutorial 'foo'"));

    assert!(lesson.join("02-setup.mdx").exists());
    assert!(lesson.join("03-run.mdx").exists());
    assert_eq!(std::fs::read_to_string(lesson.join("01-intro.mdx")).unwrap(), "intro");
    assert_eq!(
        std::fs::read_to_string(lesson.join("lesson.yml")).unwrap(),
        "title: Foo\ndescription: ''\n"
    );
}

#[test]
fn add_to_missing_tutorial_fails() {
    let dir = TempDir::new().unwrap();
    lessons(&dir)
        .args(["add", "--tutorial", "ghost", "--topic", "Docker", "--objectives", "x"])
        .args(["--api-base", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lesson directory not found"));
}

// ---------------------------------------------------------------------------
// lessons scaffold / update
// ---------------------------------------------------------------------------

#[test]
fn scaffold_writes_environment_dockerfile() {
    let dir = TempDir::new().unwrap();
    let server = completion_server("```dockerfile\nFROM turtorial:latest\nRUN apt-get install -y jq\n```");

    lessons(&dir)
        .args(["scaffold", "--name", "json-tools", "--description", "needs jq"])
        .args(["--api-base", &server.url()])
        .assert()
        .success();

    let dockerfile =
        std::fs::read_to_string(dir.path().join("turtorial-json-tools.Dockerfile")).unwrap();
    assert_eq!(dockerfile, "FROM turtorial:latest\nRUN apt-get install -y jq");
    let meta = std::fs::read_to_string(lesson_dir(&dir, "json-tools").join("lesson.yml")).unwrap();
    assert!(meta.contains("title: Json Tools"));
}

#[test]
fn update_rewrites_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("step.mdx");
    std::fs::write(&file, "old").unwrap();
    let server = completion_server("new content");

    lessons(&dir)
        .args(["update", "--file"])
        .arg(&file)
        .args(["--instruction", "modernize", "--api-base", &server.url()])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&file).unwrap(), "new content");
}

#[test]
fn update_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    lessons(&dir)
        .args(["update", "--file", "nope.mdx", "--instruction", "x"])
        .args(["--api-base", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

// ---------------------------------------------------------------------------
// lessons next-version
// ---------------------------------------------------------------------------

#[test]
fn next_version_without_credentials_starts_at_zero() {
    let dir = TempDir::new().unwrap();
    lessons(&dir)
        .args(["next-version", "minor"])
        .assert()
        .success()
        .stdout("0.1.0\n");
}

#[test]
fn next_version_reads_published_release() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/maven-metadata.xml")
        .with_status(200)
        .with_body("<metadata><versioning><release>2.4.9</release></versioning></metadata>")
        .create();
    std::fs::write(
        dir.path().join("lessons.yaml"),
        format!("release:\n  metadata_url: {}/maven-metadata.xml\n", server.url()),
    )
    .unwrap();

    lessons(&dir)
        .env("GITHUB_ACTOR", "octocat")
        .env("GITHUB_TOKEN", "t0ken")
        .args(["next-version", "PATCH"])
        .assert()
        .success()
        .stdout("2.4.10\n");
}

#[test]
fn next_version_rejected_credentials_fail() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server.mock("GET", "/maven-metadata.xml").with_status(403).create();
    std::fs::write(
        dir.path().join("lessons.yaml"),
        format!("release:\n  metadata_url: {}/maven-metadata.xml\n", server.url()),
    )
    .unwrap();

    lessons(&dir)
        .env("GITHUB_ACTOR", "octocat")
        .env("GITHUB_TOKEN", "bad")
        .arg("next-version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 403"));
}

// ---------------------------------------------------------------------------
// lessons config
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_validate() {
    let dir = TempDir::new().unwrap();
    lessons(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("lessons.yaml").exists());

    lessons(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    lessons(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_flags_empty_model() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("lessons.yaml"), "model: ''\n").unwrap();
    lessons(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] model is empty"));
}

#[test]
fn config_show_json_reflects_overrides() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("lessons.yaml"), "model: gpt-4o-mini\non_collision: suffix\n").unwrap();
    let output = lessons(&dir).args(["config", "show", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["model"], "gpt-4o-mini");
    assert_eq!(value["on_collision"], "suffix");
    assert_eq!(value["fetch"]["max_chars"], 10000);
}
