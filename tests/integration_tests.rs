use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn readme_survey() -> Command {
    let mut cmd = Command::cargo_bin("readme-survey").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn corpus_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/corpus")
}

fn read_report(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("report exists")
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    readme_survey()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("README"));
}

#[test]
fn test_no_arguments_prints_usage() {
    readme_survey()
        .assert()
        .code(2)
        .stderr(predicate::str::diff(
            "Usage: readme-survey <CORPUS> <REPORTS>\n",
        ));
}

#[test]
fn test_wrong_argument_count_does_no_work() {
    let temp = TempDir::new().unwrap();
    let reports = temp.path().join("reports");

    readme_survey()
        .args([corpus_dir(), reports.to_str().unwrap(), "extra"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage: readme-survey"));

    assert!(!reports.exists());
}

#[test]
fn test_missing_manifest_fails() {
    let temp = TempDir::new().unwrap();
    readme_survey()
        .current_dir(temp.path())
        .args([temp.path().to_str().unwrap(), "reports"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repositories.json"));
}

// ---------------------------------------------------------------------------
// Fixture corpus
// ---------------------------------------------------------------------------

#[test]
fn test_writes_every_report() {
    let temp = TempDir::new().unwrap();
    let reports = temp.path().join("reports");

    readme_survey()
        .current_dir(temp.path())
        .args(["--no-progress", corpus_dir(), reports.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 repositories"));

    for name in [
        "disallowed-image-hosts.csv",
        "html-elements.csv",
        "code-fences.csv",
        "tables.csv",
        "html.csv",
        "strikethrough.csv",
        "special-links.csv",
    ] {
        assert!(reports.join(name).is_file(), "{name} missing");
    }
}

#[test]
fn test_report_contents() {
    let temp = TempDir::new().unwrap();
    let reports = temp.path().join("reports");

    readme_survey()
        .current_dir(temp.path())
        .args(["--no-progress", corpus_dir(), reports.to_str().unwrap()])
        .assert()
        .success();

    let runtime = "[dotnet/runtime](https://github.com/dotnet/runtime),\
                   [README](https://github.com/dotnet/runtime#readme),14000";
    let closedxml = "[ClosedXML/ClosedXML](https://github.com/ClosedXML/ClosedXML),\
                     [README](https://github.com/ClosedXML/ClosedXML#readme),4500";

    assert_eq!(
        read_report(&reports, "disallowed-image-hosts.csv"),
        format!(
            "host,repository,readme,stars\n\
             cdn.example.com,{runtime}\n\
             cdn.example.com,{closedxml}\n"
        )
    );

    assert_eq!(
        read_report(&reports, "html-elements.csv"),
        format!(
            "element,repository,readme,stars\n\
             p,{runtime}\n\
             img,{runtime}\n\
             !--,{closedxml}\n\
             details,{closedxml}\n\
             summary,{closedxml}\n"
        )
    );

    assert_eq!(
        read_report(&reports, "code-fences.csv"),
        format!(
            "repository,readme,stars,fence,csharp\n\
             {runtime},csharp,true\n\
             {runtime},bash,false\n\
             {closedxml},c#,true\n"
        )
    );

    assert_eq!(
        read_report(&reports, "tables.csv"),
        format!("repository,readme,stars\n{runtime}\n")
    );
    assert_eq!(
        read_report(&reports, "html.csv"),
        format!("repository,readme,stars\n{runtime}\n{closedxml}\n")
    );
    assert_eq!(
        read_report(&reports, "strikethrough.csv"),
        format!("repository,readme,stars\n{closedxml}\n")
    );

    let special = read_report(&reports, "special-links.csv");
    assert_eq!(
        special,
        format!(
            "repository,readme,stars,scheme,link\n\
             {closedxml},mailto,mailto:[redacted]\n"
        )
    );
    assert!(!special.contains("maintainers"));
}

#[test]
fn test_misses_are_reported_not_fatal() {
    let temp = TempDir::new().unwrap();
    let reports = temp.path().join("reports");

    let output = readme_survey()
        .current_dir(temp.path())
        .args([
            "--no-progress",
            "-f",
            "json",
            corpus_dir(),
            reports.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("ghost/absent"))
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(summary["repositories"], 4);
    assert_eq!(summary["documents_analyzed"], 2);
    assert_eq!(summary["misses"][0]["repository"], "ghost/absent");
    assert_eq!(summary["misses"][0]["reason"], "confirmed_absent");
    assert_eq!(summary["misses"][1]["repository"], "ghost/unfetched");
    assert_eq!(summary["misses"][1]["reason"], "not_fetched");

    for name in ["tables.csv", "html.csv", "special-links.csv"] {
        assert!(!read_report(&reports, name).contains("ghost"));
    }
}

#[test]
fn test_runs_are_deterministic() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");

    for (dir, jobs) in [(&first, "1"), (&second, "4")] {
        readme_survey()
            .current_dir(temp.path())
            .args(["--no-progress", "-j", jobs, corpus_dir(), dir.to_str().unwrap()])
            .assert()
            .success();
    }

    for entry in std::fs::read_dir(&first).unwrap() {
        let name = entry.unwrap().file_name();
        assert_eq!(
            std::fs::read(first.join(&name)).unwrap(),
            std::fs::read(second.join(&name)).unwrap(),
            "{name:?} differs between runs"
        );
    }
}

#[test]
fn test_config_file_overrides_policy() {
    let temp = TempDir::new().unwrap();
    let reports = temp.path().join("reports");
    let config = temp.path().join("policy.toml");
    std::fs::write(
        &config,
        "[policy]\ntrusted_image_hosts = [\"cdn.example.com\", \"img.shields.io\"]\n",
    )
    .unwrap();

    readme_survey()
        .current_dir(temp.path())
        .args([
            "--no-progress",
            "-c",
            config.to_str().unwrap(),
            corpus_dir(),
            reports.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        read_report(&reports, "disallowed-image-hosts.csv"),
        "host,repository,readme,stars\n"
    );
}

#[test]
fn test_markdown_summary() {
    let temp = TempDir::new().unwrap();
    readme_survey()
        .current_dir(temp.path())
        .args([
            "--no-progress",
            "-f",
            "markdown",
            corpus_dir(),
            temp.path().join("out").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("| strikethrough.csv | 1 |"));
}
