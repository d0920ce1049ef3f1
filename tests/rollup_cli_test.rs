use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const METADATA: &str = r##"{
    "Música": { "tags": ["rock", "pop"], "emoji": "🎵", "color": "#e15759" },
    "Gaming": { "tags": ["speedrun"], "emoji": "🎮", "color": "#4e79a7" }
}"##;

const AMBIGUOUS_METADATA: &str = r##"{
    "Música": { "tags": ["rock"], "emoji": "🎵", "color": "#e15759" },
    "Cine": { "tags": ["Rock", "trailer"], "emoji": "🎬", "color": "#59a14f" }
}"##;

const INPUT: &str = r#"[
  {
    "fecha": "Hoy",
    "videos": [
      {"titulo": "Song A", "thumbnail": "https://img/a.jpg", "videoUrl": "https://watch/a",
       "canal": "Band", "duracion": "03:00", "tag": "rock"},
      {"titulo": "Speed run", "thumbnail": "https://img/s.jpg", "videoUrl": "https://watch/s",
       "canal": "Gamer", "duracion": "10:00"},
      {"titulo": "Random", "thumbnail": null, "videoUrl": null,
       "canal": null, "duracion": "1:00"}
    ]
  },
  {
    "fecha": "ayer",
    "videos": [
      {"titulo": "Short", "thumbnail": "https://img/sh.jpg", "videoUrl": "https://watch/sh",
       "canal": "Band", "duracion": "SHORTS", "tag": "pop"}
    ]
  },
  {
    "fecha": "hace 3 semanas",
    "videos": [
      {"titulo": "Lost", "thumbnail": null, "videoUrl": null, "canal": null, "duracion": "04:00"}
    ]
  },
  {
    "fecha": "2 may",
    "videos": [
      {"titulo": "Old", "thumbnail": "https://img/o.jpg", "videoUrl": null,
       "canal": null, "duracion": "garbage", "tag": "rock"}
    ]
  }
]"#;

struct Fixture {
    _tmp: tempfile::TempDir,
    root: std::path::PathBuf,
}

impl Fixture {
    fn new(metadata: &str) -> Self {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path().to_path_buf();
        let home = root.join("rollup");
        fs::create_dir_all(&home).expect("mkdir rollup home");
        fs::write(home.join("videos-scrap.json"), INPUT).expect("write input");
        fs::write(home.join("categories.json"), metadata).expect("write metadata");
        fs::write(home.join("tags.json"), "{\"Speed run\": \"speedrun\"}\n")
            .expect("write tag store");
        Self { _tmp: tmp, root }
    }

    fn home(&self) -> std::path::PathBuf {
        self.root.join("rollup")
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("watch-rollup");
        cmd.current_dir(&self.root)
            .env("HOME", &self.root)
            .env("ROLLUP_HOME", self.home())
            .env("ROLLUP_CONFIG_PATH", self.root.join("absent.toml"))
            .env_remove("ROLLUP_REFERENCE_DATE")
            .env_remove("ROLLUP_REJECT_AMBIGUOUS_TAGS")
            .env_remove("ROLLUP_INPUT")
            .env_remove("ROLLUP_METADATA")
            .env_remove("ROLLUP_TAG_STORE")
            .env_remove("ROLLUP_OUTPUT");
        cmd
    }
}

fn read_tree(path: &Path) -> Value {
    let raw = fs::read_to_string(path).expect("read tree");
    serde_json::from_str(&raw).expect("parse tree")
}

fn leaf_sum(node: &Value) -> u64 {
    match node.get("children").and_then(Value::as_array) {
        Some(children) => children.iter().map(leaf_sum).sum(),
        None => node.get("value").and_then(Value::as_u64).unwrap_or(0),
    }
}

#[test]
fn rollup_writes_week_day_category_tree() {
    let fx = Fixture::new(METADATA);
    let out = fx.root.join("out/treemap.json");

    fx.cmd()
        .args(["rollup", "--today", "2024-05-15", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("dropped_entries=1"))
        .stdout(contains("tags_applied=1"))
        .stdout(contains("leaves=5"))
        .stdout(contains("W001_DATE_UNRESOLVED"))
        .stdout(contains("W002_DURATION_MALFORMED"))
        .stdout(contains("tree_sha256="));

    let tree = read_tree(&out);
    assert_eq!(tree["name"], "root");
    let weeks = tree["children"].as_array().expect("weeks");
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0]["name"], "13 may - 19 may 2024");
    assert!(weeks[0].get("value").is_none());
    assert_eq!(leaf_sum(&weeks[0]), 180 + 600 + 60 + 30);
    assert_eq!(weeks[1]["name"], "29 abr - 5 may 2024");

    let today = &weeks[0]["children"][0];
    assert_eq!(today["name"], "miércoles 15 may");
    assert_eq!(today["thumbnail"], "https://img/s.jpg");
    let groups: Vec<&str> = today["children"]
        .as_array()
        .expect("groups")
        .iter()
        .filter_map(|g| g["name"].as_str())
        .collect();
    assert_eq!(groups, vec!["🎵 Música", "🎮 Gaming", "Otros"]);
    assert_eq!(today["children"][0]["metatag"], "#e15759");
    assert_eq!(today["children"][2]["metatag"], "#ddd");
    assert_eq!(today["children"][1]["children"][0]["value"], 600);
}

#[test]
fn partial_config_file_sets_root_label_and_reference_date() {
    let fx = Fixture::new(METADATA);
    let config = fx.root.join("rollup.toml");
    fs::write(
        &config,
        "[output]\nroot_label = \"historial\"\n\n[clock]\nreference_date = \"2024-05-15\"\n",
    )
    .expect("write config");

    fx.cmd()
        .env("ROLLUP_CONFIG_PATH", &config)
        .arg("rollup")
        .assert()
        .success()
        .stdout(contains("reference_date=2024-05-15"));

    let tree = read_tree(&fx.home().join("treemap.json"));
    assert_eq!(tree["name"], "historial");
    assert_eq!(tree["children"][0]["children"][0]["name"], "miércoles 15 may");
    assert_eq!(tree["children"][0]["children"][0]["children"][2]["metatag"], "#ddd");
}

#[test]
fn rollup_output_is_byte_for_byte_reproducible() {
    let fx = Fixture::new(METADATA);
    let first = fx.root.join("first.json");
    let second = fx.root.join("second.json");

    for out in [&first, &second] {
        fx.cmd()
            .args(["rollup", "--today", "2024-05-15", "--output"])
            .arg(out)
            .assert()
            .success();
    }

    assert_eq!(
        fs::read(&first).expect("read first"),
        fs::read(&second).expect("read second")
    );
}

#[test]
fn verify_flags_tags_listed_under_two_categories() {
    let fx = Fixture::new(AMBIGUOUS_METADATA);

    fx.cmd()
        .args(["verify", "--today", "2024-05-15"])
        .assert()
        .failure()
        .stdout(contains("tag `rock` listed under Música, Cine"))
        .stdout(contains("unresolvable date label `hace 3 semanas`"));
}

#[test]
fn strict_config_refuses_ambiguous_metadata() {
    let fx = Fixture::new(AMBIGUOUS_METADATA);

    fx.cmd()
        .env("ROLLUP_REJECT_AMBIGUOUS_TAGS", "true")
        .args(["rollup", "--today", "2024-05-15"])
        .assert()
        .failure()
        .stderr(contains("tags listed under several categories: rock"));
    assert!(!fx.home().join("treemap.json").exists());
}

#[test]
fn pending_tags_lists_titles_without_tags() {
    let fx = Fixture::new(METADATA);

    fx.cmd()
        .arg("pending-tags")
        .assert()
        .success()
        .stdout(contains("tags_applied=1"))
        .stdout(contains("untagged: Random"))
        .stdout(contains("untagged: Lost"))
        .stdout(contains("untagged: Speed run").not());
}

#[test]
fn json_report_is_machine_readable() {
    let fx = Fixture::new(METADATA);

    let output = fx
        .cmd()
        .args(["--json", "rollup", "--today", "2024-05-15"])
        .output()
        .expect("run rollup");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["command"], "rollup");
    assert_eq!(report["ok"], true);
    assert!(fx.home().join("treemap.json").exists());
}
