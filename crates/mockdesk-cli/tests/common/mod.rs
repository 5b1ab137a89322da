#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;
use tempfile::TempDir;
use url::Url;

/// An isolated environment: a `file://` API root and a data directory.
pub struct Sandbox {
    _temp: TempDir,
    pub api: PathBuf,
    pub home: PathBuf,
    pub data: PathBuf,
}

impl Sandbox {
    /// A sandbox with 12 posts, 3 users and one known credential pair.
    pub fn seeded() -> Self {
        let temp = TempDir::new().unwrap();
        let api = temp.path().join("api");
        let home = temp.path().join("home");
        let data = temp.path().join("data");
        std::fs::create_dir_all(&api).unwrap();
        std::fs::create_dir_all(&home).unwrap();

        let posts: Vec<_> = (1..=12)
            .map(|i| json!({"userId": 1, "id": i, "title": format!("post {}", i), "body": "text"}))
            .collect();
        write_json(&api.join("posts.json"), &json!(posts));

        write_json(
            &api.join("users.json"),
            &json!([
                {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz", "company": {"name": "Romaguera-Crona"}},
                {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv", "company": {"name": "Deckow-Crist"}},
                {"id": 3, "name": "Clementine Bauch", "username": "Samantha", "email": "Nathan@yesenia.net", "company": {"name": "Romaguera-Jacobson"}}
            ]),
        );

        write_json(
            &api.join("credentials.json"),
            &json!([{"username": "emilys", "password": "emilyspass"}]),
        );

        Self {
            _temp: temp,
            api,
            home,
            data,
        }
    }

    /// Replace the users collection with `count` generated users.
    pub fn seed_users(&self, count: u64) {
        let users: Vec<_> = (1..=count)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("User Number{}", i),
                    "username": format!("user{}", i),
                    "email": format!("user{}@example.com", i),
                    "company": {"name": format!("Company {}", i)}
                })
            })
            .collect();
        write_json(&self.api.join("users.json"), &json!(users));
    }

    /// Identifier and name of every user in the API file.
    pub fn stored_users(&self) -> Vec<(u64, String)> {
        let content = std::fs::read_to_string(self.api.join("users.json")).unwrap();
        let users: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        users
            .iter()
            .map(|u| {
                (
                    u["id"].as_u64().unwrap(),
                    u["name"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    pub fn api_url(&self) -> String {
        Url::from_directory_path(&self.api)
            .expect("Failed to convert path to file URL")
            .to_string()
    }

    /// Run the CLI against this sandbox.
    pub fn run(&self, args: &[&str]) -> Output {
        let api_url = self.api_url();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mockdesk"));
        cmd.args(args);
        cmd.env("HOME", &self.home);
        cmd.env("XDG_CONFIG_HOME", self.home.join("config"));
        cmd.env("XDG_DATA_HOME", self.home.join("share"));
        cmd.env("MOCKDESK_API_URL", &api_url);
        cmd.env("MOCKDESK_AUTH_URL", &api_url);
        cmd.env("MOCKDESK_DATA_DIR", &self.data);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd.output().expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success; returns stdout.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure; returns stderr.
    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "CLI command unexpectedly succeeded: {:?}\nstdout: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn login(&self) {
        self.run_success(&[
            "auth",
            "login",
            "--username",
            "emilys",
            "--password",
            "emilyspass",
        ]);
    }
}

fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
