#![allow(dead_code)]

use git2::{Repository, RepositoryInitOptions};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A working tree on `main` plus, optionally, a bare `origin` it pushes to.
pub struct Fixture {
    pub work: TempDir,
    pub remote: Option<TempDir>,
    pub home: TempDir,
}

impl Fixture {
    pub fn with_remote() -> Self {
        let fixture = Self::without_remote();
        let remote = TempDir::new().expect("Could not create remote dir");
        Repository::init_bare(remote.path()).expect("Could not init bare remote");
        fixture
            .repo()
            .remote("origin", remote.path().to_str().unwrap())
            .expect("Could not add origin");
        Fixture {
            remote: Some(remote),
            ..fixture
        }
    }

    pub fn without_remote() -> Self {
        let work = TempDir::new().expect("Could not create temp dir");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        let repo = Repository::init_opts(work.path(), &options).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        Fixture {
            work,
            remote: None,
            home: TempDir::new().expect("Could not create home dir"),
        }
    }

    pub fn repo(&self) -> Repository {
        Repository::open(self.work.path()).expect("Could not open work repo")
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.work.path().join(name), content).expect("Could not write file");
    }

    pub fn head_message(&self) -> String {
        let repo = self.repo();
        let commit = repo.head().unwrap().peel_to_commit().unwrap();
        commit.message().unwrap().to_string()
    }

    pub fn remote_main(&self) -> Option<git2::Oid> {
        let remote = Repository::open_bare(self.remote.as_ref()?.path()).unwrap();
        remote.refname_to_id("refs/heads/main").ok()
    }

    pub fn run(&self, args: &[&str], stdin: &str) -> Output {
        run_in(self.work.path(), self.home.path(), args, stdin)
    }
}

/// Run the binary in `dir` with an isolated home/config directory.
pub fn run_in(dir: &Path, home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_deploy-push"))
        .args(args)
        .current_dir(dir)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute deploy-push");

    // The binary may exit before reading stdin, so a broken pipe is fine
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().expect("Failed to wait for deploy-push")
}

/// Check `message` is `<label> - YYYY-MM-DD HH:mm`.
pub fn assert_default_message(message: &str, label: &str) {
    let message = message.trim_end_matches('\n');
    let prefix = format!("{} - ", label);
    let timestamp = message
        .strip_prefix(&prefix)
        .unwrap_or_else(|| panic!("'{}' does not start with '{}'", message, prefix));
    assert_eq!(timestamp.len(), 16, "timestamp '{}'", timestamp);
    assert!(
        chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M").is_ok(),
        "timestamp '{}' is not YYYY-MM-DD HH:mm",
        timestamp
    );
}
