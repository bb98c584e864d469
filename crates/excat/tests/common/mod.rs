//! Shared helpers for excat end-to-end tests.
//!
//! Every command runs inside its own temp directory with `XDG_CONFIG_HOME`
//! pointed at an empty folder, so a developer's own `excat.toml` never
//! leaks into a test.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct Workspace {
    pub tmp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("temp dir"),
        }
    }

    /// Workspace holding the `shop` crate.
    pub fn with_shop() -> Self {
        let ws = Self::new();
        ws.write(
            "shop/Cargo.toml",
            "[package]\nname = \"shop\"\nversion = \"0.1.0\"\n",
        );
        ws.write(
            "shop/src/lib.rs",
            r#"pub fn open() {}

pub struct Cart;

impl Cart {
    pub fn checkout(&self) {}
    pub fn pay(&self) {}
    fn audit(&self) {}
}
"#,
        );
        ws
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.tmp.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write fixture");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.join(rel)).expect("read file")
    }

    /// `excat` with the workspace as working directory.
    pub fn excat(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_excat"));
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.join(".user-config"))
            .env_remove("RUST_LOG")
            .env_remove("EXCAT_CATALOG");
        cmd
    }
}
