// tests/create_dmg.rs
//
// Runs the create-dmg binary against shell-script stand-ins for rsync,
// genisoimage and dmg placed first on PATH. The fake genisoimage writes a
// sorted listing of the staged tree into the image and the fake dmg copies
// it to the output, so the produced .dmg shows exactly what was staged.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_RSYNC: &str = r#"#!/bin/sh
echo "rsync $*" >> "$FAKE_TOOL_LOG"
n=$#
eval "src=\${$((n-1))}"
eval "dst=\${$n}"
mkdir -p "$dst"
cp -a "$src". "$dst"
"#;

const FAKE_GENISOIMAGE: &str = r#"#!/bin/sh
echo "genisoimage $*" >> "$FAKE_TOOL_LOG"
if [ -n "$FAKE_FAIL_ISO" ]; then
  echo "genisoimage: simulated failure" >&2
  exit 3
fi
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
eval "dir=\${$#}"
(cd "$dir" && find . | sort) > "$out"
"#;

const FAKE_DMG: &str = r#"#!/bin/sh
echo "dmg $*" >> "$FAKE_TOOL_LOG"
cp "$2" "$3"
"#;

/// Scratch area with fake tools, a source folder and an isolated TMPDIR.
struct Fixture {
    root: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let fixture = Fixture { root };
        fs::create_dir_all(fixture.bin_dir()).unwrap();
        fs::create_dir_all(fixture.tmp_dir()).unwrap();
        fs::create_dir_all(fixture.out_dir()).unwrap();
        fs::create_dir_all(fixture.source().join("MyApp.app/Contents")).unwrap();
        fs::write(fixture.source().join("MyApp.app/Contents/Info.plist"), "<plist/>").unwrap();
        fixture.tool("rsync", FAKE_RSYNC);
        fixture.tool("genisoimage", FAKE_GENISOIMAGE);
        fixture.tool("dmg", FAKE_DMG);
        fixture
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    fn tmp_dir(&self) -> PathBuf {
        self.path().join("tmp")
    }

    fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    fn source(&self) -> PathBuf {
        self.path().join("source")
    }

    fn log_path(&self) -> PathBuf {
        self.path().join("tools.log")
    }

    fn tool(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = self.bin_dir().join(name);
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    fn command(&self) -> Command {
        let original_path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = Command::cargo_bin("create-dmg").unwrap();
        cmd.current_dir(self.out_dir())
            .env("PATH", format!("{}:{}", self.bin_dir().display(), original_path))
            .env("TMPDIR", self.tmp_dir())
            .env("FAKE_TOOL_LOG", self.log_path())
            .env_remove("FAKE_FAIL_ISO")
            .env_remove("RUST_LOG");
        cmd
    }

    fn tool_log(&self) -> String {
        fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    fn out_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.out_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn tmp_is_empty(&self) -> bool {
        fs::read_dir(self.tmp_dir()).unwrap().next().is_none()
    }
}

#[test]
fn help_exits_zero_without_touching_filesystem() {
    let fx = Fixture::new();
    fx.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--add-file"));
    assert!(fx.out_entries().is_empty());
    assert!(fx.tool_log().is_empty());
}

#[test]
fn version_flags_exit_zero() {
    let fx = Fixture::new();
    fx.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-dmg"));
    fx.command()
        .arg("--pure-version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("create-dmg").not());
    assert!(fx.out_entries().is_empty());
}

#[test]
fn output_without_dmg_extension_fails() {
    let fx = Fixture::new();
    fx.command()
        .args(["App.iso", fx.source().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".dmg extension"));
    assert!(fx.out_entries().is_empty());
    assert!(fx.tool_log().is_empty());
}

#[test]
fn missing_source_argument_fails() {
    let fx = Fixture::new();
    fx.command()
        .arg("App.dmg")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not enough arguments"));
    assert!(fx.out_entries().is_empty());
}

#[test]
fn unknown_flag_fails_with_one() {
    let fx = Fixture::new();
    fx.command()
        .args(["--frobnicate", "App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .code(1);
    assert!(fx.out_entries().is_empty());
}

#[test]
fn nonexistent_source_folder_fails() {
    let fx = Fixture::new();
    fx.command()
        .args(["App.dmg", fx.path().join("nope").to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source folder"));
    assert!(fx.out_entries().is_empty());
}

#[test]
fn builds_image_and_cleans_up() {
    let fx = Fixture::new();
    fx.command()
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disk image done"))
        .stdout(predicate::str::contains("Volume 'App', format UDZO"));

    assert_eq!(fx.out_entries(), ["App.dmg"]);
    assert!(fx.tmp_is_empty(), "staging directory was left behind");

    let listing = fs::read_to_string(fx.out_dir().join("App.dmg")).unwrap();
    assert!(listing.contains("./MyApp.app/Contents/Info.plist"));

    let log = fx.tool_log();
    assert!(log.contains("genisoimage -V App "));
    assert!(log.contains("-apple"));
    assert!(log.contains("--compression zlib --level 9"));
}

#[test]
fn volname_overrides_derived_name() {
    let fx = Fixture::new();
    fx.command()
        .args(["--volname", "Installer", "App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success();
    assert!(fx.tool_log().contains("genisoimage -V Installer "));
}

#[test]
fn ds_store_and_fseventsd_are_stripped() {
    let fx = Fixture::new();
    fs::write(fx.source().join(".DS_Store"), "finder").unwrap();
    fs::create_dir_all(fx.source().join(".fseventsd")).unwrap();
    fs::write(fx.source().join(".fseventsd/0001"), "log").unwrap();

    fx.command()
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success();

    let listing = fs::read_to_string(fx.out_dir().join("App.dmg")).unwrap();
    assert!(!listing.contains(".DS_Store"));
    assert!(!listing.contains(".fseventsd"));
    // The source folder itself is untouched.
    assert!(fx.source().join(".DS_Store").exists());
}

#[test]
fn add_file_and_extras_are_staged() {
    let fx = Fixture::new();
    let docs = fx.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("readme.txt"), "read me").unwrap();
    let license = fx.path().join("LICENSE");
    fs::write(&license, "MIT").unwrap();
    let icon = fx.path().join("vol.icns");
    fs::write(&icon, "icns").unwrap();
    let background = fx.path().join("bg.png");
    fs::write(&background, "png").unwrap();

    fx.command()
        .args(["--add-file", "Docs", docs.to_str().unwrap(), "10", "20"])
        .args(["--add-folder", "LICENSE.txt", license.to_str().unwrap(), "30", "40"])
        .args(["--volicon", icon.to_str().unwrap()])
        .args(["--background", background.to_str().unwrap()])
        .args(["--app-drop-link", "400", "100"])
        .args(["--ql-drop-link", "400", "300"])
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("only take effect on macOS"));

    let listing = fs::read_to_string(fx.out_dir().join("App.dmg")).unwrap();
    for expected in [
        "./Docs/readme.txt",
        "./LICENSE.txt",
        "./.VolumeIcon.icns",
        "./.background/bg.png",
        "./Applications",
        "./QuickLook",
    ] {
        assert!(listing.lines().any(|l| l == expected), "missing {expected}");
    }
    assert!(fx.tmp_is_empty());
}

#[test]
fn udbz_selects_bzip2() {
    let fx = Fixture::new();
    fx.command()
        .args(["--format", "UDBZ", "App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success();
    let log = fx.tool_log();
    assert!(log.contains("--compression bzip2 --level 9"));
    assert!(!log.contains("zlib"));
}

#[test]
fn quiet_passes_quiet_flags() {
    let fx = Fixture::new();
    fx.command()
        .args(["--hdiutil-quiet", "App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let log = fx.tool_log();
    assert!(log.contains("rsync -a -q "));
    assert!(log.contains(" -quiet "));
}

#[test]
fn tool_failure_aborts_and_propagates_exit_code() {
    let fx = Fixture::new();
    fx.command()
        .env("FAKE_FAIL_ISO", "1")
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("simulated failure"));

    assert!(fx.out_entries().is_empty(), "no image or intermediate file may remain");
    assert!(fx.tmp_is_empty());
    assert!(!fx.tool_log().contains("dmg dmg"));
}

#[test]
fn existing_output_is_replaced() {
    let fx = Fixture::new();
    fs::write(fx.out_dir().join("App.dmg"), "stale").unwrap();
    fx.command()
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success();
    let listing = fs::read_to_string(fx.out_dir().join("App.dmg")).unwrap();
    assert!(listing.contains("MyApp.app"));
}

#[test]
fn output_directory_is_created() {
    let fx = Fixture::new();
    fx.command()
        .args(["dist/nested/App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success();
    assert!(fx.out_dir().join("dist/nested/App.dmg").is_file());
    assert!(!fx.out_dir().join("dist/nested/rw.App.dmg").exists());
}

#[test]
fn finder_only_options_are_reported_not_fatal() {
    let fx = Fixture::new();
    let eula = fx.path().join("EULA.txt");
    fs::write(&eula, "terms").unwrap();

    fx.command()
        .env("RUST_LOG", "info")
        .args(["--sandbox-safe", "--bless"])
        .args(["--eula", eula.to_str().unwrap()])
        .args(["--hide-extension", "MyApp.app"])
        .args(["--icon", "MyApp.app", "120", "160"])
        .args(["--window-pos", "200", "120"])
        .args(["--window-size", "600", "400"])
        .args(["--text-size", "12", "--icon-size", "96"])
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("only take effect on macOS"))
        .stderr(predicate::str::contains("skipping Finder scripting"))
        .stdout(predicate::str::contains("--bless"))
        .stdout(predicate::str::contains(format!("--eula {}", eula.display())))
        .stdout(predicate::str::contains("--hide-extension MyApp.app"))
        .stdout(predicate::str::contains("--icon MyApp.app 120 160"))
        .stdout(predicate::str::contains("--window-pos 200 120"))
        .stdout(predicate::str::contains("--window-size 600 400"))
        .stdout(predicate::str::contains("--text-size 12"))
        .stdout(predicate::str::contains("--icon-size 96"));

    assert_eq!(fx.out_entries(), ["App.dmg"]);
    let listing = fs::read_to_string(fx.out_dir().join("App.dmg")).unwrap();
    assert!(!listing.contains("EULA"), "license text is not embedded");
    assert!(fx.tmp_is_empty());
}

#[test]
fn skip_jenkins_skips_finder_step() {
    let fx = Fixture::new();
    fx.command()
        .env("RUST_LOG", "info")
        .args(["--skip-jenkins", "App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping Finder prettifying step"));
    assert_eq!(fx.out_entries(), ["App.dmg"]);
}

#[test]
fn undersized_disk_image_size_only_warns() {
    let fx = Fixture::new();
    fx.command()
        .env("RUST_LOG", "warn")
        .args(["--disk-image-size", "0", "App.dmg", fx.source().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "--disk-image-size 0 MB is smaller than the staged content",
        ));
    assert_eq!(fx.out_entries(), ["App.dmg"]);
    assert!(fx.tmp_is_empty());
}

#[test]
fn read_only_source_directories_are_cleaned_up() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new();
    let contents = fx.source().join("MyApp.app/Contents");
    fs::set_permissions(&contents, fs::Permissions::from_mode(0o555)).unwrap();

    let result = fx
        .command()
        .args(["App.dmg", fx.source().to_str().unwrap()])
        .assert();

    // Let the fixture delete the source tree again.
    fs::set_permissions(&contents, fs::Permissions::from_mode(0o755)).unwrap();

    result.success();
    assert_eq!(fx.out_entries(), ["App.dmg"]);
    assert!(fx.tmp_is_empty(), "read-only staging directory was left behind");
}
