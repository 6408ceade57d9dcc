use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use mdview::Style;
use predicates::str::contains;
use tempfile::TempDir;

const DOCUMENT: &str = "# Hello *World*\n\nSome text.\n";

struct Fixture {
    dir: TempDir,
    input: PathBuf,
}

impl Fixture {
    fn new() -> Fixture {
        let dir = tempfile::tempdir().expect("tmp dir");
        let input = dir.path().join("doc.md");
        fs::write(&input, DOCUMENT).expect("write input");
        Fixture { dir, input }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn mdview(&self) -> Command {
        let config_home = self.path("config");
        fs::create_dir_all(&config_home).expect("config dir");

        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mdview"));
        cmd.env("XDG_CONFIG_HOME", config_home)
            .env("TMPDIR", self.dir.path())
            .env_remove("SNAP_USER_COMMON")
            .env_remove("MDVIEW_LOG");
        cmd
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn version() {
    let fixture = Fixture::new();
    fixture
        .mdview()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
    fixture.mdview().arg("-v").assert().success();
}

#[test]
fn help_goes_to_stderr() {
    let fixture = Fixture::new();
    fixture
        .mdview()
        .arg("-h")
        .arg(&fixture.input)
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("Usage: mdview [options] <filename>"))
        .stderr(contains("--filepath"));
}

#[test]
fn missing_input_argument() {
    let fixture = Fixture::new();
    fixture
        .mdview()
        .assert()
        .code(1)
        .stderr(contains("Usage"));
}

#[test]
fn unreadable_input() {
    let fixture = Fixture::new();
    fixture
        .mdview()
        .arg(fixture.path("nope.md"))
        .assert()
        .code(3)
        .stderr(contains("failed to read"));
}

#[test]
fn pipe_prints_page() {
    let fixture = Fixture::new();
    let output = fixture.path("out.html");

    let stdout = stdout_of(fixture.mdview().arg("-o").arg(&output).arg(&fixture.input));

    assert_eq!(stdout, fs::read_to_string(&output).unwrap());
    assert!(stdout.starts_with("<!DOCTYPE html><html><head>"));
    assert!(stdout.contains("<title>Hello World</title>"));
    assert!(stdout.contains(&format!("<style>{}</style>", Style::Light.css())));
    assert!(stdout.ends_with(
        "<body class=\"markdown-body\"><h1>Hello <em>World</em></h1>\n<p>Some text.</p>\n</body></html>"
    ));
}

#[test]
fn pipe_prints_path() {
    let fixture = Fixture::new();
    let output = fixture.path("out.html");

    let stdout = stdout_of(
        fixture
            .mdview()
            .arg("--filepath")
            .arg("--output")
            .arg(&output)
            .arg(&fixture.input),
    );

    assert_eq!(stdout, output.to_string_lossy());
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("<title>Hello World</title>"));
}

#[test]
fn styles() {
    let fixture = Fixture::new();
    let output = fixture.path("out.html");

    let cases: [(&[&str], Style); 4] = [
        (&[], Style::Light),
        (&["-b"], Style::Bare),
        (&["-d"], Style::Dark),
        (&["-b", "-d"], Style::Dark),
    ];

    for (flags, style) in cases {
        fixture
            .mdview()
            .args(flags)
            .arg("-o")
            .arg(&output)
            .arg(&fixture.input)
            .assert()
            .success();

        let html = fs::read_to_string(&output).unwrap();
        assert!(
            html.contains(&format!("<style>{}</style>", style.css())),
            "{:?} -> {:?}",
            flags,
            style
        );
    }
}

#[test]
fn xhtml() {
    let fixture = Fixture::new();
    let input = fixture.path("raw.md");
    fs::write(&input, "# Raw\n\n<div>block</div>\n").unwrap();

    let html = stdout_of(fixture.mdview().arg(&input).arg("-o").arg(fixture.path("a.html")));
    let xhtml = stdout_of(
        fixture
            .mdview()
            .arg("-x")
            .arg(&input)
            .arg("-o")
            .arg(fixture.path("b.html")),
    );

    assert!(html.contains("<div>block</div>"));
    assert!(!xhtml.contains("<div>block</div>"));
}

#[test]
fn idempotent() {
    let fixture = Fixture::new();

    let first = stdout_of(fixture.mdview().arg("-d").arg(&fixture.input));
    let second = stdout_of(fixture.mdview().arg("-d").arg(&fixture.input));

    assert_eq!(first, second);
}

#[cfg(unix)]
fn assert_scratch_file(path: &Path, dir: &Path) {
    assert_eq!(path.parent(), Some(dir));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("mdview"), "{}", name);
    assert!(name.ends_with(".html"), "{}", name);
    assert_eq!(name.len(), "mdview".len() + 32 + ".html".len());
    assert!(path.is_file());
}

#[cfg(unix)]
#[test]
fn scratch_file_in_temp_dir() {
    let fixture = Fixture::new();
    let tmp = fixture.path("tmp");
    fs::create_dir(&tmp).unwrap();

    let stdout = stdout_of(
        fixture
            .mdview()
            .env("TMPDIR", &tmp)
            .arg("-f")
            .arg(&fixture.input),
    );

    assert_scratch_file(Path::new(&stdout), &tmp);
}

#[cfg(unix)]
#[test]
fn scratch_file_in_sandbox() {
    let fixture = Fixture::new();
    let home = fixture.path("home");
    fs::create_dir(&home).unwrap();

    let stdout = stdout_of(
        fixture
            .mdview()
            .env("SNAP_USER_COMMON", "/snap/mdview/common")
            .env("HOME", &home)
            .arg("-f")
            .arg(&fixture.input),
    );

    assert_scratch_file(Path::new(&stdout), &home.join("mdview-temp"));
}

#[test]
fn config_file() {
    let fixture = Fixture::new();
    let config = fixture.path("mdview.conf");
    fs::write(&config, "--bare\n").unwrap();

    let stdout = stdout_of(
        fixture
            .mdview()
            .arg("--config-file")
            .arg(&config)
            .arg(&fixture.input),
    );

    assert!(stdout.contains("<style></style>"));
}

#[test]
fn config_file_flags_combine_with_command_line() {
    let fixture = Fixture::new();
    let config = fixture.path("mdview.conf");
    fs::write(&config, "--bare --filepath").unwrap();
    let output = fixture.path("out.html");

    let stdout = stdout_of(
        fixture
            .mdview()
            .arg("--config-file")
            .arg(&config)
            .arg("--bare")
            .arg("-o")
            .arg(&output)
            .arg(&fixture.input),
    );

    assert_eq!(stdout, output.to_string_lossy());
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("<style></style>"));
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn default_config_file() {
    let fixture = Fixture::new();
    let config_dir = fixture.path("config").join("mdview");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config"), "-d").unwrap();

    let dark = stdout_of(fixture.mdview().arg(&fixture.input));
    assert!(dark.contains(&format!("<style>{}</style>", Style::Dark.css())));

    let light = stdout_of(
        fixture
            .mdview()
            .arg("--config-file")
            .arg("none")
            .arg(&fixture.input),
    );
    assert!(light.contains(&format!("<style>{}</style>", Style::Light.css())));
}

#[test]
fn missing_config_file() {
    let fixture = Fixture::new();
    fixture
        .mdview()
        .arg("--config-file")
        .arg(fixture.path("absent.conf"))
        .arg(&fixture.input)
        .assert()
        .code(2)
        .stderr(contains("invalid config file"));
}

#[test]
fn unknown_flag() {
    let fixture = Fixture::new();
    fixture
        .mdview()
        .arg("--no-such-flag")
        .arg(&fixture.input)
        .assert()
        .code(2);
}

#[test]
fn title_is_escaped() {
    let fixture = Fixture::new();
    let input = fixture.path("lt.md");
    fs::write(&input, "# a < b & c\n").unwrap();

    let stdout = stdout_of(fixture.mdview().arg(&input).arg("-o").arg(fixture.path("lt.html")));

    assert!(stdout.contains("<title>a &lt; b &amp; c</title>"), "{}", stdout);
}

#[test]
fn deeply_nested_document() {
    let fixture = Fixture::new();
    let input = fixture.path("deep.md");
    fs::write(&input, format!("{}# Deep\n", "> ".repeat(100_000))).unwrap();
    let output = fixture.path("deep.html");

    let stdout = stdout_of(
        fixture
            .mdview()
            .arg("-f")
            .arg("-o")
            .arg(&output)
            .arg(&input),
    );

    assert_eq!(stdout, output.to_string_lossy());
    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("<title>Deep</title>"));
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn non_utf8_output_path_printed_as_is() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = Fixture::new();
    let output = fixture.dir.path().join(OsStr::from_bytes(b"out\xff.html"));

    let assert = fixture
        .mdview()
        .arg("-f")
        .arg("-o")
        .arg(&output)
        .arg(&fixture.input)
        .assert()
        .success();

    assert_eq!(assert.get_output().stdout, output.as_os_str().as_bytes());
    assert!(output.is_file());
}

#[test]
fn links_are_nofollow() {
    let fixture = Fixture::new();
    let input = fixture.path("links.md");
    fs::write(&input, "# Links\n\nSee <https://example.com>.\n").unwrap();

    let stdout = stdout_of(fixture.mdview().arg(&input).arg("-o").arg(fixture.path("l.html")));

    assert!(
        stdout.contains("<a href=\"https://example.com\" rel=\"nofollow\">https://example.com</a>"),
        "{}",
        stdout
    );
}
