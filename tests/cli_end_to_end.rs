use assert_cmd::Command;
use predicates::{
    prelude::PredicateBooleanExt,
    str::{contains, starts_with},
};
use tempfile::TempDir;

fn fencemark(workdir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fencemark"));
    cmd.current_dir(workdir.path())
        .env_remove("FENCEMARK_CONFIG_FILE")
        .env_remove("FENCEMARK__RENDER__THEME")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn renders_stdin_to_stdout() {
    let workdir = TempDir::new().expect("tmp dir");
    fencemark(&workdir)
        .write_stdin("# Hi\n")
        .assert()
        .success()
        .stdout(starts_with(
            "<style>/* Background */ .chroma { color: #f8f8f2; background-color: #272822 }",
        ))
        .stdout(contains("</style><h1>Hi</h1>\n"));
}

#[test]
fn renders_file_to_file_without_stylesheet() {
    let workdir = TempDir::new().expect("tmp dir");
    let input = workdir.path().join("doc.md");
    let output = workdir.path().join("doc.html");
    std::fs::write(&input, "Hello *world*\n").expect("write input");

    fencemark(&workdir)
        .arg("render")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--no-embed-css")
        .assert()
        .success();

    let html = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(html, "<p>Hello <em>world</em></p>\n");
}

#[test]
fn lists_themes() {
    let workdir = TempDir::new().expect("tmp dir");
    fencemark(&workdir)
        .arg("themes")
        .assert()
        .success()
        .stdout(contains("monokai\n"))
        .stdout(contains("nord\n"));
}

#[test]
fn prints_theme_stylesheet() {
    let workdir = TempDir::new().expect("tmp dir");
    fencemark(&workdir)
        .args(["css", "--theme", "nord"])
        .assert()
        .success()
        .stdout(starts_with("/* Background */ .chroma {"))
        .stdout(contains(".chroma .k {"));
}

#[test]
fn theme_flag_before_subcommand_is_honoured() {
    let workdir = TempDir::new().expect("tmp dir");
    fencemark(&workdir)
        .args(["--theme", "nord", "css"])
        .assert()
        .success()
        .stdout(contains("background-color: #2e3440"))
        .stdout(contains("#272822").not());
}

#[test]
fn config_file_in_working_directory_selects_theme() {
    let workdir = TempDir::new().expect("tmp dir");
    std::fs::write(
        workdir.path().join("fencemark.toml"),
        "[render]\nembed_css = false\n",
    )
    .expect("write config");

    fencemark(&workdir)
        .write_stdin("plain\n")
        .assert()
        .success()
        .stdout("<p>plain</p>\n");
}

#[test]
fn unknown_theme_fails_fast() {
    let workdir = TempDir::new().expect("tmp dir");
    fencemark(&workdir)
        .args(["--theme", "no-such-theme"])
        .write_stdin("# Hi\n")
        .assert()
        .failure()
        .stderr(contains("unknown theme `no-such-theme`"));
}
