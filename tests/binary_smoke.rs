use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Run `fsx` with a config path that does not exist, so the user's own config never leaks in.
fn fsx(cfg_dir: &Path, args: &[&str]) -> Output {
    let me = cargo::cargo_bin!("fsx");
    Command::new(me)
        .env("FSX_CONFIG", cfg_dir.join("absent-config.xml"))
        .args(args)
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn print_config_shows_env_path() {
    let td = tempdir().unwrap();
    let out = fsx(td.path(), &["--print-config"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("absent-config.xml"), "{}", stdout(&out));
}

#[test]
fn init_config_writes_template_once() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("conf").join("config.xml");
    let me = cargo::cargo_bin!("fsx");
    let run = || {
        Command::new(me)
            .env("FSX_CONFIG", &cfg)
            .arg("--init-config")
            .output()
            .expect("spawn binary")
    };

    assert!(run().status.success());
    assert!(fs::read_to_string(&cfg).unwrap().contains("<config>"));
    assert!(!run().status.success(), "second init must not clobber");
}

#[test]
fn no_command_is_a_usage_error() {
    let td = tempdir().unwrap();
    let out = fsx(td.path(), &[]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn ls_marks_files_and_directories() {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();

    let out = fsx(td.path(), &["ls", s(&root)]);
    assert!(out.status.success(), "{}", stderr(&out));
    let mut lines: Vec<String> = stdout(&out).lines().map(str::to_string).collect();
    lines.sort();
    assert_eq!(lines, ["d sub", "f a.txt"]);
}

#[test]
fn size_files_only() {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a"), "12345").unwrap();
    fs::write(root.join("sub").join("b"), "678").unwrap();

    let out = fsx(td.path(), &["size", "--files-only", s(&root)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "8");
}

#[test]
fn cp_tree_and_no_overwrite_exit_code() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(src.join("n")).unwrap();
    fs::write(src.join("n").join("f.txt"), "copy me").unwrap();

    let out = fsx(td.path(), &["cp", s(&src), s(&dest)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read_to_string(dest.join("n").join("f.txt")).unwrap(), "copy me");

    let out = fsx(td.path(), &["cp", "--no-overwrite", s(&src), s(&dest)]);
    assert_eq!(out.status.code(), Some(10));
    assert!(stderr(&out).contains("File already exists"), "{}", stderr(&out));
}

#[test]
fn mv_file_and_rm_missing() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("b.txt");
    fs::write(&a, "move").unwrap();

    let out = fsx(td.path(), &["mv", s(&a), s(&b)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(!a.exists());
    assert_eq!(fs::read_to_string(&b).unwrap(), "move");

    let out = fsx(td.path(), &["rm", s(&a)]);
    assert_eq!(out.status.code(), Some(11));
    assert!(stderr(&out).contains("error[11]"), "{}", stderr(&out));
}

#[test]
fn csv_prints_tab_joined_records() {
    let td = tempdir().unwrap();
    let f = td.path().join("d.csv");
    fs::write(&f, "1;2;3\n\"x;y\";z\n").unwrap();

    let out = fsx(td.path(), &["csv", "--separator", ";", s(&f)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "1\t2\t3\nx;y\tz\n");
}

#[cfg(unix)]
#[test]
fn mkdir_touch_chmod() {
    use std::os::unix::fs::PermissionsExt;

    let td = tempdir().unwrap();
    let dir = td.path().join("a").join("b");
    let out = fsx(td.path(), &["mkdir", "--mode", "700", s(&dir)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::metadata(&dir).unwrap().permissions().mode() & 0o777, 0o700);

    let file = dir.join("t.txt");
    let out = fsx(td.path(), &["touch", "--mtime", "1500000000", s(&file)]);
    assert!(out.status.success(), "{}", stderr(&out));
    let meta = fs::metadata(&file).unwrap();
    assert_eq!(
        filetime::FileTime::from_last_modification_time(&meta).unix_seconds(),
        1_500_000_000
    );

    let out = fsx(td.path(), &["chmod", "604", s(&file)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::metadata(&file).unwrap().permissions().mode() & 0o777, 0o604);

    let out = fsx(td.path(), &["mkdir", s(&dir)]);
    assert_eq!(out.status.code(), Some(12));
}

#[test]
fn empty_keeps_directory() {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir_all(root.join("x").join("y")).unwrap();
    fs::write(root.join("x").join("f"), "f").unwrap();

    let out = fsx(td.path(), &["empty", s(&root)]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(root.is_dir());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn stat_reports_size_and_mime() {
    let td = tempdir().unwrap();
    let f = td.path().join("s.txt");
    fs::write(&f, "hello").unwrap();

    let out = fsx(td.path(), &["stat", s(&f)]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("size: 5"), "{text}");
    assert!(text.contains("mime: text/plain"), "{text}");
}
