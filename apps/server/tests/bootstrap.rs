use std::fs;
use tempfile::tempdir;

#[test]
fn loaded_configuration_is_logged_once_the_logger_is_live() {
    let dir = tempdir().expect("tempdir");
    let logs = dir.path().join("logs");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        format!(
            "[server]\nport = 7070\n\n[mail]\nhost = \"smtp.example.dz\"\n\n\
             [log]\nconsole = false\nfilter = \"info\"\ndirectory = '{}'\n",
            logs.display()
        ),
    )
    .expect("write config");

    let (cfg, log) = leadform_server::bootstrap(&path).expect("bootstrap");
    assert_eq!(cfg.server.port, 7070);
    assert!(log.writes_files());
    drop(log);

    let contents: String = fs::read_dir(&logs)
        .expect("log directory")
        .filter_map(Result::ok)
        .map(|entry| fs::read_to_string(entry.path()).expect("read log"))
        .collect();

    assert!(contents.contains("Configuration loaded"), "log was: {contents}");
    assert!(contents.contains("smtp.example.dz"));
    assert!(contents.contains(&path.display().to_string()));
}
