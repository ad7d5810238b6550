//! Integration tests for authsession

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's config, session and environment
    fn authsession(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("authsession");
        cmd.env_remove("PUBLIC_API_URL")
            .env_remove("AUTHSESSION_PASSWORD")
            .env_remove("AUTHSESSION_CONFIG")
            .env_remove("AUTHSESSION_STORE_DIR")
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .arg("--store-dir")
            .arg(store_dir(temp));
        cmd
    }

    fn store_dir(temp: &TempDir) -> std::path::PathBuf {
        temp.path().join("session")
    }

    fn seed_session(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("authToken"), "tok-1").unwrap();
        std::fs::write(
            dir.join("user"),
            r#"{"id":"u1","name":"Ana","email":"a@x.com","role":"user","createdAt":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Session client"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("authsession"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("http://localhost:3000"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args(["config", "set", "session.login_route", "/login"])
            .assert()
            .success();

        authsession(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("login_route = \"/login\""));
    }

    #[test]
    fn config_set_unknown_key() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn status_anonymous() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("anonymous"));
    }

    #[test]
    fn status_active_with_stored_session() {
        let temp = TempDir::new().unwrap();
        seed_session(&store_dir(&temp));
        authsession(&temp)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("active"))
            .stdout(predicate::str::contains("a@x.com"));
    }

    #[test]
    fn whoami_without_session() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No hay token de autenticación"))
            .stderr(predicate::str::contains("authsession login"));
    }

    #[test]
    fn whoami_json_with_stored_session() {
        let temp = TempDir::new().unwrap();
        seed_session(&store_dir(&temp));
        authsession(&temp)
            .args(["whoami", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"createdAt\""))
            .stdout(predicate::str::contains("a@x.com"));
    }

    #[test]
    fn profile_without_session_skips_network() {
        let temp = TempDir::new().unwrap();
        // Unreachable server: a network attempt would report a connection error
        authsession(&temp)
            .args(["--api-url", "http://127.0.0.1:9", "profile"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No hay token de autenticación"));
    }

    #[test]
    fn login_unreachable_server() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args([
                "--api-url",
                "http://127.0.0.1:9",
                "login",
                "--email",
                "a@x.com",
                "--password",
                "p1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error de conexión con el servidor"));

        assert!(!store_dir(&temp).join("authToken").exists());
    }

    #[test]
    fn login_without_password_outside_terminal() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args(["login", "--email", "a@x.com"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--password"));
    }

    #[test]
    fn require_without_session() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .arg("require")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Login required:"))
            .stderr(predicate::str::contains("/auth/login"))
            .stderr(predicate::str::contains("localhost:3000").not());
    }

    #[test]
    fn require_with_session() {
        let temp = TempDir::new().unwrap();
        seed_session(&store_dir(&temp));
        authsession(&temp)
            .arg("require")
            .assert()
            .success()
            .stdout(predicate::str::contains("Session present"));
    }

    #[test]
    fn logout_clears_and_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = store_dir(&temp);
        seed_session(&dir);

        authsession(&temp)
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("Session cleared"));

        assert!(!dir.join("authToken").exists());
        assert!(!dir.join("user").exists());

        authsession(&temp)
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("No stored session"));
    }

    #[test]
    fn completions_bash() {
        let temp = TempDir::new().unwrap();
        authsession(&temp)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("authsession"));
    }
}
