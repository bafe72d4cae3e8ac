use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn storefront(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.env("STOREFRONT_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("STOREFRONT_ADMIN_PIN")
        .env_remove("RUST_LOG");
    cmd
}

/// A data dir whose checkout does not wait on the simulated processor.
fn home() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"processing_delay_ms": 0}"#,
    )
    .unwrap();
    dir
}

fn buy_args<'a>(id: &'a str, email: &'a str) -> Vec<&'a str> {
    vec![
        "buy",
        id,
        "--email",
        email,
        "--first-name",
        "Rae",
        "--last-name",
        "Quinn",
        "--country",
        "IE",
        "--card-number",
        "4242 4242 4242 4242",
        "--expiry",
        "11/29",
        "--cvv",
        "404",
        "--cardholder",
        "Rae Quinn",
    ]
}

#[test]
fn test_list_shows_builtins() {
    let dir = home();
    storefront(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("modern-portfolio"))
        .stdout(predicate::str::contains("bistro-table"));
}

#[test]
fn test_list_filters_by_category() {
    let dir = home();
    storefront(dir.path())
        .args(["list", "-c", "Restaurant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bistro-table"))
        .stdout(predicate::str::contains("modern-portfolio").not());
}

#[test]
fn test_inverted_price_range_fails() {
    let dir = home();
    storefront(dir.path())
        .args(["list", "--min", "80", "--max", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_view_unknown_template() {
    let dir = home();
    storefront(dir.path())
        .args(["view", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found: nope"));
}

#[test]
fn test_admin_wrong_pin() {
    let dir = home();
    storefront(dir.path())
        .args(["admin", "--pin", "0000", "dashboard"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Incorrect PIN"));
}

#[test]
fn test_admin_add_then_list_and_delete() {
    let dir = home();
    storefront(dir.path())
        .args([
            "admin",
            "--pin",
            "2024",
            "add",
            "--title",
            "Garden Journal",
            "--category",
            "Blog",
            "--description",
            "A calm blog for gardeners",
            "--price",
            "19",
            "--thumbnail",
            "https://images.example.com/garden.png",
            "--demo",
            "https://demo.example.com/garden",
            "-t",
            "garden",
            "-f",
            "Seasonal archive",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("garden-journal"));

    storefront(dir.path())
        .args(["list", "-c", "Blog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("garden-journal"))
        .stdout(predicate::str::contains("inkwell-blog"));

    storefront(dir.path())
        .args(["admin", "--pin", "2024", "delete", "inkwell-blog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Built-in template"));

    storefront(dir.path())
        .args(["admin", "--pin", "2024", "delete", "garden-journal"])
        .assert()
        .success();

    storefront(dir.path())
        .args(["list", "-c", "Blog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("garden-journal").not());
}

#[test]
fn test_admin_add_reports_missing_fields() {
    let dir = home();
    storefront(dir.path())
        .args(["admin", "--pin", "2024", "add", "--title", "Half Done"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("demoUrl"));
}

#[test]
fn test_configured_pin() {
    let dir = home();
    storefront(dir.path())
        .args(["config", "admin-pin", "8642"])
        .assert()
        .success();
    storefront(dir.path())
        .args(["admin", "--pin", "2024", "manage"])
        .assert()
        .failure();
    storefront(dir.path())
        .args(["admin", "--pin", "8642", "manage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in"));
}

#[test]
fn test_buy_records_order() {
    let dir = home();
    let output = storefront(dir.path())
        .args(buy_args("modern-portfolio", "rae@example.com"))
        .assert()
        .success()
        .stdout(predicate::str::contains("53.90 USD"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let token = stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix("Download:  storefront orders download "))
        .unwrap()
        .trim()
        .to_string();

    storefront(dir.path())
        .args(["orders", "download", &token])
        .assert()
        .success()
        .stdout(predicate::str::contains("modern-portfolio.zip"));

    storefront(dir.path())
        .args(["orders", "customer", "RAE@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modern Portfolio"));

    storefront(dir.path())
        .args(["orders", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Orders:     1"));
}

#[test]
fn test_buy_with_bad_email() {
    let dir = home();
    storefront(dir.path())
        .args(buy_args("modern-portfolio", "rae-at-example"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("email"));
}

fn add_garden(home: &Path, extra: &[&str]) {
    let mut args = vec![
        "admin",
        "--pin",
        "2024",
        "add",
        "--title",
        "Garden Journal",
        "--category",
        "Blog",
        "--description",
        "A calm blog for gardeners",
        "--price",
        "19",
        "--thumbnail",
        "https://images.example.com/garden.png",
        "--demo",
        "https://demo.example.com/garden",
        "-f",
        "Seasonal archive",
    ];
    args.extend_from_slice(extra);
    storefront(home).args(args).assert().success();
}

#[test]
fn test_delete_with_unknown_id_keeps_everything() {
    let dir = home();
    add_garden(dir.path(), &[]);

    storefront(dir.path())
        .args(["admin", "--pin", "2024", "delete", "garden-journal", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found: missing"));

    storefront(dir.path())
        .args(["view", "garden-journal"])
        .assert()
        .success();
}

#[test]
fn test_edit_without_fields_on_unknown_id_fails() {
    let dir = home();
    storefront(dir.path())
        .args(["admin", "--pin", "2024", "edit", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found: ghost"));
}

#[test]
fn test_popular_flag_round_trip() {
    let dir = home();
    add_garden(dir.path(), &["--popular"]);
    storefront(dir.path())
        .args(["view", "garden-journal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("popular"));

    storefront(dir.path())
        .args(["admin", "--pin", "2024", "edit", "garden-journal", "--popular", "false"])
        .assert()
        .success();
    storefront(dir.path())
        .args(["view", "garden-journal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("popular").not());
}
