//! Integration tests for the carfinder CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn carfinder_cmd() -> Command {
    let mut cmd = Command::cargo_bin("carfinder").unwrap();
    // Keep tests hermetic: no LLM credential, explicit catalog.
    cmd.env_remove("CARFINDER_LLM_API_KEY");
    cmd
}

fn setup_catalog() -> TempDir {
    let dir = TempDir::new().unwrap();
    let catalog = r#"[
        {
            "Name": "Honda",
            "Model": "Civic",
            "Images": {
                "quarter": "/cars/honda-civic/quarter.webp",
                "side": "/cars/honda-civic/side.webp",
                "back": "/cars/honda-civic/back.webp",
                "interior": "/cars/honda-civic/interior.webp"
            },
            "Price": 129900,
            "Location": "São Paulo",
            "Powertrain": "flex",
            "Body": "sedan",
            "Seats": 5,
            "Tags": ["comfort", "tech"]
        },
        {
            "Name": "Fiat",
            "Model": "Mobi",
            "Images": {
                "quarter": "/cars/fiat-mobi/quarter.webp",
                "side": "/cars/fiat-mobi/side.webp",
                "back": "/cars/fiat-mobi/back.webp",
                "interior": "/cars/fiat-mobi/interior.webp"
            },
            "Price": 58900,
            "Location": "Curitiba",
            "Powertrain": "flex",
            "Body": "hatch",
            "Seats": 4,
            "Tags": ["city", "economy"]
        }
    ]"#;
    fs::write(dir.path().join("cars.json"), catalog).unwrap();
    dir
}

fn catalog_path(dir: &TempDir) -> String {
    dir.path().join("cars.json").to_str().unwrap().to_string()
}

#[test]
fn search_filters_by_brand() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["search", "--name", "Honda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Honda Civic"))
        .stdout(predicate::str::contains("Fiat Mobi").not());
}

#[test]
fn search_resolves_uf_locations() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["--format", "json", "search", "--location", "pr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Model\": \"Mobi\""));
}

#[test]
fn search_reports_no_matches() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["search", "--name", "Ferrari"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhum carro encontrado."));
}

#[test]
fn chat_answers_show_all_requests_offline() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["chat", "todos", "os", "carros"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aqui estão todos os carros disponíveis."))
        .stdout(predicate::str::contains("Honda Civic"))
        .stdout(predicate::str::contains("Fiat Mobi"));
}

#[test]
fn chat_rejects_empty_message() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["chat", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mensagem é obrigatória"));
}

#[test]
fn recommend_ranks_within_budget() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["recommend", "--budget", "100000", "--usage", "city"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fiat Mobi"))
        .stdout(predicate::str::contains("Dentro do orçamento"))
        .stdout(predicate::str::contains("Honda Civic").not());
}

#[test]
fn status_reports_catalog_and_llm_state() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cars\": 2"))
        .stdout(predicate::str::contains("\"llmConfigured\": false"));
}

#[test]
fn ls_lists_the_whole_catalog() {
    let dir = setup_catalog();
    carfinder_cmd()
        .env("CARFINDER_CATALOG", catalog_path(&dir))
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Honda Civic"))
        .stdout(predicate::str::contains("Fiat Mobi"));
}

#[test]
fn missing_catalog_fails_with_context() {
    carfinder_cmd()
        .env("CARFINDER_CATALOG", "/nonexistent/cars.json")
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read catalog"));
}
