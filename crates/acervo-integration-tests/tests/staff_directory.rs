//! Staff directory endpoint against the mock content store.

use acervo_integration_tests::{fixtures, start_site, MockCms};
use serde_json::Value;

async fn site() -> String {
    let cms = MockCms::start(fixtures()).await.unwrap();
    start_site(&cms.url).await.unwrap()
}

async fn directory(site: &str, query: &str) -> Value {
    let response = reqwest::get(format!("{site}/api/pessoal?{query}")).await.unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["nome"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn teachers_active_in_the_nineties() {
    let site = site().await;
    let body = directory(&site, "docente=true&fromYear=1990&toYear=2000&sort=nome&order=asc").await;
    assert_eq!(names(&body), ["Ana Conceição", "Duarte Melo"]);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
}

#[tokio::test]
async fn open_ended_year_range() {
    let site = site().await;
    let body = directory(&site, "toYear=1980").await;
    assert_eq!(names(&body), ["Élia Conceicao"]);
}

#[tokio::test]
async fn limit_is_capped() {
    let site = site().await;
    let body = directory(&site, "limit=500").await;
    assert_eq!(body["limit"], 100);
    assert_eq!(body["total"], 6);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn descending_process_number_sort() {
    let site = site().await;
    let body = directory(&site, "sort=numero_processo&order=desc&limit=2").await;
    let numbers: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["numero_processo"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, [4100, 3001]);
    assert_eq!(body["total"], 6);
}

#[tokio::test]
async fn text_search_ignores_accents_and_pages_consistently() {
    let site = site().await;
    let first = directory(&site, "q=conceicao&limit=1&page=1").await;
    let second = directory(&site, "q=CONCEIÇÃO&limit=1&page=2").await;
    assert_eq!(first["total"], 2);
    assert_eq!(second["total"], 2);
    assert_eq!(names(&first), ["Ana Conceição"]);
    assert_eq!(names(&second), ["Élia Conceicao"]);

    let past_end = directory(&site, "q=conceicao&limit=1&page=3").await;
    assert_eq!(past_end["total"], 2);
    assert!(names(&past_end).is_empty());
}

#[tokio::test]
async fn numeric_search_matches_process_number() {
    let site = site().await;
    let body = directory(&site, "q=1234").await;
    assert_eq!(names(&body), ["Ana Conceição"]);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn photo_urls_point_at_the_store() {
    let cms = MockCms::start(fixtures()).await.unwrap();
    let site = start_site(&cms.url).await.unwrap();
    let body = directory(&site, "q=ana").await;
    let row = &body["data"][0];
    assert_eq!(row["foto"], "ana");
    assert!(row["foto_url"].as_str().unwrap().starts_with(&format!("{}/assets/ana?", cms.url)));
}

#[tokio::test]
async fn unreachable_store_is_a_server_error() {
    let site = start_site("http://127.0.0.1:9").await.unwrap();
    let response = reqwest::get(format!("{site}/api/pessoal")).await.unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
