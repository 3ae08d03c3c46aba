//! Rendered pages against the mock content store.

use acervo_integration_tests::{fixtures, start_site, MockCms};
use reqwest::header::{COOKIE, LOCATION, REFERER, SET_COOKIE};
use reqwest::StatusCode;

async fn site() -> String {
    let cms = MockCms::start(fixtures()).await.unwrap();
    start_site(&cms.url).await.unwrap()
}

async fn page(url: String, lang: Option<&str>) -> (StatusCode, String) {
    let client = reqwest::Client::new();
    let mut request = client.get(url);
    if let Some(lang) = lang {
        request = request.header(COOKIE, format!("lang={lang}"));
    }
    let response = request.send().await.unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn health_checks() {
    let site = site().await;
    for path in ["/health", "/ready"] {
        let (status, body) = page(format!("{site}{path}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}

#[tokio::test]
async fn home_lists_sections_and_document_categories() {
    let site = site().await;
    let (status, body) = page(format!("{site}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/edificios\""));
    assert!(body.contains("href=\"/documentos/categoria/1\""));
    assert!(body.contains("Atas"));
}

#[tokio::test]
async fn building_pages_follow_the_language_cookie() {
    let site = site().await;
    let (status, pt) = page(format!("{site}/edificios/1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(pt.contains("Liceu Antigo"));
    assert!(pt.contains("<html lang=\"pt\">"));

    let (status, en) = page(format!("{site}/edificios/1"), Some("en")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(en.contains("Old Lyceum"));
    assert!(en.contains("<html lang=\"en\">"));

    let (_, list) = page(format!("{site}/edificios"), Some("en")).await;
    assert!(list.contains("Buildings"));
    assert!(list.find("Old Lyceum").unwrap() < list.find("New Building").unwrap());
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let site = site().await;
    let missing = [
        "/edificios/99",
        "/edificios/",
        "/servicos/abc%20",
        "/galeria/999",
        "/nao-existe",
    ];
    for path in missing {
        let (status, body) = page(format!("{site}{path}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert!(body.contains("Página não encontrada"), "{path}");
    }
    let (_, body) = page(format!("{site}/documentos/42"), Some("en")).await;
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn store_failure_is_an_error_page() {
    let site = start_site("http://127.0.0.1:9").await.unwrap();
    let (status, body) = page(format!("{site}/servicos"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Ocorreu um erro"));
}

#[tokio::test]
async fn language_switch_sets_cookie_and_returns() {
    let site = site().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = client
        .get(format!("{site}/lang/en"))
        .header(REFERER, format!("{site}/servicos?estado=ativo"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/servicos?estado=ativo");
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("lang=en;"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn courses_scoped_by_building_with_store_year_bounds() {
    let site = site().await;
    let (status, main) = page(format!("{site}/cursos?edificio=1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(main.contains("Humanidades"));
    assert!(main.contains("name=\"from\" min=\"1970\" max=\"2006\""));

    let (_, annex) = page(format!("{site}/cursos?edificio=2"), None).await;
    assert!(!annex.contains("Humanidades"));
}

#[tokio::test]
async fn services_filter_by_status() {
    let site = site().await;
    let (_, active) = page(format!("{site}/servicos?estado=ativo"), None).await;
    assert!(active.contains("Biblioteca"));
    assert!(!active.contains("Cantina"));

    let (_, all) = page(format!("{site}/servicos"), Some("en")).await;
    assert!(all.find("Library").unwrap() < all.find("Canteen").unwrap());
}

#[tokio::test]
async fn group_types_are_translated() {
    let site = site().await;
    let (_, en) = page(format!("{site}/grupos"), Some("en")).await;
    assert!(en.contains("Chess Club"));
    assert!(en.contains(">Club<"));
}

#[tokio::test]
async fn staff_page_loads_more_pages() {
    let site = site().await;
    let (status, first) = page(format!("{site}/pessoal?limit=2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(first.contains("Ana Conceição"));
    assert!(!first.contains("Carla Ávila"));
    assert!(first.contains("paginas=2"));

    let (_, more) = page(format!("{site}/pessoal?limit=2&paginas=2"), None).await;
    assert!(more.contains("Carla Ávila"));
    assert!(!more.contains("Élia Conceicao"));

    let (_, all) = page(format!("{site}/pessoal?limit=2&paginas=3"), None).await;
    assert!(all.contains("Fábio Nunes"));
    assert!(!all.contains("paginas=4"));
}

#[tokio::test]
async fn staff_search_pages_share_one_read() {
    let cms = MockCms::start(fixtures()).await.unwrap();
    let site = start_site(&cms.url).await.unwrap();
    let (status, body) = page(format!("{site}/pessoal?q=conceicao&limit=1&paginas=2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ana Conceição"));
    assert!(body.contains("Élia Conceicao"));
    assert_eq!(cms.reads("Pessoal"), 1);
}

#[tokio::test]
async fn gallery_category_filter() {
    let site = site().await;
    let (_, overview) = page(format!("{site}/galeria"), None).await;
    assert!(overview.contains("href=\"/galeria/categoria/10\""));

    let (_, school) = page(format!("{site}/galeria?tipo=10"), None).await;
    assert!(school.contains("Fachada"));
    assert!(school.contains("Intervalo"));

    let (_, playground) = page(format!("{site}/galeria?tipo=10&sub=11"), None).await;
    assert!(!playground.contains("Fachada"));
    assert!(playground.contains("Intervalo"));

    let (status, category) = page(format!("{site}/galeria/subcategoria/11"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(category.contains("Recreio"));
    assert!(!category.contains("href=\"/galeria/100\""));
    assert!(category.contains("href=\"/galeria/101\""));
}

#[tokio::test]
async fn documents_link_to_the_file() {
    let cms = MockCms::start(fixtures()).await.unwrap();
    let site = start_site(&cms.url).await.unwrap();
    let (_, list) = page(format!("{site}/documentos/categoria/1"), None).await;
    assert!(list.contains("href=\"/documentos/1\""));
    assert!(list.contains("2 de março de 1961"));

    let (status, detail) = page(format!("{site}/documentos/1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(detail.contains(&format!("href=\"{}/assets/doc-ata\"", cms.url)));
}

#[tokio::test]
async fn materials_by_kind_and_building() {
    let site = site().await;
    let (_, materials) = page(format!("{site}/materiais/categorias?tipo=material"), None).await;
    assert!(materials.contains("Mapas"));
    assert!(!materials.contains("Maquetas"));

    let works_url = format!("{site}/materiais/categorias?tipo=trabalho&edificio=1");
    let (_, works) = page(works_url, None).await;
    assert!(!works.contains("Maquetas"));

    let category_url = format!("{site}/materiais/categorias/2?tipo=trabalho");
    let (status, category) = page(category_url, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(category.contains("Maqueta da escola"));
}
