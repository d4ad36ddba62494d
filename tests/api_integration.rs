use gestock_cli::api::client::StockClient;
use gestock_cli::api::models::{ArticleRequest, CategorieRequest};
use gestock_cli::core::cache::QueryCache;
use gestock_cli::core::services::article_service::ArticleService;
use gestock_cli::core::services::categorie_service::CategorieService;
use gestock_cli::error::ApiError;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article_json(id: i64, code: &str) -> serde_json::Value {
    json!({
        "id": id,
        "codeArticle": code,
        "designation": "Clavier mécanique",
        "prixUnitaire": 50.0,
        "tauxTva": 20.0,
        "prixUnitaireTtc": 60.0,
        "photo": null,
        "categorie": {"id": 1, "code": "INF", "designation": "Informatique", "entrepriseId": 1}
    })
}

fn categorie_json(id: i64, code: &str) -> serde_json::Value {
    json!({"id": id, "code": code, "designation": "Informatique", "entrepriseId": 1})
}

async fn article_service(server: &MockServer) -> ArticleService {
    let client = StockClient::new(server.uri()).expect("client creation failed");
    ArticleService::new(client, QueryCache::default())
}

#[tokio::test]
async fn cached_list_hits_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article_json(7, "ART-007")])))
        .expect(1)
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let first = service.get_all().await.expect("first fetch");
    let second = service.get_all().await.expect("cached fetch");

    assert_eq!(first.len(), 1);
    assert_eq!(second[0].code_article, "ART-007");
}

#[tokio::test]
async fn create_invalidates_list_for_lazy_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([categorie_json(1, "INF")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/categories/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categorie_json(2, "MOB")))
        .mount(&server)
        .await;

    let client = StockClient::new(server.uri()).expect("client creation failed");
    let service = CategorieService::new(client, QueryCache::default());

    service.get_all().await.expect("initial list");
    service
        .create(&CategorieRequest {
            code: "MOB".to_string(),
            designation: "Mobilier".to_string(),
            entreprise_id: 1,
        })
        .await
        .expect("create");
    // The create dropped the cached list; this goes back to the network.
    service.get_all().await.expect("refetched list");
}

#[tokio::test]
async fn delete_refetches_list_before_returning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article_json(7, "ART-007")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/articles/delete/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    service.get_all().await.expect("initial list");
    service.delete(7).await.expect("delete");

    let showall_hits = server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path() == "/articles/showAll")
        .count();
    assert_eq!(showall_hits, 2, "delete must refetch the list eagerly");
}

#[tokio::test]
async fn unauthenticated_response_maps_to_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let err = service.get_all().await.expect_err("401 must fail");
    assert!(matches!(err, ApiError::SessionExpired { .. }));
    assert_eq!(err.redirect_target(), Some("/login"));
}

#[tokio::test]
async fn forbidden_response_maps_to_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let err = service.get_all().await.expect_err("403 must fail");
    assert!(matches!(err, ApiError::Forbidden { .. }));
    assert_eq!(err.redirect_target(), Some("/unauthorized"));
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})),
        )
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let err = service.get_all().await.expect_err("500 must fail");
    match err {
        ApiError::Server {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn validation_error_extracts_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/categories/create"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "code already used"})),
        )
        .mount(&server)
        .await;

    let client = StockClient::new(server.uri()).expect("client creation failed");
    let service = CategorieService::new(client, QueryCache::default());
    let err = service
        .create(&CategorieRequest {
            code: "INF".to_string(),
            designation: "Informatique".to_string(),
            entreprise_id: 1,
        })
        .await
        .expect_err("400 must fail");
    match err {
        ApiError::Validation {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "code already used");
        }
        other => panic!("expected Validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn multipart_create_sends_scalars_as_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles/create"))
        .and(query_param("codeArticle", "ART-010"))
        .and(query_param("prixUnitaireTtc", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json(10, "ART-010")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let article = service
        .create(&ArticleRequest {
            code_article: "ART-010".to_string(),
            designation: "Souris".to_string(),
            categorie_id: 1,
            entreprise_id: 1,
            prix_unitaire: 10.0,
            taux_tva: 20.0,
            prix_unitaire_ttc: 12.0,
            image: None,
        })
        .await
        .expect("create");
    assert_eq!(article.id, 10);

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/articles/create")
        .expect("create request recorded");
    let content_type = create
        .headers
        .get("content-type")
        .expect("content-type present")
        .to_str()
        .expect("ascii header");
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn create_then_get_by_id_returns_submitted_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json(10, "ART-010")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/id/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json(10, "ART-010")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let created = service
        .create(&ArticleRequest {
            code_article: "ART-010".to_string(),
            designation: "Souris".to_string(),
            categorie_id: 1,
            entreprise_id: 1,
            prix_unitaire: 10.0,
            taux_tva: 20.0,
            prix_unitaire_ttc: 12.0,
            image: None,
        })
        .await
        .expect("create");

    let fetched = service.get_by_id(created.id).await.expect("get by id");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.code_article, created.code_article);
}

#[tokio::test]
async fn multipart_file_part_present_only_when_file_given() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article_json(10, "ART-010")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service = article_service(&server).await;
    let mut request = ArticleRequest {
        code_article: "ART-010".to_string(),
        designation: "Souris".to_string(),
        categorie_id: 1,
        entreprise_id: 1,
        prix_unitaire: 10.0,
        taux_tva: 20.0,
        prix_unitaire_ttc: 12.0,
        image: None,
    };
    service.create(&request).await.expect("create without file");

    request.image = Some(gestock_cli::api::models::FileUpload {
        file_name: "souris.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    });
    service.create(&request).await.expect("create with file");

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    let bodies: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path() == "/articles/create")
        .map(|r| String::from_utf8_lossy(&r.body).to_string())
        .collect();
    assert_eq!(bodies.len(), 2);
    assert!(
        !bodies[0].contains("filename="),
        "file part must be omitted when no file is provided"
    );
    assert!(
        bodies[1].contains("filename=\"souris.png\""),
        "file part must carry the upload when present"
    );
    assert!(bodies[1].contains("name=\"image\""));
}

#[tokio::test]
async fn login_attaches_bearer_token_to_subsequent_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": {
                "id": 2,
                "nom": "Durand",
                "prenom": "Alice",
                "email": "alice@example.test",
                "roles": [{"id": 1, "roleName": "admin", "utilisateurId": 2, "entrepriseId": 1}]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/showAll"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = StockClient::new(server.uri()).expect("client creation failed");
    let response = client
        .login("alice@example.test", "secret")
        .await
        .expect("login");
    assert_eq!(response.user.roles[0].role_name, "admin");

    let service = ArticleService::new(client, QueryCache::default());
    // Only succeeds if the Authorization header matched.
    service.get_all().await.expect("authorized fetch");
}

#[tokio::test]
async fn rejected_login_is_validation_not_session_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "bad credentials"})),
        )
        .mount(&server)
        .await;

    let mut client = StockClient::new(server.uri()).expect("client creation failed");
    let err = client
        .login("alice@example.test", "wrong")
        .await
        .expect_err("login must fail");
    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn network_failure_maps_to_network_error() {
    // Port from a server that is immediately shut down. A non-pooled
    // server is required: pooled servers from `MockServer::start()` keep
    // their listener alive after drop.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = StockClient::new(uri).expect("client creation failed");
    let service = ArticleService::new(client, QueryCache::default());
    let err = service.get_all().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(err.redirect_target(), None);
}
