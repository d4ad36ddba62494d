use gestock_cli::api::client::StockClient;
use gestock_cli::api::models::{LigneCommandeClientRequest, LigneCommandeFournisseurRequest};
use gestock_cli::core::cache::QueryCache;
use gestock_cli::core::services::commande_client_service::CommandeClientService;
use gestock_cli::core::services::commande_fournisseur_service::CommandeFournisseurService;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ligne_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "article": {
            "id": 7,
            "codeArticle": "ART-007",
            "designation": "Clavier mécanique",
            "prixUnitaire": 50.0,
            "tauxTva": 20.0,
            "prixUnitaireTtc": 60.0,
            "photo": null,
            "categorie": {"id": 1, "code": "INF", "designation": "Informatique", "entrepriseId": 1}
        },
        "quantite": 2.0,
        "prixUnitaire": 50.0,
        "entrepriseId": 1
    })
}

fn ligne_request() -> LigneCommandeClientRequest {
    LigneCommandeClientRequest {
        commande_client_id: 4,
        article_id: 7,
        quantite: 2.0,
        prix_unitaire: 50.0,
        entreprise_id: 1,
    }
}

#[tokio::test]
async fn customer_order_lines_use_nested_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commandesclients/4/lignes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ligne_json(11)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/commandesclients/4/lignes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ligne_json(12)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/commandesclients/4/lignes/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ligne_json(12)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/commandesclients/4/lignes/12"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/commandesclients/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = StockClient::new(server.uri()).expect("client creation failed");
    let service = CommandeClientService::new(client, QueryCache::default());

    let lignes = service.get_lignes(4).await.expect("list lines");
    assert_eq!(lignes.len(), 1);
    assert_eq!(lignes[0].article.code_article, "ART-007");

    let added = service.add_ligne(4, &ligne_request()).await.expect("add");
    assert_eq!(added.id, 12);

    service
        .update_ligne(4, 12, &ligne_request())
        .await
        .expect("update");
    service.remove_ligne(4, 12).await.expect("remove");
}

#[tokio::test]
async fn clearing_customer_order_lines_hits_collection_route() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/commandesclients/4/lignes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/commandesclients/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = StockClient::new(server.uri()).expect("client creation failed");
    let service = CommandeClientService::new(client, QueryCache::default());
    service.remove_all_lignes(4).await.expect("clear lines");
}

#[tokio::test]
async fn supplier_order_lines_are_a_top_level_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lignecommandefournisseurs/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ligne_json(21)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/lignecommandefournisseurs/update/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ligne_json(21)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lignecommandefournisseurs/delete/21"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/commandesfournisseurs/showAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = StockClient::new(server.uri()).expect("client creation failed");
    let service = CommandeFournisseurService::new(client, QueryCache::default());

    let request = LigneCommandeFournisseurRequest {
        commande_fournisseur_id: 9,
        article_id: 7,
        quantite: 2.0,
        prix_unitaire: 50.0,
        entreprise_id: 1,
    };
    let added = service.add_ligne(&request).await.expect("add");
    assert_eq!(added.id, 21);

    service.update_ligne(21, &request).await.expect("update");
    service.remove_ligne(21).await.expect("remove");
}
