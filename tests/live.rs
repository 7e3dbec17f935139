//! Scenarios against a real Rooftop site.
//!
//! Ignored by default. Run with:
//! `url=https://<site>.rooftopcms.io token=<token> cargo test --test live -- --ignored`

use rooftop::{Client, ClientConfig, GetOptions};

fn credentials() -> (String, String) {
    let url = std::env::var("url").expect("set `url` to a live Rooftop site");
    let token = std::env::var("token").expect("set `token` to its API token");
    (url, token)
}

fn live_client() -> Client {
    let (url, token) = credentials();
    Client::new(ClientConfig::new(url, token)).unwrap()
}

#[tokio::test]
#[ignore]
async fn wrong_api_key_is_forbidden() {
    let (url, _) = credentials();
    let client = Client::new(ClientConfig::new(url, "bar")).unwrap();
    let err = client.resource("posts").get(&GetOptions::new()).await.unwrap_err();
    assert_eq!(err.status.code, Some(403));
}

#[tokio::test]
#[ignore]
async fn nonexistent_post_type_is_not_found() {
    let err = live_client()
        .resource("fooBars")
        .get(&GetOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.status.code, Some(404));
}

#[tokio::test]
#[ignore]
async fn gets_posts() {
    let res = live_client().resource("posts").get(&GetOptions::new()).await.unwrap();
    assert!(!res.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn per_page_limits_results() {
    let res = live_client()
        .resource("posts")
        .get(&GetOptions::new().param("per_page", 2))
        .await
        .unwrap();
    assert_eq!(res.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore]
async fn ordering_params_are_applied() {
    let res = live_client()
        .resource("posts")
        .get(
            &GetOptions::new()
                .param("per_page", 2)
                .param("order", "asc")
                .param("orderby", "id"),
        )
        .await
        .unwrap();
    assert_eq!(res.as_array().unwrap().len(), 2);
    assert_eq!(res[0]["id"], 1);
}
