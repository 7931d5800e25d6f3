//! Integration tests for the models API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::{UNREACHABLE_HOST, get, json_body, test_app};

    /// Tests listing the models offered by the completion service
    #[tokio::test]
    async fn it_lists_models() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object":"list","data":[{"id":"mistral-7b"},{"id":"local-model"}]}"#)
            .create_async()
            .await;
        let (app, _dir) = test_app(&server.url());

        let response = get(&app, "/api/models").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        mock.assert_async().await;
        assert_eq!(body["models"], serde_json::json!(["mistral-7b", "local-model"]));
        assert_eq!(body["default_model"], "local-model");
    }

    /// Tests an unreachable service yields the "unavailable" entry
    #[tokio::test]
    async fn it_lists_unavailable_when_unreachable() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        let response = get(&app, "/api/models").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["models"], serde_json::json!(["unavailable"]));
    }
}
