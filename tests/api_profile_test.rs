//! Integration tests for the profile and prompt API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::{UNREACHABLE_HOST, body_to_string, get, json_body, post_json, test_app};

    /// Tests loading a profile that was never saved returns defaults
    #[tokio::test]
    async fn it_gets_default_profile() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        let response = get(&app, "/api/profile/character").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "");
        assert_eq!(body["speaking_style"], "");
    }

    /// Tests loading default settings
    #[tokio::test]
    async fn it_gets_default_settings() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        let body = json_body(get(&app, "/api/profile/settings").await).await;
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 1000);
    }

    /// Tests saving then loading a profile
    #[tokio::test]
    async fn it_saves_and_loads_profile() {
        let (app, dir) = test_app(UNREACHABLE_HOST);

        let response = post_json(
            &app,
            "/api/profile/user",
            json!({"name": "Theo", "interests": "Old maps"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"success\":true"));

        let body = json_body(get(&app, "/api/profile/user").await).await;
        assert_eq!(body["name"], "Theo");
        assert_eq!(body["interests"], "Old maps");
        assert_eq!(body["goals"], "");

        assert!(dir.path().join("profiles").join("user.json").exists());
    }

    /// Tests a second save overwrites the first
    #[tokio::test]
    async fn it_overwrites_profile_on_save() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        post_json(&app, "/api/profile/scenario", json!({"location": "Harbor"})).await;
        post_json(&app, "/api/profile/scenario", json!({"time": "Dusk"})).await;

        let body = json_body(get(&app, "/api/profile/scenario").await).await;
        assert_eq!(body["location"], "");
        assert_eq!(body["time"], "Dusk");
    }

    /// Tests settings outside the usual range are stored unchanged
    #[tokio::test]
    async fn it_keeps_out_of_range_settings() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        let response = post_json(
            &app,
            "/api/profile/settings",
            json!({"temperature": 1.5, "max_tokens": 0}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(get(&app, "/api/profile/settings").await).await;
        assert_eq!(body["temperature"], 1.5);
        assert_eq!(body["max_tokens"], 0);
    }

    /// Tests an unknown profile kind returns 404
    #[tokio::test]
    async fn it_returns_404_for_unknown_kind() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        let response = get(&app, "/api/profile/weather").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = post_json(&app, "/api/profile/weather", json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests a record with the wrong field types is rejected
    #[tokio::test]
    async fn it_returns_422_for_invalid_settings() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        let response = post_json(
            &app,
            "/api/profile/settings",
            json!({"temperature": "warm"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    /// Tests a malformed file on disk loads as defaults
    #[tokio::test]
    async fn it_treats_malformed_file_as_absent() {
        let (app, dir) = test_app(UNREACHABLE_HOST);
        let profiles = dir.path().join("profiles");
        std::fs::create_dir_all(&profiles).unwrap();
        std::fs::write(profiles.join("character.json"), "{\"name\": ").unwrap();

        let response = get(&app, "/api/profile/character").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "");
    }

    /// Tests a file that isn't UTF-8 loads as defaults everywhere it is read
    #[tokio::test]
    async fn it_treats_undecodable_file_as_absent() {
        let (app, dir) = test_app(UNREACHABLE_HOST);
        let profiles = dir.path().join("profiles");
        std::fs::create_dir_all(&profiles).unwrap();
        std::fs::write(profiles.join("scenario.json"), [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        let response = get(&app, "/api/profile/scenario").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["location"], "");

        let response = get(&app, "/api/prompt").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = post_json(&app, "/api/chat", json!({"message": "hello"})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let reply = body["turn"]["assistant"].as_str().unwrap();
        assert!(reply.starts_with("Error: could not reach completion service"));
    }

    /// Tests the prompt preview reflects the latest saved profiles
    #[tokio::test]
    async fn it_previews_system_prompt() {
        let (app, _dir) = test_app(UNREACHABLE_HOST);

        post_json(
            &app,
            "/api/profile/character",
            json!({"name": "Captain Mira", "fears": "Deep water"}),
        )
        .await;
        post_json(&app, "/api/profile/scenario", json!({"location": "The docks"})).await;

        let body = json_body(get(&app, "/api/prompt").await).await;
        let prompt = body["system_prompt"].as_str().unwrap();
        assert!(prompt.contains("Name: Captain Mira"));
        assert!(prompt.contains("Fears: Deep water"));
        assert!(prompt.contains("Location: The docks"));

        post_json(&app, "/api/profile/character", json!({"name": "Orla"})).await;
        let body = json_body(get(&app, "/api/prompt").await).await;
        let prompt = body["system_prompt"].as_str().unwrap();
        assert!(prompt.contains("Name: Orla"));
        assert!(!prompt.contains("Captain Mira"));
    }
}
