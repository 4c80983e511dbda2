use serenity::all::User;

/// Creates a Serenity User without an avatar.
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (invalid test data)
pub fn create_test_user(user_id: u64, username: &str, bot: bool) -> User {
    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": bot,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}
