use serenity::all::Role;

/// Creates a Serenity Role with no permissions.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (invalid test data)
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: i16) -> Role {
    create_test_role_with_permissions(role_id, name, color, position, 0)
}

/// Creates a Serenity Role with the given permission bits.
///
/// Use `1 << 3` for the Administrator permission.
pub fn create_test_role_with_permissions(
    role_id: u64,
    name: &str,
    color: u32,
    position: i16,
    permissions: u64,
) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": color,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.to_string(),
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
