/// Default naming transform for tables, views and enums.
///
/// Converts a raw catalog name to PascalCase, splitting on anything that is
/// not alphanumeric: `user_accounts` becomes `UserAccounts`.
pub fn default_entity_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        } else {
            upper_next = true;
        }
    }

    out
}

/// Default naming transform for enums.
///
/// Same splitting rules as [`default_entity_name`], but the raw name's
/// leading case is preserved: `mood` stays `mood`, `order_status` becomes
/// `orderStatus`, `Mood` stays `Mood`. Keeps default-configuration hashed
/// names recognizable next to the catalog name they came from.
pub fn default_enum_name(name: &str) -> String {
    let pascal = default_entity_name(name);
    let raw_first = name.chars().find(|ch| ch.is_alphanumeric());

    match (pascal.chars().next(), raw_first) {
        (Some(first), Some(raw)) if raw.is_lowercase() => {
            let mut out = String::with_capacity(pascal.len());
            out.extend(first.to_lowercase());
            out.push_str(&pascal[first.len_utf8()..]);
            out
        }
        _ => pascal,
    }
}

/// Default model naming transform: the declared name as-is.
pub fn default_model_name(name: &str) -> String {
    name.to_string()
}
