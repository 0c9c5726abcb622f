use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_contact(data: &Value) -> io::Result<String> {
    let payload = data
        .get("payload")
        .ok_or_else(|| io::Error::other("contact output requires payload"))?;
    let field = |key: &str| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let webhook = data
        .get("webhook_url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut lines = vec![
        "Your message is ready to send.".to_string(),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Name:", field("name")),
            ("Email:", field("email")),
            ("Message:", field("message")),
            ("Webhook:", webhook),
        ],
        2,
    ));
    lines.push(String::new());
    lines.push("Delivery is handled by the webhook owner; nothing was sent.".to_string());
    Ok(lines.join("\n"))
}
