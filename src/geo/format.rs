//! Reply formatting for geolocation lookups.

use super::types::{GeoOutcome, GeoResult};
use crate::error_handling::LookupError;
use crate::messages;
use crate::validation::PublicIp;

/// Text to send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedReply {
    pub text: String,
    /// Send with HTML parse mode and link previews disabled.
    pub rich: bool,
}

impl FormattedReply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rich: false,
        }
    }

    pub fn rich(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rich: true,
        }
    }
}

/// Turns the outcome of a lookup into the reply for the user.
///
/// Every branch yields a fixed text: error details only go to the log.
pub fn format_outcome(ip: &PublicIp, outcome: Result<GeoOutcome, LookupError>) -> FormattedReply {
    match outcome {
        Ok(GeoOutcome::Located(result)) => FormattedReply::rich(format_geo_result(ip, &result)),
        Ok(GeoOutcome::ServiceFailure { message }) => {
            let reason = message.as_deref().unwrap_or(messages::UNKNOWN_ERROR);
            FormattedReply::rich(format!(
                "{}{}",
                messages::SERVICE_FAILURE_PREFIX,
                escape_html(reason)
            ))
        }
        Err(LookupError::Transport(_) | LookupError::Status(_)) => {
            FormattedReply::rich(messages::CONNECTION_FAILURE)
        }
        Err(LookupError::Parse(_)) => FormattedReply::rich(messages::PROCESSING_FAILURE),
    }
}

/// Renders a located IP as labeled lines, with a map link for the coordinates.
pub fn format_geo_result(ip: &PublicIp, result: &GeoResult) -> String {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| messages::NOT_SPECIFIED.to_string())
    };

    let coordinates = match result.coordinates {
        // `{:?}` keeps the fractional part of whole degrees: 52.0, not 52
        Some((lat, lon)) => {
            format!("<a href=\"https://maps.google.com/?q={lat:?},{lon:?}\">{lat:?}, {lon:?}</a>")
        }
        None => messages::NO_DATA.to_string(),
    };

    format!(
        "{} <b>{}</b>\n\n{} {}\n{} {}\n{} {}\n{} {}",
        messages::RESULT_HEADER,
        ip,
        messages::LABEL_COUNTRY,
        field(&result.country),
        messages::LABEL_CITY,
        field(&result.city),
        messages::LABEL_REGION,
        field(&result.region),
        messages::LABEL_COORDINATES,
        coordinates,
    )
}

/// Escapes the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{classify, IpClassification};

    fn ip(text: &str) -> PublicIp {
        match classify(text) {
            IpClassification::Public(ip) => ip,
            other => panic!("{text} should be public, got {other:?}"),
        }
    }

    fn mountain_view() -> GeoResult {
        GeoResult {
            country: Some("USA".into()),
            city: Some("Mountain View".into()),
            region: Some("California".into()),
            coordinates: Some((37.4, -122.1)),
        }
    }

    #[test]
    fn test_located_reply_has_all_labels_and_map_link() {
        let reply = format_outcome(&ip("8.8.8.8"), Ok(GeoOutcome::Located(mountain_view())));
        assert!(reply.rich);
        assert!(reply.text.contains("<b>8.8.8.8</b>"));
        assert!(reply.text.contains("🌍 Страна: USA"));
        assert!(reply.text.contains("🏙 Город: Mountain View"));
        assert!(reply.text.contains("📍 Регион: California"));
        assert!(reply
            .text
            .contains("<a href=\"https://maps.google.com/?q=37.4,-122.1\">37.4, -122.1</a>"));
    }

    #[test]
    fn test_exact_layout() {
        let text = format_geo_result(&ip("8.8.8.8"), &mountain_view());
        assert_eq!(
            text,
            "📍 Информация по IP: <b>8.8.8.8</b>\n\n\
             🌍 Страна: USA\n\
             🏙 Город: Mountain View\n\
             📍 Регион: California\n\
             🗺 Координаты: <a href=\"https://maps.google.com/?q=37.4,-122.1\">37.4, -122.1</a>"
        );
    }

    #[test]
    fn test_whole_degree_coordinates_keep_decimal_point() {
        let result = GeoResult {
            coordinates: Some((52.0, 13.0)),
            ..mountain_view()
        };
        let text = format_geo_result(&ip("8.8.8.8"), &result);
        assert!(text.contains(
            "<a href=\"https://maps.google.com/?q=52.0,13.0\">52.0, 13.0</a>"
        ));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let text = format_geo_result(&ip("1.2.3.4"), &GeoResult::default());
        assert!(text.contains("🌍 Страна: Не указано"));
        assert!(text.contains("🏙 Город: Не указано"));
        assert!(text.contains("📍 Регион: Не указано"));
        assert!(text.contains("🗺 Координаты: Нет данных"));
        assert!(!text.contains("maps.google.com"));
    }

    #[test]
    fn test_service_failure_embeds_message() {
        let reply = format_outcome(
            &ip("8.8.8.8"),
            Ok(GeoOutcome::ServiceFailure {
                message: Some("invalid query".into()),
            }),
        );
        assert_eq!(
            reply.text,
            "❌ Не удалось определить местоположение: invalid query"
        );
        assert!(!reply.text.contains(messages::LABEL_COORDINATES));
    }

    #[test]
    fn test_service_failure_without_message() {
        let reply = format_outcome(
            &ip("8.8.8.8"),
            Ok(GeoOutcome::ServiceFailure { message: None }),
        );
        assert!(reply.text.ends_with(messages::UNKNOWN_ERROR));
    }

    #[test]
    fn test_status_error_is_connection_failure() {
        let reply = format_outcome(&ip("8.8.8.8"), Err(LookupError::Status(502)));
        assert_eq!(reply.text, messages::CONNECTION_FAILURE);
        assert!(!reply.text.contains("502"));
    }

    #[test]
    fn test_parse_error_is_processing_failure() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let reply = format_outcome(&ip("8.8.8.8"), Err(LookupError::Parse(err)));
        assert_eq!(reply.text, messages::PROCESSING_FAILURE);
    }

    #[test]
    fn test_service_strings_are_escaped() {
        let result = GeoResult {
            city: Some("<script>&".into()),
            ..Default::default()
        };
        let text = format_geo_result(&ip("8.8.8.8"), &result);
        assert!(text.contains("&lt;script&gt;&amp;"));
        assert!(!text.contains("<script>"));
    }

    #[test]
    fn test_escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("Москва"), "Москва");
        assert_eq!(escape_html("a \"b\" <c>"), "a &quot;b&quot; &lt;c&gt;");
    }
}
