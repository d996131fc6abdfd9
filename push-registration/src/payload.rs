use serde_json::Value;

use crate::models::NotificationPayload;

const APS_KEY: &str = "aps";
const ALERT_KEY: &str = "alert";

/// Flatten a raw notification dictionary into dotted string keys.
///
/// This is a fixed two-level walk, not a general recursive flattener:
/// - `aps.alert.<field>` for fields of a dictionary-valued `alert`,
/// - `aps.<field>` for every other non-dictionary field under `aps`
///   (a string-valued `alert` lands here as `aps.alert`),
/// - nested dictionaries under `aps` other than `alert` are dropped,
/// - all other top-level keys are copied verbatim with stringified values.
///
/// A non-dictionary `aps` value contributes nothing.
pub fn flatten(user_info: &Value) -> NotificationPayload {
    let mut parameters = NotificationPayload::new();

    let Some(map) = user_info.as_object() else {
        return parameters;
    };

    for (key, value) in map {
        if key == APS_KEY {
            let Some(aps) = value.as_object() else {
                continue;
            };

            for (aps_key, aps_value) in aps {
                match aps_value.as_object() {
                    Some(alert) if aps_key == ALERT_KEY => {
                        for (alert_key, alert_value) in alert {
                            parameters.insert(
                                format!("aps.alert.{alert_key}"),
                                stringify(alert_value),
                            );
                        }
                    }
                    // Other nested dictionaries under aps are dropped.
                    Some(_) => {}
                    None => {
                        parameters.insert(format!("aps.{aps_key}"), stringify(aps_value));
                    }
                }
            }
        } else {
            parameters.insert(key.clone(), stringify(value));
        }
    }

    parameters
}

/// String form of a payload value: strings verbatim, everything else as its
/// JSON rendering (`3`, `true`, `[1,2]`).
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_aps_alert_dictionary() {
        let user_info = json!({
            "aps": {
                "alert": { "body": "hi", "title": "t" },
                "badge": 3
            },
            "custom": "x"
        });

        let parameters = flatten(&user_info);

        assert_eq!(parameters["aps.alert.body"], "hi");
        assert_eq!(parameters["aps.alert.title"], "t");
        assert_eq!(parameters["aps.badge"], "3");
        assert_eq!(parameters["custom"], "x");
        assert_eq!(parameters.len(), 4);
    }

    #[test]
    fn test_flatten_string_alert() {
        let user_info = json!({ "aps": { "alert": "plain text" } });
        let parameters = flatten(&user_info);
        assert_eq!(parameters["aps.alert"], "plain text");
    }

    #[test]
    fn test_flatten_drops_non_alert_nested_dictionaries() {
        let user_info = json!({
            "aps": {
                "sound": { "critical": 1, "name": "default" },
                "badge": 1
            }
        });

        let parameters = flatten(&user_info);

        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters["aps.badge"], "1");
    }

    #[test]
    fn test_flatten_non_dictionary_aps_contributes_nothing() {
        let user_info = json!({ "aps": "oops", "k": "v" });
        let parameters = flatten(&user_info);
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters["k"], "v");
    }

    #[test]
    fn test_flatten_stringifies_scalars() {
        let user_info = json!({ "count": 7, "live": true });
        let parameters = flatten(&user_info);
        assert_eq!(parameters["count"], "7");
        assert_eq!(parameters["live"], "true");
    }

    #[test]
    fn test_flatten_non_object_input_is_empty() {
        assert!(flatten(&json!("nope")).is_empty());
        assert!(flatten(&json!(null)).is_empty());
    }
}
