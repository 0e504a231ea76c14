use super::*;
use serde_json::json;

#[test]
fn json_content_type_parses_structured_value() {
    let body = ResponseBody::decode(Some("application/json"), r#"{"ok":true}"#.into()).unwrap();
    assert_eq!(body, ResponseBody::Json(json!({ "ok": true })));
}

#[test]
fn other_content_type_keeps_text() {
    let body = ResponseBody::decode(Some("text/plain"), "hello".into()).unwrap();
    assert_eq!(body, ResponseBody::Text("hello".into()));
}

#[test]
fn content_type_match_is_exact() {
    // Parameters on the media type disable JSON decoding.
    let body = ResponseBody::decode(Some("application/json; charset=utf-8"), r#"{"ok":true}"#.into()).unwrap();
    assert_eq!(body.as_text(), Some(r#"{"ok":true}"#));
}

#[test]
fn missing_content_type_keeps_text() {
    let body = ResponseBody::decode(None, "{}".into()).unwrap();
    assert!(matches!(body, ResponseBody::Text(_)));
}

#[test]
fn malformed_json_is_decode_error() {
    let err = ResponseBody::decode(Some("application/json"), "not json".into()).unwrap_err();
    assert!(matches!(err, HttpError::Decode(_)));
}

#[test]
fn lossy_decode_keeps_unparsable_json_as_text() {
    assert_eq!(ResponseBody::decode_lossy(Some("application/json"), String::new()), ResponseBody::Text(String::new()));
    assert_eq!(
        ResponseBody::decode_lossy(Some("application/json"), "<html>Bad Gateway</html>".into()),
        ResponseBody::Text("<html>Bad Gateway</html>".into())
    );
}

#[test]
fn lossy_decode_parses_valid_json() {
    let body = ResponseBody::decode_lossy(Some("application/json"), r#"{"message":"no"}"#.into());
    assert_eq!(body, ResponseBody::Json(json!({ "message": "no" })));
    assert_eq!(ResponseBody::decode_lossy(Some("text/plain"), "{}".into()), ResponseBody::Text("{}".into()));
}

#[test]
fn into_typed_reads_json_and_json_text() {
    #[derive(serde::Deserialize, Debug)]
    struct Profile {
        id: u64,
    }

    let from_json: Profile = ResponseBody::Json(json!({ "id": 5 })).into_typed().unwrap();
    assert_eq!(from_json.id, 5);

    let from_text: Profile = ResponseBody::Text(r#"{"id":6}"#.into()).into_typed().unwrap();
    assert_eq!(from_text.id, 6);

    let err = ResponseBody::Text("hello".into()).into_typed::<Profile>().unwrap_err();
    assert!(matches!(err, HttpError::Decode(_)));
}

#[test]
fn display_renders_json_compact_and_text_raw() {
    assert_eq!(ResponseBody::Json(json!({ "a": 1 })).to_string(), r#"{"a":1}"#);
    assert_eq!(ResponseBody::Text("plain".into()).to_string(), "plain");
}
