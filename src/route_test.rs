use super::*;

#[test]
fn text_param_is_percent_encoded() {
    let route = Route::new(Method::GET, "/bots/{id}", &[("id", "a b".into())]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/bots/a%20b");
}

#[test]
fn slash_in_text_param_does_not_split_path() {
    let route = Route::new(Method::GET, "/bots/{id}/votes", &[("id", "x/y?z".into())]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/bots/x%2Fy%3Fz/votes");
}

#[test]
fn unreserved_characters_pass_through() {
    let route = Route::new(Method::GET, "/users/{name}", &[("name", "a-b.c_d~e".into())]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/users/a-b.c_d~e");
}

#[test]
fn raw_params_are_inserted_verbatim() {
    let route = Route::new(
        Method::GET,
        "/bots/{id}/page/{page}/{nsfw}",
        &[("id", 816_238_712_u64.into()), ("page", 3_i32.into()), ("nsfw", false.into())],
    )
    .unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/bots/816238712/page/3/false");
}

#[test]
fn raw_variant_skips_encoding() {
    let route = Route::new(Method::GET, "/q/{expr}", &[("expr", ParamValue::Raw("a b".into()))]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/q/a b");
}

#[test]
fn repeated_placeholder_uses_same_value() {
    let route = Route::new(Method::GET, "/{id}/{id}", &[("id", "x".into())]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/x/x");
}

#[test]
fn missing_param_is_formatting_error() {
    let err = Route::new(Method::GET, "/bots/{id}/{page}", &[("id", "1".into())]).unwrap_err();
    assert_eq!(err, RouteError::MissingParameter("page".into()));
    assert!(err.to_string().contains("page"));
}

#[test]
fn empty_params_leave_template_untouched() {
    let route = Route::new(Method::GET, "/search/{raw}", &[]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/search/{raw}");
}

#[test]
fn doubled_braces_are_literal_when_substituting() {
    let route = Route::new(Method::GET, "/{{x}}/{id}", &[("id", "7".into())]).unwrap();
    assert_eq!(route.url(), "https://api.betterbots.gg/{x}/7");
}

#[test]
fn stray_closing_brace_is_rejected() {
    let err = Route::new(Method::GET, "/a}/{id}", &[("id", "7".into())]).unwrap_err();
    assert!(matches!(err, RouteError::UnbalancedBrace(_)));
}

#[test]
fn unterminated_placeholder_is_rejected() {
    let err = Route::new(Method::GET, "/bots/{id", &[("id", "7".into())]).unwrap_err();
    assert!(matches!(err, RouteError::UnbalancedBrace(_)));
}

#[test]
fn with_base_uses_given_origin() {
    let route = Route::with_base("http://127.0.0.1:9000", Method::POST, "/bots/{id}", &[("id", "1".into())]).unwrap();
    assert_eq!(route.url(), "http://127.0.0.1:9000/bots/1");
    assert_eq!(route.method(), &Method::POST);
    assert_eq!(route.path(), "/bots/{id}");
}
