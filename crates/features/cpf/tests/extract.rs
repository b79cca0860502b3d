use valida_cpf::extract::{Origin, extract, reads_body};
use valida_cpf::validate_and_format;

fn verdict_for(query: Option<&str>, method: &str, body: Option<&str>) -> valida_cpf::Verdict {
    validate_and_format(extract(query, method, body).value())
}

#[test]
fn json_body_without_query_is_validated() {
    let verdict = verdict_for(None, "POST", Some(r#"{"Cpf":"52998224725"}"#));
    assert!(verdict.is_valid());
    assert_eq!(verdict.formatted().as_deref(), Some("529.982.247-25"));
}

#[test]
fn malformed_json_is_treated_as_text() {
    let candidate = extract(None, "POST", Some("{not json"));
    assert_eq!(candidate.origin(), Origin::RawText);
    assert_eq!(candidate.value(), "{not json");

    let verdict = validate_and_format(candidate.value());
    assert!(!verdict.is_valid());
    assert_eq!(verdict.message(), "must contain exactly 11 digits, you supplied 0");
}

#[test]
fn plain_text_body_is_trimmed() {
    let candidate = extract(None, "POST", Some("  111.444.777-35 \n"));
    assert_eq!(candidate.value(), "111.444.777-35");
    assert!(validate_and_format(candidate.value()).is_valid());
}

#[test]
fn query_wins_over_body() {
    let candidate = extract(Some("52998224725"), "POST", Some(r#"{"Cpf":"11144477735"}"#));
    assert_eq!(candidate.origin(), Origin::Query);

    let verdict = validate_and_format(candidate.value());
    assert_eq!(verdict.formatted().as_deref(), Some("529.982.247-25"));
}

#[test]
fn get_ignores_the_body() {
    assert!(!reads_body(None, "GET"));
    let candidate = extract(None, "GET", Some("52998224725"));
    assert_eq!(candidate.origin(), Origin::Absent);
    assert_eq!(validate_and_format(candidate.value()).message(), "no CPF supplied");
}

#[test]
fn other_methods_yield_nothing() {
    assert_eq!(extract(None, "PUT", Some("52998224725")).origin(), Origin::Absent);
}

#[test]
fn empty_post_is_missing() {
    let verdict = verdict_for(None, "POST", Some(""));
    assert_eq!(verdict.message(), "no CPF supplied");
}
