use crate::ErrorCode;

#[test]
fn depth_page_names_the_rule() {
    assert!(ErrorCode::E3003
        .docs()
        .contains("Inconsistent Inner Loop Depth"));
}

#[test]
fn every_page_starts_with_its_code() {
    for code in ErrorCode::ALL {
        assert!(
            code.docs().starts_with(&format!("# {code}: ")),
            "{code} documentation has the wrong heading"
        );
    }
}

#[test]
fn internal_error_is_documented() {
    assert!(ErrorCode::E9001.docs().starts_with("# E9001"));
}
