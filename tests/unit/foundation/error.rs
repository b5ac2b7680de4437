use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BoothError::capture("x").to_string().contains("capture error:"));
    assert!(BoothError::render("x").to_string().contains("render error:"));
    assert!(BoothError::encode("x").to_string().contains("encode error:"));
    assert!(BoothError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("lens cap");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("lens cap"));
}
