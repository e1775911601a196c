use super::*;

#[test]
fn require_text_rejects_blank_and_whitespace() {
    assert!(require_text("Condomínio Alpha", "nome vazio").is_ok());

    for raw in ["", "   ", "\t\n"] {
        let err = require_text(raw, "nome vazio").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "nome vazio"));
    }
}

#[test]
fn reject_blank_allows_absent_values() {
    assert!(reject_blank(None, "x").is_ok());
    assert!(reject_blank(Some("ok"), "x").is_ok());
    assert!(reject_blank(Some(" "), "x").is_err());
}

#[test]
fn not_found_display_names_entity_and_id() {
    let err = ServiceError::NotFound { entity: Entity::Condominio, id: 7 };
    assert_eq!(err.to_string(), "Condomínio 7 não encontrado");
}

#[test]
fn not_found_display_agrees_with_feminine_entities() {
    let err = ServiceError::NotFound { entity: Entity::Ocorrencia, id: 9 };
    assert_eq!(err.to_string(), "Ocorrência 9 não encontrada");

    let err = ServiceError::NotFound { entity: Entity::AreaComum, id: 5 };
    assert_eq!(err.to_string(), "Área comum 5 não encontrada");
}

#[test]
fn row_not_found_is_not_a_unique_violation() {
    assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
}
