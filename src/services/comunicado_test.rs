use super::*;

#[test]
fn dto_uses_java_style_field_names() {
    let dto = ComunicadoDto::new(1, "Condomínio Alpha", "Mensagem de teste");
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json, serde_json::json!({"id": 1, "condominioNome": "Condomínio Alpha", "mensagem": "Mensagem de teste"}));
}

#[test]
fn dto_id_is_optional_on_input() {
    let dto: ComunicadoDto = serde_json::from_str(r#"{"condominioNome":"Beta","mensagem":"Oi"}"#).unwrap();
    assert_eq!(dto.id, 0);
    assert!(dto.validate().is_ok());
}

#[test]
fn validate_requires_building_and_message() {
    let err = ComunicadoDto::new(0, "", "Mensagem").validate().unwrap_err();
    assert_eq!(err.to_string(), condominio::NOME_VAZIO);

    let err = ComunicadoDto::new(0, "Alpha", " ").validate().unwrap_err();
    assert_eq!(err.to_string(), MENSAGEM_VAZIA);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn comunicado_send_update_delete() {
    use crate::services::condominio::{CondominioDto, CondominioService, PgCondominioService};

    let pool = crate::state::test_helpers::integration_pool().await;
    PgCondominioService::new(pool.clone())
        .create(CondominioDto { nome: "Alpha".into(), endereco: "Rua X".into() })
        .await
        .unwrap();
    let svc = PgComunicadoService::new(pool);

    let missing = svc.send(ComunicadoDto::new(0, "Gama", "Oi")).await.unwrap_err();
    assert!(matches!(missing, ServiceError::NotFoundMessage(_)));

    let sent = svc.send(ComunicadoDto::new(0, "Alpha", "Reunião às 19h")).await.unwrap();
    assert_eq!(sent.condominio_nome, "Alpha");

    let updated = svc.update(sent.id, "Reunião às 20h".into()).await.unwrap();
    assert_eq!(updated.mensagem, "Reunião às 20h");
    assert_eq!(svc.list().await.unwrap(), vec![updated]);

    svc.delete(sent.id).await.unwrap();
    let err = svc.delete(sent.id).await.unwrap_err();
    assert_eq!(err.to_string(), NAO_ENCONTRADO);
}
