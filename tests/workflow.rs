// Fluxos transacionais contra um Postgres real.
// Rodar com DATABASE_URL definido: `cargo test -- --ignored`

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use partner_backend::{
    common::error::AppError,
    config::{AppState, Settings},
    models::{
        account::{AdminCreateUserPayload, AdminUserDataPayload, InviteCollaboratorPayload},
        auth::{AccountStatus, Role, User},
        catalog::{
            AddCatalogProductPayload, AddCustomProductPayload, CatalogImagePayload, CatalogPiecePayload,
            CreateCatalogItemPayload,
        },
        commission::CommissionStatus,
        document::{ContractUpload, DocumentStatus, DocumentType, UsageRights},
        indication::{AddressPayload, ClientDataPayload, CreateIndicationPayload, IndicationStatus},
        office::{AdminOfficePayload, ContactPayload, ContactType},
        quote::{CreateQuotePayload, QuoteDecision, QuoteStatus},
    },
    services::notifier::LogNotifier,
};

fn state(pool: PgPool) -> AppState {
    let settings = Settings {
        database_url: String::new(),
        jwt_secret: "segredo-dos-testes".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        production: false,
        uploads_dir: std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4())),
        db_max_connections: 5,
    };
    AppState::with_pool(pool, &settings, Arc::new(LogNotifier))
}

async fn architect(state: &AppState, tag: &str) -> User {
    state
        .account_service
        .admin_create_user(AdminCreateUserPayload {
            user_data: AdminUserDataPayload {
                name: format!("Arquiteto {tag}"),
                email: format!("{tag}@escritorio.com"),
                password: "senha123".to_string(),
                cau: Some(format!("CAU-{tag}")),
                role: Role::Architect,
            },
            office_data: Some(AdminOfficePayload {
                name: format!("Escritório {tag}"),
                cnpj: format!("{:0>14}", tag.len() * 1000 + tag.as_bytes()[0] as usize),
                email: format!("contato-{tag}@escritorio.com"),
                phone: "11999990000".to_string(),
            }),
        })
        .await
        .unwrap()
}

fn indication_payload(email: &str, value: Option<i64>, pct: Option<i64>) -> CreateIndicationPayload {
    CreateIndicationPayload {
        client_data: ClientDataPayload { name: "Cliente Final".to_string(), document: None },
        address_data: AddressPayload {
            street: "Rua das Flores, 10".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zip_code: "01000-000".to_string(),
        },
        contact_data: vec![ContactPayload { contact_type: ContactType::EmailMain, value: email.to_string() }],
        project_value: value.map(|v| Decimal::new(v, 0)),
        requested_commission_percentage: pct.map(|p| Decimal::new(p, 0)),
    }
}

fn quote(amount: i64) -> CreateQuotePayload {
    CreateQuotePayload {
        amount: Decimal::new(amount, 0),
        notes: None,
        delivery_timeframe: Some("30 dias".to_string()),
        payment_conditions: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn concluding_creates_exactly_one_commission(pool: PgPool) {
    let state = state(pool.clone());
    let owner = architect(&state, "ana").await;

    let indication = state
        .indication_service
        .create(&owner, indication_payload("cliente@final.com", Some(10_000), Some(10)))
        .await
        .unwrap();

    // Duas conclusões concorrentes: a linha travada serializa as duas
    let (a, b) = tokio::join!(
        state.indication_service.update_status(indication.id, IndicationStatus::Concluded),
        state.indication_service.update_status(indication.id, IndicationStatus::Concluded),
    );

    let (winner, loser) = match (a, b) {
        (Ok(w), Err(l)) | (Err(l), Ok(w)) => (w, l),
        other => panic!("esperava exatamente um sucesso: {other:?}"),
    };

    let commission = winner.commission.expect("comissão criada na conclusão");
    assert_eq!(commission.amount, Decimal::new(100_000, 2));
    assert!(matches!(loser, AppError::InvalidTransition { entity: "indication", .. }));

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM commissions WHERE indication_id = $1")
        .bind(indication.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn concluding_without_project_value_creates_no_commission(pool: PgPool) {
    let state = state(pool);
    let owner = architect(&state, "bia").await;

    let indication = state
        .indication_service
        .create(&owner, indication_payload("outro@final.com", None, Some(10)))
        .await
        .unwrap();

    let change = state
        .indication_service
        .update_status(indication.id, IndicationStatus::Concluded)
        .await
        .unwrap();
    assert!(change.commission.is_none());
    assert_eq!(change.indication.status, IndicationStatus::Concluded);

    // Terminal: nada mais muda
    let again = state
        .indication_service
        .update_status(indication.id, IndicationStatus::Canceled)
        .await;
    assert!(matches!(again, Err(AppError::InvalidTransition { .. })));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn approving_a_quote_rejects_its_siblings(pool: PgPool) {
    let state = state(pool);
    let owner = architect(&state, "caio").await;

    let indication = state
        .indication_service
        .create(&owner, indication_payload("obra@final.com", Some(50_000), Some(5)))
        .await
        .unwrap();

    let first = state.quote_service.create_quote(indication.id, &quote(20_000)).await.unwrap();
    let second = state.quote_service.create_quote(indication.id, &quote(25_000)).await.unwrap();

    let detail = state.indication_service.detail(&owner, indication.id).await.unwrap();
    assert_eq!(detail.indication.status, IndicationStatus::InProgress);
    assert_eq!(detail.quotes.first().map(|q| q.id), Some(second.id));

    let outcome = state
        .quote_service
        .decide(&owner, first.id, QuoteDecision::Approved)
        .await
        .unwrap();
    assert_eq!(outcome.quote.status, QuoteStatus::Approved);
    assert_eq!(outcome.auto_rejected, vec![second.id]);

    let late = state.quote_service.decide(&owner, first.id, QuoteDecision::Rejected).await;
    match late {
        Err(AppError::InvalidTransition { current, .. }) => assert_eq!(current, "APPROVED"),
        other => panic!("esperava conflito: {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn foreign_and_missing_indications_look_the_same(pool: PgPool) {
    let state = state(pool);
    let owner = architect(&state, "davi").await;
    let stranger = architect(&state, "eva").await;

    let indication = state
        .indication_service
        .create(&owner, indication_payload("casa@final.com", None, None))
        .await
        .unwrap();

    let foreign = state.indication_service.detail(&stranger, indication.id).await;
    let missing = state.indication_service.detail(&stranger, Uuid::new_v4()).await;
    assert!(matches!(foreign, Err(AppError::Forbidden)));
    assert!(matches!(missing, Err(AppError::Forbidden)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn account_status_machine_is_enforced(pool: PgPool) {
    let state = state(pool);
    let user = architect(&state, "fabi").await;
    assert_eq!(user.status, AccountStatus::Active);

    let user = state
        .account_service
        .update_status(user.id, AccountStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(user.status, AccountStatus::Inactive);

    let back = state
        .account_service
        .update_status(user.id, AccountStatus::PendingApproval)
        .await;
    assert!(matches!(back, Err(AppError::InvalidTransition { entity: "user", .. })));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn only_managers_invite_and_emails_are_unique(pool: PgPool) {
    let state = state(pool);
    let manager = architect(&state, "gui").await;

    let collaborator = state
        .account_service
        .invite_collaborator(
            &manager,
            InviteCollaboratorPayload {
                name: "Colaboradora".to_string(),
                email: "colab@escritorio.com".to_string(),
                password: "senha123".to_string(),
                cau: Some(String::new()),
            },
        )
        .await
        .unwrap();
    assert_eq!(collaborator.office_id, manager.office_id);
    assert!(collaborator.cau.is_none());

    let by_collaborator = state
        .account_service
        .invite_collaborator(
            &collaborator,
            InviteCollaboratorPayload {
                name: "Outro".to_string(),
                email: "outro@escritorio.com".to_string(),
                password: "senha123".to_string(),
                cau: None,
            },
        )
        .await;
    assert!(matches!(by_collaborator, Err(AppError::Forbidden)));

    let duplicate = state
        .account_service
        .invite_collaborator(
            &manager,
            InviteCollaboratorPayload {
                name: "Repetida".to_string(),
                email: "colab@escritorio.com".to_string(),
                password: "senha123".to_string(),
                cau: None,
            },
        )
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists("email"))));

    let team = state.account_service.list_team(&manager).await.unwrap();
    assert_eq!(team.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn paying_a_commission_is_a_one_way_step(pool: PgPool) {
    let state = state(pool);
    let owner = architect(&state, "hugo").await;

    let indication = state
        .indication_service
        .create(&owner, indication_payload("pago@final.com", Some(20_000), Some(5)))
        .await
        .unwrap();
    let commission = state
        .indication_service
        .update_status(indication.id, IndicationStatus::Concluded)
        .await
        .unwrap()
        .commission
        .expect("comissão criada na conclusão");
    assert_eq!(commission.status, CommissionStatus::Pending);
    assert!(commission.paid_at.is_none());

    let paid = state.commission_service.pay(commission.id).await.unwrap();
    assert_eq!(paid.status, CommissionStatus::Paid);
    assert!(paid.paid_at.is_some());
    assert_eq!(paid.amount, Decimal::new(100_000, 2));

    let again = state.commission_service.pay(commission.id).await;
    match again {
        Err(AppError::InvalidTransition { entity, current, .. }) => {
            assert_eq!(entity, "commission");
            assert_eq!(current, "PAID");
        }
        other => panic!("esperava conflito: {other:?}"),
    }

    let missing = state.commission_service.pay(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound("commission"))));
}

fn contract(name: &str, file_name: &str) -> ContractUpload {
    ContractUpload {
        document_name: name.to_string(),
        usage_rights: UsageRights::InternalUseOnly,
        original_file_name: Some(file_name.to_string()),
        bytes: b"%PDF-1.4 contrato".to_vec(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn contract_reupload_replaces_the_single_document(pool: PgPool) {
    let state = state(pool.clone());
    let user = architect(&state, "iris").await;

    let first = state
        .document_service
        .upload_contract(&user, contract("Contrato de Adesão", "contrato.pdf"))
        .await
        .unwrap();
    assert_eq!(first.doc_type, DocumentType::Contract);
    assert_eq!(first.status, DocumentStatus::PendingValidation);
    assert!(tokio::fs::try_exists(&first.storage_path).await.unwrap());

    sqlx::query("UPDATE documents SET status = 'VALIDATED' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();

    let second = state
        .document_service
        .upload_contract(&user, contract("Contrato Assinado v2", "scan.PNG"))
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.name, "Contrato Assinado v2");
    assert_eq!(second.status, DocumentStatus::PendingValidation);
    assert!(second.storage_path.ends_with("signed_contract.png"));

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn unknown_email_and_wrong_password_fail_alike(pool: PgPool) {
    let state = state(pool);
    architect(&state, "joao").await;

    let unknown = state.auth_service.login("ninguem@escritorio.com", "senha123").await;
    let wrong = state.auth_service.login("joao@escritorio.com", "errada").await;
    assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

    let (token, response) = state.auth_service.login("joao@escritorio.com", "senha123").await.unwrap();
    assert!(!token.is_empty());
    assert_eq!(response.status, AccountStatus::Active);
}

fn catalog_item(name: &str, sku: &str) -> CreateCatalogItemPayload {
    CreateCatalogItemPayload {
        name: name.to_string(),
        sku: sku.to_string(),
        description: None,
        base_price: Some(Decimal::new(1_850_000, 2)),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn catalog_sku_and_name_are_unique(pool: PgPool) {
    let state = state(pool);

    let item = state
        .catalog_service
        .create_item(catalog_item("  Cozinha Linear ", "COZ-01"))
        .await
        .unwrap();
    assert_eq!(item.name, "Cozinha Linear");

    let same_sku = state.catalog_service.create_item(catalog_item("Outra Cozinha", " COZ-01")).await;
    assert!(matches!(same_sku, Err(AppError::AlreadyExists("sku"))));

    let same_name = state.catalog_service.create_item(catalog_item("Cozinha Linear", "COZ-02")).await;
    assert!(matches!(same_name, Err(AppError::AlreadyExists("name"))));

    assert_eq!(state.catalog_service.list_items().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn catalog_item_collects_pieces_and_images(pool: PgPool) {
    let state = state(pool);
    let item = state.catalog_service.create_item(catalog_item("Closet", "CLO-01")).await.unwrap();

    let piece = CatalogPiecePayload {
        name: "Porta de correr".to_string(),
        quantity: 2,
        height: Decimal::new(2400, 1),
        width: Decimal::new(900, 1),
        depth: Decimal::new(18, 1),
    };
    state.catalog_service.add_piece(item.id, &piece).await.unwrap();

    let image = CatalogImagePayload { url: "https://cdn.exemplo.com/closet.jpg".to_string(), alt_text: None };
    let image = state.catalog_service.add_image(item.id, &image).await.unwrap();

    let detail = state.catalog_service.item_detail(item.id).await.unwrap();
    assert_eq!(detail.pieces.len(), 1);
    assert_eq!(detail.pieces[0].quantity, 2);
    assert_eq!(detail.images.len(), 1);

    state.catalog_service.delete_image(image.id).await.unwrap();
    let again = state.catalog_service.delete_image(image.id).await;
    assert!(matches!(again, Err(AppError::NotFound("catalogImage"))));

    let orphan = state.catalog_service.add_piece(Uuid::new_v4(), &piece).await;
    assert!(matches!(orphan, Err(AppError::NotFound("catalogItem"))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "precisa de um Postgres em DATABASE_URL"]
async fn products_only_go_into_own_projects(pool: PgPool) {
    let state = state(pool);
    let owner = architect(&state, "karla").await;
    let stranger = architect(&state, "leo").await;

    let item = state.catalog_service.create_item(catalog_item("Home Office", "HOM-01")).await.unwrap();
    let piece = CatalogPiecePayload {
        name: "Tampo".to_string(),
        quantity: 1,
        height: Decimal::new(18, 1),
        width: Decimal::new(1200, 1),
        depth: Decimal::new(600, 1),
    };
    state.catalog_service.add_piece(item.id, &piece).await.unwrap();

    let indication = state
        .indication_service
        .create(&owner, indication_payload("projeto@final.com", None, None))
        .await
        .unwrap();

    let added = state
        .catalog_service
        .add_catalog_product(
            &owner,
            indication.id,
            AddCatalogProductPayload { catalog_item_id: item.id, notes: Some("Nogueira".to_string()) },
        )
        .await
        .unwrap();
    assert_eq!(added.name, "Home Office");
    assert_eq!(added.catalog_item_id, Some(item.id));

    state
        .catalog_service
        .add_custom_product(
            &owner,
            indication.id,
            AddCustomProductPayload { name: "Aparador sob medida".to_string(), notes: None },
        )
        .await
        .unwrap();

    let foreign = state
        .catalog_service
        .add_catalog_product(
            &stranger,
            indication.id,
            AddCatalogProductPayload { catalog_item_id: item.id, notes: None },
        )
        .await;
    assert!(matches!(foreign, Err(AppError::Forbidden)));

    let missing = state
        .catalog_service
        .add_custom_product(
            &owner,
            Uuid::new_v4(),
            AddCustomProductPayload { name: "Qualquer".to_string(), notes: None },
        )
        .await;
    assert!(matches!(missing, Err(AppError::Forbidden)));

    let unknown_item = state
        .catalog_service
        .add_catalog_product(
            &owner,
            indication.id,
            AddCatalogProductPayload { catalog_item_id: Uuid::new_v4(), notes: None },
        )
        .await;
    assert!(matches!(unknown_item, Err(AppError::NotFound("catalogItem"))));

    let project = state.catalog_service.project(&owner, indication.id).await.unwrap();
    let names: Vec<_> = project.products.iter().map(|p| p.product.name.as_str()).collect();
    assert_eq!(names, ["Aparador sob medida", "Home Office"]);
    assert!(project.products[0].pieces.is_empty());
    assert_eq!(project.products[1].pieces.len(), 1);
    assert_eq!(project.catalog.len(), 1);

    let peek = state.catalog_service.project(&stranger, indication.id).await;
    assert!(matches!(peek, Err(AppError::Forbidden)));
}
