//! The admin product editor driving a live API server over HTTP.

use std::sync::{Arc, Mutex};

use storefront_admin::{
    AdminConfig, Confirmation, DeleteOutcome, EditorView, HttpProductApi, ImageFile, Navigator,
    NotificationSink, ProductApi, ProductEditor, SubmitOutcome, Toast, UploadOutcome,
};
use storefront_api::{app, AppState, ServerConfig};
use storefront_core::{Money, NewProduct};
use storefront_db::{Database, DbConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Screen {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Screen {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl NotificationSink for Screen {
    fn notify(&self, toast: Toast) {
        self.lines.lock().unwrap().push(format!("{:?}: {}", toast.kind, toast.message));
    }
}

impl Navigator for Screen {
    fn navigate(&self, route: &str) {
        self.lines.lock().unwrap().push(format!("-> {route}"));
    }
}

impl Confirmation for Screen {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

struct Server {
    db: Database,
    base_url: String,
    _uploads: TempDir,
}

async fn start_server() -> Server {
    let uploads = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = ServerConfig {
        uploads_dir: uploads.path().to_path_buf(),
        ..ServerConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(AppState::new(db.clone(), config));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Server {
        db,
        base_url: format!("http://{addr}"),
        _uploads: uploads,
    }
}

async fn seed_shirt(db: &Database) -> String {
    let apparel = db.categories().insert("Apparel").await.unwrap();
    let shirt = db
        .products()
        .insert(&NewProduct {
            name: "Shirt".to_string(),
            description: "Plain cotton shirt".to_string(),
            price: Money::from_major(20),
            category_id: apparel.id,
            quantity: 1,
            brand: "Acme".to_string(),
            image: None,
            count_in_stock: 5,
        })
        .await
        .unwrap();
    shirt.id
}

async fn editor_for(server: &Server, id: &str, screen: &Screen) -> ProductEditor {
    let mut config = AdminConfig::default();
    config.api.base_url = server.base_url.clone();
    let api: Arc<dyn ProductApi> = Arc::new(HttpProductApi::new(&config).unwrap());
    let view = EditorView {
        notifications: Arc::new(screen.clone()),
        navigator: Arc::new(screen.clone()),
        confirmation: Arc::new(screen.clone()),
    };

    let mut editor = ProductEditor::new(id, api, view, &config);
    editor.mount().await;
    editor
}

#[tokio::test]
async fn test_price_edit_round_trip() {
    let server = start_server().await;
    let id = seed_shirt(&server.db).await;
    let screen = Screen::default();
    let mut editor = editor_for(&server, &id, &screen).await;

    assert_eq!(editor.draft().price, "20");
    assert_eq!(editor.categories().len(), 1);
    assert_eq!(editor.category_options()[0].name, "Apparel");

    editor.draft_mut().set_price("25");
    assert_eq!(editor.submit().await, SubmitOutcome::Saved);
    assert_eq!(
        screen.lines(),
        vec![
            "Success: Product successfully updated".to_string(),
            "-> /admin/allproductslist".to_string(),
        ]
    );

    let stored = server.db.products().get_record(&id).await.unwrap().unwrap();
    assert_eq!(stored.price, Money::from_major(25));
    assert_eq!(stored.count_in_stock, 5);
    assert_eq!(stored.category_id(), editor.record().unwrap().category_id());
}

#[tokio::test]
async fn test_server_rejection_is_shown_verbatim() {
    let server = start_server().await;
    let id = seed_shirt(&server.db).await;
    let screen = Screen::default();
    let mut editor = editor_for(&server, &id, &screen).await;

    editor.draft_mut().set_name("  ");
    assert_eq!(
        editor.submit().await,
        SubmitOutcome::Rejected("name is required".to_string())
    );
    assert_eq!(screen.lines(), vec!["Error: name is required".to_string()]);
    assert_eq!(editor.draft().name, "  ");
}

#[tokio::test]
async fn test_upload_then_delete() {
    let server = start_server().await;
    let id = seed_shirt(&server.db).await;
    let screen = Screen::default();
    let mut editor = editor_for(&server, &id, &screen).await;

    let outcome = editor
        .upload_image(ImageFile::new("shirt.png", "image/png", b"png bytes".to_vec()))
        .await;
    let UploadOutcome::Uploaded(image) = outcome else {
        panic!("upload failed: {outcome:?}");
    };
    assert!(image.starts_with("/uploads/"));
    assert_eq!(editor.image_label(), image);

    let rejected = editor
        .upload_image(ImageFile::new("notes.txt", "text/plain", b"hi".to_vec()))
        .await;
    assert_eq!(rejected, UploadOutcome::Failed);
    assert_eq!(editor.draft().image, image);

    assert_eq!(editor.delete().await, DeleteOutcome::Deleted("Shirt".to_string()));
    assert!(server.db.products().get_record(&id).await.unwrap().is_none());
    assert_eq!(
        screen.lines(),
        vec![
            "Success: Image uploaded successfully".to_string(),
            "Error: Image upload failed. Try again.".to_string(),
            "Success: \"Shirt\" is deleted".to_string(),
            "-> /admin/allproductslist".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_server_reports_generically() {
    let screen = Screen::default();
    // A port nothing listens on any more
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let server = Server {
        db: Database::new(DbConfig::in_memory()).await.unwrap(),
        base_url: format!("http://{addr}"),
        _uploads: tempfile::tempdir().unwrap(),
    };
    let mut editor = editor_for(&server, "P1", &screen).await;

    assert!(editor.record().is_none());
    assert_eq!(editor.submit().await, SubmitOutcome::Failed);
    assert_eq!(
        screen.lines(),
        vec!["Error: Product update failed. Try again.".to_string()]
    );
}
