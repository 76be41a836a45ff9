//! Actix Web server exposing the map page, business photos, and UI assets.
//!
//! All state is read-only and built before the server starts; handlers only read
//! the pre-rendered page or files from fixed directories.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use actix_web::{App, HttpResponse, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;

/// Shared state backing HTTP handlers.
pub(crate) struct ServerState {
    pub(crate) page: String,
    pub(crate) photo_dir: PathBuf,
    pub(crate) assets_dir: PathBuf,
}

/// Register every route on an app or test service.
pub(crate) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_route))
        .route("/business_photo/{filename:.*}", web::get().to(photo_handler))
        .route("/assets/{filename:.*}", web::get().to(asset_handler));
}

/// Run the server on the current thread until it is stopped (Ctrl+C).
pub(crate) fn run(config: ServerConfig, page: String) -> Result<()> {
    for (label, dir) in [("photo", &config.photo_dir), ("asset", &config.assets_dir)] {
        if !dir.is_dir() {
            warn!(
                "{label} directory {} does not exist; its files will return 404",
                dir.display()
            );
        }
    }

    let state = web::Data::new(ServerState {
        page,
        photo_dir: config.photo_dir.clone(),
        assets_dir: config.assets_dir.clone(),
    });

    actix_web::rt::System::new().block_on(serve(config, state))
}

async fn serve(config: ServerConfig, state: web::Data<ServerState>) -> Result<()> {
    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
        .run();

    info!("Map available at http://{}:{}/", config.host, config.port);
    server.await.context("HTTP server error")
}

/// Serve the composed map page.
async fn index_route(state: web::Data<ServerState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.page.clone())
}

/// Serve a business photo by filename.
async fn photo_handler(
    filename: web::Path<String>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    serve_file(state.photo_dir.clone(), filename.into_inner()).await
}

/// Serve a stylesheet or icon from the assets directory.
async fn asset_handler(
    filename: web::Path<String>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    serve_file(state.assets_dir.clone(), filename.into_inner()).await
}

/// Read `filename` under `root` on the blocking pool; any miss is a 404.
async fn serve_file(root: PathBuf, filename: String) -> HttpResponse {
    let Some(path) = resolve_in(&root, &filename) else {
        debug!("rejected static path {filename:?}");
        return HttpResponse::NotFound().finish();
    };
    let content_type = content_type_for(&path);

    let read_path = path.clone();
    let read = web::block(move || {
        if !read_path.is_file() {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        fs::read(&read_path)
    })
    .await;

    match read {
        Ok(Ok(bytes)) => HttpResponse::Ok().content_type(content_type).body(bytes),
        Ok(Err(err)) => {
            if err.kind() == io::ErrorKind::NotFound {
                debug!("static file not found: {}", path.display());
            } else {
                warn!("failed to read {}: {err}", path.display());
            }
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            error!("blocking read of {} was cancelled: {err}", path.display());
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Join `filename` onto `root`, refusing anything that could leave `root`.
fn resolve_in(root: &Path, filename: &str) -> Option<PathBuf> {
    let relative = Path::new(filename);
    let mut components = relative.components().peekable();
    components.peek()?;
    if !components.all(|component| matches!(component, Component::Normal(_))) {
        return None;
    }
    Some(root.join(relative))
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{
        http::{StatusCode, header},
        test as actix_test,
    };
    use map_core::{BusinessRecord, Coordinates};
    use tempfile::{TempDir, tempdir};

    use super::*;

    struct Dirs {
        photos: TempDir,
        assets: TempDir,
    }

    fn dirs() -> Dirs {
        Dirs {
            photos: tempdir().unwrap(),
            assets: tempdir().unwrap(),
        }
    }

    fn state(dirs: &Dirs) -> web::Data<ServerState> {
        web::Data::new(ServerState {
            page: "<!doctype html><title>Mile End</title>".to_string(),
            photo_dir: dirs.photos.path().to_path_buf(),
            assets_dir: dirs.assets.path().to_path_buf(),
        })
    }

    #[actix_web::test]
    async fn index_serves_page() {
        let dirs = dirs();
        let app = actix_test::init_service(App::new().app_data(state(&dirs)).configure(routes)).await;

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let body = actix_test::read_body(resp).await;
        assert_eq!(&body[..], b"<!doctype html><title>Mile End</title>");
    }

    #[actix_web::test]
    async fn missing_photo_is_not_found() {
        let dirs = dirs();
        let app = actix_test::init_service(App::new().app_data(state(&dirs)).configure(routes)).await;

        let req = actix_test::TestRequest::get()
            .uri("/business_photo/doesnotexist.jpg")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // the server keeps answering after a miss
        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn existing_photo_returns_bytes() {
        let dirs = dirs();
        fs::write(dirs.photos.path().join("olimpico.jpg"), b"\xFF\xD8\xFFjpeg").unwrap();
        let app = actix_test::init_service(App::new().app_data(state(&dirs)).configure(routes)).await;

        let req = actix_test::TestRequest::get()
            .uri("/business_photo/olimpico.jpg")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/jpeg");
        let body = actix_test::read_body(resp).await;
        assert_eq!(&body[..], b"\xFF\xD8\xFFjpeg");
    }

    #[actix_web::test]
    async fn assets_are_served_from_their_own_directory() {
        let dirs = dirs();
        fs::write(dirs.assets.path().join("styles.css"), "body {}").unwrap();
        let app = actix_test::init_service(App::new().app_data(state(&dirs)).configure(routes)).await;

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/assets/styles.css").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );

        // photos are not reachable through the asset route
        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/business_photo/styles.css").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn directory_request_is_not_found() {
        let dirs = dirs();
        fs::create_dir(dirs.photos.path().join("nested")).unwrap();
        let app = actix_test::init_service(App::new().app_data(state(&dirs)).configure(routes)).await;

        let req = actix_test::TestRequest::get().uri("/business_photo/nested").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn traversal_outside_photo_dir_is_not_found() {
        let root = tempdir().unwrap();
        let photos = root.path().join("photos");
        let assets = root.path().join("assets");
        fs::create_dir(&photos).unwrap();
        fs::create_dir(&assets).unwrap();
        fs::write(root.path().join("secret.txt"), "do not serve").unwrap();
        fs::write(photos.join("ok.jpg"), b"jpeg").unwrap();

        let state = web::Data::new(ServerState {
            page: String::new(),
            photo_dir: photos,
            assets_dir: assets,
        });
        let app = actix_test::init_service(App::new().app_data(state).configure(routes)).await;

        for uri in [
            "/business_photo/..%2Fsecret.txt",
            "/business_photo/../secret.txt",
            "/business_photo/..%2F..%2Fetc%2Fpasswd",
            "/business_photo/%2Fetc%2Fpasswd",
            "/assets/..%2Fsecret.txt",
            "/assets/..%2Fphotos%2Fok.jpg",
        ] {
            let resp =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                    .await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/business_photo/ok.jpg").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn encoded_photo_url_reaches_its_file() {
        let dirs = dirs();
        fs::write(dirs.photos.path().join("a#b?.jpg"), b"jpeg").unwrap();
        let app = actix_test::init_service(App::new().app_data(state(&dirs)).configure(routes)).await;

        let mut record = BusinessRecord::new(0, "Cafe X", "coffee", Coordinates::new(45.52, -73.6));
        record.photo = Some("a#b?.jpg".into());
        let uri = record.photo_url().unwrap();

        let resp =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_test::read_body(resp).await;
        assert_eq!(&body[..], b"jpeg");
    }

    #[test]
    fn resolve_rejects_escaping_paths() {
        let root = Path::new("/srv/photos");
        assert_eq!(resolve_in(root, "a.jpg"), Some(PathBuf::from("/srv/photos/a.jpg")));
        assert_eq!(
            resolve_in(root, "2024/a.jpg"),
            Some(PathBuf::from("/srv/photos/2024/a.jpg"))
        );
        assert_eq!(resolve_in(root, ""), None);
        assert_eq!(resolve_in(root, "../secret"), None);
        assert_eq!(resolve_in(root, "a/../../secret"), None);
        assert_eq!(resolve_in(root, "/etc/passwd"), None);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("icon.svg")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
    }
}
