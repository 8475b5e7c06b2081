//! Single binary web server: leaderboard page at `/`, ranked JSON via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! ROSTER_CSV points at a roster file (defaults to the sample roster).
//! SESSION_KEY (64+ bytes) keeps sort choices valid across restarts.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get,
    middleware::Logger,
    post,
    web::{self, Data, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_leaderboard::{
    rank_players, roster, LeaderboardError, Medal, PlayerRecord, RankedPlayer, SortDirection,
    SortKey, SortSpec,
};
use serde::{Deserialize, Serialize};

/// Immutable roster shared by all workers.
type AppState = Data<Vec<PlayerRecord>>;

/// Session entry holding the client's current SortSpec.
const SORT_SESSION_KEY: &str = "sort";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// One table row: the ranked player plus its podium medal, if any.
#[derive(Serialize)]
struct LeaderboardRow<'a> {
    #[serde(flatten)]
    player: &'a RankedPlayer,
    medal: Option<Medal>,
}

/// Header cell: column key and its sort indicator (only set on the active column).
#[derive(Serialize)]
struct ColumnHeader {
    key: SortKey,
    indicator: Option<SortDirection>,
}

#[derive(Serialize)]
struct LeaderboardResponse<'a> {
    sort: SortSpec,
    columns: Vec<ColumnHeader>,
    players: Vec<LeaderboardRow<'a>>,
}

/// Optional per-request sort override (e.g. /api/leaderboard?key=name&direction=desc).
#[derive(Deserialize)]
struct SortQuery {
    key: Option<String>,
    direction: Option<String>,
}

impl SortQuery {
    /// Apply the override on top of `current`. A key without a direction uses the column default.
    fn resolve(&self, current: SortSpec) -> Result<SortSpec, LeaderboardError> {
        let key = match &self.key {
            Some(k) => k.parse::<SortKey>()?,
            None => current.key,
        };
        let direction = match (&self.direction, &self.key) {
            (Some(d), _) => d.parse::<SortDirection>()?,
            (None, Some(_)) => key.default_direction(),
            (None, None) => current.direction,
        };
        Ok(SortSpec::new(key, direction))
    }
}

/// Sort spec stored in the session, or the default one. An unreadable entry falls back to the default.
fn current_sort(session: &Session) -> SortSpec {
    match session.get::<SortSpec>(SORT_SESSION_KEY) {
        Ok(Some(spec)) => spec,
        Ok(None) => SortSpec::default(),
        Err(e) => {
            log::warn!("Ignoring unreadable sort in session: {}", e);
            SortSpec::default()
        }
    }
}

/// Rank the roster with `spec` and render the JSON body.
fn leaderboard_response(records: &[PlayerRecord], spec: SortSpec) -> HttpResponse {
    let ranked = rank_players(records, spec);
    let body = LeaderboardResponse {
        sort: spec,
        columns: SortKey::ALL
            .into_iter()
            .map(|key| ColumnHeader {
                key,
                indicator: spec.indicator(key),
            })
            .collect(),
        players: ranked
            .iter()
            .map(|player| LeaderboardRow {
                player,
                medal: player.medal(),
            })
            .collect(),
    };
    HttpResponse::Ok().json(body)
}

fn bad_request(e: LeaderboardError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-leaderboard",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Ranked leaderboard using the session's sort (query parameters override it for this request only).
#[get("/api/leaderboard")]
async fn api_get_leaderboard(state: AppState, session: Session, query: Query<SortQuery>) -> HttpResponse {
    match query.resolve(current_sort(&session)) {
        Ok(spec) => leaderboard_response(&state, spec),
        Err(e) => bad_request(e),
    }
}

/// Header click: toggle the session's sort for `key` and return the re-ranked leaderboard.
#[post("/api/leaderboard/sort/{key}")]
async fn api_toggle_sort(state: AppState, session: Session, path: Path<String>) -> HttpResponse {
    let key = match path.parse::<SortKey>() {
        Ok(k) => k,
        Err(e) => return bad_request(e),
    };
    let spec = current_sort(&session).toggle(key);
    if let Err(e) = session.insert(SORT_SESSION_KEY, spec) {
        log::error!("Could not store sort in session: {}", e);
        return HttpResponse::InternalServerError().body("session error");
    }
    leaderboard_response(&state, spec)
}

/// Forget the session's sort and return the leaderboard in default order.
#[delete("/api/leaderboard/sort")]
async fn api_reset_sort(state: AppState, session: Session) -> HttpResponse {
    session.remove(SORT_SESSION_KEY);
    leaderboard_response(&state, SortSpec::default())
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Routes shared by the server and the handler tests.
fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index_async))
        .service(api_health)
        .service(favicon)
        .service(api_get_leaderboard)
        .service(api_toggle_sort)
        .service(api_reset_sort);
}

/// Cookie-backed sessions. The app is served over plain HTTP, so the cookie is not marked secure.
fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("leaderboard".to_string())
        .cookie_secure(false)
        .build()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// SESSION_KEY if it is long enough, else a fresh key (sort choices reset on restart).
fn session_key() -> Key {
    match std::env::var("SESSION_KEY") {
        Ok(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        Ok(_) => {
            log::warn!("SESSION_KEY shorter than 64 bytes; generating a random key");
            Key::generate()
        }
        Err(_) => Key::generate(),
    }
}

/// ROSTER_CSV if set, else the sample roster.
fn load_roster() -> std::io::Result<Vec<PlayerRecord>> {
    match std::env::var("ROSTER_CSV") {
        Ok(path) => roster::load(&path).map_err(|e| {
            log::error!("{}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e)
        }),
        Err(_) => {
            log::info!("ROSTER_CSV not set; using sample roster");
            Ok(roster::sample())
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let state: AppState = Data::new(load_roster()?);
    let key = session_key();
    log::info!(
        "Starting server at http://{}:{} with {} player(s)",
        bind.0,
        bind.1,
        state.len()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(session_middleware(key.clone()))
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    fn roster() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("Zed", 10, 0, 0, 10),
            PlayerRecord::new("Amy", 5, 5, 0, 10),
            PlayerRecord::new("Bob", 2, 6, 2, 10),
            PlayerRecord::new("Cat", 0, 0, 0, 0),
        ]
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(roster()))
                    .wrap(session_middleware(Key::generate()))
                    .configure(configure),
            )
            .await
        };
    }

    fn names(body: &Value) -> Vec<&str> {
        body["players"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ok"], true);
    }

    #[actix_web::test]
    async fn default_leaderboard_is_by_win_percentage() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), ["Zed", "Amy", "Bob", "Cat"]);
        assert_eq!(body["sort"], serde_json::json!({ "key": "winPercentage", "direction": "desc" }));
        assert_eq!(body["players"][0]["rank"], 1);
        assert_eq!(body["players"][0]["winPercentage"], 100);
        assert_eq!(body["players"][0]["medal"], "gold");
        assert_eq!(body["players"][3]["medal"], Value::Null);
        let active: Vec<_> = body["columns"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|c| !c["indicator"].is_null())
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["key"], "winPercentage");
        assert_eq!(active[0]["indicator"], "desc");
    }

    #[actix_web::test]
    async fn query_overrides_sort() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/leaderboard?key=name").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), ["Amy", "Bob", "Cat", "Zed"]);

        let req = test::TestRequest::get()
            .uri("/api/leaderboard?key=name&direction=desc")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), ["Zed", "Cat", "Bob", "Amy"]);
    }

    #[actix_web::test]
    async fn unknown_sort_values_are_rejected() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/leaderboard?key=elo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/leaderboard?direction=sideways")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/api/leaderboard/sort/elo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn toggle_is_remembered_in_session() {
        let app = app!();
        let req = test::TestRequest::post().uri("/api/leaderboard/sort/name").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "leaderboard")
            .expect("session cookie")
            .into_owned();
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["sort"]["direction"], "asc");
        assert_eq!(names(&body), ["Amy", "Bob", "Cat", "Zed"]);

        let req = test::TestRequest::get()
            .uri("/api/leaderboard")
            .cookie(cookie.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), ["Amy", "Bob", "Cat", "Zed"]);

        // Same column again flips the direction.
        let req = test::TestRequest::post()
            .uri("/api/leaderboard/sort/name")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sort"]["direction"], "desc");
        assert_eq!(names(&body), ["Zed", "Cat", "Bob", "Amy"]);
    }

    #[actix_web::test]
    async fn reset_restores_default_sort() {
        let app = app!();
        let req = test::TestRequest::delete().uri("/api/leaderboard/sort").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sort"]["key"], "winPercentage");
        assert_eq!(names(&body), ["Zed", "Amy", "Bob", "Cat"]);
    }

    #[::core::prelude::v1::test]
    fn query_direction_alone_keeps_current_key() {
        let query = SortQuery {
            key: None,
            direction: Some("asc".to_string()),
        };
        let spec = query.resolve(SortSpec::default()).unwrap();
        assert_eq!(spec, SortSpec::new(SortKey::WinPercentage, SortDirection::Ascending));
    }
}
