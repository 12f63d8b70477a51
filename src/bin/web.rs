//! Web server: tournament data and result entry over a REST API, optional static frontend.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DATA_DIR (JSON files), STATIC_DIR (frontend build).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::sync::RwLock;
use world_cup_tracker::{
    champion, upcoming_matches, MatchId, MatchUpdate, NewMatch, Round, ScoreUpdate,
    SnapshotStore, TeamId, Tournament, TournamentError,
};

/// Live tournament plus where it is persisted. The write lock serializes mutations.
struct AppData {
    tournament: RwLock<Tournament>,
    store: SnapshotStore,
}

type AppState = Data<AppData>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlayoffWinnerBody {
    #[serde(default)]
    winner: Option<TeamId>,
}

#[derive(Deserialize)]
struct UpcomingQuery {
    #[serde(default = "default_upcoming_limit")]
    limit: usize,
}

fn default_upcoming_limit() -> usize {
    5
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: knockout round and match id (e.g. /api/knockout/{round}/{id})
#[derive(Deserialize)]
struct KnockoutPath {
    round: String,
    id: MatchId,
}

/// Path segment: playoff or team id.
#[derive(Deserialize)]
struct KeyPath {
    id: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        e if e.is_not_found() => HttpResponse::NotFound().json(body),
        TournamentError::Storage(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Apply `change` to a copy of the live tournament, persist it, then swap it in.
async fn commit<T, F>(state: &AppState, change: F) -> Result<T, TournamentError>
where
    F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
{
    let mut live = state.tournament.write().await;
    let mut next = live.clone();
    let out = change(&mut next)?;
    state.store.save(next.snapshot()).await?;
    *live = next;
    Ok(out)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "world-cup-tracker",
    })
}

#[get("/api/teams")]
async fn api_teams(state: AppState) -> HttpResponse {
    let t = state.tournament.read().await;
    HttpResponse::Ok().json(serde_json::json!({ "teams": t.snapshot().teams }))
}

#[get("/api/groups")]
async fn api_groups(state: AppState) -> HttpResponse {
    let t = state.tournament.read().await;
    HttpResponse::Ok().json(serde_json::json!({ "groups": t.snapshot().groups }))
}

#[get("/api/playoffs")]
async fn api_playoffs(state: AppState) -> HttpResponse {
    let t = state.tournament.read().await;
    HttpResponse::Ok().json(serde_json::json!({ "playoffs": t.snapshot().playoffs }))
}

#[get("/api/matches")]
async fn api_matches(state: AppState) -> HttpResponse {
    let t = state.tournament.read().await;
    HttpResponse::Ok().json(&t.snapshot().matches)
}

/// Unplayed matches from now on, soonest first.
#[get("/api/matches/upcoming")]
async fn api_upcoming(state: AppState, query: Query<UpcomingQuery>) -> HttpResponse {
    let t = state.tournament.read().await;
    let now = Utc::now().naive_utc();
    HttpResponse::Ok().json(upcoming_matches(t.snapshot(), now, query.limit))
}

/// Group tables plus the best third-placed teams (once the group stage is nearly done).
#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    let t = state.tournament.read().await;
    HttpResponse::Ok().json(t.standings_report())
}

/// Decided matches of one team, in tournament order.
#[get("/api/teams/{id}/path")]
async fn api_team_path(state: AppState, path: Path<KeyPath>) -> HttpResponse {
    let t = state.tournament.read().await;
    if t.snapshot().team(&path.id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "Team not found" }));
    }
    HttpResponse::Ok().json(t.team_path(&path.id))
}

#[get("/api/champion")]
async fn api_champion(state: AppState) -> HttpResponse {
    let t = state.tournament.read().await;
    HttpResponse::Ok().json(serde_json::json!({ "champion": champion(t.snapshot()) }))
}

/// Enter or edit a match result; standings and bracket are re-resolved.
#[put("/api/matches/{id}")]
async fn api_update_match(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchUpdate>,
) -> HttpResponse {
    match commit(&state, |t| t.apply_match_result(path.id, &body)).await {
        Ok(m) => {
            log::info!("Match {} updated", path.id);
            HttpResponse::Ok().json(m)
        }
        Err(e) => error_response(&e),
    }
}

/// Add a group-stage fixture.
#[post("/api/matches")]
async fn api_add_match(state: AppState, body: Json<NewMatch>) -> HttpResponse {
    match commit(&state, |t| Ok(t.add_match(&body))).await {
        Ok(m) => {
            log::info!("Match {} added", m.id);
            HttpResponse::Ok().json(m)
        }
        Err(e) => error_response(&e),
    }
}

/// Enter a knockout result for a match in a given round.
#[put("/api/knockout/{round}/{id}")]
async fn api_update_knockout(
    state: AppState,
    path: Path<KnockoutPath>,
    body: Json<ScoreUpdate>,
) -> HttpResponse {
    let round: Round = match path.round.parse() {
        Ok(round) => round,
        Err(e) => return error_response(&e),
    };
    match commit(&state, |t| t.apply_knockout_result(round, path.id, &body)).await {
        Ok(m) => {
            log::info!("Knockout match {} ({}) updated", path.id, round);
            HttpResponse::Ok().json(m)
        }
        Err(e) => error_response(&e),
    }
}

/// Set (or clear with null) a playoff winner.
#[put("/api/playoffs/{id}/winner")]
async fn api_set_playoff_winner(
    state: AppState,
    path: Path<KeyPath>,
    body: Json<PlayoffWinnerBody>,
) -> HttpResponse {
    let winner = body.into_inner().winner;
    match commit(&state, |t| t.set_playoff_winner(&path.id, winner)).await {
        Ok(winner) => {
            log::info!("Playoff {} winner set to {:?}", path.id, winner);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "winner": winner,
                "playoffId": path.id,
            }))
        }
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = env_path("DATA_DIR", "data");
    let static_dir = env_path("STATIC_DIR", "dist");

    let store = SnapshotStore::new(&data_dir);
    let snapshot = store
        .load()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let tournament = Tournament::new(snapshot);
    log::info!(
        "Loaded {} teams, {} matches, {} bracket slots from {}",
        tournament.snapshot().teams.len(),
        tournament.snapshot().matches.iter().count(),
        tournament.plan().len(),
        data_dir.display()
    );
    store
        .save(tournament.snapshot())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let state = Data::new(AppData {
        tournament: RwLock::new(tournament),
        store,
    });

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_teams)
            .service(api_team_path)
            .service(api_groups)
            .service(api_playoffs)
            .service(api_upcoming)
            .service(api_matches)
            .service(api_standings)
            .service(api_champion)
            .service(api_update_match)
            .service(api_add_match)
            .service(api_update_knockout)
            .service(api_set_playoff_winner);
        if static_dir.is_dir() {
            app.service(Files::new("/", &static_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind(bind)?
    .run()
    .await
}
