use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::{env, fs, io};

use chrono::Utc;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use rand::Rng;
use serde::Deserialize;
use spdlog::{info, warn};

use crate::article::Article;
use crate::auth::{AdminSession, AuthPolicy, Credentials, StaticCredentials};
use crate::config::Config;
use crate::editor::{self, ArticleDraft, DraftCommand};
use crate::error::{SiteError, SiteResult};
use crate::generator::{GeneratorClient, API_KEY_ENV};
use crate::query_string::QueryString;
use crate::render_cache::RenderCache;
use crate::store::{ArticleStore, JsonFileBackend};
use crate::view::article_renderer::ArticleRenderer;
use crate::view::editor_renderer::EditorRenderer;
use crate::view::feed_renderer::FeedRenderer;
use crate::view::login_renderer::LoginRenderer;
use crate::view::rss_renderer::RssChannel;
use crate::view::ErrorRenderer;

const MSG_ARTICLE_FAILED: &str = "Falha ao carregar artigo. Tente novamente.";
const MSG_GENERATION_FAILED: &str = "Erro ao gerar análise.";
const MSG_GENERATION_BUSY: &str = "Gerando Inteligência de Obra... Recarregue em instantes.";
const MSG_NOT_FOUND: &str = "Matéria não encontrada.";

struct AppState {
    store: ArticleStore,
    session: AdminSession,
    policy: Box<dyn AuthPolicy + Send>,
    // Article ids with a generation request in flight; one per article.
    pending: HashSet<String>,
}

pub struct SiteState {
    config: Config,
    generator: Option<GeneratorClient>,
    cache: RenderCache,
    app: Mutex<AppState>,
}

type State = web::types::State<Arc<SiteState>>;

fn read_template(tpl_dir: &PathBuf, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(full_path)
}

fn html_response(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: &str) -> web::HttpResponse {
    web::HttpResponse::SeeOther()
        .header("Location", location)
        .finish()
}

fn message_page(state: &SiteState, message: &str) -> String {
    let tpl_dir = &state.config.paths.template_dir;
    let rendered = read_template(tpl_dir, "error.tpl")
        .map_err(SiteError::from)
        .and_then(|src| ErrorRenderer::new(&src))
        .map(|renderer| renderer.render(&state.config.site.title, message));
    match rendered {
        Ok(page) => page,
        // The template itself failing must not swallow the message.
        Err(_) => message.to_string(),
    }
}

fn failure_response(state: &SiteState, message: &str) -> web::HttpResponse {
    html_response(message_page(state, message))
}

fn render_feed(state: &SiteState, app: &AppState, qs: &QueryString) -> SiteResult<String> {
    let tpl_src = read_template(&state.config.paths.template_dir, "feed.tpl")?;
    let renderer = FeedRenderer::new(&tpl_src, state.config.defaults.page_size)?;
    Ok(renderer.render(
        &state.config.site.title,
        app.store.list(),
        qs.get_category(),
        qs.get_page(),
        app.session.is_admin(),
    ))
}

fn render_article(state: &SiteState, article: &Article, admin_mode: bool) -> SiteResult<String> {
    let tpl_src = read_template(&state.config.paths.template_dir, "article.tpl")?;
    let renderer = ArticleRenderer::new(&tpl_src)?;
    renderer.render(&state.config.site.title, article, admin_mode)
}

fn render_login(state: &SiteState, error: Option<&str>) -> SiteResult<String> {
    let tpl_src = read_template(&state.config.paths.template_dir, "login.tpl")?;
    let renderer = LoginRenderer::new(&tpl_src)?;
    Ok(renderer.render(&state.config.site.title, error))
}

fn render_editor(
    state: &SiteState,
    draft: &ArticleDraft,
    editing: bool,
    problems: &[String],
) -> SiteResult<String> {
    let tpl_src = read_template(&state.config.paths.template_dir, "editor.tpl")?;
    let renderer = EditorRenderer::new(&tpl_src)?;
    Ok(renderer.render(&state.config.site.title, draft, editing, problems))
}

fn is_admin(state: &SiteState) -> bool {
    state.app.lock().unwrap().session.is_admin()
}

#[web::get("/")]
async fn index(req: HttpRequest, state: State) -> web::HttpResponse {
    let qs = QueryString::from(req.uri().query().unwrap_or(""));
    let app = state.app.lock().unwrap();

    match render_feed(&state, &app, &qs) {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering feed: {}", e)),
    }
}

// Begin: Redirect region --------
#[web::get("/view/{article}")]
async fn view_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/view/{}/", path.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}
// End: Redirect region --------

#[web::get("/view/{article}/")]
async fn view(path: web::types::Path<String>, state: State) -> web::HttpResponse {
    let id = path.into_inner();

    let (mut article, admin_mode) = {
        let app = state.app.lock().unwrap();
        match app.store.get(&id) {
            None => {
                return web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(message_page(&state, MSG_NOT_FOUND));
            }
            Some(found) => (found.clone(), app.session.is_admin()),
        }
    };

    // Admin pages carry the action bar, so only anonymous renders are cached.
    if article.content.is_some() && !admin_mode {
        if let Some(cached) = state.cache.get(&id) {
            return html_response((*cached).clone());
        }
    }

    if article.content.is_none() {
        let generator = match state.generator {
            Some(ref generator) => generator,
            None => {
                warn!("article {} has no body and no generator is configured", id);
                return failure_response(&state, MSG_ARTICLE_FAILED);
            }
        };

        {
            let mut app = state.app.lock().unwrap();
            if !app.pending.insert(id.clone()) {
                return failure_response(&state, MSG_GENERATION_BUSY);
            }
        }

        let result = generator
            .generate_article_content(&article.title, article.is_premium)
            .await;

        let mut app = state.app.lock().unwrap();
        app.pending.remove(&id);

        match result {
            Ok(content) => match app.store.fill_content(&id, content) {
                Ok(filled) => {
                    state.cache.invalidate(&id);
                    article = filled;
                }
                Err(_) => {
                    // Deleted while the request was in flight; drop the result.
                    warn!("discarding generated body for removed article {}", id);
                    return redirect("/");
                }
            },
            Err(e) => {
                warn!("generation for article {} failed: {}", id, e);
                return failure_response(&state, MSG_ARTICLE_FAILED);
            }
        }
    }

    match render_article(&state, &article, admin_mode) {
        Ok(page) => {
            if !admin_mode {
                state.cache.put(&id, page.clone());
            }
            html_response(page)
        }
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering article {}: {}", id, e)),
    }
}

#[derive(Deserialize)]
struct GenerateForm {
    topic: String,
}

#[web::post("/generate")]
async fn generate_custom(form: web::types::Form<GenerateForm>, state: State) -> web::HttpResponse {
    if !is_admin(&state) {
        return redirect("/login");
    }

    let topic = form.topic.trim().to_string();
    if topic.is_empty() {
        return redirect("/");
    }

    let generator = match state.generator {
        Some(ref generator) => generator,
        None => return failure_response(&state, MSG_GENERATION_FAILED),
    };

    let seed = Utc::now().timestamp_millis().to_string();
    let is_premium = rand::rng().random_bool(0.5);
    let mut article = Article::custom_for_topic(&topic, is_premium, &seed);

    match generator.generate_article_content(&topic, is_premium).await {
        Ok(content) => {
            article.content = Some(content);
            let location = format!("/view/{}/", article.id);
            let mut app = state.app.lock().unwrap();
            if let Err(e) = app.store.upsert(article) {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error persisting generated article: {}", e));
            }
            info!("custom article generated for topic '{}'", topic);
            redirect(&location)
        }
        Err(e) => {
            warn!("custom generation for topic '{}' failed: {}", topic, e);
            failure_response(&state, MSG_GENERATION_FAILED)
        }
    }
}

#[web::get("/login")]
async fn login_form(state: State) -> web::HttpResponse {
    match render_login(&state, None) {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering login: {}", e)),
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[web::post("/login")]
async fn login_submit(form: web::types::Form<LoginForm>, state: State) -> web::HttpResponse {
    let credentials = Credentials {
        username: form.username.clone(),
        password: form.password.clone(),
    };

    let verdict = {
        let mut app = state.app.lock().unwrap();
        let AppState {
            ref mut session,
            ref policy,
            ..
        } = *app;
        session.login(policy.as_ref(), &credentials)
    };

    match verdict {
        Ok(()) => {
            info!("editor session opened");
            redirect("/")
        }
        Err(_) => match render_login(&state, Some("Credenciais inválidas.")) {
            Ok(page) => html_response(page),
            Err(e) => web::HttpResponse::InternalServerError()
                .body(format!("Error rendering login: {}", e)),
        },
    }
}

#[web::post("/admin/toggle")]
async fn admin_toggle(state: State) -> web::HttpResponse {
    let mut app = state.app.lock().unwrap();
    let now_admin = app.session.toggle();
    if !now_admin && app.session.needs_login() {
        return redirect("/login");
    }
    redirect("/")
}

#[web::get("/admin/new")]
async fn editor_new(state: State) -> web::HttpResponse {
    if !is_admin(&state) {
        return redirect("/login");
    }

    let mut draft = ArticleDraft::new();
    // The form always opens with one blank section.
    let _ = draft.apply(DraftCommand::AddSection);

    match render_editor(&state, &draft, false, &[]) {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering editor: {}", e)),
    }
}

#[web::get("/admin/edit/{article}")]
async fn editor_edit(path: web::types::Path<String>, state: State) -> web::HttpResponse {
    if !is_admin(&state) {
        return redirect("/login");
    }
    let id = path.into_inner();

    let mut draft = {
        let app = state.app.lock().unwrap();
        match app.store.get(&id) {
            None => {
                return web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(message_page(&state, MSG_NOT_FOUND));
            }
            Some(article) => ArticleDraft::from_article(article),
        }
    };
    if draft.content.sections.is_empty() {
        let _ = draft.apply(DraftCommand::AddSection);
    }

    match render_editor(&state, &draft, true, &[]) {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering editor: {}", e)),
    }
}

#[web::post("/admin/save")]
async fn editor_save(
    form: web::types::Form<Vec<(String, String)>>,
    state: State,
) -> web::HttpResponse {
    if !is_admin(&state) {
        return redirect("/login");
    }
    let pairs = form.into_inner();

    let commands = match editor::commands_from_form(&pairs) {
        Ok(commands) => commands,
        Err(e) => {
            return web::HttpResponse::BadRequest().body(format!("Invalid editor submission: {}", e));
        }
    };

    let mut draft = ArticleDraft::new();
    if let Some(id) = pairs
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.trim())
        .filter(|id| !id.is_empty())
    {
        draft.id = id.to_string();
    }

    for command in commands {
        if let Err(e) = draft.apply(command) {
            return web::HttpResponse::BadRequest().body(format!("Invalid editor submission: {}", e));
        }
    }

    let editing = {
        let app = state.app.lock().unwrap();
        app.store.get(&draft.id).is_some()
    };

    match draft.clone().finish() {
        Ok(article) => {
            let id = article.id.clone();
            {
                let mut app = state.app.lock().unwrap();
                if let Err(e) = app.store.upsert(article) {
                    return web::HttpResponse::InternalServerError()
                        .body(format!("Error persisting article: {}", e));
                }
            }
            state.cache.invalidate(&id);
            info!("article {} saved from the editor", id);
            redirect(&format!("/view/{}/", id))
        }
        Err(problems) => match render_editor(&state, &draft, editing, &problems) {
            Ok(page) => html_response(page),
            Err(e) => web::HttpResponse::InternalServerError()
                .body(format!("Error rendering editor: {}", e)),
        },
    }
}

#[derive(Deserialize)]
struct DeleteForm {
    confirm: Option<String>,
}

#[web::post("/admin/delete/{article}")]
async fn editor_delete(
    path: web::types::Path<String>,
    form: web::types::Form<DeleteForm>,
    state: State,
) -> web::HttpResponse {
    if !is_admin(&state) {
        return redirect("/login");
    }
    let id = path.into_inner();

    // Declining the confirmation is a no-op back on the article.
    let confirmed = matches!(form.confirm.as_deref(), Some("true") | Some("on"));
    if !confirmed {
        return redirect(&format!("/view/{}/", id));
    }

    let deleted = {
        let mut app = state.app.lock().unwrap();
        match app.store.delete(&id) {
            Ok(deleted) => deleted,
            Err(e) => {
                return web::HttpResponse::InternalServerError()
                    .body(format!("Error deleting article: {}", e));
            }
        }
    };
    if deleted {
        state.cache.invalidate(&id);
        info!("article {} deleted", id);
    }
    redirect("/")
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/feed.xml")]
async fn rss_feed(state: State) -> web::HttpResponse {
    let articles: Vec<Article> = {
        let app = state.app.lock().unwrap();
        app.store.list().to_vec()
    };

    let channel = RssChannel {
        ch_title: &state.config.site.title,
        ch_link: &state.config.site.base_url,
        ch_desc: "Inteligência para quem constrói o Brasil",
    };

    match channel.render(&articles) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => web::HttpResponse::InternalServerError().body(format!("Error rendering feed: {}", e)),
    }
}

fn build_generator(config: &Config) -> Option<GeneratorClient> {
    let api_key = match env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => key,
        _ => {
            warn!("{} is not set; article generation is disabled", API_KEY_ENV);
            return None;
        }
    };

    let generator = GeneratorClient::new(
        config.generator.base_url.clone(),
        config.generator.model.clone(),
        api_key,
        std::time::Duration::from_secs(config.generator.timeout_secs),
    );
    match generator {
        Ok(generator) => Some(generator),
        Err(e) => {
            warn!("could not build the generation client: {}", e);
            None
        }
    }
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let backend = JsonFileBackend::new(&config.paths.data_dir);
    let store = ArticleStore::open(Box::new(backend))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    info!("article store open with {} articles", store.list().len());

    let generator = build_generator(&config);
    let cache = RenderCache::new(config.defaults.rendering_cache_enabled);

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;

    let site_state = Arc::new(SiteState {
        config,
        generator,
        cache,
        app: Mutex::new(AppState {
            store,
            session: AdminSession::default(),
            policy: Box::new(StaticCredentials::editor()),
            pending: HashSet::new(),
        }),
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(site_state.clone())
            .service(index)
            .service(public_files)
            .service(rss_feed)
            .service(view)
            .service(view_wo_slash)
            .service(generate_custom)
            .service(login_form)
            .service(login_submit)
            .service(admin_toggle)
            .service(editor_new)
            .service(editor_edit)
            .service(editor_save)
            .service(editor_delete)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
