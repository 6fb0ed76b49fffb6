use std::fs;
use std::path::{Path, PathBuf};

use spdlog::info;

use crate::article::{Article, ArticleContent};
use crate::error::{SiteError, SiteResult};
use crate::seed;

/// Fixed storage key. Bumping the suffix orphans state persisted under the
/// previous key instead of migrating it.
pub const STORAGE_KEY: &str = "construacademy_articles_v4";

/// Backing store for the serialized article list. One key, full overwrite on
/// every mutation.
pub trait StateBackend {
    /// Returns `None` when nothing was ever persisted under the key.
    fn load(&self) -> SiteResult<Option<Vec<Article>>>;
    fn persist(&self, articles: &[Article]) -> SiteResult<()>;
}

/// The shipped backend: a single JSON document in the data directory, named
/// after [`STORAGE_KEY`].
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: &Path) -> JsonFileBackend {
        JsonFileBackend {
            path: data_dir.join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> SiteResult<Option<Vec<Article>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<Article>>(&raw) {
            Ok(articles) => Ok(Some(articles)),
            Err(e) => Err(SiteError::StorageCorruption(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn persist(&self, articles: &[Article]) -> SiteResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(articles)
            .map_err(|e| SiteError::StorageCorruption(e.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory article list mirrored to a [`StateBackend`] after every
/// mutation. Ordering is display ordering: new articles are prepended.
pub struct ArticleStore {
    articles: Vec<Article>,
    backend: Box<dyn StateBackend + Send>,
}

impl std::fmt::Debug for ArticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleStore")
            .field("articles", &self.articles)
            .finish_non_exhaustive()
    }
}

impl ArticleStore {
    /// Reads the persisted list, installing and persisting the hardcoded
    /// launch feed when the key is empty. Corrupt state is an error, not a
    /// silent reseed.
    pub fn open(backend: Box<dyn StateBackend + Send>) -> SiteResult<ArticleStore> {
        let articles = match backend.load()? {
            Some(articles) => articles,
            None => {
                info!("no persisted state under {}, installing launch feed", STORAGE_KEY);
                let feed = seed::initial_feed();
                backend.persist(&feed)?;
                feed
            }
        };

        Ok(ArticleStore { articles, backend })
    }

    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Replace-in-place when the id matches an existing record, otherwise
    /// prepend. Uniqueness stays caller-enforced.
    pub fn upsert(&mut self, article: Article) -> SiteResult<()> {
        match self.articles.iter_mut().find(|a| a.id == article.id) {
            Some(slot) => *slot = article,
            None => self.articles.insert(0, article),
        }
        self.backend.persist(&self.articles)
    }

    /// Removes the id-matched record. Returns `false` (and skips the write)
    /// when nothing matched.
    pub fn delete(&mut self, id: &str) -> SiteResult<bool> {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        if self.articles.len() == before {
            return Ok(false);
        }
        self.backend.persist(&self.articles)?;
        Ok(true)
    }

    /// Lazy body fill on first open. A generation result for an article that
    /// was deleted while the request was in flight is dropped here.
    pub fn fill_content(&mut self, id: &str, content: ArticleContent) -> SiteResult<Article> {
        let article = self
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SiteError::NotFound(id.to_string()))?;
        article.content = Some(content);
        let filled = article.clone();
        self.backend.persist(&self.articles)?;
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Category, Section};
    use tempfile::TempDir;

    fn sample(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Título {}", id),
            excerpt: "Resumo".to_string(),
            author: "Editor".to_string(),
            date: "09 Dez".to_string(),
            read_time: "5 min leitura".to_string(),
            category: Category::MetodosRapidos,
            tags: vec!["Vendas".to_string()],
            image_url: "https://example.com/capa.jpg".to_string(),
            is_premium: false,
            content: None,
        }
    }

    fn open_in(dir: &TempDir) -> ArticleStore {
        ArticleStore::open(Box::new(JsonFileBackend::new(dir.path()))).unwrap()
    }

    #[test]
    fn first_open_installs_and_persists_the_launch_feed() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir);
        assert_eq!(store.list().len(), seed::initial_feed().len());

        let backend = JsonFileBackend::new(dir.path());
        assert!(backend.path().exists(), "seed must be persisted immediately");
    }

    #[test]
    fn persistence_round_trips_field_for_field() {
        let dir = TempDir::new().unwrap();

        for count in [0usize, 1, 3] {
            let mut articles: Vec<Article> = (0..count).map(|i| sample(&format!("a{}", i))).collect();
            if let Some(first) = articles.first_mut() {
                first.content = Some(ArticleContent {
                    intro: "intro".to_string(),
                    sections: vec![Section {
                        heading: "h".to_string(),
                        body: "b".to_string(),
                    }],
                    conclusion: "fim".to_string(),
                });
            }

            let backend = JsonFileBackend::new(dir.path());
            backend.persist(&articles).unwrap();
            let loaded = backend.load().unwrap().unwrap();
            assert_eq!(loaded, articles);
        }
    }

    #[test]
    fn corrupt_state_is_reported_not_reseeded() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        std::fs::write(backend.path(), "{definitely not an article list").unwrap();

        let err = ArticleStore::open(Box::new(JsonFileBackend::new(dir.path()))).unwrap_err();
        assert!(err.is_storage_corruption(), "got {:?}", err);
    }

    #[test]
    fn upsert_replaces_in_place_and_prepends_novel_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        let initial_len = store.list().len();

        store.upsert(sample("novo-artigo")).unwrap();
        assert_eq!(store.list().len(), initial_len + 1);
        assert_eq!(store.list()[0].id, "novo-artigo");

        store.upsert(sample("mais-um")).unwrap();
        assert_eq!(store.list()[0].id, "mais-um");
        assert_eq!(store.list()[1].id, "novo-artigo");

        let mut edited = sample("novo-artigo");
        edited.title = "Título editado".to_string();
        store.upsert(edited).unwrap();
        assert_eq!(store.list().len(), initial_len + 2);
        assert_eq!(store.list()[1].id, "novo-artigo", "position preserved");
        assert_eq!(store.list()[1].title, "Título editado");
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.upsert(sample("vai-embora")).unwrap();
        let len = store.list().len();

        assert!(store.delete("vai-embora").unwrap());
        assert_eq!(store.list().len(), len - 1);
        assert!(store.get("vai-embora").is_none());

        assert!(!store.delete("vai-embora").unwrap(), "second delete is a no-op");
    }

    #[test]
    fn mutations_survive_a_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open_in(&dir);
            store.upsert(sample("persistido")).unwrap();
            store
                .fill_content(
                    "persistido",
                    ArticleContent {
                        intro: "gerado".to_string(),
                        sections: vec![Section {
                            heading: "s1".to_string(),
                            body: "corpo".to_string(),
                        }],
                        conclusion: "fim".to_string(),
                    },
                )
                .unwrap();
        }

        let store = open_in(&dir);
        let article = store.get("persistido").unwrap();
        assert_eq!(article.content.as_ref().unwrap().intro, "gerado");
    }

    #[test]
    fn fill_content_for_a_deleted_article_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        let err = store
            .fill_content("nunca-existiu", ArticleContent::empty())
            .unwrap_err();
        assert!(matches!(err, SiteError::NotFound(_)));
    }
}
