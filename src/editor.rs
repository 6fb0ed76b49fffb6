use thiserror::Error;
use uuid::Uuid;

use crate::article::{Article, ArticleContent, Category, Section};
use crate::generator;
use crate::text_utils::today_short_pt;

const DEFAULT_AUTHOR: &str = "ConstruAcademy Editor";
const DEFAULT_READ_TIME: &str = "5 min read";
const DEFAULT_COVER: &str =
    "https://images.unsplash.com/photo-1503387762-592deb58ef4e?q=80&w=1200&auto=format&fit=crop";

/// Closed set of editor mutations. The form layer translates submitted
/// fields into these; nothing else can touch a draft, so a malformed partial
/// update fails loudly instead of writing an arbitrary key.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftCommand {
    SetTitle(String),
    SetExcerpt(String),
    SetAuthor(String),
    SetDate(String),
    SetReadTime(String),
    SetCategory(Category),
    SetPremium(bool),
    SetImageUrl(String),
    AddTag(String),
    RemoveTag(String),
    SetIntro(String),
    AddSection,
    RemoveSection(usize),
    SetSectionHeading(usize, String),
    SetSectionBody(usize, String),
    SetConclusion(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("seção {0} não existe")]
    SectionOutOfRange(usize),
    #[error("tag vazia")]
    EmptyTag,
    #[error("categoria desconhecida: {0}")]
    UnknownCategory(String),
}

/// Mutable working copy of an article inside the editor. Commands apply one
/// by one; [`ArticleDraft::finish`] runs the on-submit validation.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub image_url: String,
    pub is_premium: bool,
    pub content: ArticleContent,
}

impl ArticleDraft {
    /// Fresh draft with the editor defaults and a `manual-` id.
    pub fn new() -> ArticleDraft {
        ArticleDraft {
            id: format!("manual-{}", Uuid::new_v4()),
            title: String::new(),
            excerpt: String::new(),
            author: DEFAULT_AUTHOR.to_string(),
            date: today_short_pt(),
            read_time: DEFAULT_READ_TIME.to_string(),
            category: Category::MetodosRapidos,
            tags: vec![],
            image_url: DEFAULT_COVER.to_string(),
            is_premium: false,
            content: ArticleContent {
                intro: String::new(),
                sections: vec![],
                conclusion: String::new(),
            },
        }
    }

    pub fn from_article(article: &Article) -> ArticleDraft {
        ArticleDraft {
            id: article.id.clone(),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            author: article.author.clone(),
            date: article.date.clone(),
            read_time: article.read_time.clone(),
            category: article.category,
            tags: article.tags.clone(),
            image_url: article.image_url.clone(),
            is_premium: article.is_premium,
            content: article.content.clone().unwrap_or_else(|| ArticleContent {
                intro: String::new(),
                sections: vec![],
                conclusion: String::new(),
            }),
        }
    }

    pub fn apply(&mut self, command: DraftCommand) -> Result<(), DraftError> {
        match command {
            DraftCommand::SetTitle(v) => self.title = v,
            DraftCommand::SetExcerpt(v) => self.excerpt = v,
            DraftCommand::SetAuthor(v) => self.author = v,
            DraftCommand::SetDate(v) => self.date = v,
            DraftCommand::SetReadTime(v) => self.read_time = v,
            DraftCommand::SetCategory(v) => self.category = v,
            DraftCommand::SetPremium(v) => self.is_premium = v,
            DraftCommand::SetImageUrl(v) => self.image_url = v,
            DraftCommand::AddTag(tag) => {
                // Insertion order matters for display; duplicates are allowed.
                let tag = tag.trim().to_string();
                if tag.is_empty() {
                    return Err(DraftError::EmptyTag);
                }
                self.tags.push(tag);
            }
            DraftCommand::RemoveTag(tag) => self.tags.retain(|t| t != &tag),
            DraftCommand::SetIntro(v) => self.content.intro = v,
            DraftCommand::AddSection => self.content.sections.push(Section {
                heading: String::new(),
                body: String::new(),
            }),
            DraftCommand::RemoveSection(idx) => {
                if idx >= self.content.sections.len() {
                    return Err(DraftError::SectionOutOfRange(idx));
                }
                self.content.sections.remove(idx);
            }
            DraftCommand::SetSectionHeading(idx, v) => {
                let section = self
                    .content
                    .sections
                    .get_mut(idx)
                    .ok_or(DraftError::SectionOutOfRange(idx))?;
                section.heading = v;
            }
            DraftCommand::SetSectionBody(idx, v) => {
                let section = self
                    .content
                    .sections
                    .get_mut(idx)
                    .ok_or(DraftError::SectionOutOfRange(idx))?;
                section.body = v;
            }
            DraftCommand::SetConclusion(v) => self.content.conclusion = v,
        }
        Ok(())
    }

    /// Fresh pollinations cover for the "AI 3D" affordance.
    pub fn regenerate_cover(&mut self, seed: u32) {
        self.image_url = generator::animated_cover_url(&seed.to_string());
    }

    /// On-submit validation: display strings have no rules beyond non-empty
    /// for the title and the excerpt.
    pub fn finish(self) -> Result<Article, Vec<String>> {
        let mut problems = vec![];
        if self.title.trim().is_empty() {
            problems.push("O título é obrigatório.".to_string());
        }
        if self.excerpt.trim().is_empty() {
            problems.push("O resumo é obrigatório.".to_string());
        }
        if !problems.is_empty() {
            return Err(problems);
        }

        Ok(Article {
            id: self.id,
            title: self.title,
            excerpt: self.excerpt,
            author: self.author,
            date: self.date,
            read_time: self.read_time,
            category: self.category,
            tags: self.tags,
            image_url: self.image_url,
            is_premium: self.is_premium,
            content: Some(self.content),
        })
    }
}

/// Translates the submitted editor form into draft commands. Section fields
/// arrive as `section_heading_N` / `section_body_N`; an `AddSection` is
/// interleaved whenever a new index appears, so applying the commands to a
/// sectionless draft rebuilds the sections in form order.
pub fn commands_from_form(pairs: &[(String, String)]) -> Result<Vec<DraftCommand>, DraftError> {
    let mut commands = vec![];
    let mut section_count = 0usize;

    for (key, value) in pairs {
        let command = match key.as_str() {
            "title" => Some(DraftCommand::SetTitle(value.clone())),
            "excerpt" => Some(DraftCommand::SetExcerpt(value.clone())),
            "author" => Some(DraftCommand::SetAuthor(value.clone())),
            "date" => Some(DraftCommand::SetDate(value.clone())),
            "read_time" => Some(DraftCommand::SetReadTime(value.clone())),
            "category" => {
                let category = Category::from_label(value)
                    .ok_or_else(|| DraftError::UnknownCategory(value.clone()))?;
                Some(DraftCommand::SetCategory(category))
            }
            "is_premium" => Some(DraftCommand::SetPremium(value == "on" || value == "true")),
            "image_url" => Some(DraftCommand::SetImageUrl(value.clone())),
            "tags" => {
                for tag in value.split(',') {
                    let tag = tag.trim();
                    if !tag.is_empty() {
                        commands.push(DraftCommand::AddTag(tag.to_string()));
                    }
                }
                None
            }
            "intro" => Some(DraftCommand::SetIntro(value.clone())),
            "conclusion" => Some(DraftCommand::SetConclusion(value.clone())),
            _ => {
                if let Some(idx) = key.strip_prefix("section_heading_") {
                    let idx: usize = idx.parse().map_err(|_| DraftError::SectionOutOfRange(usize::MAX))?;
                    while section_count <= idx {
                        commands.push(DraftCommand::AddSection);
                        section_count += 1;
                    }
                    Some(DraftCommand::SetSectionHeading(idx, value.clone()))
                } else if let Some(idx) = key.strip_prefix("section_body_") {
                    let idx: usize = idx.parse().map_err(|_| DraftError::SectionOutOfRange(usize::MAX))?;
                    while section_count <= idx {
                        commands.push(DraftCommand::AddSection);
                        section_count += 1;
                    }
                    Some(DraftCommand::SetSectionBody(idx, value.clone()))
                } else {
                    // id and submit buttons are handled by the route, not the draft.
                    None
                }
            }
        };

        if let Some(command) = command {
            commands.push(command);
        }
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn form_round_trips_into_a_full_article() {
        let form = pairs(&[
            ("title", "Nova Matéria"),
            ("category", "Estudos de Caso"),
            ("is_premium", "on"),
            ("excerpt", "Resumo da matéria"),
            ("image_url", "https://example.com/capa.jpg"),
            ("tags", "Obra, Vendas"),
            ("intro", "Abertura"),
            ("section_heading_0", "Estratégia"),
            ("section_body_0", "Corpo 1"),
            ("section_heading_1", "Operação"),
            ("section_body_1", "Corpo 2"),
            ("conclusion", "Veredito"),
        ]);

        let mut draft = ArticleDraft::new();
        for command in commands_from_form(&form).unwrap() {
            draft.apply(command).unwrap();
        }
        let article = draft.finish().unwrap();

        assert_eq!(article.title, "Nova Matéria");
        assert_eq!(article.category, Category::EstudosDeCaso);
        assert!(article.is_premium);
        assert_eq!(article.tags, vec!["Obra", "Vendas"]);
        let content = article.content.unwrap();
        assert_eq!(content.sections.len(), 2);
        assert_eq!(content.sections[1].heading, "Operação");
        assert_eq!(content.conclusion, "Veredito");
        assert!(article.id.starts_with("manual-"));
    }

    #[test]
    fn section_commands_reject_out_of_range_indices() {
        let mut draft = ArticleDraft::new();
        let err = draft
            .apply(DraftCommand::SetSectionBody(3, "x".to_string()))
            .unwrap_err();
        assert_eq!(err, DraftError::SectionOutOfRange(3));

        let err = draft.apply(DraftCommand::RemoveSection(0)).unwrap_err();
        assert_eq!(err, DraftError::SectionOutOfRange(0));
    }

    #[test]
    fn blank_required_fields_fail_on_submit() {
        let mut draft = ArticleDraft::new();
        draft.apply(DraftCommand::SetTitle("  ".to_string())).unwrap();
        let problems = draft.finish().unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("título"));
    }

    #[test]
    fn tags_keep_insertion_order_and_allow_duplicates() {
        let mut draft = ArticleDraft::new();
        for tag in ["Vendas", "Obra", "Vendas"] {
            draft.apply(DraftCommand::AddTag(tag.to_string())).unwrap();
        }
        assert_eq!(draft.tags, vec!["Vendas", "Obra", "Vendas"]);

        draft
            .apply(DraftCommand::RemoveTag("Vendas".to_string()))
            .unwrap();
        assert_eq!(draft.tags, vec!["Obra"]);

        let err = draft.apply(DraftCommand::AddTag("  ".to_string())).unwrap_err();
        assert_eq!(err, DraftError::EmptyTag);
    }

    #[test]
    fn unknown_category_is_rejected_at_parse_time() {
        let form = pairs(&[("category", "Fofocas")]);
        let err = commands_from_form(&form).unwrap_err();
        assert_eq!(err, DraftError::UnknownCategory("Fofocas".to_string()));
    }

    #[test]
    fn regenerated_cover_embeds_the_seed() {
        let mut draft = ArticleDraft::new();
        let before = draft.image_url.clone();
        draft.regenerate_cover(4242);
        assert_ne!(draft.image_url, before);
        assert!(draft.image_url.contains("image.pollinations.ai"));
        assert!(draft.image_url.contains("seed=4242"));
    }

    #[test]
    fn editing_preserves_the_existing_id() {
        let article = crate::seed::initial_feed().remove(0);
        let draft = ArticleDraft::from_article(&article);
        assert_eq!(draft.id, article.id);
        assert_eq!(draft.content.sections.len(), 3);
    }
}
