use serde::{Deserialize, Serialize};

/// The four editorial desks of the site. The serialized labels are the exact
/// Portuguese strings the persisted state uses, so a state file written by an
/// earlier deployment round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Métodos Rápidos")]
    MetodosRapidos,
    #[serde(rename = "Estudos de Caso")]
    EstudosDeCaso,
    #[serde(rename = "Hacks de Marketing")]
    HacksDeMarketing,
    #[serde(rename = "Contingência")]
    Contingencia,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::MetodosRapidos,
        Category::EstudosDeCaso,
        Category::HacksDeMarketing,
        Category::Contingencia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::MetodosRapidos => "Métodos Rápidos",
            Category::EstudosDeCaso => "Estudos de Caso",
            Category::HacksDeMarketing => "Hacks de Marketing",
            Category::Contingencia => "Contingência",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// Structured article body. Absent on an [`Article`] until it is authored in
/// the editor or lazily generated on first open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub intro: String,
    pub sections: Vec<Section>,
    pub conclusion: String,
}

impl ArticleContent {
    pub fn empty() -> ArticleContent {
        ArticleContent {
            intro: String::new(),
            sections: vec![Section {
                heading: String::new(),
                body: String::new(),
            }],
            conclusion: String::new(),
        }
    }
}

/// The sole domain entity. Field names serialize in camelCase to match the
/// state layout the original deployment persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ArticleContent>,
}

impl Article {
    /// Shell for a custom-topic request. The body is filled by the generator
    /// before the article enters the store.
    pub fn custom_for_topic(topic: &str, is_premium: bool, seed: &str) -> Article {
        Article {
            id: format!("custom-{}", seed),
            title: topic.to_string(),
            excerpt: "Análise operacional gerada por IA sobre o tópico solicitado.".to_string(),
            author: "ConstruAcademy AI".to_string(),
            date: "Hoje".to_string(),
            read_time: "5 min leitura".to_string(),
            category: Category::MetodosRapidos,
            tags: vec!["Custom".to_string(), "Construção".to_string()],
            image_url: crate::generator::blueprint_cover_url(seed),
            is_premium,
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), Some(cat));
        }
        assert_eq!(Category::from_label("Fofocas"), None);
    }

    #[test]
    fn category_serializes_as_portuguese_label() {
        let json = serde_json::to_string(&Category::MetodosRapidos).unwrap();
        assert_eq!(json, "\"Métodos Rápidos\"");
        let back: Category = serde_json::from_str("\"Contingência\"").unwrap();
        assert_eq!(back, Category::Contingencia);
    }

    #[test]
    fn article_without_content_omits_the_field() {
        let article = Article {
            id: "a1".to_string(),
            title: "t".to_string(),
            excerpt: "e".to_string(),
            author: "a".to_string(),
            date: "09 Dez".to_string(),
            read_time: "5 min leitura".to_string(),
            category: Category::EstudosDeCaso,
            tags: vec![],
            image_url: "https://example.com/x.jpg".to_string(),
            is_premium: false,
            content: None,
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("\"content\""));
        assert!(json.contains("\"readTime\""));
        assert!(json.contains("\"isPremium\""));

        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }
}
